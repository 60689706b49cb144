//! Core types and engines for the NailLock habit tracker.
//!
//! This crate is free of storage and I/O dependencies. The scoring, streak
//! and progression engines are pure functions of their explicit inputs; the
//! storage backends (e.g. `naillock-store-sqlite`) implement the traits in
//! [`store`].

pub mod day;
pub mod error;
pub mod mode;
pub mod partition;
pub mod photo;
pub mod progression;
pub mod record;
pub mod scoring;
pub mod store;
pub mod streak;
pub mod summary;

pub use error::{Error, Result};
