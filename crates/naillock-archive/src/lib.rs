//! Portable export/import archive for NailLock data.
//!
//! An archive is a gzip-compressed tar file holding:
//!
//! - `daily_log.csv`: `day, <action keys…>, notes`; one row per day. Action
//!   cells are `1`, `0`, or empty when the key was never recorded.
//! - `photos_index.csv`: `id, day, kind, filename, mime`; metadata only.
//! - `photos/{kind}/{day}_{id}{ext}`: one raw file per photo.
//!
//! Importing re-applies day records as upserts (so importing twice is a
//! no-op for logs) and inserts every photo as a new row (so importing twice
//! duplicates photos).

mod container;
mod export;
mod import;
mod tables;

pub mod error;

pub use container::{DAILY_LOG_ENTRY, PHOTOS_DIR, PHOTOS_INDEX_ENTRY};
pub use error::{Error, Result};
pub use export::export;
pub use import::{ImportReport, import};
