//! Error types for `naillock-core`.
//!
//! Every variant here is a validation failure: it is raised before any store
//! is touched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid day {0:?}: expected YYYY-MM-DD")]
  InvalidDay(String),

  #[error("invalid partition id {0:?}")]
  InvalidPartition(String),

  #[error("photo too large ({size} bytes, max {limit}); resize and try again")]
  PhotoTooLarge { size: usize, limit: usize },

  #[error("unknown photo kind: {0:?}")]
  UnknownPhotoKind(String),

  #[error("invalid mode {mode:?}: {reason}")]
  InvalidMode { mode: String, reason: String },

  #[error("unknown mode: {0:?}")]
  UnknownMode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
