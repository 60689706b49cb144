//! Error types for the archive codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("archive i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  /// Everything wrong with an archive, collected in one pass. Raised before
  /// any store is written to.
  #[error("import failed: {}", .0.join("; "))]
  Import(Vec<String>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
