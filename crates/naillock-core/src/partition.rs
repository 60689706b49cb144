//! Storage partition identifiers.
//!
//! Every store call is scoped to one partition; rows from one partition are
//! never visible through another. How a caller arrives at a stable id (a
//! per-device random key, a config value) is outside this crate.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const MAX_LEN: usize = 64;

/// A validated partition key: 1–64 ASCII alphanumerics, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartitionId(String);

impl PartitionId {
  pub fn new(id: impl Into<String>) -> Result<Self> {
    let id = id.into();
    let valid = !id.is_empty()
      && id.len() <= MAX_LEN
      && id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid { Ok(Self(id)) } else { Err(Error::InvalidPartition(id)) }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PartitionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for PartitionId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::new(s) }
}

impl TryFrom<String> for PartitionId {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::new(s) }
}

impl From<PartitionId> for String {
  fn from(id: PartitionId) -> Self { id.0 }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_generated_style_keys() {
    assert!(PartitionId::new("3f9a0c1d2b4e").is_ok());
    assert!(PartitionId::new("user_dbs-01").is_ok());
  }

  #[test]
  fn rejects_empty_long_and_path_like() {
    assert!(PartitionId::new("").is_err());
    assert!(PartitionId::new("a".repeat(65)).is_err());
    assert!(PartitionId::new("../other").is_err());
    assert!(PartitionId::new("a b").is_err());
  }
}
