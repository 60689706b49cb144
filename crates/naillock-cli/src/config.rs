//! Layered configuration: optional TOML file, then `NAILLOCK_*` environment
//! variables.
//!
//! ```toml
//! store_path = "~/.local/share/naillock/naillock.db"
//! partition  = "default"
//! mode       = "standard"
//!
//! [[modes]]
//! name      = "gentle"
//! pass_rule = { rule = "min_score", threshold = 50 }
//! tiers     = "sprint"
//! actions   = [
//!   { key = "treatment", label = "Applied treatment", points = 60 },
//!   { key = "socks",     label = "Fresh socks",       points = 40 },
//! ]
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use naillock_core::mode::{ModeRegistry, ModeSpec};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// SQLite database file. A leading `~` is expanded.
  pub store_path: PathBuf,
  /// Storage partition used when `--partition` is not given.
  pub partition:  String,
  /// Active mode used when `--mode` is not given.
  pub mode:       String,
  /// Extra modes. A mode named like a built-in replaces it.
  pub modes:      Vec<ModeSpec>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      store_path: PathBuf::from("~/.local/share/naillock/naillock.db"),
      partition:  "default".into(),
      mode:       "standard".into(),
      modes:      Vec::new(),
    }
  }
}

impl AppConfig {
  /// Read `path` (if it exists) and overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("NAILLOCK"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")
  }

  /// Built-in modes plus the configured ones, all validated.
  pub fn registry(&self) -> anyhow::Result<ModeRegistry> {
    ModeRegistry::builtin()
      .with_specs(self.modes.iter().cloned())
      .context("invalid mode in config")
  }

  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
