//! Daily log records.
//!
//! A record holds only what the user entered. Score, streak and level are
//! derived on read from the raw checklist and are never stored alongside it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day::Day;

// ─── Checklist ───────────────────────────────────────────────────────────────

/// Action key → whether it was done.
///
/// Keys that the active mode does not define are kept (so that switching
/// modes or round-tripping an archive loses nothing) but ignored by scoring.
/// A key that is absent is distinct from a key recorded as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist(BTreeMap<String, bool>);

impl Checklist {
  pub fn new() -> Self { Self::default() }

  /// Builder-style setter.
  pub fn with(mut self, key: impl Into<String>, done: bool) -> Self {
    self.set(key, done);
    self
  }

  pub fn set(&mut self, key: impl Into<String>, done: bool) {
    self.0.insert(key.into(), done);
  }

  /// The recorded value for `key`, or `None` if it was never recorded.
  pub fn get(&self, key: &str) -> Option<bool> { self.0.get(key).copied() }

  /// `true` only if `key` is present and recorded as done.
  pub fn is_checked(&self, key: &str) -> bool { self.get(key).unwrap_or(false) }

  pub fn keys(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

  pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
    self.0.iter().map(|(k, v)| (k.as_str(), *v))
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<String>> FromIterator<(K, bool)> for Checklist {
  fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }
}

// ─── DailyRecord ─────────────────────────────────────────────────────────────

/// One day's log entry. `day` is the natural key: saving the same day again
/// replaces the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
  pub day:     Day,
  pub actions: Checklist,
  #[serde(default)]
  pub notes:   String,
}

impl DailyRecord {
  pub fn new(day: Day, actions: Checklist, notes: impl Into<String>) -> Self {
    Self { day, actions, notes: notes.into() }
  }

  /// The record returned for a day that has never been saved.
  pub fn empty(day: Day) -> Self {
    Self { day, actions: Checklist::new(), notes: String::new() }
  }
}
