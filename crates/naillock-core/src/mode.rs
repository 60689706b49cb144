//! Modes: named checklist configurations.
//!
//! A mode declares the checklist actions, their point weights, the rule that
//! decides whether a day counts toward the streak, and which tier table the
//! level/badge labels come from. Modes are plain configuration data: they are
//! deserialised from config, validated once by [`Mode::new`], and only the
//! validated form is accepted by the engines.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, progression::TierFamily};

// ─── Configuration shapes ────────────────────────────────────────────────────

/// One checklist item and its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
  /// Stable key used in storage and archive columns.
  pub key:    String,
  /// Human-readable prompt.
  pub label:  String,
  pub points: u8,
}

/// What it takes for a day to count as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "threshold", rename_all = "snake_case")]
pub enum PassRule {
  /// At least one of the mode's actions is checked.
  AnyAction,
  /// The day's score reaches the threshold (inclusive).
  MinScore(u8),
}

/// Unvalidated mode configuration, as read from config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSpec {
  pub name:      String,
  pub actions:   Vec<ActionSpec>,
  pub pass_rule: PassRule,
  #[serde(default)]
  pub tiers:     TierFamily,
}

// ─── Mode ────────────────────────────────────────────────────────────────────

/// A validated [`ModeSpec`]: non-empty, unique keys, weights summing to
/// exactly 100, and a score threshold in `1..=100`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
  spec: ModeSpec,
}

impl Mode {
  pub fn new(spec: ModeSpec) -> Result<Self> {
    let invalid = |reason: String| Error::InvalidMode {
      mode: spec.name.clone(),
      reason,
    };

    if spec.name.trim().is_empty() {
      return Err(invalid("name must not be empty".into()));
    }
    if spec.actions.is_empty() {
      return Err(invalid("at least one action is required".into()));
    }

    let mut seen = HashSet::new();
    for action in &spec.actions {
      if action.key.trim().is_empty() {
        return Err(invalid("action keys must not be empty".into()));
      }
      if !seen.insert(action.key.as_str()) {
        return Err(invalid(format!("duplicate action key {:?}", action.key)));
      }
    }

    let total: u32 = spec.actions.iter().map(|a| u32::from(a.points)).sum();
    if total != 100 {
      return Err(invalid(format!("action points sum to {total}, expected 100")));
    }

    if let PassRule::MinScore(threshold) = spec.pass_rule
      && !(1..=100).contains(&threshold)
    {
      return Err(invalid(format!("score threshold {threshold} outside 1..=100")));
    }

    Ok(Self { spec })
  }

  pub fn name(&self) -> &str { &self.spec.name }

  pub fn actions(&self) -> &[ActionSpec] { &self.spec.actions }

  pub fn action(&self, key: &str) -> Option<&ActionSpec> {
    self.spec.actions.iter().find(|a| a.key == key)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.spec.actions.iter().map(|a| a.key.as_str())
  }

  pub fn pass_rule(&self) -> PassRule { self.spec.pass_rule }

  pub fn tiers(&self) -> TierFamily { self.spec.tiers }

  pub fn spec(&self) -> &ModeSpec { &self.spec }
}

// ─── Built-in modes ──────────────────────────────────────────────────────────

fn default_actions() -> Vec<ActionSpec> {
  [
    ("treatment", "Applied treatment (your choice / clinician plan)"),
    ("wash", "Washed + dried properly (especially between toes)"),
    ("socks", "Fresh socks"),
    ("shoes", "Shoes aired / disinfected"),
  ]
  .into_iter()
  .map(|(key, label)| ActionSpec {
    key:    key.into(),
    label:  label.into(),
    points: 25,
  })
  .collect()
}

/// The modes available without any configuration:
///
/// | name       | pass rule     | tiers   |
/// |------------|---------------|---------|
/// | `basic`    | any action    | classic |
/// | `standard` | score ≥ 80    | classic |
/// | `strict`   | score ≥ 90    | sprint  |
pub fn builtin_specs() -> Vec<ModeSpec> {
  vec![
    ModeSpec {
      name:      "basic".into(),
      actions:   default_actions(),
      pass_rule: PassRule::AnyAction,
      tiers:     TierFamily::Classic,
    },
    ModeSpec {
      name:      "standard".into(),
      actions:   default_actions(),
      pass_rule: PassRule::MinScore(80),
      tiers:     TierFamily::Classic,
    },
    ModeSpec {
      name:      "strict".into(),
      actions:   default_actions(),
      pass_rule: PassRule::MinScore(90),
      tiers:     TierFamily::Sprint,
    },
  ]
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Validated modes by name.
#[derive(Debug, Clone, Default)]
pub struct ModeRegistry {
  modes: BTreeMap<String, Mode>,
}

impl ModeRegistry {
  /// A registry holding only the built-in modes.
  pub fn builtin() -> Self {
    let modes = builtin_specs()
      .into_iter()
      .map(|spec| (spec.name.clone(), Mode { spec }))
      .collect();
    Self { modes }
  }

  /// Validate and add `specs`. A spec whose name matches an existing mode
  /// replaces it.
  pub fn with_specs(mut self, specs: impl IntoIterator<Item = ModeSpec>) -> Result<Self> {
    for spec in specs {
      let mode = Mode::new(spec)?;
      self.modes.insert(mode.name().to_owned(), mode);
    }
    Ok(self)
  }

  pub fn get(&self, name: &str) -> Result<&Mode> {
    self
      .modes
      .get(name)
      .ok_or_else(|| Error::UnknownMode(name.to_owned()))
  }

  pub fn names(&self) -> impl Iterator<Item = &str> { self.modes.keys().map(String::as_str) }
}
