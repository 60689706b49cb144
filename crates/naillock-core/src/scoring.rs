//! Checklist scoring and the done-day verdict.

use serde::{Deserialize, Serialize};

use crate::{
  mode::{Mode, PassRule},
  record::{Checklist, DailyRecord},
};

/// A day's score in both representations: weighted points out of 100, and
/// the plain count of checked actions out of the mode's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
  /// Sum of the weights of checked actions; always within `0..=100`.
  pub points:  u8,
  pub checked: usize,
  pub total:   usize,
}

impl Score {
  pub fn percent(&self) -> u8 { self.points }

  /// The count form, e.g. `"2/4"`.
  pub fn fraction(&self) -> String { format!("{}/{}", self.checked, self.total) }
}

/// Score `checklist` under `mode`. Keys the mode does not define are ignored.
pub fn score(mode: &Mode, checklist: &Checklist) -> Score {
  let mut points: u32 = 0;
  let mut checked = 0;
  for action in mode.actions() {
    if checklist.is_checked(&action.key) {
      points += u32::from(action.points);
      checked += 1;
    }
  }
  Score {
    points: points.min(100) as u8,
    checked,
    total: mode.actions().len(),
  }
}

impl PassRule {
  pub fn is_satisfied_by(self, score: &Score) -> bool {
    match self {
      PassRule::AnyAction => score.checked > 0,
      PassRule::MinScore(threshold) => score.points >= threshold,
    }
  }
}

/// Whether `record` counts as a done day under `mode`.
pub fn passes(mode: &Mode, record: &DailyRecord) -> bool {
  mode.pass_rule().is_satisfied_by(&score(mode, &record.actions))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    mode::{ActionSpec, ModeRegistry, ModeSpec},
    progression::TierFamily,
  };

  fn standard() -> Mode { ModeRegistry::builtin().get("standard").unwrap().clone() }

  fn half_done() -> Checklist {
    Checklist::new()
      .with("treatment", true)
      .with("wash", true)
      .with("socks", false)
      .with("shoes", false)
  }

  #[test]
  fn equal_weights_half_done_scores_50_and_fails_80() {
    let mode = standard();
    let s = score(&mode, &half_done());
    assert_eq!(s.points, 50);
    assert_eq!(s.fraction(), "2/4");

    let record = DailyRecord::new("2024-06-01".parse().unwrap(), half_done(), "");
    assert!(!passes(&mode, &record));
  }

  #[test]
  fn unknown_keys_are_ignored() {
    let mode = standard();
    let c = half_done().with("meditate", true);
    assert_eq!(score(&mode, &c).points, 50);
    assert_eq!(score(&mode, &c).checked, 2);
  }

  #[test]
  fn adding_a_checked_action_never_lowers_the_score() {
    let mode = standard();
    let keys: Vec<&str> = mode.keys().collect();
    let mut c = Checklist::new();
    let mut last = score(&mode, &c).points;
    for key in keys {
      c.set(key, true);
      let now = score(&mode, &c).points;
      assert!(now >= last);
      assert!(now <= 100);
      last = now;
    }
    assert_eq!(last, 100);
  }

  #[test]
  fn uneven_weights() {
    let mode = Mode::new(ModeSpec {
      name:      "weighted".into(),
      actions:   vec![
        ActionSpec { key: "treatment".into(), label: "t".into(), points: 70 },
        ActionSpec { key: "wash".into(), label: "w".into(), points: 30 },
      ],
      pass_rule: PassRule::MinScore(70),
      tiers:     TierFamily::Classic,
    })
    .unwrap();

    let c = Checklist::new().with("treatment", true);
    assert_eq!(score(&mode, &c).points, 70);
    let record = DailyRecord::new("2024-06-01".parse().unwrap(), c, "");
    assert!(passes(&mode, &record));
  }

  #[test]
  fn any_action_rule() {
    let registry = ModeRegistry::builtin();
    let basic = registry.get("basic").unwrap();
    let day = "2024-06-01".parse().unwrap();

    let one = DailyRecord::new(day, Checklist::new().with("socks", true), "");
    assert!(passes(basic, &one));

    let none = DailyRecord::new(day, Checklist::new().with("socks", false), "");
    assert!(!passes(basic, &none));

    // Only the mode's own actions count.
    let foreign = DailyRecord::new(day, Checklist::new().with("yoga", true), "");
    assert!(!passes(basic, &foreign));
  }
}
