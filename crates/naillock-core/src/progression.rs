//! Level and badge labels derived from streak length.
//!
//! Both are step functions over a fixed tier table. Every table starts at 0,
//! so every streak has a label, and thresholds are strictly increasing, so
//! labels never go down as the streak grows.

use serde::{Deserialize, Serialize};

/// Which tier table a mode uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierFamily {
  /// 7 / 14 / 30 / 60 / 90 days.
  #[default]
  Classic,
  /// 5 / 14 / 30 / 60 days.
  Sprint,
}

/// One rung of a tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
  /// Minimum streak length for this tier.
  pub min_streak: u32,
  pub level:      &'static str,
  pub badge:      &'static str,
}

const CLASSIC: &[Tier] = &[
  Tier { min_streak: 0, level: "Starter", badge: "Start" },
  Tier { min_streak: 7, level: "Bronze", badge: "7-Day Bronze" },
  Tier { min_streak: 14, level: "Silver", badge: "14-Day Silver" },
  Tier { min_streak: 30, level: "Gold", badge: "30-Day Gold" },
  Tier { min_streak: 60, level: "Platinum", badge: "60-Day Steel" },
  Tier { min_streak: 90, level: "Titan", badge: "90-Day Lock" },
];

const SPRINT: &[Tier] = &[
  Tier { min_streak: 0, level: "Starter", badge: "Start" },
  Tier { min_streak: 5, level: "Rookie", badge: "5-Day Spark" },
  Tier { min_streak: 14, level: "Committed", badge: "14-Day Grip" },
  Tier { min_streak: 30, level: "Locked", badge: "30-Day Lock" },
  Tier { min_streak: 60, level: "Titan", badge: "60-Day Titan" },
];

/// Default mission length shown as a progress bar.
pub const MISSION_DAYS: u32 = 90;

impl TierFamily {
  pub fn tiers(self) -> &'static [Tier] {
    match self {
      Self::Classic => CLASSIC,
      Self::Sprint => SPRINT,
    }
  }

  /// The highest tier whose threshold `streak` has reached.
  pub fn tier_for(self, streak: u32) -> Tier {
    let tiers = self.tiers();
    tiers
      .iter()
      .rev()
      .find(|t| streak >= t.min_streak)
      .copied()
      .unwrap_or(tiers[0])
  }

  /// The next tier up and how many more days it takes, or `None` at the top.
  pub fn next_tier(self, streak: u32) -> Option<(Tier, u32)> {
    self
      .tiers()
      .iter()
      .find(|t| t.min_streak > streak)
      .map(|t| (*t, t.min_streak - streak))
  }
}

pub fn level_for(family: TierFamily, streak: u32) -> &'static str {
  family.tier_for(streak).level
}

pub fn badge_for(family: TierFamily, streak: u32) -> &'static str {
  family.tier_for(streak).badge
}

/// Fraction of `target` days completed, clamped to `0.0..=1.0`.
pub fn mission_progress(streak: u32, target: u32) -> f64 {
  if target == 0 {
    return 1.0;
  }
  (f64::from(streak) / f64::from(target)).min(1.0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classic_breakpoints() {
    let f = TierFamily::Classic;
    assert_eq!(level_for(f, 0), "Starter");
    assert_eq!(level_for(f, 6), "Starter");
    assert_eq!(level_for(f, 7), "Bronze");
    assert_eq!(level_for(f, 14), "Silver");
    assert_eq!(level_for(f, 29), "Silver");
    assert_eq!(level_for(f, 30), "Gold");
    assert_eq!(level_for(f, 60), "Platinum");
    assert_eq!(level_for(f, 90), "Titan");
    assert_eq!(level_for(f, 91), "Titan");
    assert_eq!(badge_for(f, 91), "90-Day Lock");
    assert_eq!(badge_for(f, 0), "Start");
  }

  #[test]
  fn sprint_breakpoints() {
    let f = TierFamily::Sprint;
    assert_eq!(level_for(f, 4), "Starter");
    assert_eq!(level_for(f, 5), "Rookie");
    assert_eq!(level_for(f, 60), "Titan");
  }

  #[test]
  fn labels_are_monotonic() {
    for family in [TierFamily::Classic, TierFamily::Sprint] {
      let rank = |s: u32| {
        family
          .tiers()
          .iter()
          .position(|t| t.level == level_for(family, s))
          .unwrap()
      };
      for s in 0..200 {
        assert!(rank(s + 1) >= rank(s), "{family:?} regressed at {s}");
      }
    }
  }

  #[test]
  fn tables_start_at_zero_and_increase() {
    for family in [TierFamily::Classic, TierFamily::Sprint] {
      let tiers = family.tiers();
      assert_eq!(tiers[0].min_streak, 0);
      assert!(tiers.windows(2).all(|w| w[0].min_streak < w[1].min_streak));
    }
  }

  #[test]
  fn next_tier_counts_down() {
    let (tier, remaining) = TierFamily::Classic.next_tier(10).unwrap();
    assert_eq!(tier.level, "Silver");
    assert_eq!(remaining, 4);
    assert!(TierFamily::Classic.next_tier(90).is_none());
  }

  #[test]
  fn mission_progress_clamps() {
    assert_eq!(mission_progress(0, MISSION_DAYS), 0.0);
    assert_eq!(mission_progress(45, MISSION_DAYS), 0.5);
    assert_eq!(mission_progress(200, MISSION_DAYS), 1.0);
  }
}
