//! Simple aggregates for the progress view.
//!
//! Everything is recomputed from raw checklists under the mode passed in, so
//! changing a mode's weights re-scores history.

use serde::Serialize;

use crate::{
  day::Day,
  mode::Mode,
  progression::{badge_for, level_for},
  record::DailyRecord,
  scoring::{Score, score},
  streak::{longest_streak, streak_for_mode},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
  pub logged_days:     usize,
  pub done_days:       usize,
  /// Mean weighted score over logged days; `0.0` with no logs.
  pub average_points:  f64,
  /// Mean count of checked actions over logged days.
  pub average_checked: f64,
  pub current_streak:  u32,
  pub longest_streak:  u32,
  pub level:           &'static str,
  pub badge:           &'static str,
}

/// Per-day scores in history order, for charting.
pub fn score_series(history: &[DailyRecord], mode: &Mode) -> Vec<(Day, Score)> {
  history
    .iter()
    .map(|r| (r.day, score(mode, &r.actions)))
    .collect()
}

pub fn summarize(history: &[DailyRecord], mode: &Mode, today: Day) -> ProgressSummary {
  let streak = streak_for_mode(history, today, mode);
  let series = score_series(history, mode);

  let logged_days = series.len();
  let (average_points, average_checked) = if logged_days == 0 {
    (0.0, 0.0)
  } else {
    let n = logged_days as f64;
    let points: f64 = series.iter().map(|(_, s)| f64::from(s.points)).sum();
    let checked: f64 = series.iter().map(|(_, s)| s.checked as f64).sum();
    (points / n, checked / n)
  };

  ProgressSummary {
    logged_days,
    done_days: streak.done_days.len(),
    average_points,
    average_checked,
    current_streak: streak.current,
    longest_streak: longest_streak(&streak.done_days),
    level: level_for(mode.tiers(), streak.current),
    badge: badge_for(mode.tiers(), streak.current),
  }
}
