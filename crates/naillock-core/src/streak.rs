//! Streak computation over the full log history.
//!
//! The set of done days is a view recomputed from the records on every call;
//! nothing here is persisted.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{day::Day, mode::Mode, record::DailyRecord, scoring::passes};

/// Result of [`compute_streak`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
  /// Length of the unbroken run of done days ending at the anchor.
  pub current:   u32,
  pub done_days: BTreeSet<Day>,
}

/// Compute the current streak.
///
/// A day is done iff `pass` holds for its record; a record that fails counts
/// the same as no record at all. The run is anchored at `today` if today is
/// done, otherwise at yesterday, so a day not yet logged never breaks an
/// intact streak. From the anchor the run extends backward until the first
/// day that is not done.
pub fn compute_streak<'a, I, F>(history: I, today: Day, pass: F) -> StreakSummary
where
  I: IntoIterator<Item = &'a DailyRecord>,
  F: Fn(&DailyRecord) -> bool,
{
  let done_days: BTreeSet<Day> = history
    .into_iter()
    .filter(|r| pass(r))
    .map(|r| r.day)
    .collect();

  let mut cursor = if done_days.contains(&today) { Some(today) } else { today.pred() };
  let mut current = 0;
  while let Some(day) = cursor {
    if !done_days.contains(&day) {
      break;
    }
    current += 1;
    cursor = day.pred();
  }

  StreakSummary { current, done_days }
}

/// [`compute_streak`] with the pass rule of `mode`.
pub fn streak_for_mode(history: &[DailyRecord], today: Day, mode: &Mode) -> StreakSummary {
  compute_streak(history, today, |r| passes(mode, r))
}

/// The longest run of consecutive done days anywhere in history.
pub fn longest_streak(done_days: &BTreeSet<Day>) -> u32 {
  let mut longest = 0;
  let mut run = 0;
  let mut prev: Option<Day> = None;
  for &day in done_days {
    run = match prev {
      Some(p) if p.succ() == Some(day) => run + 1,
      _ => 1,
    };
    longest = longest.max(run);
    prev = Some(day);
  }
  longest
}

/// The last `days_back` days ending at `today`, oldest first, each paired
/// with whether it was done.
pub fn consistency_map(done_days: &BTreeSet<Day>, today: Day, days_back: u32) -> Vec<(Day, bool)> {
  let mut out = Vec::with_capacity(days_back as usize);
  let mut cursor = Some(today);
  for _ in 0..days_back {
    let Some(day) = cursor else { break };
    out.push((day, done_days.contains(&day)));
    cursor = day.pred();
  }
  out.reverse();
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{mode::ModeRegistry, record::Checklist};

  fn today() -> Day { "2024-07-15".parse().unwrap() }

  fn days_ago(n: u32) -> Day {
    let mut d = today();
    for _ in 0..n {
      d = d.pred().unwrap();
    }
    d
  }

  fn full(day: Day) -> DailyRecord {
    DailyRecord::new(
      day,
      Checklist::new()
        .with("treatment", true)
        .with("wash", true)
        .with("socks", true)
        .with("shoes", true),
      "",
    )
  }

  fn missed(day: Day) -> DailyRecord {
    DailyRecord::new(
      day,
      Checklist::new()
        .with("treatment", false)
        .with("wash", false)
        .with("socks", false)
        .with("shoes", false),
      "",
    )
  }

  fn standard() -> Mode { ModeRegistry::builtin().get("standard").unwrap().clone() }

  #[test]
  fn empty_history() {
    let s = streak_for_mode(&[], today(), &standard());
    assert_eq!(s.current, 0);
    assert!(s.done_days.is_empty());
  }

  #[test]
  fn single_day_today() {
    let s = streak_for_mode(&[full(today())], today(), &standard());
    assert_eq!(s.current, 1);
  }

  #[test]
  fn unlogged_today_anchors_on_yesterday() {
    let history = [full(days_ago(3)), full(days_ago(2)), full(days_ago(1))];
    let s = streak_for_mode(&history, today(), &standard());
    assert_eq!(s.current, 3);
  }

  #[test]
  fn logged_today_is_included() {
    let history = [full(days_ago(2)), full(days_ago(1)), full(today())];
    let s = streak_for_mode(&history, today(), &standard());
    assert_eq!(s.current, 3);
  }

  #[test]
  fn failing_today_does_not_break_yesterdays_run() {
    let history = [full(days_ago(2)), full(days_ago(1)), missed(today())];
    let s = streak_for_mode(&history, today(), &standard());
    assert_eq!(s.current, 2);
  }

  #[test]
  fn explicit_miss_breaks_the_run() {
    let history = [
      full(days_ago(3)),
      missed(days_ago(2)),
      full(days_ago(1)),
      full(today()),
    ];
    let s = streak_for_mode(&history, today(), &standard());
    assert_eq!(s.current, 2);
    assert_eq!(s.done_days.len(), 3);
    assert!(!s.done_days.contains(&days_ago(2)));
  }

  #[test]
  fn gap_before_yesterday_means_zero() {
    let history = [full(days_ago(5)), full(days_ago(4))];
    let s = streak_for_mode(&history, today(), &standard());
    assert_eq!(s.current, 0);
    assert_eq!(s.done_days.len(), 2);
  }

  #[test]
  fn unordered_history_is_fine() {
    let history = [full(today()), full(days_ago(2)), full(days_ago(1))];
    let s = streak_for_mode(&history, today(), &standard());
    assert_eq!(s.current, 3);
  }

  #[test]
  fn ninety_one_days_reaches_titan() {
    let mode = standard();
    let history: Vec<_> = (0..91).map(|n| full(days_ago(n))).collect();
    let s = streak_for_mode(&history, today(), &mode);
    assert_eq!(s.current, 91);
    assert_eq!(crate::progression::level_for(mode.tiers(), s.current), "Titan");
  }

  #[test]
  fn custom_pass_rule() {
    let history = [
      DailyRecord::new(days_ago(1), Checklist::new(), "did it"),
      DailyRecord::new(today(), Checklist::new(), ""),
    ];
    let s = compute_streak(&history, today(), |r| !r.notes.is_empty());
    assert_eq!(s.current, 1);
  }

  #[test]
  fn longest_run_anywhere() {
    let done: BTreeSet<Day> = [10, 9, 8, 7, 3, 2].into_iter().map(days_ago).collect();
    assert_eq!(longest_streak(&done), 4);
    assert_eq!(longest_streak(&BTreeSet::new()), 0);
  }

  #[test]
  fn consistency_map_is_oldest_first() {
    let done: BTreeSet<Day> = [0, 2].into_iter().map(days_ago).collect();
    let map = consistency_map(&done, today(), 35);
    assert_eq!(map.len(), 35);
    assert_eq!(map[0].0, days_ago(34));
    assert_eq!(map[34], (today(), true));
    assert_eq!(map[33], (days_ago(1), false));
    assert_eq!(map[32], (days_ago(2), true));
  }
}
