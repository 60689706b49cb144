//! Subcommand handlers. Each one reads or writes through the stores and
//! prints a plain-text view.

use std::path::Path;

use anyhow::{Context as _, bail};
use naillock_core::{
  day::Day,
  mode::{Mode, ModeRegistry, ModeSpec},
  partition::PartitionId,
  photo::{NewPhoto, PhotoKind, mime_for_filename},
  progression::{MISSION_DAYS, mission_progress},
  record::{Checklist, DailyRecord},
  scoring::{passes, score},
  store::{LogStore, PhotoStore},
  streak::{consistency_map, longest_streak, streak_for_mode},
  summary::{score_series, summarize},
};
use naillock_store_sqlite::SqliteStore;
use serde::Serialize;

/// Days shown in the consistency map.
const MAP_DAYS: u32 = 35;

/// Everything a handler needs.
pub struct Ctx {
  pub store:     SqliteStore,
  pub partition: PartitionId,
  pub mode:      Mode,
  pub today:     Day,
}

// ─── Daily log ───────────────────────────────────────────────────────────────

/// Every action of `mode` set to whether it is in `done`. Keys outside the
/// mode already present in `existing` are kept as they were.
pub(crate) fn build_checklist(
  mode: &Mode,
  existing: &Checklist,
  done: &[String],
) -> anyhow::Result<Checklist> {
  if let Some(unknown) = done.iter().find(|k| mode.action(k).is_none()) {
    bail!(
      "unknown action {unknown:?} for mode {:?}; expected one of: {}",
      mode.name(),
      mode.keys().collect::<Vec<_>>().join(", ")
    );
  }

  let mut out: Checklist = existing
    .iter()
    .filter(|(k, _)| mode.action(k).is_none())
    .collect();
  for key in mode.keys() {
    out.set(key, done.iter().any(|d| d == key));
  }
  Ok(out)
}

pub async fn log(
  ctx: &Ctx,
  day: Option<Day>,
  done: &[String],
  notes: Option<String>,
) -> anyhow::Result<()> {
  let day = day.unwrap_or(ctx.today);
  let existing = ctx.store.get_day(&ctx.partition, day).await?;

  let actions = build_checklist(&ctx.mode, &existing.actions, done)?;
  let notes = notes.unwrap_or(existing.notes);
  let record = DailyRecord::new(day, actions, notes);
  let s = score(&ctx.mode, &record.actions);
  let done_today = passes(&ctx.mode, &record);

  ctx.store.upsert_day(&ctx.partition, record).await?;

  println!(
    "saved {day}: {} points ({}) {}",
    s.points,
    s.fraction(),
    if done_today { "done" } else { "not done" }
  );
  Ok(())
}

pub async fn show(ctx: &Ctx, day: Option<Day>) -> anyhow::Result<()> {
  let day = day.unwrap_or(ctx.today);
  let record = ctx.store.get_day(&ctx.partition, day).await?;
  let s = score(&ctx.mode, &record.actions);

  println!("{day} ({} mode)", ctx.mode.name());
  for action in ctx.mode.actions() {
    let mark = if record.actions.is_checked(&action.key) { "x" } else { " " };
    println!("  [{mark}] {:<10} {:>3}  {}", action.key, action.points, action.label);
  }
  println!("score: {}/100 ({})", s.points, s.fraction());
  println!(
    "counts toward streak: {}",
    if passes(&ctx.mode, &record) { "yes" } else { "no" }
  );
  if !record.notes.is_empty() {
    println!("notes: {}", record.notes);
  }
  Ok(())
}

// ─── Progress ────────────────────────────────────────────────────────────────

/// Rows of seven cells, `#` for a done day and `.` otherwise.
pub(crate) fn render_map(map: &[(Day, bool)]) -> String {
  map
    .chunks(7)
    .map(|week| {
      let cells: String = week
        .iter()
        .map(|(_, done)| if *done { '#' } else { '.' })
        .collect();
      format!("{} {cells}\n", week[0].0)
    })
    .collect()
}

pub async fn status(ctx: &Ctx) -> anyhow::Result<()> {
  let history = ctx.store.all_days(&ctx.partition).await?;
  let streak = streak_for_mode(&history, ctx.today, &ctx.mode);
  let family = ctx.mode.tiers();
  let tier = family.tier_for(streak.current);
  let progress = mission_progress(streak.current, MISSION_DAYS);

  println!("streak:  {} days (longest {})", streak.current, longest_streak(&streak.done_days));
  println!("level:   {}", tier.level);
  println!("badge:   {}", tier.badge);
  match family.next_tier(streak.current) {
    Some((next, remaining)) => println!("next:    {} in {remaining} days", next.badge),
    None => println!("next:    top tier reached"),
  }
  println!(
    "mission: {}/{MISSION_DAYS} days ({:.0}%)",
    streak.current.min(MISSION_DAYS),
    progress * 100.0
  );
  println!();
  print!("{}", render_map(&consistency_map(&streak.done_days, ctx.today, MAP_DAYS)));
  Ok(())
}

pub async fn summary(ctx: &Ctx, json: bool) -> anyhow::Result<()> {
  let history = ctx.store.all_days(&ctx.partition).await?;
  let summary = summarize(&history, &ctx.mode, ctx.today);

  if json {
    println!("{}", serde_json::to_string_pretty(&summary)?);
    return Ok(());
  }

  println!("logged days:     {}", summary.logged_days);
  println!("done days:       {}", summary.done_days);
  println!("average score:   {:.1}", summary.average_points);
  println!("average checked: {:.1}", summary.average_checked);
  println!("current streak:  {}", summary.current_streak);
  println!("longest streak:  {}", summary.longest_streak);
  println!("level / badge:   {} / {}", summary.level, summary.badge);

  if !history.is_empty() {
    println!();
    print!("{}", render_journal(&history, &ctx.mode));
  }
  Ok(())
}

/// One line per logged day: score, checked count and notes. Multi-line
/// notes are joined with ` / `.
pub(crate) fn render_journal(history: &[DailyRecord], mode: &Mode) -> String {
  score_series(history, mode)
    .into_iter()
    .zip(history)
    .map(|((day, s), record)| {
      let notes = record.notes.lines().collect::<Vec<_>>().join(" / ");
      format!("{day}  {:>3}  {}  {notes}", s.points, s.fraction())
        .trim_end()
        .to_owned()
        + "\n"
    })
    .collect()
}

// ─── Photos ──────────────────────────────────────────────────────────────────

pub async fn photo_add(
  ctx: &Ctx,
  path: &Path,
  kind: PhotoKind,
  day: Option<Day>,
) -> anyhow::Result<()> {
  let bytes = tokio::fs::read(path)
    .await
    .with_context(|| format!("reading {}", path.display()))?;
  let filename = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();

  let photo = NewPhoto {
    day: day.unwrap_or(ctx.today),
    kind,
    mime: mime_for_filename(&filename).to_owned(),
    filename,
    bytes,
  };
  let id = ctx.store.add_photo(&ctx.partition, photo).await?;
  println!("stored photo {id}");
  Ok(())
}

pub async fn photo_list(ctx: &Ctx, kind: Option<PhotoKind>) -> anyhow::Result<()> {
  let photos = ctx.store.list_photos(&ctx.partition, kind).await?;
  if photos.is_empty() {
    println!("no photos");
  }
  for p in photos {
    println!(
      "{:>5}  {}  {:<6}  {:>9} B  {} ({})",
      p.id,
      p.day,
      p.kind.as_str(),
      p.bytes.len(),
      p.filename,
      p.mime
    );
  }
  Ok(())
}

pub async fn photo_save(ctx: &Ctx, id: i64, out: &Path) -> anyhow::Result<()> {
  let Some(photo) = ctx.store.get_photo(&ctx.partition, id).await? else {
    bail!("no photo with id {id}");
  };
  tokio::fs::write(out, &photo.bytes)
    .await
    .with_context(|| format!("writing {}", out.display()))?;
  println!("wrote {} ({} bytes)", out.display(), photo.bytes.len());
  Ok(())
}

pub async fn photo_delete(ctx: &Ctx, id: i64) -> anyhow::Result<()> {
  if ctx.store.delete_photo(&ctx.partition, id).await? {
    println!("deleted photo {id}");
  } else {
    println!("no photo with id {id}");
  }
  Ok(())
}

// ─── Archive ─────────────────────────────────────────────────────────────────

pub async fn export(ctx: &Ctx, out: &Path) -> anyhow::Result<()> {
  let bytes = naillock_archive::export(&ctx.store, &ctx.store, &ctx.partition, &ctx.mode).await?;
  tokio::fs::write(out, &bytes)
    .await
    .with_context(|| format!("writing {}", out.display()))?;
  println!("exported to {}", out.display());
  Ok(())
}

pub async fn import(ctx: &Ctx, file: &Path) -> anyhow::Result<()> {
  let bytes = tokio::fs::read(file)
    .await
    .with_context(|| format!("reading {}", file.display()))?;
  let report = naillock_archive::import(&bytes, &ctx.store, &ctx.store, &ctx.partition).await?;
  println!("imported {} days and {} photos", report.days, report.photos);
  Ok(())
}

// ─── Modes ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ModesFile<'a> {
  modes: Vec<&'a ModeSpec>,
}

/// Every known mode as a TOML `[[modes]]` list, ready to paste into the
/// config file.
pub(crate) fn render_modes(registry: &ModeRegistry) -> anyhow::Result<String> {
  let modes = registry
    .names()
    .map(|name| registry.get(name).map(Mode::spec))
    .collect::<Result<Vec<_>, _>>()?;
  Ok(toml::to_string_pretty(&ModesFile { modes })?)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn standard() -> Mode { ModeRegistry::builtin().get("standard").unwrap().clone() }

  fn done(keys: &[&str]) -> Vec<String> { keys.iter().map(|k| k.to_string()).collect() }

  #[test]
  fn checklist_covers_every_mode_action() {
    let c = build_checklist(&standard(), &Checklist::new(), &done(&["wash"])).unwrap();
    assert_eq!(c.get("wash"), Some(true));
    assert_eq!(c.get("treatment"), Some(false));
    assert_eq!(c.get("socks"), Some(false));
    assert_eq!(c.get("shoes"), Some(false));
  }

  #[test]
  fn checklist_keeps_foreign_keys() {
    let existing = Checklist::new().with("zinc", true).with("wash", true);
    let c = build_checklist(&standard(), &existing, &[]).unwrap();
    assert_eq!(c.get("zinc"), Some(true));
    assert_eq!(c.get("wash"), Some(false));
  }

  #[test]
  fn checklist_rejects_unknown_done_key() {
    let err = build_checklist(&standard(), &Checklist::new(), &done(&["floss"])).unwrap_err();
    assert!(err.to_string().contains("floss"));
  }

  #[test]
  fn map_renders_weeks() {
    let start: Day = "2024-01-01".parse().unwrap();
    let mut day = start;
    let mut map = Vec::new();
    for i in 0..14 {
      map.push((day, i % 2 == 0));
      day = day.succ().unwrap();
    }
    assert_eq!(render_map(&map), "2024-01-01 #.#.#.#\n2024-01-08 .#.#.#.\n");
  }

  #[test]
  fn journal_shows_notes_beside_scores() {
    let history = vec![
      DailyRecord::new(
        "2024-01-01".parse().unwrap(),
        Checklist::new().with("treatment", true).with("wash", true),
        "itchy\nbut better",
      ),
      DailyRecord::new("2024-01-02".parse().unwrap(), Checklist::new(), ""),
    ];
    assert_eq!(
      render_journal(&history, &standard()),
      "2024-01-01   50  2/4  itchy / but better\n2024-01-02    0  0/4\n"
    );
  }

  #[test]
  fn modes_render_as_toml() {
    let out = render_modes(&ModeRegistry::builtin()).unwrap();
    assert!(out.contains("[[modes]]"));
    assert!(out.contains("name = \"strict\""));
    assert!(out.contains("threshold = 90"));
  }
}
