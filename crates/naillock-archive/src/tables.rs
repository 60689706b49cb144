//! CSV encoding of the daily log and the photo index.

use std::collections::{BTreeSet, HashMap};

use naillock_core::{
  day::Day,
  mode::Mode,
  photo::{Photo, PhotoKind},
  record::{Checklist, DailyRecord},
};

use crate::{DAILY_LOG_ENTRY, PHOTOS_INDEX_ENTRY, Result};

const DAY_COLUMN: &str = "day";
const NOTES_COLUMN: &str = "notes";
const INDEX_HEADER: [&str; 5] = ["id", "day", "kind", "filename", "mime"];

// ─── daily_log.csv ───────────────────────────────────────────────────────────

/// Action columns: the mode's keys in declaration order, then any other key
/// found in the records, sorted.
fn action_columns(records: &[DailyRecord], mode: &Mode) -> Vec<String> {
  let mut columns: Vec<String> = mode.keys().map(str::to_owned).collect();
  let extra: BTreeSet<&str> = records
    .iter()
    .flat_map(|r| r.actions.keys())
    .filter(|k| mode.action(k).is_none())
    .collect();
  columns.extend(extra.into_iter().map(str::to_owned));
  columns
}

fn encode_flag(value: Option<bool>) -> &'static str {
  match value {
    Some(true) => "1",
    Some(false) => "0",
    None => "",
  }
}

fn decode_flag(cell: &str) -> Result<Option<bool>, ()> {
  let cell = cell.trim();
  if cell.is_empty() {
    Ok(None)
  } else if cell == "1" || cell.eq_ignore_ascii_case("true") {
    Ok(Some(true))
  } else if cell == "0" || cell.eq_ignore_ascii_case("false") {
    Ok(Some(false))
  } else {
    Err(())
  }
}

pub(crate) fn write_daily_log(records: &[DailyRecord], mode: &Mode) -> Result<Vec<u8>> {
  let columns = action_columns(records, mode);
  let mut buf = Vec::new();
  {
    let mut w = csv::Writer::from_writer(&mut buf);

    let mut header = Vec::with_capacity(columns.len() + 2);
    header.push(DAY_COLUMN);
    header.extend(columns.iter().map(String::as_str));
    header.push(NOTES_COLUMN);
    w.write_record(&header)?;

    for record in records {
      let day = record.day.to_string();
      let mut row = Vec::with_capacity(columns.len() + 2);
      row.push(day.as_str());
      row.extend(columns.iter().map(|c| encode_flag(record.actions.get(c))));
      row.push(record.notes.as_str());
      w.write_record(&row)?;
    }
    w.flush()?;
  }
  Ok(buf)
}

/// Parse `daily_log.csv`. Problems are appended to `problems`; rows with a
/// problem are dropped.
///
/// Columns are positional: the first must be `day`, the last `notes`, and
/// everything between is an action key.
pub(crate) fn read_daily_log(data: &[u8], problems: &mut Vec<String>) -> Vec<DailyRecord> {
  let mut rdr = csv::Reader::from_reader(data);

  let header = match rdr.headers() {
    Ok(h) => h.clone(),
    Err(e) => {
      problems.push(format!("{DAILY_LOG_ENTRY}: unreadable header: {e}"));
      return Vec::new();
    }
  };
  let n = header.len();
  if n < 2 || &header[0] != DAY_COLUMN || &header[n - 1] != NOTES_COLUMN {
    problems.push(format!(
      "{DAILY_LOG_ENTRY}: header must start with {DAY_COLUMN:?} and end with {NOTES_COLUMN:?}"
    ));
    return Vec::new();
  }
  let keys: Vec<&str> = header.iter().skip(1).take(n - 2).collect();
  let unique: BTreeSet<&str> = keys.iter().copied().collect();
  if unique.len() != keys.len() || keys.iter().any(|k| k.trim().is_empty()) {
    problems.push(format!("{DAILY_LOG_ENTRY}: duplicate or empty action column"));
    return Vec::new();
  }

  let mut records = Vec::new();
  for row in rdr.records() {
    let row = match row {
      Ok(row) => row,
      Err(e) => {
        let fatal = matches!(e.kind(), csv::ErrorKind::Io(_));
        problems.push(format!("{DAILY_LOG_ENTRY}: {e}"));
        if fatal {
          break;
        }
        continue;
      }
    };
    let line = row.position().map(|p| p.line()).unwrap_or(0);

    let day: Day = match row[0].trim().parse() {
      Ok(day) => day,
      Err(_) => {
        problems.push(format!("{DAILY_LOG_ENTRY} line {line}: bad day {:?}", &row[0]));
        continue;
      }
    };

    let mut actions = Checklist::new();
    let mut row_ok = true;
    for (i, key) in keys.iter().enumerate() {
      let cell = &row[i + 1];
      match decode_flag(cell) {
        Ok(Some(done)) => actions.set(*key, done),
        Ok(None) => {}
        Err(()) => {
          problems.push(format!(
            "{DAILY_LOG_ENTRY} line {line}: bad value {cell:?} for {key:?}"
          ));
          row_ok = false;
        }
      }
    }
    if row_ok {
      records.push(DailyRecord::new(day, actions, &row[n - 1]));
    }
  }
  records
}

// ─── photos_index.csv ────────────────────────────────────────────────────────

/// One row of the photo index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexRow {
  pub id:       i64,
  pub day:      Day,
  pub kind:     PhotoKind,
  pub filename: String,
  pub mime:     String,
}

pub(crate) fn write_photo_index(photos: &[Photo]) -> Result<Vec<u8>> {
  let mut buf = Vec::new();
  {
    let mut w = csv::Writer::from_writer(&mut buf);
    w.write_record(INDEX_HEADER)?;
    for p in photos {
      let id = p.id.to_string();
      let day = p.day.to_string();
      w.write_record([
        id.as_str(),
        day.as_str(),
        p.kind.as_str(),
        p.filename.as_str(),
        p.mime.as_str(),
      ])?;
    }
    w.flush()?;
  }
  Ok(buf)
}

/// Parse `photos_index.csv` into rows keyed by the exporting store's id.
pub(crate) fn read_photo_index(
  data: &[u8],
  problems: &mut Vec<String>,
) -> HashMap<i64, IndexRow> {
  let mut rdr = csv::Reader::from_reader(data);

  match rdr.headers() {
    Ok(h) if h.iter().eq(INDEX_HEADER) => {}
    Ok(_) => {
      problems.push(format!(
        "{PHOTOS_INDEX_ENTRY}: expected header {}",
        INDEX_HEADER.join(",")
      ));
      return HashMap::new();
    }
    Err(e) => {
      problems.push(format!("{PHOTOS_INDEX_ENTRY}: unreadable header: {e}"));
      return HashMap::new();
    }
  }

  let mut rows = HashMap::new();
  for row in rdr.records() {
    let row = match row {
      Ok(row) => row,
      Err(e) => {
        let fatal = matches!(e.kind(), csv::ErrorKind::Io(_));
        problems.push(format!("{PHOTOS_INDEX_ENTRY}: {e}"));
        if fatal {
          break;
        }
        continue;
      }
    };
    let line = row.position().map(|p| p.line()).unwrap_or(0);

    let parsed = (|| -> Result<IndexRow, String> {
      Ok(IndexRow {
        id:       row[0].trim().parse().map_err(|_| format!("bad id {:?}", &row[0]))?,
        day:      row[1].trim().parse().map_err(|_| format!("bad day {:?}", &row[1]))?,
        kind:     row[2].trim().parse().map_err(|_| format!("bad kind {:?}", &row[2]))?,
        filename: row[3].to_owned(),
        mime:     row[4].to_owned(),
      })
    })();

    match parsed {
      Ok(entry) => {
        if rows.insert(entry.id, entry).is_some() {
          problems.push(format!("{PHOTOS_INDEX_ENTRY} line {line}: duplicate id"));
        }
      }
      Err(msg) => problems.push(format!("{PHOTOS_INDEX_ENTRY} line {line}: {msg}")),
    }
  }
  rows
}
