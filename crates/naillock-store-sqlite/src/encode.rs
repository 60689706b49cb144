//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Days are stored as `YYYY-MM-DD`, which sorts chronologically as text.
//! Checklists are stored as compact JSON objects. Photo bytes are stored raw
//! as a BLOB.

use naillock_core::{
  day::Day,
  photo::{Photo, PhotoKind},
  record::{Checklist, DailyRecord},
};

use crate::{Error, Result};

// ─── Day ─────────────────────────────────────────────────────────────────────

pub fn encode_day(day: Day) -> String { day.to_string() }

pub fn decode_day(s: &str) -> Result<Day> {
  s.parse()
    .map_err(|_| Error::Corrupt(format!("bad day column: {s:?}")))
}

// ─── Checklist ───────────────────────────────────────────────────────────────

pub fn encode_actions(actions: &Checklist) -> Result<String> {
  Ok(serde_json::to_string(actions)?)
}

pub fn decode_actions(s: &str) -> Result<Checklist> { Ok(serde_json::from_str(s)?) }

// ─── PhotoKind ───────────────────────────────────────────────────────────────

pub fn encode_kind(kind: PhotoKind) -> &'static str { kind.as_str() }

pub fn decode_kind(s: &str) -> Result<PhotoKind> {
  s.parse()
    .map_err(|_| Error::Corrupt(format!("bad kind column: {s:?}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw columns read directly from a `daily_log` row.
pub struct RawDaily {
  pub day:          String,
  pub actions_json: String,
  pub notes:        String,
}

impl RawDaily {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      day:          row.get(0)?,
      actions_json: row.get(1)?,
      notes:        row.get(2)?,
    })
  }

  pub fn into_record(self) -> Result<DailyRecord> {
    Ok(DailyRecord {
      day:     decode_day(&self.day)?,
      actions: decode_actions(&self.actions_json)?,
      notes:   self.notes,
    })
  }
}

/// Raw columns read directly from a `photos` row.
pub struct RawPhoto {
  pub id:       i64,
  pub day:      String,
  pub kind:     String,
  pub filename: String,
  pub mime:     String,
  pub data:     Vec<u8>,
}

impl RawPhoto {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:       row.get(0)?,
      day:      row.get(1)?,
      kind:     row.get(2)?,
      filename: row.get(3)?,
      mime:     row.get(4)?,
      data:     row.get(5)?,
    })
  }

  pub fn into_photo(self) -> Result<Photo> {
    Ok(Photo {
      id:       self.id,
      day:      decode_day(&self.day)?,
      kind:     decode_kind(&self.kind)?,
      filename: self.filename,
      mime:     self.mime,
      bytes:    self.data,
    })
  }
}
