//! [`SqliteStore`], the SQLite implementation of [`LogStore`] and
//! [`PhotoStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use naillock_core::{
  day::Day,
  partition::PartitionId,
  photo::{NewPhoto, Photo, PhotoKind},
  record::DailyRecord,
  store::{LogStore, PhotoStore},
};

use crate::{
  Result,
  encode::{RawDaily, RawPhoto, encode_actions, encode_day, encode_kind},
  schema::SCHEMA,
};

const PHOTO_COLUMNS: &str = "id, day, kind, filename, mime, data";

// ─── Store ───────────────────────────────────────────────────────────────────

/// Log and photo stores backed by a single SQLite file.
///
/// Cloning shares the inner connection. Every
/// mutation runs inside its own transaction.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── LogStore impl ───────────────────────────────────────────────────────────

impl LogStore for SqliteStore {
  type Error = crate::Error;

  async fn upsert_day(&self, partition: &PartitionId, record: DailyRecord) -> Result<()> {
    let partition_str = partition.as_str().to_owned();
    let day_str       = encode_day(record.day);
    let actions_str   = encode_actions(&record.actions)?;
    let notes         = record.notes;

    tracing::debug!(partition = %partition, day = %record.day, "upserting daily record");

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO daily_log (partition, day, actions_json, notes)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (partition, day) DO UPDATE SET
             actions_json = excluded.actions_json,
             notes        = excluded.notes",
          rusqlite::params![partition_str, day_str, actions_str, notes],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn get_day(&self, partition: &PartitionId, day: Day) -> Result<DailyRecord> {
    let partition_str = partition.as_str().to_owned();
    let day_str       = encode_day(day);

    let raw: Option<RawDaily> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT day, actions_json, notes FROM daily_log
             WHERE partition = ?1 AND day = ?2",
            rusqlite::params![partition_str, day_str],
            RawDaily::from_row,
          )
          .optional()?)
      })
      .await?;

    match raw {
      Some(raw) => raw.into_record(),
      None => Ok(DailyRecord::empty(day)),
    }
  }

  async fn all_days(&self, partition: &PartitionId) -> Result<Vec<DailyRecord>> {
    let partition_str = partition.as_str().to_owned();

    let raws: Vec<RawDaily> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT day, actions_json, notes FROM daily_log
           WHERE partition = ?1
           ORDER BY day ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![partition_str], RawDaily::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDaily::into_record).collect()
  }
}

// ─── PhotoStore impl ─────────────────────────────────────────────────────────

impl PhotoStore for SqliteStore {
  type Error = crate::Error;

  async fn add_photo(&self, partition: &PartitionId, photo: NewPhoto) -> Result<i64> {
    // Reject before the connection is touched.
    photo.validate()?;

    let partition_str = partition.as_str().to_owned();
    let day_str       = encode_day(photo.day);
    let kind_str      = encode_kind(photo.kind);
    let size          = photo.bytes.len();
    let NewPhoto { filename, mime, bytes, .. } = photo;

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO photos (partition, day, kind, filename, mime, data)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![partition_str, day_str, kind_str, filename, mime, bytes],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;

    tracing::debug!(partition = %partition, id, size, "stored photo");
    Ok(id)
  }

  async fn list_photos(
    &self,
    partition: &PartitionId,
    kind: Option<PhotoKind>,
  ) -> Result<Vec<Photo>> {
    let partition_str = partition.as_str().to_owned();
    let kind_str      = kind.map(encode_kind);

    let raws: Vec<RawPhoto> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(k) = kind_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos
             WHERE partition = ?1 AND kind = ?2
             ORDER BY day ASC, id ASC"
          ))?;
          stmt
            .query_map(rusqlite::params![partition_str, k], RawPhoto::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos
             WHERE partition = ?1
             ORDER BY day ASC, id ASC"
          ))?;
          stmt
            .query_map(rusqlite::params![partition_str], RawPhoto::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPhoto::into_photo).collect()
  }

  async fn get_photo(&self, partition: &PartitionId, id: i64) -> Result<Option<Photo>> {
    let partition_str = partition.as_str().to_owned();

    let raw: Option<RawPhoto> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE partition = ?1 AND id = ?2"),
            rusqlite::params![partition_str, id],
            RawPhoto::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPhoto::into_photo).transpose()
  }

  async fn delete_photo(&self, partition: &PartitionId, id: i64) -> Result<bool> {
    let partition_str = partition.as_str().to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "DELETE FROM photos WHERE partition = ?1 AND id = ?2",
          rusqlite::params![partition_str, id],
        )?;
        tx.commit()?;
        Ok(n > 0)
      })
      .await?;

    tracing::debug!(partition = %partition, id, deleted, "delete photo");
    Ok(deleted)
  }
}
