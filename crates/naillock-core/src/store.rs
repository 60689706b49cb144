//! The `LogStore` and `PhotoStore` traits.
//!
//! Implemented by storage backends (e.g. `naillock-store-sqlite`). The engines
//! never see a store; callers read history out and pass it in. Every method
//! takes the [`PartitionId`] it operates on and must not touch rows of any
//! other partition.
//!
//! Each call is atomic from the caller's point of view: a failed call leaves
//! no partially written row behind.

use std::future::Future;

use crate::{
  day::Day,
  partition::PartitionId,
  photo::{NewPhoto, Photo, PhotoKind},
  record::DailyRecord,
};

/// Durable day → checklist mapping with replace-by-day semantics.
pub trait LogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert `record`, replacing any existing record for the same day.
  fn upsert_day<'a>(
    &'a self,
    partition: &'a PartitionId,
    record: DailyRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// The record for `day`, or [`DailyRecord::empty`] if none was saved.
  fn get_day<'a>(
    &'a self,
    partition: &'a PartitionId,
    day: Day,
  ) -> impl Future<Output = Result<DailyRecord, Self::Error>> + Send + 'a;

  /// Every record in the partition, ordered by day ascending.
  fn all_days<'a>(
    &'a self,
    partition: &'a PartitionId,
  ) -> impl Future<Output = Result<Vec<DailyRecord>, Self::Error>> + Send + 'a;
}

/// Durable collection of tagged photo blobs with store-assigned ids.
pub trait PhotoStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a photo and return its id. Payloads above
  /// [`crate::photo::MAX_PHOTO_BYTES`] are rejected and nothing is stored.
  fn add_photo<'a>(
    &'a self,
    partition: &'a PartitionId,
    photo: NewPhoto,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + 'a;

  /// Photos ordered by `(day, id)` ascending, optionally of a single kind.
  fn list_photos<'a>(
    &'a self,
    partition: &'a PartitionId,
    kind: Option<PhotoKind>,
  ) -> impl Future<Output = Result<Vec<Photo>, Self::Error>> + Send + 'a;

  fn get_photo<'a>(
    &'a self,
    partition: &'a PartitionId,
    id: i64,
  ) -> impl Future<Output = Result<Option<Photo>, Self::Error>> + Send + 'a;

  /// Remove a photo. Returns whether a row was deleted; an unknown id is not
  /// an error.
  fn delete_photo<'a>(
    &'a self,
    partition: &'a PartitionId,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
