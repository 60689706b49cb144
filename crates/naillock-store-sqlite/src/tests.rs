//! Integration tests for `SqliteStore` against an in-memory database.

use naillock_core::{
  day::Day,
  partition::PartitionId,
  photo::{MAX_PHOTO_BYTES, NewPhoto, PhotoKind},
  record::{Checklist, DailyRecord},
  store::{LogStore, PhotoStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn partition(id: &str) -> PartitionId { PartitionId::new(id).unwrap() }

fn day(s: &str) -> Day { s.parse().unwrap() }

fn checklist(treatment: bool, wash: bool) -> Checklist {
  Checklist::new()
    .with("treatment", treatment)
    .with("wash", wash)
    .with("socks", false)
    .with("shoes", false)
}

fn new_photo(d: &str, kind: PhotoKind, len: usize) -> NewPhoto {
  NewPhoto {
    day: day(d),
    kind,
    filename: format!("{kind}.png"),
    mime: "image/png".into(),
    bytes: vec![7; len],
  }
}

// ─── Daily log ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_unknown_day_returns_empty_record() {
  let s = store().await;
  let p = partition("alice");

  let rec = s.get_day(&p, day("2024-01-01")).await.unwrap();
  assert_eq!(rec, DailyRecord::empty(day("2024-01-01")));
}

#[tokio::test]
async fn upsert_then_get() {
  let s = store().await;
  let p = partition("alice");
  let rec = DailyRecord::new(day("2024-01-01"), checklist(true, false), "first day");

  s.upsert_day(&p, rec.clone()).await.unwrap();

  assert_eq!(s.get_day(&p, rec.day).await.unwrap(), rec);
}

#[tokio::test]
async fn upsert_same_day_replaces() {
  let s = store().await;
  let p = partition("alice");

  s.upsert_day(&p, DailyRecord::new(day("2024-01-01"), checklist(true, false), "a"))
    .await
    .unwrap();
  let second = DailyRecord::new(day("2024-01-01"), checklist(false, true), "b");
  s.upsert_day(&p, second.clone()).await.unwrap();

  let all = s.all_days(&p).await.unwrap();
  assert_eq!(all, vec![second]);
}

#[tokio::test]
async fn all_days_sorted_ascending() {
  let s = store().await;
  let p = partition("alice");

  for d in ["2024-03-01", "2023-12-31", "2024-01-15"] {
    s.upsert_day(&p, DailyRecord::new(day(d), checklist(true, true), ""))
      .await
      .unwrap();
  }

  let days: Vec<String> = s
    .all_days(&p)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.day.to_string())
    .collect();
  assert_eq!(days, ["2023-12-31", "2024-01-15", "2024-03-01"]);
}

#[tokio::test]
async fn absent_keys_survive_storage() {
  let s = store().await;
  let p = partition("alice");
  let rec = DailyRecord::new(
    day("2024-01-01"),
    Checklist::new().with("treatment", true).with("custom", false),
    "",
  );

  s.upsert_day(&p, rec.clone()).await.unwrap();
  let back = s.get_day(&p, rec.day).await.unwrap();
  assert_eq!(back.actions.get("custom"), Some(false));
  assert_eq!(back.actions.get("wash"), None);
}

// ─── Photos ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_assigns_increasing_ids() {
  let s = store().await;
  let p = partition("alice");

  let a = s.add_photo(&p, new_photo("2024-01-01", PhotoKind::Before, 10)).await.unwrap();
  let b = s.add_photo(&p, new_photo("2024-01-01", PhotoKind::Before, 10)).await.unwrap();
  assert!(b > a);
}

#[tokio::test]
async fn photo_roundtrip() {
  let s = store().await;
  let p = partition("alice");
  let input = new_photo("2024-01-01", PhotoKind::Weekly, 1024);

  let id = s.add_photo(&p, input.clone()).await.unwrap();
  let got = s.get_photo(&p, id).await.unwrap().unwrap();

  assert_eq!(got.id, id);
  assert_eq!(got.day, input.day);
  assert_eq!(got.kind, input.kind);
  assert_eq!(got.filename, input.filename);
  assert_eq!(got.mime, input.mime);
  assert_eq!(got.bytes, input.bytes);
}

#[tokio::test]
async fn oversize_photo_is_rejected_and_nothing_stored() {
  let s = store().await;
  let p = partition("alice");

  let err = s
    .add_photo(&p, new_photo("2024-01-01", PhotoKind::Before, 3_500_000))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(naillock_core::Error::PhotoTooLarge { .. })
  ));
  assert!(s.list_photos(&p, None).await.unwrap().is_empty());

  // Exactly at the cap is fine.
  s.add_photo(&p, new_photo("2024-01-01", PhotoKind::Before, MAX_PHOTO_BYTES))
    .await
    .unwrap();
  assert_eq!(s.list_photos(&p, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_orders_by_day_then_id_and_filters_kind() {
  let s = store().await;
  let p = partition("alice");

  let late = s.add_photo(&p, new_photo("2024-02-01", PhotoKind::After, 1)).await.unwrap();
  let early_a = s.add_photo(&p, new_photo("2024-01-01", PhotoKind::Before, 1)).await.unwrap();
  let early_b = s.add_photo(&p, new_photo("2024-01-01", PhotoKind::Weekly, 1)).await.unwrap();

  let ids: Vec<i64> = s
    .list_photos(&p, None)
    .await
    .unwrap()
    .iter()
    .map(|ph| ph.id)
    .collect();
  assert_eq!(ids, [early_a, early_b, late]);

  let afters = s.list_photos(&p, Some(PhotoKind::After)).await.unwrap();
  assert_eq!(afters.len(), 1);
  assert_eq!(afters[0].id, late);
}

#[tokio::test]
async fn delete_is_idempotent() {
  let s = store().await;
  let p = partition("alice");
  let id = s.add_photo(&p, new_photo("2024-01-01", PhotoKind::Before, 1)).await.unwrap();

  assert!(s.delete_photo(&p, id).await.unwrap());
  assert!(!s.delete_photo(&p, id).await.unwrap());
  assert!(!s.delete_photo(&p, 9_999).await.unwrap());
  assert!(s.get_photo(&p, id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_photos_leaves_logs_alone() {
  let s = store().await;
  let p = partition("alice");
  let rec = DailyRecord::new(day("2024-01-01"), checklist(true, true), "");
  s.upsert_day(&p, rec.clone()).await.unwrap();
  let id = s.add_photo(&p, new_photo("2024-01-01", PhotoKind::Before, 1)).await.unwrap();

  s.delete_photo(&p, id).await.unwrap();

  assert_eq!(s.all_days(&p).await.unwrap(), vec![rec]);
}

// ─── Partition isolation ─────────────────────────────────────────────────────

#[tokio::test]
async fn partitions_do_not_see_each_other() {
  let s = store().await;
  let alice = partition("alice");
  let bob = partition("bob");

  s.upsert_day(&alice, DailyRecord::new(day("2024-01-01"), checklist(true, true), "a"))
    .await
    .unwrap();
  s.upsert_day(&bob, DailyRecord::new(day("2024-01-01"), checklist(false, false), "b"))
    .await
    .unwrap();
  let alice_photo = s
    .add_photo(&alice, new_photo("2024-01-01", PhotoKind::Before, 1))
    .await
    .unwrap();

  assert_eq!(s.get_day(&alice, day("2024-01-01")).await.unwrap().notes, "a");
  assert_eq!(s.get_day(&bob, day("2024-01-01")).await.unwrap().notes, "b");

  assert!(s.list_photos(&bob, None).await.unwrap().is_empty());
  assert!(s.get_photo(&bob, alice_photo).await.unwrap().is_none());
  assert!(!s.delete_photo(&bob, alice_photo).await.unwrap());
  assert!(s.get_photo(&alice, alice_photo).await.unwrap().is_some());
}

// ─── Durability ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_store_keeps_data() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("naillock.db");
  let p = partition("alice");
  let rec = DailyRecord::new(day("2024-01-01"), checklist(true, false), "kept");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert_day(&p, rec.clone()).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.all_days(&p).await.unwrap(), vec![rec]);
}
