//! Restoring an archive into the stores.

use std::collections::{BTreeSet, HashMap};

use naillock_core::{
  partition::PartitionId,
  photo::{MAX_PHOTO_BYTES, NewPhoto, mime_for_filename},
  record::DailyRecord,
  store::{LogStore, PhotoStore},
};

use crate::{
  DAILY_LOG_ENTRY, Error, PHOTOS_DIR, PHOTOS_INDEX_ENTRY, Result,
  container::{Entry, MAX_TABLE_BYTES, parse_photo_path, read_entries},
  tables::{IndexRow, read_daily_log, read_photo_index},
};

/// What an import applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
  /// Daily records upserted.
  pub days:   usize,
  /// Photos inserted as new rows.
  pub photos: usize,
}

/// A fully validated archive, ready to apply.
#[derive(Debug)]
pub(crate) struct ParsedArchive {
  pub days:   Vec<DailyRecord>,
  pub photos: Vec<NewPhoto>,
}

/// Decode and validate the whole archive without touching any store.
///
/// Every problem found is collected into a single [`Error::Import`].
pub(crate) fn parse_archive(bytes: &[u8]) -> Result<ParsedArchive> {
  let entries = read_entries(bytes)
    .map_err(|e| Error::Import(vec![format!("unreadable archive: {e}")]))?;

  let mut problems = Vec::new();

  let days = match find(&entries, DAILY_LOG_ENTRY) {
    Some(entry) => match table_data(entry, &mut problems) {
      Some(data) => read_daily_log(data, &mut problems),
      None => Vec::new(),
    },
    None => {
      problems.push(format!("missing {DAILY_LOG_ENTRY}"));
      Vec::new()
    }
  };

  let index: HashMap<i64, IndexRow> = find(&entries, PHOTOS_INDEX_ENTRY)
    .and_then(|entry| table_data(entry, &mut problems))
    .map(|data| read_photo_index(data, &mut problems))
    .unwrap_or_default();

  let mut photos = Vec::new();
  let mut seen_ids = BTreeSet::new();
  for entry in entries.iter().filter(|e| e.path.starts_with(PHOTOS_DIR)) {
    let parsed = match parse_photo_path(&entry.path) {
      Ok(parsed) => parsed,
      Err(problem) => {
        problems.push(problem);
        continue;
      }
    };

    if let Some(id) = parsed.id {
      seen_ids.insert(id);
    }

    let Some(bytes) = &entry.data else {
      let too_large = naillock_core::Error::PhotoTooLarge {
        size:  entry.size as usize,
        limit: MAX_PHOTO_BYTES,
      };
      problems.push(format!("{}: {too_large}", entry.path));
      continue;
    };

    // The index carries the original filename and MIME type; without it
    // both are derived from the entry name.
    let (filename, mime) = match parsed.id.and_then(|id| index.get(&id)) {
      Some(row) => (row.filename.clone(), row.mime.clone()),
      None => (
        parsed.basename.clone(),
        mime_for_filename(&parsed.basename).to_owned(),
      ),
    };

    let photo = NewPhoto {
      day: parsed.day,
      kind: parsed.kind,
      filename,
      mime,
      bytes: bytes.clone(),
    };
    if let Err(e) = photo.validate() {
      problems.push(format!("{}: {e}", entry.path));
      continue;
    }
    photos.push(photo);
  }

  let mut orphaned: Vec<i64> = index
    .keys()
    .copied()
    .filter(|id| !seen_ids.contains(id))
    .collect();
  orphaned.sort_unstable();
  for id in orphaned {
    problems.push(format!("{PHOTOS_INDEX_ENTRY}: photo {id} has no file in the archive"));
  }

  if !problems.is_empty() {
    return Err(Error::Import(problems));
  }
  Ok(ParsedArchive { days, photos })
}

fn find<'a>(entries: &'a [Entry], path: &str) -> Option<&'a Entry> {
  entries.iter().find(|e| e.path == path)
}

/// The contents of a table entry, or a problem if it was too large to read.
fn table_data<'a>(entry: &'a Entry, problems: &mut Vec<String>) -> Option<&'a [u8]> {
  if entry.data.is_none() {
    problems.push(format!(
      "{}: too large ({} bytes, max {MAX_TABLE_BYTES})",
      entry.path, entry.size
    ));
  }
  entry.data.as_deref()
}

/// Restore an archive into `partition`.
///
/// The archive is validated in full first; a malformed archive fails with
/// [`Error::Import`] and leaves both stores untouched. Day records are
/// upserted, so re-importing the same archive leaves the log unchanged.
/// Photos are always inserted as new rows with fresh ids, so re-importing
/// duplicates them.
pub async fn import<L, P>(
  bytes: &[u8],
  logs: &L,
  photos: &P,
  partition: &PartitionId,
) -> Result<ImportReport>
where
  L: LogStore,
  P: PhotoStore,
{
  let parsed = parse_archive(bytes)?;
  let mut report = ImportReport::default();

  for record in parsed.days {
    logs
      .upsert_day(partition, record)
      .await
      .map_err(Error::store)?;
    report.days += 1;
  }

  for photo in parsed.photos {
    photos
      .add_photo(partition, photo)
      .await
      .map_err(Error::store)?;
    report.photos += 1;
  }

  tracing::info!(
    partition = %partition,
    days = report.days,
    photos = report.photos,
    "imported archive"
  );
  Ok(report)
}
