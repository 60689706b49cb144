//! Building an archive from the stores.

use naillock_core::{
  mode::Mode,
  partition::PartitionId,
  store::{LogStore, PhotoStore},
};

use crate::{
  DAILY_LOG_ENTRY, Error, PHOTOS_INDEX_ENTRY, Result,
  container::{ArchiveWriter, photo_entry_path},
  tables::{write_daily_log, write_photo_index},
};

/// Serialise every daily record and photo in `partition` into one archive.
///
/// `mode` only fixes the order of the action columns; records carrying keys
/// outside the mode are exported in full.
pub async fn export<L, P>(
  logs: &L,
  photos: &P,
  partition: &PartitionId,
  mode: &Mode,
) -> Result<Vec<u8>>
where
  L: LogStore,
  P: PhotoStore,
{
  let records = logs.all_days(partition).await.map_err(Error::store)?;
  let all_photos = photos
    .list_photos(partition, None)
    .await
    .map_err(Error::store)?;

  let mut archive = ArchiveWriter::new();
  archive.append(DAILY_LOG_ENTRY, &write_daily_log(&records, mode)?)?;
  archive.append(PHOTOS_INDEX_ENTRY, &write_photo_index(&all_photos)?)?;
  for photo in &all_photos {
    archive.append(&photo_entry_path(photo), &photo.bytes)?;
  }
  let bytes = archive.finish()?;

  tracing::info!(
    partition = %partition,
    days = records.len(),
    photos = all_photos.len(),
    size = bytes.len(),
    "exported archive"
  );
  Ok(bytes)
}
