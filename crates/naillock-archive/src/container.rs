//! The tar.gz container and the photo entry naming scheme.

use std::{io::Read, path::Path};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use naillock_core::{
  day::Day,
  photo::{MAX_PHOTO_BYTES, Photo, PhotoKind},
};

use crate::Result;

pub const DAILY_LOG_ENTRY: &str = "daily_log.csv";
pub const PHOTOS_INDEX_ENTRY: &str = "photos_index.csv";
pub const PHOTOS_DIR: &str = "photos/";

const DEFAULT_EXTENSION: &str = ".jpg";

// ─── Writing ─────────────────────────────────────────────────────────────────

pub(crate) struct ArchiveWriter {
  tar: tar::Builder<GzEncoder<Vec<u8>>>,
}

impl ArchiveWriter {
  pub fn new() -> Self {
    let enc = GzEncoder::new(Vec::new(), Compression::default());
    Self { tar: tar::Builder::new(enc) }
  }

  pub fn append(&mut self, path: &str, data: &[u8]) -> Result<()> {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    self.tar.append_data(&mut header, path, data)?;
    Ok(())
  }

  pub fn finish(self) -> Result<Vec<u8>> {
    let enc = self.tar.into_inner()?;
    Ok(enc.finish()?)
  }
}

// ─── Reading ─────────────────────────────────────────────────────────────────

/// Upper bound on a CSV table entry.
pub(crate) const MAX_TABLE_BYTES: u64 = 16 * 1024 * 1024;

/// A regular file read out of an archive.
pub(crate) struct Entry {
  pub path: String,
  /// Declared size in the tar header.
  pub size: u64,
  /// The contents, or `None` when `size` exceeded the entry's limit. Such
  /// entries are never buffered.
  pub data: Option<Vec<u8>>,
}

/// Byte limit for the entry at `path`: the photo cap under `photos/`, the
/// table cap elsewhere.
pub(crate) fn entry_limit(path: &str) -> u64 {
  if path.starts_with(PHOTOS_DIR) {
    MAX_PHOTO_BYTES as u64
  } else {
    MAX_TABLE_BYTES
  }
}

/// Read every regular file in the archive. Directories and links are
/// skipped; entries over their limit are recorded by size only.
pub(crate) fn read_entries(bytes: &[u8]) -> std::io::Result<Vec<Entry>> {
  read_entries_with(bytes, entry_limit)
}

fn read_entries_with(bytes: &[u8], limit: impl Fn(&str) -> u64) -> std::io::Result<Vec<Entry>> {
  let mut archive = tar::Archive::new(GzDecoder::new(bytes));
  let mut out = Vec::new();
  for entry in archive.entries()? {
    let entry = entry?;
    if !entry.header().entry_type().is_file() {
      continue;
    }
    let path = entry.path()?.to_string_lossy().into_owned();
    let max = limit(&path);
    let size = entry.header().size()?;
    if size > max {
      out.push(Entry { path, size, data: None });
      continue;
    }

    let mut data = Vec::with_capacity(size as usize);
    entry.take(max + 1).read_to_end(&mut data)?;
    let read = data.len() as u64;
    if read > max {
      out.push(Entry { path, size: read, data: None });
    } else {
      out.push(Entry { path, size: read, data: Some(data) });
    }
  }
  Ok(out)
}

// ─── Photo paths ─────────────────────────────────────────────────────────────

/// `.ext` taken from the original filename when it is short and plain
/// ASCII alphanumeric, otherwise `.jpg`.
pub(crate) fn extension_for(filename: &str) -> String {
  Path::new(filename)
    .extension()
    .and_then(|e| e.to_str())
    .filter(|e| !e.is_empty() && e.len() <= 8 && e.bytes().all(|b| b.is_ascii_alphanumeric()))
    .map(|e| format!(".{e}"))
    .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned())
}

/// `photos/{kind}/{day}_{id}{ext}`.
pub(crate) fn photo_entry_path(photo: &Photo) -> String {
  format!(
    "{PHOTOS_DIR}{}/{}_{}{}",
    photo.kind,
    photo.day,
    photo.id,
    extension_for(&photo.filename)
  )
}

/// What a photo entry's path says about it.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PhotoPath {
  pub kind:     PhotoKind,
  pub day:      Day,
  /// The exporting store's id, when the name carries one.
  pub id:       Option<i64>,
  pub basename: String,
}

/// Parse `photos/{kind}/{day}[_{id}]{ext}`. The error is a human-readable
/// problem description.
pub(crate) fn parse_photo_path(path: &str) -> Result<PhotoPath, String> {
  let rest = path
    .strip_prefix(PHOTOS_DIR)
    .ok_or_else(|| format!("{path}: not under {PHOTOS_DIR}"))?;
  let (kind_str, basename) = rest
    .split_once('/')
    .filter(|(_, file)| !file.is_empty() && !file.contains('/'))
    .ok_or_else(|| format!("{path}: expected photos/<kind>/<file>"))?;

  let kind: PhotoKind = kind_str
    .parse()
    .map_err(|_| format!("{path}: unknown photo kind {kind_str:?}"))?;

  let stem = Path::new(basename)
    .file_stem()
    .and_then(|s| s.to_str())
    .unwrap_or(basename);
  let (day_str, id_str) = match stem.split_once('_') {
    Some((d, i)) => (d, Some(i)),
    None => (stem, None),
  };
  let day: Day = day_str
    .parse()
    .map_err(|_| format!("{path}: file name does not start with a YYYY-MM-DD day"))?;

  Ok(PhotoPath {
    kind,
    day,
    id: id_str.and_then(|s| s.parse().ok()),
    basename: basename.to_owned(),
  })
}
