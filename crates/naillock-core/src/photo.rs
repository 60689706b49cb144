//! Progress photos.
//!
//! Photos are associated with a day by value only; there is no foreign key
//! between photos and daily records and neither side cascades to the other.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, day::Day};

/// Upper bound on a single photo's payload.
pub const MAX_PHOTO_BYTES: usize = 3_000_000;

/// Classification tag. All kinds share the same record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoKind {
  Before,
  After,
  Weekly,
}

impl PhotoKind {
  pub const ALL: [PhotoKind; 3] = [Self::Before, Self::After, Self::Weekly];

  /// The discriminant stored in the `kind` column and used in archive paths.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Before => "before",
      Self::After => "after",
      Self::Weekly => "weekly",
    }
  }
}

impl fmt::Display for PhotoKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for PhotoKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "before" => Ok(Self::Before),
      "after" => Ok(Self::After),
      "weekly" => Ok(Self::Weekly),
      other => Err(Error::UnknownPhotoKind(other.to_owned())),
    }
  }
}

// ─── NewPhoto ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::PhotoStore::add_photo`]. The id is assigned by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoto {
  pub day:      Day,
  pub kind:     PhotoKind,
  pub filename: String,
  pub mime:     String,
  pub bytes:    Vec<u8>,
}

impl NewPhoto {
  /// Reject payloads above [`MAX_PHOTO_BYTES`]. Stores call this before
  /// writing anything.
  pub fn validate(&self) -> Result<()> {
    if self.bytes.len() > MAX_PHOTO_BYTES {
      return Err(Error::PhotoTooLarge {
        size:  self.bytes.len(),
        limit: MAX_PHOTO_BYTES,
      });
    }
    Ok(())
  }
}

// ─── Photo ───────────────────────────────────────────────────────────────────

/// A stored photo. Never updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
  pub id:       i64,
  pub day:      Day,
  pub kind:     PhotoKind,
  pub filename: String,
  pub mime:     String,
  pub bytes:    Vec<u8>,
}

/// Best-effort MIME type from a filename's extension, defaulting to JPEG.
pub fn mime_for_filename(filename: &str) -> &'static str {
  let ext = Path::new(filename)
    .extension()
    .and_then(|e| e.to_str())
    .map(str::to_ascii_lowercase);
  match ext.as_deref() {
    Some("png") => "image/png",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    Some("heic") => "image/heic",
    _ => "image/jpeg",
  }
}
