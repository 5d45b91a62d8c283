//! EXIF metadata decoding.
//!
//! - [`read_exif`] — Decode the metadata embedded in downloaded image bytes
//! - [`ExifRecord`] — The decoded tags, each with a label and a [`Category`]
//!
//! JPEG, TIFF and HEIF containers are parsed by `nom-exif` directly. PNG and
//! WebP carry EXIF in a chunk that is unwrapped with `img-parts` first.

pub mod gps;
mod reader;
mod record;
pub mod tags;

pub use reader::read_exif;
pub use record::{Category, ExifRecord, TagEntry, TagValue};
pub(crate) use record::RecordBuilder;
