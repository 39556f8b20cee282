//! EXIF readers.
//!
//! Two [`MetadataReader`] implementations are provided:
//!
//! - [`FastReader`] — `kamadak-exif`; TIFF, JPEG, HEIF, PNG and WebP containers.
//!   Reports capture time and artist only.
//! - [`ComprehensiveReader`] — `nom-exif`; adds RAW (CR3, RAF) and
//!   QuickTime/MP4/Matroska tracks, and reports camera and focal length tags.
//!
//! The [`MetadataExtractor`](crate::extractor::MetadataExtractor) tries them in order.

mod comprehensive;
mod fast;

pub use comprehensive::ComprehensiveReader;
pub use fast::FastReader;

use crate::error::ReadError;
use crate::metadata::RawFields;
use std::path::Path;

/// A strategy for reading capture metadata from an image file.
///
/// Implement this trait to plug another backend into the extractor chain.
/// Return [`ReadError::UnsupportedFormat`] when the file's container is
/// outside the reader's coverage so the next reader gets a turn; any other
/// error ends the extraction.
///
/// # Example
///
/// ```rust,no_run
/// use photo_postmortem::exif::{FastReader, MetadataReader};
///
/// let reader = FastReader::new();
/// match reader.attempt("photo.jpg".as_ref()) {
///     Ok(raw) => println!("Artist: {:?}", raw.creator),
///     Err(e) if e.is_unsupported_format() => println!("{} can't read it", reader.name()),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
pub trait MetadataReader: Send + Sync {
    /// The display name of this reader (e.g., "fast", "comprehensive").
    fn name(&self) -> &'static str;
    /// Read the raw metadata fields of the file at `path`.
    fn attempt(&self, path: &Path) -> Result<RawFields, ReadError>;
}
