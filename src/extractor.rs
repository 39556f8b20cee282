use crate::error::{ExtractError, ReadError, Result};
use crate::exif::{ComprehensiveReader, FastReader, MetadataReader};
use crate::metadata::PhotoMetadata;
use std::path::Path;

/// Extracts [`PhotoMetadata`] by trying an ordered chain of readers.
///
/// Each reader is attempted at most once. A reader reporting
/// [`ReadError::UnsupportedFormat`] hands over to the next one; any other
/// reader error ends the call with [`ExtractError::Unreadable`]. The first
/// successful reader supplies every field, nothing is merged across readers.
///
/// The default chain is [`FastReader`] then [`ComprehensiveReader`].
///
/// # Example
///
/// ```rust,no_run
/// use photo_postmortem::extractor::MetadataExtractor;
///
/// let extractor = MetadataExtractor::default();
/// match extractor.extract("IMG_0001.dng".as_ref()) {
///     Ok(meta) => println!("{:?} by {:?}", meta.camera(), meta.creator()),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
pub struct MetadataExtractor {
    readers: Vec<Box<dyn MetadataReader>>,
}

/// A successful extraction together with the reader that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub metadata: PhotoMetadata,
    pub reader: &'static str,
}

impl MetadataExtractor {
    /// Build an extractor over `readers`, tried in the given order.
    pub fn new(readers: Vec<Box<dyn MetadataReader>>) -> Self {
        Self { readers }
    }

    /// Names of the configured readers, in priority order.
    pub fn reader_names(&self) -> Vec<&'static str> {
        self.readers.iter().map(|r| r.name()).collect()
    }

    /// Extract normalized metadata from the image at `path`.
    pub fn extract(&self, path: &Path) -> Result<PhotoMetadata> {
        self.extract_traced(path).map(|e| e.metadata)
    }

    /// Like [`extract`](Self::extract), also reporting which reader succeeded.
    pub fn extract_traced(&self, path: &Path) -> Result<Extracted> {
        let mut last_unsupported: Option<ReadError> = None;

        for reader in &self.readers {
            match reader.attempt(path) {
                Ok(raw) => {
                    log::debug!("{}: metadata read by {}", path.display(), reader.name());
                    return Ok(Extracted {
                        metadata: PhotoMetadata::from_raw(raw),
                        reader: reader.name(),
                    });
                }
                Err(e) if e.is_unsupported_format() => {
                    log::debug!("{}: {e}; trying next reader", path.display());
                    last_unsupported = Some(e);
                }
                Err(e) => {
                    return Err(ExtractError::Unreadable {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
            }
        }

        match last_unsupported {
            Some(source) => Err(ExtractError::Unreadable {
                path: path.to_path_buf(),
                source,
            }),
            None => Err(ExtractError::NoReaders),
        }
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new(vec![
            Box::new(FastReader::new()),
            Box::new(ComprehensiveReader::new()),
        ])
    }
}

impl std::fmt::Debug for MetadataExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataExtractor")
            .field("readers", &self.reader_names())
            .finish()
    }
}
