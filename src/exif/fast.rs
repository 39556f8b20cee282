use crate::error::ReadError;
use crate::exif::MetadataReader;
use crate::metadata::{CaptureTime, RawFields, clean_text};
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const NAME: &str = "fast";

const TAG_DNG_VERSION: u16 = 0xC612;

/// TIFF-based (or otherwise) RAW containers left to the comprehensive reader.
const RAW_EXTENSIONS: &[&str] = &[
    "dng", "nef", "nrw", "cr2", "cr3", "crw", "arw", "srf", "sr2", "orf", "rw2", "raf", "pef",
    "srw", "3fr", "erf", "kdc", "mrw", "x3f", "iiq", "rwl", "raw",
];

/// Lightweight reader built on `kamadak-exif`.
///
/// Only understands TIFF, JPEG, HEIF, PNG and WebP containers. RAW files are
/// declined even when TIFF-based (by extension, or by a `DNGVersion` tag in
/// IFD0), as is anything else such as video; all of these are reported as
/// [`ReadError::UnsupportedFormat`].
///
/// It reports capture time and artist but never camera identity or focal
/// length.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastReader;

impl FastReader {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataReader for FastReader {
    fn name(&self) -> &'static str {
        NAME
    }

    fn attempt(&self, path: &Path) -> Result<RawFields, ReadError> {
        if is_raw_extension(path) {
            return Err(ReadError::UnsupportedFormat {
                reader: NAME,
                reason: "RAW container".to_string(),
            });
        }

        let file = File::open(path).map_err(|source| ReadError::Io {
            reader: NAME,
            source,
        })?;
        let mut reader = BufReader::new(file);

        let exif = match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            Err(
                exif::Error::InvalidFormat(reason)
                | exif::Error::NotFound(reason)
                | exif::Error::NotSupported(reason),
            ) => {
                return Err(ReadError::UnsupportedFormat {
                    reader: NAME,
                    reason: reason.to_string(),
                });
            }
            Err(exif::Error::Io(source)) => {
                return Err(ReadError::Io {
                    reader: NAME,
                    source,
                });
            }
            Err(e) => {
                return Err(ReadError::Malformed {
                    reader: NAME,
                    reason: e.to_string(),
                });
            }
        };

        if exif
            .fields()
            .any(|f| f.ifd_num == In::PRIMARY && f.tag.number() == TAG_DNG_VERSION)
        {
            return Err(ReadError::UnsupportedFormat {
                reader: NAME,
                reason: "DNG container".to_string(),
            });
        }

        let creation_time = ascii_field(&exif, Tag::DateTimeOriginal)
            .and_then(|s| CaptureTime::parse(&s))
            .map(|t| match ascii_field(&exif, Tag::OffsetTimeOriginal) {
                Some(offset) => t.with_offset(&offset),
                None => t,
            });

        log::debug!(
            "{NAME}: {} read; camera and focal length are not reported by this reader",
            path.display()
        );

        Ok(RawFields {
            creation_time,
            creator: ascii_field(&exif, Tag::Artist),
            focal_length_35mm: None,
            camera: None,
        })
    }
}

fn is_raw_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| RAW_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// First ASCII component of a primary-image tag, cleaned of padding.
fn ascii_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(parts) => parts
            .first()
            .and_then(|bytes| clean_text(&String::from_utf8_lossy(bytes))),
        _ => None,
    }
}
