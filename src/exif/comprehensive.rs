use crate::error::ReadError;
use crate::exif::MetadataReader;
use crate::metadata::{CameraTags, CaptureTime, RawFields, clean_text, parse_focal_length};
use nom_exif::{EntryValue, Exif, ExifIter, MediaParser, MediaSource, TrackInfo, TrackInfoTag};
use std::fs::File;
use std::path::Path;

const NAME: &str = "comprehensive";

// IFD0 / Exif sub-IFD tag IDs
const TAG_MAKE: u16 = 0x010F;
const TAG_MODEL: u16 = 0x0110;
const TAG_ARTIST: u16 = 0x013B;
const TAG_CREATE_DATE: u16 = 0x9004;
const TAG_FOCAL_LENGTH_35MM: u16 = 0xA405;
const TAG_UNIQUE_CAMERA_MODEL: u16 = 0xC614;

/// Broad-coverage reader built on `nom-exif`.
///
/// Handles EXIF-bearing images (JPEG, HEIF/HEIC, TIFF and TIFF-based RAW,
/// CR3, RAF) as well as QuickTime/MP4/Matroska tracks. Slower than
/// [`FastReader`](super::FastReader) but reports camera identity and
/// 35mm-equivalent focal length.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComprehensiveReader;

impl ComprehensiveReader {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataReader for ComprehensiveReader {
    fn name(&self) -> &'static str {
        NAME
    }

    fn attempt(&self, path: &Path) -> Result<RawFields, ReadError> {
        // Surface open failures as I/O errors before nom-exif sniffs the format.
        File::open(path).map_err(|source| ReadError::Io {
            reader: NAME,
            source,
        })?;

        let mut parser = MediaParser::new();
        let ms = MediaSource::file_path(path).map_err(sniff_error)?;

        if ms.has_exif() {
            // The container is recognized; failing to find Exif in it only
            // means the image carries no metadata.
            let iter: ExifIter = match parser.parse(ms) {
                Ok(iter) => iter,
                Err(e) => {
                    log::debug!("{NAME}: no EXIF data found in {} ({e})", path.display());
                    return Ok(RawFields {
                        camera: Some(CameraTags::default()),
                        ..Default::default()
                    });
                }
            };
            let exif: Exif = iter.into();
            Ok(exif_fields(&exif))
        } else if ms.has_track() {
            let info: TrackInfo = parser.parse(ms).map_err(|e| ReadError::Malformed {
                reader: NAME,
                reason: e.to_string(),
            })?;
            Ok(track_fields(&info))
        } else {
            Err(ReadError::UnsupportedFormat {
                reader: NAME,
                reason: "no Exif or track metadata in container".to_string(),
            })
        }
    }
}

/// Classify a failure to open or sniff the container.
fn sniff_error(e: nom_exif::Error) -> ReadError {
    match e {
        nom_exif::Error::IOError(source) => ReadError::Io {
            reader: NAME,
            source,
        },
        other => ReadError::UnsupportedFormat {
            reader: NAME,
            reason: other.to_string(),
        },
    }
}

fn exif_fields(exif: &Exif) -> RawFields {
    let tag = |code: u16| exif.get_by_ifd_tag_code(0, code).and_then(entry_to_string);

    RawFields {
        creation_time: tag(TAG_CREATE_DATE).and_then(|s| CaptureTime::parse(&s)),
        creator: tag(TAG_ARTIST),
        focal_length_35mm: tag(TAG_FOCAL_LENGTH_35MM).and_then(|s| parse_focal_length(&s)),
        camera: Some(CameraTags {
            unique_model: tag(TAG_UNIQUE_CAMERA_MODEL),
            make: tag(TAG_MAKE),
            model: tag(TAG_MODEL),
        }),
    }
}

// Tracks carry no artist or focal length.
fn track_fields(info: &TrackInfo) -> RawFields {
    let tag = |t: TrackInfoTag| info.get(t).and_then(entry_to_string);

    RawFields {
        creation_time: tag(TrackInfoTag::CreateDate).and_then(|s| CaptureTime::parse(&s)),
        creator: None,
        focal_length_35mm: None,
        camera: Some(CameraTags {
            unique_model: None,
            make: tag(TrackInfoTag::Make),
            model: tag(TrackInfoTag::Model),
        }),
    }
}

/// Convert an EntryValue to an Option<String>.
fn entry_to_string(val: &EntryValue) -> Option<String> {
    clean_text(&val.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::fixtures;
    use std::fs;
    use tempfile::TempDir;

    fn local(text: &str) -> Option<CaptureTime> {
        CaptureTime::parse(text)
    }

    #[test]
    fn reads_camera_tags_from_jpeg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("acme.jpg");
        fs::write(&path, fixtures::wrap_in_jpeg(&fixtures::camera_tiff(None).build())).unwrap();

        let raw = ComprehensiveReader::new().attempt(&path).unwrap();
        assert_eq!(
            raw,
            RawFields {
                creation_time: local("2021:06:15 08:30:00"),
                creator: Some("Jane".into()),
                focal_length_35mm: Some(28.0),
                camera: Some(CameraTags {
                    unique_model: None,
                    make: Some("Acme".into()),
                    model: Some("X100".into()),
                }),
            }
        );
    }

    #[test]
    fn reads_unique_camera_model_from_dng() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("acme.dng");
        fs::write(&path, fixtures::camera_tiff(Some("Acme X100 Mk II")).dng().build()).unwrap();

        let raw = ComprehensiveReader::new().attempt(&path).unwrap();
        let camera = raw.camera.expect("camera tags reported");
        assert_eq!(camera.unique_model.as_deref(), Some("Acme X100 Mk II"));
        assert_eq!(camera.make.as_deref(), Some("Acme"));
        assert_eq!(raw.focal_length_35mm, Some(28.0));
        assert_eq!(raw.creation_time, local("2021:06:15 08:30:00"));
    }

    #[test]
    fn jpeg_without_exif_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.jpg");
        fs::write(&path, fixtures::jpeg_without_exif()).unwrap();

        let raw = ComprehensiveReader::new().attempt(&path).unwrap();
        assert_eq!(
            raw,
            RawFields {
                camera: Some(CameraTags::default()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn sniff_io_failure_is_io_error() {
        let err = sniff_error(nom_exif::Error::IOError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        )));
        assert!(matches!(err, ReadError::Io { reader: "comprehensive", .. }));
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.dng");
        fs::write(&path, b"\x00\x01\x02 not a container at all").unwrap();

        let err = ComprehensiveReader::new().attempt(&path).unwrap_err();
        assert_eq!(err.reader(), "comprehensive");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ComprehensiveReader::new()
            .attempt(Path::new("/nonexistent/photo.cr3"))
            .unwrap_err();
        assert!(matches!(err, ReadError::Io { reader: "comprehensive", .. }));
    }

    #[test]
    fn entry_to_string_drops_blank_text() {
        assert_eq!(entry_to_string(&EntryValue::Text("  ".into())), None);
        assert_eq!(
            entry_to_string(&EntryValue::Text("Acme".into())),
            Some("Acme".to_string())
        );
    }
}
