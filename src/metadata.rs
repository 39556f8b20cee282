use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// Camera name used when a reader reports camera tags but none of them carry a value.
pub const UNKNOWN_CAMERA: &str = "Unknown";

// Offset-less layouts: EXIF native, ISO-8601 with `T`, ISO-8601 with a space.
const LOCAL_FORMATS: &[&str] = &["%Y:%m:%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

const ZONED_FORMATS: &[&str] = &[
    "%Y:%m:%d %H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%:z",
];

/// Normalized capture metadata for one image.
///
/// Every field is optional: `None` means the reader that handled the file did
/// not supply it. Values are never blank strings. The only sentinel is
/// [`UNKNOWN_CAMERA`], produced when a reader exposes camera tags but all of
/// them are empty.
///
/// # Example
///
/// ```rust,no_run
/// use photo_postmortem::extractor::MetadataExtractor;
///
/// let extractor = MetadataExtractor::default();
/// let meta = extractor.extract("photo.dng".as_ref()).unwrap();
/// println!("Camera: {:?}", meta.camera());
/// println!("Taken:  {:?}", meta.creation_time());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoMetadata {
    camera: Option<String>,
    creation_time: Option<CaptureTime>,
    creator: Option<String>,
    focal_length: Option<f64>,
}

impl PhotoMetadata {
    /// Normalize the raw output of a single reader attempt.
    pub fn from_raw(raw: RawFields) -> Self {
        Self {
            camera: raw.camera.as_ref().map(CameraTags::resolve),
            creation_time: raw.creation_time,
            creator: raw.creator.as_deref().and_then(clean_text),
            focal_length: raw.focal_length_35mm.filter(|f| f.is_finite() && *f > 0.0),
        }
    }

    /// Human-readable camera identity.
    pub fn camera(&self) -> Option<&str> {
        self.camera.as_deref()
    }

    /// Capture time recorded by the device.
    pub fn creation_time(&self) -> Option<CaptureTime> {
        self.creation_time
    }

    /// Artist / author tag.
    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }

    /// 35mm-equivalent focal length, in millimetres.
    pub fn focal_length(&self) -> Option<f64> {
        self.focal_length
    }
}

/// A capture timestamp, with or without a recorded UTC offset.
///
/// EXIF only started carrying offsets with `OffsetTimeOriginal` (EXIF 2.31),
/// so most files produce [`CaptureTime::Local`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTime {
    /// Wall-clock time of the camera, no offset known.
    Local(NaiveDateTime),
    /// Time with a fixed offset from UTC.
    Zoned(DateTime<FixedOffset>),
}

impl CaptureTime {
    /// Parse a timestamp in any layout EXIF readers emit.
    ///
    /// Accepts `2020:01:01 10:00:00`, `2020-01-01T10:00:00`,
    /// `2020-01-01 10:00:00` and RFC 3339, optionally followed by an offset
    /// such as `+09:00`. Returns `None` for anything else, including the
    /// all-zero placeholder some cameras write.
    pub fn parse(text: &str) -> Option<Self> {
        let text = clean_text(text)?;

        if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
            return Some(Self::Zoned(dt));
        }
        for fmt in ZONED_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&text, fmt) {
                return Some(Self::Zoned(dt));
            }
        }
        for fmt in LOCAL_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&text, fmt) {
                return Some(Self::Local(dt));
            }
        }
        None
    }

    /// Attach an offset string (`+09:00`) to a local time.
    ///
    /// Zoned times and unparseable offsets are returned unchanged.
    pub fn with_offset(self, offset: &str) -> Self {
        let Self::Local(naive) = self else {
            return self;
        };
        let Some(offset) = clean_text(offset).and_then(|o| o.parse::<FixedOffset>().ok()) else {
            return self;
        };
        match naive.and_local_timezone(offset).single() {
            Some(dt) => Self::Zoned(dt),
            None => self,
        }
    }
}

impl fmt::Display for CaptureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            Self::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl Serialize for CaptureTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fields produced by one reader attempt, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    pub creation_time: Option<CaptureTime>,
    pub creator: Option<String>,
    pub focal_length_35mm: Option<f64>,
    /// `None` when the reader cannot report camera identity at all.
    pub camera: Option<CameraTags>,
}

/// Camera identity tags as reported by a reader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraTags {
    /// `UniqueCameraModel` (DNG).
    pub unique_model: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
}

impl CameraTags {
    /// Resolve a display name: unique model, else make and model joined by a
    /// space (whichever are present), else [`UNKNOWN_CAMERA`].
    ///
    /// Blank strings count as absent.
    pub fn resolve(&self) -> String {
        if let Some(unique) = self.unique_model.as_deref().and_then(clean_text) {
            return unique;
        }

        let parts: Vec<String> = [self.make.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .filter_map(clean_text)
            .collect();

        if parts.is_empty() {
            UNKNOWN_CAMERA.to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Trim whitespace, NUL padding and surrounding quotes; `None` if nothing is left.
pub(crate) fn clean_text(text: &str) -> Option<String> {
    let s = text
        .trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .trim_matches('"')
        .trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Parse a focal length such as `28`, `28.0` or `28 mm`.
pub(crate) fn parse_focal_length(text: &str) -> Option<f64> {
    let s = clean_text(text)?;
    let s = s.strip_suffix("mm").unwrap_or(&s).trim();
    s.parse::<f64>().ok()
}
