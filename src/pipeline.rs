use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::exif::{ComprehensiveReader, FastReader, MetadataReader};
use crate::extractor::MetadataExtractor;
use crate::metadata::PhotoMetadata;

/// Supported image extensions.
const IMAGE_EXTENSIONS: &[&str] = &[
    // Fast reader containers
    "jpg", "jpeg", "png", "webp", "tif", "tiff", "heic", "heif", "avif",
    // RAW formats, always left to the comprehensive reader
    "cr3", "cr2", "dng", "nef", "arw", "raf", "orf", "rw2", "pef", "srw",
    // Track-based media
    "mov", "mp4", "m4v", "3gp",
];

/// The outcome of extracting metadata from a single image.
///
/// Exactly one of `metadata` and `error` is set.
#[derive(Debug, Serialize)]
pub struct ExtractReport {
    pub path: PathBuf,
    /// Name of the reader that produced the metadata.
    pub reader: Option<String>,
    pub metadata: Option<PhotoMetadata>,
    pub error: Option<String>,
}

/// Collect supported image files from the given paths.
///
/// Accepts a mix of file paths and directory paths. Directories are walked
/// recursively (following symlinks). Only files with supported image extensions
/// are included.
///
/// # Example
///
/// ```rust,no_run
/// use photo_postmortem::pipeline::collect_images;
/// use std::path::PathBuf;
///
/// let images = collect_images(&[
///     PathBuf::from("photo.jpg"),       // single file
///     PathBuf::from("./photos/"),        // entire directory
/// ]);
/// println!("Found {} images", images.len());
/// ```
pub fn collect_images(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_supported_image(path) {
                images.push(path.clone());
            } else {
                log::warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let p = entry.path();
                if p.is_file() && is_supported_image(p) {
                    images.push(p.to_path_buf());
                }
            }
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }

    images
}

/// Check if a file has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Build the reader fallback chain from configuration.
///
/// Readers are added in `reader_order`, skipping disabled and unknown names.
/// Fails if no reader remains.
///
/// # Example
///
/// ```rust,no_run
/// use photo_postmortem::config::Config;
/// use photo_postmortem::pipeline::build_extractor;
///
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
/// let extractor = build_extractor(&config).unwrap();
/// println!("Readers: {:?}", extractor.reader_names());
/// ```
pub fn build_extractor(config: &Config) -> Result<MetadataExtractor> {
    let mut readers: Vec<Box<dyn MetadataReader>> = Vec::new();

    for name in config.enabled_readers() {
        match name.as_str() {
            "fast" => readers.push(Box::new(FastReader::new())),
            "comprehensive" => readers.push(Box::new(ComprehensiveReader::new())),
            _ => {}
        }
    }

    if readers.is_empty() {
        anyhow::bail!("No metadata readers enabled. Check `reader_order` and `readers` in the config.");
    }

    Ok(MetadataExtractor::new(readers))
}

/// Extract metadata from one image, capturing any failure in the report.
pub fn extract_image(path: &Path, extractor: &MetadataExtractor) -> ExtractReport {
    match extractor.extract_traced(path) {
        Ok(extracted) => ExtractReport {
            path: path.to_path_buf(),
            reader: Some(extracted.reader.to_string()),
            metadata: Some(extracted.metadata),
            error: None,
        },
        Err(e) => {
            // Keep the reader's cause in the message; the report only holds a string.
            let message = match std::error::Error::source(&e) {
                Some(cause) => format!("{e}: {cause}"),
                None => e.to_string(),
            };
            ExtractReport {
                path: path.to_path_buf(),
                reader: None,
                metadata: None,
                error: Some(message),
            }
        }
    }
}

/// Extract metadata from every image in order. Failures never abort the batch.
pub fn extract_all(paths: &[PathBuf], extractor: &MetadataExtractor) -> Vec<ExtractReport> {
    paths.iter().map(|p| extract_image(p, extractor)).collect()
}
