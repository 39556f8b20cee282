//! # photo-postmortem
//!
//! Normalized capture metadata (camera, capture time, creator and
//! 35mm-equivalent focal length) from any image, whatever its container.
//!
//! No single EXIF library covers every format. The [`MetadataExtractor`](extractor::MetadataExtractor)
//! first tries a fast reader (`kamadak-exif`) and, when it does not understand
//! the container, falls back to a comprehensive one (`nom-exif`).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use photo_postmortem::extractor::MetadataExtractor;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let extractor = MetadataExtractor::default();
//!     let meta = extractor.extract(Path::new("IMG_0042.dng"))?;
//!
//!     println!("Camera:       {:?}", meta.camera());
//!     println!("Taken:        {:?}", meta.creation_time());
//!     println!("Creator:      {:?}", meta.creator());
//!     println!("Focal length: {:?}", meta.focal_length());
//!     Ok(())
//! }
//! ```
//!
//! ## Batch Usage
//!
//! ```rust,no_run
//! use photo_postmortem::config::Config;
//! use photo_postmortem::pipeline::{build_extractor, collect_images, extract_all};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("config.json".as_ref()))?;
//!     let extractor = build_extractor(&config)?;
//!
//!     let images = collect_images(&[PathBuf::from("./photos")]);
//!     for report in extract_all(&images, &extractor) {
//!         match (&report.metadata, &report.error) {
//!             (Some(meta), _) => println!("{}: {:?}", report.path.display(), meta.camera()),
//!             (None, Some(err)) => eprintln!("{err}"),
//!             (None, None) => {}
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Reader Coverage
//!
//! | Reader | Containers | Fields |
//! |--------|-----------|--------|
//! | fast | JPEG, TIFF, HEIF, PNG, WebP (no RAW) | creation time, creator |
//! | comprehensive | JPEG, TIFF/RAW, HEIF, CR3, RAF, MOV/MP4 | creation time, creator, camera, focal length |
//!
//! Files handled by the fast reader never report camera or focal length.
//!
//! ## Modules
//!
//! - [`config`] — Configuration types and loading/saving
//! - [`error`] — Reader and extraction errors
//! - [`exif`] — The [`MetadataReader`](exif::MetadataReader) trait and both readers
//! - [`extractor`] — Ordered reader fallback
//! - [`metadata`] — [`PhotoMetadata`](metadata::PhotoMetadata) and normalization
//! - [`pipeline`] — Image collection and batch extraction

pub mod config;
pub mod error;
pub mod exif;
pub mod extractor;
pub mod metadata;
pub mod pipeline;
