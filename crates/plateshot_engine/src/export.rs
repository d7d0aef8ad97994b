use std::path::{Path, PathBuf};

use plateshot_core::{DishEntry, DishId, DishStatus, ImageDecodeError};
use plateshot_logging::shot_info;
use serde::Serialize;

use crate::filename::image_filename;
use crate::persist::{AtomicFileWriter, PersistError};

pub const MANIFEST_FILENAME: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub dish_id: DishId,
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub images: Vec<ExportedImage>,
    /// Dishes without a completed image.
    pub skipped: usize,
    pub manifest_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("image for '{name}' is not decodable: {source}")]
    Decode {
        name: String,
        source: ImageDecodeError,
    },
    #[error("manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    name: &'a str,
    description: &'a str,
    file: String,
    media_type: &'a str,
    bytes: usize,
}

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    image_count: usize,
    images: Vec<ManifestEntry<'a>>,
}

/// Writes every completed dish photo into `output_dir`, plus a manifest.
pub fn export_images(output_dir: &Path, dishes: &[DishEntry]) -> Result<ExportSummary, ExportError> {
    let writer = AtomicFileWriter::open(output_dir)?;
    let mut images = Vec::new();
    let mut entries = Vec::new();
    let mut skipped = 0;

    for dish in dishes {
        let image = match (&dish.status, &dish.image) {
            (DishStatus::Completed, Some(image)) => image,
            _ => {
                skipped += 1;
                continue;
            }
        };
        let bytes = image.decode().map_err(|source| ExportError::Decode {
            name: dish.name.clone(),
            source,
        })?;
        let filename = image_filename(&dish.name, dish.id, image.extension());
        let path = writer.write(&filename, &bytes)?;
        entries.push(ManifestEntry {
            name: &dish.name,
            description: &dish.description,
            file: filename,
            media_type: &image.mime_type,
            bytes: bytes.len(),
        });
        images.push(ExportedImage {
            dish_id: dish.id,
            name: dish.name.clone(),
            path,
        });
    }

    let manifest = Manifest {
        image_count: entries.len(),
        images: entries,
    };
    let manifest_path = writer.write(MANIFEST_FILENAME, serde_json::to_vec_pretty(&manifest)?)?;
    shot_info!(
        "Exported {} image(s) to {:?} ({} skipped)",
        images.len(),
        writer.dir(),
        skipped
    );

    Ok(ExportSummary {
        images,
        skipped,
        manifest_path,
    })
}
