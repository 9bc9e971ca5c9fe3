//! Workout file decoding.
//!
//! Decoders normalize TCX and FIT files into a flat list of heart-rate
//! samples plus recording-device metadata. Sentinel "missing" readings are
//! dropped here, before data reaches the calculation layer.

use std::path::Path;

use tracing::debug;

use crate::error::{ImportError, Result};
use crate::models::HrSample;

pub mod fit;
pub mod tcx;

/// Normalized result of decoding one workout file.
#[derive(Debug, Clone)]
pub struct WorkoutData {
    /// Heart-rate samples in file order, sentinels already removed
    pub samples: Vec<HrSample>,

    /// Recording device name, when the file carries one
    pub device_name: Option<String>,

    /// Device product identifier, when the file carries one
    pub product_id: Option<u16>,
}

/// Trait for importing heart-rate data from different file formats
pub trait WorkoutImport {
    /// Check if this importer can handle the given file
    fn can_import(&self, file_path: &Path) -> bool;

    /// Decode heart-rate samples and device metadata from the file
    fn import_file(&self, file_path: &Path) -> Result<WorkoutData>;

    /// Get the format name for this importer
    fn format_name(&self) -> &'static str;
}

/// Manager for dispatching files to the matching importer
pub struct ImportManager {
    importers: Vec<Box<dyn WorkoutImport>>,
}

impl ImportManager {
    pub fn new() -> Self {
        let importers: Vec<Box<dyn WorkoutImport>> = vec![
            Box::new(tcx::TcxImporter::new()),
            Box::new(fit::FitImporter::new()),
        ];

        Self { importers }
    }

    /// Import a single file, detecting the format from its extension.
    pub fn import_file(&self, file_path: &Path) -> Result<WorkoutData> {
        for importer in &self.importers {
            if importer.can_import(file_path) {
                debug!(
                    format = importer.format_name(),
                    file = %file_path.display(),
                    "importing workout file"
                );
                return importer.import_file(file_path);
            }
        }

        let format = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_else(|| "<no extension>".to_string());
        Err(ImportError::UnsupportedFormat { format }.into())
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive extension check shared by the importers.
pub(crate) fn has_extension(file_path: &Path, wanted: &str) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}
