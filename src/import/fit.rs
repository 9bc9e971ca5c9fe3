//! FIT binary importer.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use fitparser::profile::MesgNum;
use fitparser::Value;

use crate::error::{ImportError, Result};
use crate::import::{has_extension, WorkoutData, WorkoutImport};
use crate::models::HrSample;

/// FIT "no reading" sentinel for the heart_rate record field.
const MISSING_HEART_RATE: u16 = 255;

pub struct FitImporter;

impl FitImporter {
    pub fn new() -> Self {
        Self
    }
}

impl WorkoutImport for FitImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "fit")
    }

    fn import_file(&self, file_path: &Path) -> Result<WorkoutData> {
        let content = fs::read(file_path).map_err(ImportError::Io)?;
        let data = parse_fit(&content)?;

        if data.samples.is_empty() {
            return Err(ImportError::NoHeartRateData {
                path: file_path.to_path_buf(),
            }
            .into());
        }

        Ok(data)
    }

    fn format_name(&self) -> &'static str {
        "FIT"
    }
}

/// Parse FIT content into heart-rate samples and device metadata.
///
/// `Record` messages contribute (timestamp, heart_rate) pairs; readings of
/// 255 are the FIT "missing" sentinel and are dropped. The first
/// `DeviceInfo` message with a manufacturer supplies the device name, using
/// the resolved Garmin product name when the manufacturer is Garmin.
pub fn parse_fit(content: &[u8]) -> Result<WorkoutData> {
    let records = fitparser::from_bytes(content).map_err(|e| ImportError::Parse {
        format: "FIT".to_string(),
        reason: e.to_string(),
    })?;

    let mut samples = Vec::new();
    let mut manufacturer: Option<String> = None;
    let mut garmin_product: Option<String> = None;
    let mut product_id: Option<u16> = None;

    for record in records {
        match record.kind() {
            MesgNum::Record => {
                let mut bpm: Option<u16> = None;
                let mut timestamp: Option<DateTime<Utc>> = None;

                for field in record.fields() {
                    match field.name() {
                        "heart_rate" => {
                            if let Value::UInt8(v) = field.value() {
                                bpm = Some(u16::from(*v));
                            }
                        }
                        "timestamp" => {
                            if let Value::Timestamp(t) = field.value() {
                                timestamp = Some((*t).into());
                            }
                        }
                        _ => {}
                    }
                }

                if let (Some(bpm), Some(timestamp)) = (bpm, timestamp) {
                    if bpm != MISSING_HEART_RATE {
                        samples.push(HrSample::new(timestamp, bpm));
                    }
                }
            }
            MesgNum::DeviceInfo if manufacturer.is_none() => {
                for field in record.fields() {
                    match field.name() {
                        "manufacturer" => {
                            if let Value::String(name) = field.value() {
                                manufacturer = Some(name.clone());
                            }
                        }
                        "garmin_product" => {
                            if let Value::String(name) = field.value() {
                                garmin_product = Some(name.clone());
                            }
                        }
                        "product" => {
                            if let Value::UInt16(id) = field.value() {
                                product_id = Some(*id);
                            }
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    let device_name = match (manufacturer, garmin_product) {
        (Some(manufacturer), Some(product)) if manufacturer == "garmin" => Some(product),
        (Some(manufacturer), _) => Some(manufacturer),
        (None, _) => None,
    };

    Ok(WorkoutData {
        samples,
        device_name,
        product_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fit_returns_error() {
        let result = parse_fit(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_fit_returns_parse_error() {
        let result = parse_fit(b"this is not a FIT file");
        match result {
            Err(crate::error::ZoneFinderError::Import(ImportError::Parse { format, .. })) => {
                assert_eq!(format, "FIT");
            }
            other => panic!("expected Parse error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_can_import_extension_matching() {
        let importer = FitImporter::new();
        assert!(importer.can_import(Path::new("run.fit")));
        assert!(importer.can_import(Path::new("run.FIT")));
        assert!(!importer.can_import(Path::new("run.tcx")));
    }
}
