//! TCX (Training Center XML) importer.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;
use tracing::trace;

use crate::error::{ImportError, Result};
use crate::import::{has_extension, WorkoutData, WorkoutImport};
use crate::models::HrSample;

pub struct TcxImporter;

impl TcxImporter {
    pub fn new() -> Self {
        Self
    }
}

impl WorkoutImport for TcxImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "tcx")
    }

    fn import_file(&self, file_path: &Path) -> Result<WorkoutData> {
        let content = fs::read_to_string(file_path).map_err(ImportError::Io)?;
        let data = parse_tcx(&content)?;

        if data.samples.is_empty() {
            return Err(ImportError::NoHeartRateData {
                path: file_path.to_path_buf(),
            }
            .into());
        }

        Ok(data)
    }

    fn format_name(&self) -> &'static str {
        "TCX"
    }
}

/// Parse TCX content into heart-rate samples and device metadata.
///
/// Trackpoints with a missing `HeartRateBpm` element or a reading of 0 (the
/// TCX "no reading" sentinel) are dropped, as are trackpoints without a
/// parseable timestamp.
pub fn parse_tcx(content: &str) -> Result<WorkoutData> {
    let tcx: TrainingCenterDatabase = from_str(content).map_err(|e| ImportError::Parse {
        format: "TCX".to_string(),
        reason: e.to_string(),
    })?;

    let mut samples = Vec::new();
    let mut device_name = None;
    let mut product_id = None;

    if let Some(activities) = &tcx.activities {
        for activity in &activities.activity {
            if let Some(creator) = &activity.creator {
                if device_name.is_none() {
                    device_name = creator.name.clone();
                    product_id = creator.product_id;
                }
            }

            for lap in &activity.lap {
                for track in &lap.track {
                    for trackpoint in &track.trackpoint {
                        let bpm = match &trackpoint.heart_rate_bpm {
                            Some(hr) if hr.value > 0 => hr.value,
                            _ => continue,
                        };
                        let Some(time) = &trackpoint.time else {
                            continue;
                        };
                        let Ok(timestamp) = DateTime::parse_from_rfc3339(time) else {
                            trace!(time = %time, "skipping trackpoint with unparseable timestamp");
                            continue;
                        };
                        samples.push(HrSample::new(timestamp.with_timezone(&Utc), bpm));
                    }
                }
            }
        }
    }

    Ok(WorkoutData {
        samples,
        device_name,
        product_id,
    })
}

// TCX XML structures (TrainingCenterDatabase v2 schema, heart-rate subset)

#[derive(Debug, Deserialize)]
#[serde(rename = "TrainingCenterDatabase")]
struct TrainingCenterDatabase {
    #[serde(rename = "Activities")]
    activities: Option<Activities>,
}

#[derive(Debug, Deserialize)]
struct Activities {
    #[serde(rename = "Activity", default)]
    activity: Vec<Activity>,
}

#[derive(Debug, Deserialize)]
struct Activity {
    #[serde(rename = "Lap", default)]
    lap: Vec<Lap>,
    #[serde(rename = "Creator")]
    creator: Option<Creator>,
}

#[derive(Debug, Deserialize)]
struct Lap {
    #[serde(rename = "Track", default)]
    track: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct Track {
    #[serde(rename = "Trackpoint", default)]
    trackpoint: Vec<Trackpoint>,
}

#[derive(Debug, Deserialize)]
struct Trackpoint {
    #[serde(rename = "Time")]
    time: Option<String>,
    #[serde(rename = "HeartRateBpm")]
    heart_rate_bpm: Option<HeartRateBpm>,
}

#[derive(Debug, Deserialize)]
struct HeartRateBpm {
    #[serde(rename = "Value")]
    value: u16,
}

#[derive(Debug, Deserialize)]
struct Creator {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "ProductID")]
    product_id: Option<u16>,
}
