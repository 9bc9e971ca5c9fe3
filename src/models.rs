use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped heart-rate reading from a workout recording.
///
/// File decoders drop sentinel "missing" readings (0 in TCX, 255 in FIT)
/// before samples reach the calculation layer, so any reading carried here
/// is treated as real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrSample {
    /// Absolute point in time the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Heart rate in beats per minute
    pub bpm: u16,
}

impl HrSample {
    pub fn new(timestamp: DateTime<Utc>, bpm: u16) -> Self {
        Self { timestamp, bpm }
    }
}

/// One training zone: a 1-based zone number and an inclusive bpm range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub number: u8,
    pub min: u16,
    pub max: u16,
}

/// The result of a zone calculation: the LTHR estimate and exactly five
/// contiguous zones.
///
/// The fixed-size array makes "always five zones" a type-level guarantee.
/// Zone 1 starts at 0, zone 5 ends at the conventional 220 bpm ceiling, and
/// each zone's max is exactly one below the next zone's min.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZones {
    /// Lactate Threshold Heart Rate estimate in bpm
    pub lthr: u16,

    /// The five training zones, ordered 1..=5
    pub zones: [Zone; 5],
}

impl HeartRateZones {
    /// Determine which zone a given heart rate falls into.
    pub fn zone_for(&self, bpm: u16) -> u8 {
        for zone in &self.zones {
            if bpm <= zone.max {
                return zone.number;
            }
        }
        5
    }
}
