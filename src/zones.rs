//! LTHR estimation and training zone calculation.
//!
//! The LTHR (Lactate Threshold Heart Rate) estimate is the integer mean of
//! the heart-rate readings in the final 20 minutes of a workout. Five zones
//! are then derived from fixed percentages of LTHR.

use chrono::Duration;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{CalculationError, Result};
use crate::models::{HeartRateZones, HrSample, Zone};

/// Conventional theoretical maximum heart rate, used as the zone 5 ceiling
/// label rather than a physiological claim.
pub const MAX_HEART_RATE: u16 = 220;

/// Nominal analysis window length.
pub fn analysis_window() -> Duration {
    Duration::minutes(20)
}

/// Minimum acceptable data span: the nominal 20 minutes with a 2 second
/// tolerance to absorb sampling-interval rounding.
pub fn min_valid_duration() -> Duration {
    Duration::seconds(20 * 60 - 2)
}

/// Zone calculation utilities and algorithms
pub struct ZoneCalculator;

impl ZoneCalculator {
    /// Sort samples ascending by timestamp, in place.
    ///
    /// Every downstream computation assumes sorted input. The sort is
    /// stable, so samples with equal timestamps keep their relative order.
    pub fn sort_by_timestamp(samples: &mut [HrSample]) {
        samples.sort_by_key(|s| s.timestamp);
    }

    /// Estimate LTHR as the integer mean of the readings in the last
    /// 20 minutes of the supplied sorted samples.
    ///
    /// Fails with `InsufficientData` when the samples span less than
    /// 20 minutes (minus the 2 second tolerance). A single-sample suffix is
    /// valid; the total-duration check is the only gate.
    pub fn calculate_lthr(samples: &[HrSample]) -> Result<u16> {
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(CalculationError::InsufficientData.into()),
        };

        if last.timestamp - first.timestamp < min_valid_duration() {
            return Err(CalculationError::InsufficientData.into());
        }

        let window = Self::last_twenty_minutes(samples);
        let sum: u64 = window.iter().map(|s| u64::from(s.bpm)).sum();
        Ok((sum / window.len() as u64) as u16)
    }

    /// Suffix of samples with timestamp no earlier than 20 minutes before
    /// the last sample. Input must be sorted.
    fn last_twenty_minutes(samples: &[HrSample]) -> &[HrSample] {
        let last = samples[samples.len() - 1].timestamp;
        let cutoff = last - analysis_window();
        let start = samples.partition_point(|s| s.timestamp < cutoff);
        &samples[start..]
    }

    /// Derive five contiguous training zones from an LTHR value.
    ///
    /// Zone boundaries as percentages of LTHR:
    /// - Z1: 0 to 80% − 1 (Active Recovery)
    /// - Z2: 80% to 88% (Aerobic Base)
    /// - Z3: 88% + 1 to 94% (Tempo)
    /// - Z4: 94% + 1 to LTHR (Lactate Threshold)
    /// - Z5: LTHR + 1 to 220 (VO2 Max)
    pub fn calculate_zones(lthr: u16) -> HeartRateZones {
        let z2_lower = zone_boundary(lthr, dec!(0.80));
        let z2_upper = zone_boundary(lthr, dec!(0.88));
        let z3_upper = zone_boundary(lthr, dec!(0.94));
        let z4_upper = lthr;

        HeartRateZones {
            lthr,
            zones: [
                Zone { number: 1, min: 0, max: z2_lower.saturating_sub(1) },
                Zone { number: 2, min: z2_lower, max: z2_upper },
                Zone { number: 3, min: z2_upper + 1, max: z3_upper },
                Zone { number: 4, min: z3_upper + 1, max: z4_upper },
                Zone { number: 5, min: z4_upper + 1, max: MAX_HEART_RATE },
            ],
        }
    }

    /// Full pipeline over raw samples: sort, estimate LTHR from the final
    /// 20 minutes, derive zones.
    ///
    /// Sorting is an in-place side effect on the caller's slice.
    pub fn calculate_zones_from_hr_data(samples: &mut [HrSample]) -> Result<HeartRateZones> {
        Self::sort_by_timestamp(samples);
        let lthr = Self::calculate_lthr(samples)?;
        Ok(Self::calculate_zones(lthr))
    }
}

/// Round-half-away-from-zero boundary, matching the zone percentage tables.
fn zone_boundary(lthr: u16, percentage: Decimal) -> u16 {
    (Decimal::from(lthr) * percentage)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u16()
        .unwrap_or(MAX_HEART_RATE)
}
