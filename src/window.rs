//! Best-effort 20-minute window selection.
//!
//! Locates the contiguous 20-minute window with the highest average heart
//! rate, for workouts where the relevant effort is not the final 20 minutes
//! (a long cool-down tail, intervals, a mid-ride test segment).

use tracing::debug;

use crate::error::{CalculationError, Result};
use crate::models::HrSample;
use crate::zones::{analysis_window, min_valid_duration};

/// Find the 20-minute window with the highest average heart rate.
///
/// Input must be sorted by timestamp. For each candidate start index the
/// window extends up to (and including) 20 minutes past the start sample.
/// The scan stops at the first start index whose window spans less than the
/// minimum acceptable duration; this assumes reasonably gap-free sampling,
/// where remaining spans only shrink toward the end of the workout.
///
/// Ties on average keep the earliest window. Returns a borrowed sub-slice
/// of the input.
pub fn find_best_window(samples: &[HrSample]) -> Result<&[HrSample]> {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(CalculationError::EmptyInput.into()),
    };

    if last.timestamp - first.timestamp < min_valid_duration() {
        return Err(CalculationError::WorkoutTooShort.into());
    }

    let mut best: Option<(f64, usize, usize)> = None;

    for start in 0..samples.len() {
        let window_end = samples[start].timestamp + analysis_window();

        let mut end = start;
        while end + 1 < samples.len() && samples[end + 1].timestamp <= window_end {
            end += 1;
        }

        let span = samples[end].timestamp - samples[start].timestamp;
        if span < min_valid_duration() {
            // Sorted input: every later start index spans even less.
            break;
        }

        let sum: u64 = samples[start..=end].iter().map(|s| u64::from(s.bpm)).sum();
        let average = sum as f64 / (end - start + 1) as f64;

        if best.map_or(true, |(best_average, _, _)| average > best_average) {
            best = Some((average, start, end));
        }
    }

    match best {
        Some((average, start, end)) => {
            debug!(start, end, average, "selected best 20-minute window");
            Ok(&samples[start..=end])
        }
        None => Err(CalculationError::NoValidWindow.into()),
    }
}
