//! Integration tests for the full import -> LTHR -> zones pipeline.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::NamedTempFile;

use zone_finder::import::ImportManager;
use zone_finder::window::find_best_window;
use zone_finder::zones::ZoneCalculator;
use zone_finder::{CalculationError, HrSample, ImportError, ZoneFinderError};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 28, 18, 0, 0).unwrap()
}

fn create_constant_hr(start: DateTime<Utc>, hr: u16, seconds: usize) -> Vec<HrSample> {
    (0..seconds)
        .map(|i| HrSample::new(start + Duration::seconds(i as i64), hr))
        .collect()
}

/// Render (timestamp, bpm) pairs as a minimal TCX activity. A bpm of 0 is
/// written as the TCX missing-reading sentinel.
fn render_tcx(points: &[(DateTime<Utc>, u16)]) -> String {
    let mut trackpoints = String::new();
    for (time, bpm) in points {
        write!(
            trackpoints,
            "<Trackpoint><Time>{}</Time><HeartRateBpm><Value>{}</Value></HeartRateBpm></Trackpoint>",
            time.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            bpm
        )
        .unwrap();
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2">
  <Activities>
    <Activity Sport="Running">
      <Id>2025-10-28T18:00:00Z</Id>
      <Lap StartTime="2025-10-28T18:00:00Z">
        <Track>{}</Track>
      </Lap>
      <Creator xsi:type="Device_t" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
        <Name>Forerunner 255</Name>
        <ProductID>4257</ProductID>
      </Creator>
    </Activity>
  </Activities>
</TrainingCenterDatabase>"#,
        trackpoints
    )
}

fn write_tcx_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".tcx")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_end_to_end_ramp_then_steady() {
    // 10 minutes ramping 140->165, then 20 minutes oscillating 170-172.
    let start = base_time();
    let mut samples = Vec::new();
    for i in 0..600 {
        samples.push(HrSample::new(
            start + Duration::seconds(i),
            140 + (i / 24) as u16,
        ));
    }
    for i in 600..1800 {
        samples.push(HrSample::new(
            start + Duration::seconds(i),
            170 + (i % 3) as u16,
        ));
    }

    let result = ZoneCalculator::calculate_zones_from_hr_data(&mut samples).unwrap();
    assert!((170..=172).contains(&result.lthr), "LTHR = {}", result.lthr);
    assert!(
        (149..=151).contains(&result.zones[1].max),
        "Zone 2 max = {}",
        result.zones[1].max
    );
}

#[test]
fn test_best_window_composes_with_lthr() {
    // Peak effort followed by a cool-down the trailing-window estimate
    // would dilute.
    let start = base_time();
    let mut samples = Vec::new();
    samples.extend(create_constant_hr(start, 120, 5 * 60));
    samples.extend(create_constant_hr(start + Duration::minutes(5), 170, 30 * 60));
    samples.extend(create_constant_hr(start + Duration::minutes(35), 110, 5 * 60));

    ZoneCalculator::sort_by_timestamp(&mut samples);

    let trailing_lthr = ZoneCalculator::calculate_lthr(&samples).unwrap();
    let best = find_best_window(&samples).unwrap();
    let best_lthr = ZoneCalculator::calculate_lthr(best).unwrap();

    assert!((168..=172).contains(&best_lthr), "LTHR = {}", best_lthr);
    assert!(best_lthr > trailing_lthr);
}

#[test]
fn test_tcx_file_to_zones() {
    // 22 minutes at 5-second cadence, constant 165 bpm.
    let start = base_time();
    let points: Vec<(DateTime<Utc>, u16)> = (0..(22 * 12))
        .map(|i| (start + Duration::seconds(i * 5), 165))
        .collect();
    let file = write_tcx_file(&render_tcx(&points));

    let mut workout = ImportManager::new().import_file(file.path()).unwrap();
    assert_eq!(workout.device_name.as_deref(), Some("Forerunner 255"));

    let result = ZoneCalculator::calculate_zones_from_hr_data(&mut workout.samples).unwrap();
    assert_eq!(result.lthr, 165);
    assert_eq!(result.zones[0].min, 0);
    assert_eq!(result.zones[4].max, 220);
}

#[test]
fn test_tcx_sentinel_readings_are_excluded() {
    // Zero readings interleaved with real ones must not drag the mean down.
    let start = base_time();
    let points: Vec<(DateTime<Utc>, u16)> = (0..(21 * 60))
        .map(|i| {
            let bpm = if i % 10 == 0 { 0 } else { 160 };
            (start + Duration::seconds(i), bpm)
        })
        .collect();
    let file = write_tcx_file(&render_tcx(&points));

    let mut workout = ImportManager::new().import_file(file.path()).unwrap();
    let result = ZoneCalculator::calculate_zones_from_hr_data(&mut workout.samples).unwrap();
    assert_eq!(result.lthr, 160);
}

#[test]
fn test_tcx_with_only_sentinel_readings() {
    let start = base_time();
    let points: Vec<(DateTime<Utc>, u16)> = (0..30)
        .map(|i| (start + Duration::seconds(i), 0))
        .collect();
    let file = write_tcx_file(&render_tcx(&points));

    let result = ImportManager::new().import_file(file.path());
    assert!(matches!(
        result,
        Err(ZoneFinderError::Import(ImportError::NoHeartRateData { .. }))
    ));
}

#[test]
fn test_short_tcx_workout_is_insufficient() {
    let start = base_time();
    let points: Vec<(DateTime<Utc>, u16)> = (0..(10 * 60))
        .map(|i| (start + Duration::seconds(i), 150))
        .collect();
    let file = write_tcx_file(&render_tcx(&points));

    let mut workout = ImportManager::new().import_file(file.path()).unwrap();
    let result = ZoneCalculator::calculate_zones_from_hr_data(&mut workout.samples);
    assert!(matches!(
        result,
        Err(ZoneFinderError::Calculation(CalculationError::InsufficientData))
    ));
}

#[test]
fn test_unsupported_format_is_rejected() {
    let result = ImportManager::new().import_file(&PathBuf::from("workout.gpx"));
    assert!(matches!(
        result,
        Err(ZoneFinderError::Import(ImportError::UnsupportedFormat { .. }))
    ));
}

#[test]
fn test_missing_tcx_file_is_io_error() {
    let result = ImportManager::new().import_file(&PathBuf::from("does-not-exist.tcx"));
    assert!(matches!(
        result,
        Err(ZoneFinderError::Import(ImportError::Io(_)))
    ));
}
