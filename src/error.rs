//! Unified error hierarchy for zone-finder
//!
//! Every failure in the calculation core is a value-returned result; the
//! core never prints or aborts. The CLI layer turns errors into stderr
//! messages and a non-zero exit status.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all zone-finder operations
#[derive(Debug, Error)]
pub enum ZoneFinderError {
    /// LTHR / window calculation errors
    #[error("failed to calculate zones: {0}")]
    Calculation(#[from] CalculationError),

    /// Workout file import errors
    #[error("failed to parse workout file: {0}")]
    Import(#[from] ImportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the LTHR estimation and window selection algorithms.
///
/// These are genuinely different data-shape failures and stay as distinct
/// variants rather than one generic failure. None are retryable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// Fewer than 20 minutes of samples available for LTHR estimation
    #[error("insufficient data: need at least 20 minutes of heart rate samples")]
    InsufficientData,

    /// No samples at all given to window selection
    #[error("no data: heart rate sample list is empty")]
    EmptyInput,

    /// Total workout span below 20 minutes for best-window search
    #[error("workout too short: need at least 20 minutes to find a window")]
    WorkoutTooShort,

    /// Scan completed without any window meeting the minimum duration.
    /// Should be unreachable when WorkoutTooShort is checked first, but is
    /// handled as a distinct terminal failure rather than a silent empty
    /// result.
    #[error("no valid 20-minute window found in workout")]
    NoValidWindow,
}

/// Workout file decoding errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// File extension does not match any registered importer
    #[error("unsupported file format: {format}")]
    UnsupportedFormat { format: String },

    /// Format-specific parse failure
    #[error("parse error in {format} file: {reason}")]
    Parse { format: String, reason: String },

    /// File decoded cleanly but carried no usable heart-rate readings
    #[error("no heart rate data found in {path}")]
    NoHeartRateData { path: PathBuf },

    /// IO errors while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for zone-finder operations
pub type Result<T> = std::result::Result<T, ZoneFinderError>;
