// Library interface for zone-finder
// Exposes the calculation core and file decoders to the CLI and to
// integration tests.

pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod window;
pub mod zones;

// Re-export commonly used types for convenience
pub use error::{CalculationError, ImportError, Result, ZoneFinderError};
pub use models::{HeartRateZones, HrSample, Zone};
pub use window::find_best_window;
pub use zones::ZoneCalculator;
