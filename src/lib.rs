// FARS Analysis - Core Library
// Loads yearly accident files, summarises monthly counts, maps state incidents

pub mod coerce;
pub mod config;
pub mod error;
pub mod filename;
pub mod loader;
pub mod logging;
pub mod map;
pub mod record;
pub mod summary;
pub mod years;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use coerce::IntegerLike;
pub use config::FarsConfig;
pub use error::{FarsError, Result};
pub use filename::make_filename;
pub use loader::fars_read;
pub use logging::init_logging;
pub use map::{
    fars_map_state, plot_incidents, sanitize,
    AxisRange, GeoPoint, MapCanvas, MapExtent, MapOutcome, RecordingCanvas, SanitizedPoint,
};
pub use record::{AccidentTable, IncidentRecord, MonthYear, MonthYearTable};
pub use summary::{fars_summarize_years, summarize_loads, SummaryRow, SummaryTable};
pub use years::{fars_read_years, fars_read_years_parallel, YearLoad};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
