// Data directory configuration
// The pipeline never searches for files; it joins names onto this directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::coerce::IntegerLike;
use crate::error::Result;
use crate::filename::make_filename;
use crate::map::{MapCanvas, MapOutcome};
use crate::summary::SummaryTable;
use crate::years::YearLoad;

/// Where the yearly accident files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarsConfig {
    /// Directory holding `accident_<year>.csv.bz2` files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for FarsConfig {
    fn default() -> Self {
        FarsConfig {
            data_dir: default_data_dir(),
        }
    }
}

impl FarsConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        FarsConfig {
            data_dir: data_dir.into(),
        }
    }

    /// Join a bare filename onto the data directory.
    pub fn resolve(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(filename)
    }

    /// Full path of the file expected for `year`.
    pub fn year_path<Y: IntegerLike>(&self, year: Y) -> Result<PathBuf> {
        Ok(self.resolve(make_filename(year)?))
    }

    /// Load and project several years, isolating per-year failures.
    pub fn read_years<Y: IntegerLike>(&self, years: &[Y]) -> Vec<YearLoad> {
        crate::years::read_years_in(self, years)
    }

    /// [`FarsConfig::read_years`] with years loaded on the rayon pool.
    pub fn read_years_parallel<Y: IntegerLike + Sync>(&self, years: &[Y]) -> Vec<YearLoad> {
        crate::years::read_years_parallel_in(self, years)
    }

    /// Month × year incident counts for the requested years.
    pub fn summarize_years<Y: IntegerLike>(&self, years: &[Y]) -> SummaryTable {
        crate::summary::summarize_loads(&self.read_years(years))
    }

    /// Plot one state's incidents for one year onto `canvas`.
    pub fn map_state<S, Y, C>(&self, state: S, year: Y, canvas: &mut C) -> Result<MapOutcome>
    where
        S: IntegerLike,
        Y: IntegerLike,
        C: MapCanvas + ?Sized,
    {
        crate::map::map_state_in(self, state, year, canvas)
    }
}
