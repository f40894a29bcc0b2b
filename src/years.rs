// Multi-year loader - the only place where failures are isolated
//
// Each year is resolved, loaded and projected on its own. A failure becomes a
// `YearLoad::Failed` slot plus a warning; it never aborts the batch.

use rayon::prelude::*;
use tracing::warn;

use crate::coerce::{coerce_year, IntegerLike};
use crate::config::FarsConfig;
use crate::error::{FarsError, Result};
use crate::loader::fars_read;
use crate::record::MonthYearTable;

/// Outcome of loading one year.
#[derive(Debug)]
pub enum YearLoad {
    /// The year's MONTH/year projection.
    Loaded { year: i32, table: MonthYearTable },
    /// The year could not be loaded; `year` is the value as given.
    Failed { year: String, error: FarsError },
}

impl YearLoad {
    /// The table, or `None` for a failed year.
    pub fn table(&self) -> Option<&MonthYearTable> {
        match self {
            YearLoad::Loaded { table, .. } => Some(table),
            YearLoad::Failed { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, YearLoad::Loaded { .. })
    }

    pub fn error(&self) -> Option<&FarsError> {
        match self {
            YearLoad::Loaded { .. } => None,
            YearLoad::Failed { error, .. } => Some(error),
        }
    }

    /// The year as it should appear in messages.
    pub fn year_label(&self) -> String {
        match self {
            YearLoad::Loaded { year, .. } => year.to_string(),
            YearLoad::Failed { year, .. } => year.clone(),
        }
    }
}

/// Load several years from the current directory.
///
/// Result order always equals input order.
pub fn fars_read_years<Y: IntegerLike>(years: &[Y]) -> Vec<YearLoad> {
    read_years_in(&FarsConfig::default(), years)
}

/// Parallel variant of [`fars_read_years`]; same isolation, same ordering.
pub fn fars_read_years_parallel<Y: IntegerLike + Sync>(years: &[Y]) -> Vec<YearLoad> {
    read_years_parallel_in(&FarsConfig::default(), years)
}

pub(crate) fn read_years_in<Y: IntegerLike>(config: &FarsConfig, years: &[Y]) -> Vec<YearLoad> {
    years.iter().map(|year| load_one(config, year)).collect()
}

pub(crate) fn read_years_parallel_in<Y: IntegerLike + Sync>(
    config: &FarsConfig,
    years: &[Y],
) -> Vec<YearLoad> {
    years
        .par_iter()
        .map(|year| load_one(config, year))
        .collect()
}

fn load_one<Y: IntegerLike>(config: &FarsConfig, year: &Y) -> YearLoad {
    match try_load(config, year) {
        Ok((year, table)) => YearLoad::Loaded { year, table },
        Err(error) => {
            let label = year.label();
            warn!(year = %label, error = %error, "invalid year: {}", label);
            YearLoad::Failed { year: label, error }
        }
    }
}

fn try_load<Y: IntegerLike>(config: &FarsConfig, year: &Y) -> Result<(i32, MonthYearTable)> {
    let year = coerce_year(year)?;
    let table = fars_read(config.year_path(year)?)?;
    Ok((year, table.with_year(year)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_read_years_isolates_missing_year() {
        let dir = fixture_dir();
        let config = FarsConfig::new(dir.path());

        let loads = config.read_years(&[2013, 9999]);

        assert_eq!(loads.len(), 2);
        let table = loads[0].table().expect("2013 should load");
        assert_eq!(table.columns(), ["MONTH", "year"]);
        assert_eq!(table.len(), 7);
        assert!(table.rows().iter().all(|r| r.year == 2013));

        assert!(loads[1].table().is_none());
        assert_eq!(loads[1].year_label(), "9999");
        assert!(matches!(
            loads[1].error(),
            Some(FarsError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_read_years_warns_for_failed_year() {
        let dir = fixture_dir();
        let config = FarsConfig::new(dir.path());
        let logs = LogCapture::default();

        let loads = logs.capture(|| config.read_years(&[2013, 9999]));

        assert!(loads[0].is_loaded());
        let output = logs.contents();
        assert!(output.contains("WARN"), "{}", output);
        assert!(output.contains("invalid year: 9999"), "{}", output);
        assert!(!output.contains("invalid year: 2013"), "{}", output);
    }

    #[test]
    fn test_parallel_default_config_isolates_uncoercible_year() {
        let loads = fars_read_years_parallel(&["not-a-year"]);
        assert_eq!(loads.len(), 1);
        assert!(matches!(loads[0].error(), Some(FarsError::InvalidYear { .. })));
    }

    #[test]
    fn test_read_years_isolates_uncoercible_year() {
        let dir = fixture_dir();
        let config = FarsConfig::new(dir.path());

        let loads = config.read_years(&["twenty", "2014"]);

        assert!(!loads[0].is_loaded());
        assert_eq!(loads[0].year_label(), "twenty");
        assert!(matches!(loads[0].error(), Some(FarsError::InvalidYear { .. })));
        assert_eq!(loads[1].table().map(|t| t.len()), Some(4));
    }

    #[test]
    fn test_read_years_isolates_parse_failure() {
        let dir = fixture_dir();
        write_bz2(dir.path(), "accident_2015.csv.bz2", "MONTH,DAY\n1,1\n");
        let config = FarsConfig::new(dir.path());

        let loads = config.read_years(&[2015, 2013]);

        assert!(matches!(
            loads[0].error(),
            Some(FarsError::MissingColumns { .. })
        ));
        assert!(loads[1].is_loaded());
    }

    #[test]
    fn test_read_years_empty_input() {
        let config = FarsConfig::default();
        let years: [i32; 0] = [];
        assert!(config.read_years(&years).is_empty());
    }

    #[test]
    fn test_read_years_keeps_duplicates_in_order() {
        let dir = fixture_dir();
        let config = FarsConfig::new(dir.path());
        let labels: Vec<String> = config
            .read_years(&[2014, 2013, 2014])
            .iter()
            .map(|l| l.year_label())
            .collect();
        assert_eq!(labels, vec!["2014", "2013", "2014"]);
    }

    #[test]
    fn test_parallel_matches_sequential_order() {
        let dir = fixture_dir();
        let config = FarsConfig::new(dir.path());
        let years = [2014, 9999, 2013, 1, 2014];

        let sequential: Vec<(String, bool)> = config
            .read_years(&years)
            .iter()
            .map(|l| (l.year_label(), l.is_loaded()))
            .collect();
        let parallel: Vec<(String, bool)> = config
            .read_years_parallel(&years)
            .iter()
            .map(|l| (l.year_label(), l.is_loaded()))
            .collect();

        assert_eq!(sequential, parallel);
        assert_eq!(
            parallel.iter().filter(|(_, ok)| *ok).count(),
            3,
            "2014, 2013 and 2014 load"
        );
    }
}
