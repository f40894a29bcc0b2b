// Summarizer - month × year incident counts
//
// Rows are months present in the data (ascending), columns are years that
// loaded (ascending). A month/year pair with no incidents is `None`, not 0.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::coerce::IntegerLike;
use crate::config::FarsConfig;
use crate::record::{MonthYear, MONTH};
use crate::years::YearLoad;

/// Label printed for a month/year pair without incidents.
pub const NO_DATA: &str = "NA";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "MONTH")]
    pub month: u8,
    /// One cell per entry of `SummaryTable::years`
    pub counts: Vec<Option<usize>>,
}

/// Wide month-by-year count table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    pub years: Vec<i32>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn months(&self) -> Vec<u8> {
        self.rows.iter().map(|r| r.month).collect()
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// `"MONTH"` followed by each year.
    pub fn column_labels(&self) -> Vec<String> {
        std::iter::once(MONTH.to_string())
            .chain(self.years.iter().map(|y| y.to_string()))
            .collect()
    }

    /// Count for one cell; `None` when the month or year is absent or the
    /// pair had no incidents.
    pub fn get(&self, month: u8, year: i32) -> Option<usize> {
        let column = self.years.iter().position(|&y| y == year)?;
        let row = self.rows.iter().find(|r| r.month == month)?;
        row.counts.get(column).copied().flatten()
    }

    /// Sum of a year's column, ignoring no-data cells.
    pub fn year_total(&self, year: i32) -> Option<usize> {
        let column = self.years.iter().position(|&y| y == year)?;
        Some(
            self.rows
                .iter()
                .filter_map(|r| r.counts.get(column).copied().flatten())
                .sum(),
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.column_labels();
        let mut grid: Vec<Vec<String>> = vec![labels];
        for row in &self.rows {
            let mut line = vec![row.month.to_string()];
            line.extend(row.counts.iter().map(|c| match c {
                Some(n) => n.to_string(),
                None => NO_DATA.to_string(),
            }));
            grid.push(line);
        }

        let widths: Vec<usize> = (0..grid[0].len())
            .map(|i| grid.iter().map(|line| line[i].len()).max().unwrap_or(0))
            .collect();

        for line in &grid {
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:>width$}", cell, width = width))
                .collect();
            writeln!(f, "{}", cells.join("  "))?;
        }
        Ok(())
    }
}

/// Summarise years from the current directory.
pub fn fars_summarize_years<Y: IntegerLike>(years: &[Y]) -> SummaryTable {
    FarsConfig::default().summarize_years(years)
}

/// Count incidents per (year, MONTH) across the loaded years and pivot the
/// counts wide. Failed loads contribute no rows.
pub fn summarize_loads(loads: &[YearLoad]) -> SummaryTable {
    let mut counts: BTreeMap<MonthYear, usize> = BTreeMap::new();
    for row in loads.iter().filter_map(YearLoad::table).flat_map(|t| t.rows()) {
        *counts.entry(*row).or_insert(0) += 1;
    }

    let years: Vec<i32> = counts
        .keys()
        .map(|k| k.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let months: BTreeSet<u8> = counts.keys().map(|k| k.month).collect();

    let rows = months
        .into_iter()
        .map(|month| SummaryRow {
            month,
            counts: years
                .iter()
                .map(|&year| counts.get(&MonthYear { month, year }).copied())
                .collect(),
        })
        .collect();

    SummaryTable { years, rows }
}
