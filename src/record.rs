// Typed FARS rows and the tables built from them

use csv::StringRecord;
use serde::Serialize;
use std::collections::BTreeSet;

// ============================================================================
// COLUMN CONTRACT
// ============================================================================

pub const MONTH: &str = "MONTH";
pub const STATE: &str = "STATE";
pub const LONGITUD: &str = "LONGITUD";
pub const LATITUDE: &str = "LATITUDE";

/// Name of the column attached when a table is tagged with its year
pub const YEAR: &str = "year";

/// Columns every accident file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [MONTH, STATE, LONGITUD, LATITUDE];

/// Position of `column` in `headers`; header cells are compared trimmed.
pub fn header_position(headers: &StringRecord, column: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == column)
}

// ============================================================================
// INCIDENT RECORD
// ============================================================================

/// One accident row.
///
/// The four interpreted columns are typed; `fields` keeps the raw record so
/// every other column passes through (lossily decoded if not UTF-8).
/// Coordinates are `None` when the cell is blank or not finite; sentinel values (longitude > 900, latitude > 90)
/// are kept as-is and handled by the map's sanitisation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    pub month: u8,
    pub state: i64,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub fields: StringRecord,
}

// ============================================================================
// ACCIDENT TABLE (one year, all columns)
// ============================================================================

/// A loaded accident file: header plus typed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AccidentTable {
    headers: StringRecord,
    rows: Vec<IncidentRecord>,
}

impl AccidentTable {
    pub fn new(headers: StringRecord, rows: Vec<IncidentRecord>) -> Self {
        AccidentTable { headers, rows }
    }

    /// Column names in file order.
    pub fn columns(&self) -> Vec<&str> {
        self.headers.iter().collect()
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[IncidentRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw cell for `column` in row `index`, for pass-through columns.
    pub fn value(&self, index: usize, column: &str) -> Option<&str> {
        let position = header_position(&self.headers, column)?;
        self.rows.get(index)?.fields.get(position)
    }

    /// Distinct STATE codes, ascending.
    pub fn states(&self) -> BTreeSet<i64> {
        self.rows.iter().map(|r| r.state).collect()
    }

    /// Rows whose STATE equals `state`.
    pub fn filter_state(&self, state: i64) -> Vec<&IncidentRecord> {
        self.rows.iter().filter(|r| r.state == state).collect()
    }

    /// Tag every row with `year` and keep only MONTH and year.
    pub fn with_year(&self, year: i32) -> MonthYearTable {
        MonthYearTable {
            rows: self
                .rows
                .iter()
                .map(|r| MonthYear {
                    month: r.month,
                    year,
                })
                .collect(),
        }
    }
}

// ============================================================================
// MONTH/YEAR PROJECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MonthYear {
    #[serde(rename = "MONTH")]
    pub month: u8,
    pub year: i32,
}

/// A year's accidents projected down to exactly `MONTH` and `year`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthYearTable {
    rows: Vec<MonthYear>,
}

impl MonthYearTable {
    pub fn columns(&self) -> [&'static str; 2] {
        [MONTH, YEAR]
    }

    pub fn rows(&self) -> &[MonthYear] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<MonthYear> for MonthYearTable {
    fn from_iter<I: IntoIterator<Item = MonthYear>>(iter: I) -> Self {
        MonthYearTable {
            rows: iter.into_iter().collect(),
        }
    }
}
