// Table loader - one accident file → AccidentTable
//
// Files ending in .bz2 are decompressed on the fly; anything else is read as
// plain CSV. The header must carry MONTH, STATE, LONGITUD and LATITUDE.

use bzip2::read::MultiBzDecoder;
use csv::{ByteRecord, ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{FarsError, Result};
use crate::record::{
    header_position, AccidentTable, IncidentRecord, LATITUDE, LONGITUD, MONTH, REQUIRED_COLUMNS,
    STATE,
};

/// Positions of the interpreted columns within the header.
struct ColumnIndex {
    month: usize,
    state: usize,
    longitude: usize,
    latitude: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |name: &str| header_position(headers, name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|&name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(FarsError::MissingColumns {
                path: path.to_path_buf(),
                columns: missing,
            });
        }

        let position = |name: &str| find(name).unwrap_or_default();
        Ok(ColumnIndex {
            month: position(MONTH),
            state: position(STATE),
            longitude: position(LONGITUD),
            latitude: position(LATITUDE),
        })
    }
}

/// Read one FARS accident file.
///
/// # Errors
/// * `FileNotFound` - nothing exists at `path`
/// * `Io` - the file exists but cannot be opened
/// * `MissingColumns` - the header lacks a required column
/// * `Parse` - malformed CSV, a corrupt bzip2 stream, a MONTH outside 1-12,
///   or a non-numeric MONTH/STATE/coordinate cell
///
/// Only the four interpreted cells must be UTF-8; other columns are decoded
/// lossily so stray Latin-1 bytes pass through.
pub fn fars_read(path: impl AsRef<Path>) -> Result<AccidentTable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FarsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| FarsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_bz2 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("bz2"))
        .unwrap_or(false);
    let input: Box<dyn Read> = if is_bz2 {
        Box::new(MultiBzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(input);

    let headers = reader
        .byte_headers()
        .map_err(|e| csv_error(path, e))?
        .clone();
    let headers = StringRecord::from_byte_record_lossy(headers);
    let index = ColumnIndex::locate(&headers, path)?;

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        rows.push(parse_row(&index, record, path)?);
    }

    debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = headers.len(),
        "loaded accident table"
    );

    Ok(AccidentTable::new(headers, rows))
}

fn parse_row(index: &ColumnIndex, record: ByteRecord, path: &Path) -> Result<IncidentRecord> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    let parse_error = |message: String| FarsError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    };
    let cell = |i: usize, column: &str| {
        let bytes = record.get(i).unwrap_or_default();
        std::str::from_utf8(bytes)
            .map(str::trim)
            .map_err(|_| parse_error(format!("{} is not valid UTF-8", column)))
    };
    let bad = |column: &str, value: &str| parse_error(format!("{} is not numeric: '{}'", column, value));
    let not_whole = |column: &str, value: &str| {
        if value.parse::<f64>().is_ok() {
            parse_error(format!("{} is not a whole number: '{}'", column, value))
        } else {
            bad(column, value)
        }
    };

    let month_cell = cell(index.month, MONTH)?;
    let month = parse_whole(month_cell).ok_or_else(|| not_whole(MONTH, month_cell))?;
    let month = u8::try_from(month)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| parse_error(format!("MONTH out of range: {}", month)))?;

    let state_cell = cell(index.state, STATE)?;
    let state = parse_whole(state_cell).ok_or_else(|| not_whole(STATE, state_cell))?;

    let longitude_cell = cell(index.longitude, LONGITUD)?;
    let longitude = parse_coordinate(longitude_cell).ok_or_else(|| bad(LONGITUD, longitude_cell))?;
    let latitude_cell = cell(index.latitude, LATITUDE)?;
    let latitude = parse_coordinate(latitude_cell).ok_or_else(|| bad(LATITUDE, latitude_cell))?;

    Ok(IncidentRecord {
        month,
        state,
        longitude,
        latitude,
        fields: StringRecord::from_byte_record_lossy(record),
    })
}

/// Integers, or floats with no fractional part (`"1.0"`).
fn parse_whole(value: &str) -> Option<i64> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let n = value.parse::<f64>().ok()?;
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Blank and non-finite cells are missing; anything else must be a float.
fn parse_coordinate(value: &str) -> Option<Option<f64>> {
    if value.is_empty() {
        return Some(None);
    }
    value.parse::<f64>().ok().map(|v| Some(v).filter(|v| v.is_finite()))
}

fn csv_error(path: &Path, err: csv::Error) -> FarsError {
    FarsError::Parse {
        path: path.to_path_buf(),
        line: err.position().map(|p| p.line()).unwrap_or_default(),
        message: err.to_string(),
    }
}
