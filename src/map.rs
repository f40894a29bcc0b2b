// State plotter - one state's incidents for one year on a map canvas
//
// Loading here is NOT isolated: a missing file, a parse failure, a bad year
// or an unknown state aborts the call.

use serde::Serialize;
use tracing::{debug, info};

use crate::coerce::{coerce_state, coerce_year, IntegerLike};
use crate::config::FarsConfig;
use crate::error::{FarsError, Result};
use crate::loader::fars_read;
use crate::record::IncidentRecord;

/// Longitudes above this are FARS "unknown" codes (777.7777, 888.8888, 999.9999).
pub const LONGITUDE_SENTINEL: f64 = 900.0;

/// Latitudes above this are FARS "unknown" codes (77.7777 and below stay).
pub const LATITUDE_SENTINEL: f64 = 90.0;

/// Region drawn underneath the points.
pub const BASE_REGION: &str = "usa";

// ============================================================================
// COORDINATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// A row's coordinates after sentinel values have been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SanitizedPoint {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

impl SanitizedPoint {
    /// The plottable point, if both coordinates survived.
    pub fn point(&self) -> Option<GeoPoint> {
        Some(GeoPoint {
            longitude: self.longitude?,
            latitude: self.latitude?,
        })
    }
}

/// Drop sentinel and non-finite coordinates from one row.
pub fn sanitize(record: &IncidentRecord) -> SanitizedPoint {
    SanitizedPoint {
        longitude: record
            .longitude
            .filter(|&lon| lon.is_finite() && lon <= LONGITUDE_SENTINEL),
        latitude: record
            .latitude
            .filter(|&lat| lat.is_finite() && lat <= LATITUDE_SENTINEL),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Range over the non-NaN values, `None` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |range: Option<AxisRange>, v| match range {
                None => Some(AxisRange { min: v, max: v }),
                Some(r) => Some(AxisRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }
}

/// Drawing extents; an axis is `None` when no usable value exists for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapExtent {
    pub longitude: Option<AxisRange>,
    pub latitude: Option<AxisRange>,
}

impl MapExtent {
    /// Each axis is computed independently from its non-missing values.
    pub fn from_points(points: &[SanitizedPoint]) -> Self {
        MapExtent {
            longitude: AxisRange::from_values(points.iter().filter_map(|p| p.longitude)),
            latitude: AxisRange::from_values(points.iter().filter_map(|p| p.latitude)),
        }
    }
}

// ============================================================================
// CANVAS
// ============================================================================

/// A 2D map-drawing surface.
pub trait MapCanvas {
    /// Draw the named base region scaled to `extent`.
    fn draw_region(&mut self, region: &str, extent: &MapExtent) -> Result<()>;

    /// Plot one incident marker.
    fn plot_point(&mut self, point: GeoPoint) -> Result<()>;
}

/// Canvas that remembers what was drawn on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    pub region: Option<(String, MapExtent)>,
    pub points: Vec<GeoPoint>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nothing has been drawn.
    pub fn is_blank(&self) -> bool {
        self.region.is_none() && self.points.is_empty()
    }
}

impl MapCanvas for RecordingCanvas {
    fn draw_region(&mut self, region: &str, extent: &MapExtent) -> Result<()> {
        self.region = Some((region.to_string(), *extent));
        Ok(())
    }

    fn plot_point(&mut self, point: GeoPoint) -> Result<()> {
        self.points.push(point);
        Ok(())
    }
}

// ============================================================================
// PLOTTING
// ============================================================================

/// What a map call did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MapOutcome {
    /// Base map and points were drawn.
    Plotted {
        state: i64,
        year: i32,
        points: Vec<GeoPoint>,
        extent: MapExtent,
    },
    /// The state had no rows; nothing was drawn.
    NoAccidents { state: i64, year: i32 },
}

/// Plot a state's incidents for a year from the current directory.
pub fn fars_map_state<S, Y, C>(state: S, year: Y, canvas: &mut C) -> Result<MapOutcome>
where
    S: IntegerLike,
    Y: IntegerLike,
    C: MapCanvas + ?Sized,
{
    map_state_in(&FarsConfig::default(), state, year, canvas)
}

pub(crate) fn map_state_in<S, Y, C>(
    config: &FarsConfig,
    state: S,
    year: Y,
    canvas: &mut C,
) -> Result<MapOutcome>
where
    S: IntegerLike,
    Y: IntegerLike,
    C: MapCanvas + ?Sized,
{
    let year = coerce_year(&year)?;
    let table = fars_read(config.year_path(year)?)?;

    let state = coerce_state(&state)?;
    if !table.states().contains(&state) {
        return Err(FarsError::InvalidStateNumber { state });
    }

    let rows = table.filter_state(state);
    plot_incidents(state, year, &rows, canvas)
}

/// Sanitise `rows`, draw the base map at their extent and plot each point.
///
/// An empty `rows` logs "no accidents to plot" and leaves the canvas alone.
pub fn plot_incidents<C: MapCanvas + ?Sized>(
    state: i64,
    year: i32,
    rows: &[&IncidentRecord],
    canvas: &mut C,
) -> Result<MapOutcome> {
    if rows.is_empty() {
        info!(state, year, "no accidents to plot");
        return Ok(MapOutcome::NoAccidents { state, year });
    }

    let sanitized: Vec<SanitizedPoint> = rows.iter().map(|r| sanitize(r)).collect();
    let extent = MapExtent::from_points(&sanitized);

    canvas.draw_region(BASE_REGION, &extent)?;

    let points: Vec<GeoPoint> = sanitized.iter().filter_map(SanitizedPoint::point).collect();
    for point in &points {
        canvas.plot_point(*point)?;
    }

    debug!(
        state,
        year,
        rows = rows.len(),
        plotted = points.len(),
        "plotted state incidents"
    );

    Ok(MapOutcome::Plotted {
        state,
        year,
        points,
        extent,
    })
}
