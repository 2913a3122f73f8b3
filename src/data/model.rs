use chrono::NaiveDateTime;
use serde::Deserialize;

use super::filter::{filter_by_date, DateFilter};
use super::stats::Statistics;

// ---------------------------------------------------------------------------
// RawReading – one CSV row as the station logger wrote it
// ---------------------------------------------------------------------------

/// Placeholder the station firmware writes for an unrecorded measurement.
pub const SENTINEL: f64 = -9999.0;

/// One row of a station CSV file, before cleaning.
///
/// Columns: `year, month, day, hour, temp_air, pressure, wind_speed,
/// wind_direction`. Any measured field may hold [`SENTINEL`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawReading {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    /// Air temperature in °C.
    pub temp_air: f64,
    /// Barometric pressure in hPa.
    pub pressure: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Wind direction in degrees, clockwise from north.
    pub wind_direction: f64,
}

// ---------------------------------------------------------------------------
// Reading – a cleaned row with derived fields
// ---------------------------------------------------------------------------

/// A retained reading with its derived calendar date and converted units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Calendar instant built from the (year, month, day, hour) tuple.
    pub date: NaiveDateTime,
    pub temp_air: f64,
    pub pressure: f64,
    /// `pressure * 0.1`.
    pub kilopascal: f64,
    pub wind_speed: f64,
    /// `wind_speed * 3.6`.
    pub kmh_wind_speed: f64,
    /// Degrees; may still be [`SENTINEL`] (direction is not a retention key).
    pub wind_direction: f64,
}

impl Reading {
    /// Unix timestamp in seconds, as the plot's x coordinate.
    pub fn timestamp(&self) -> f64 {
        self.date.and_utc().timestamp() as f64
    }
}

// ---------------------------------------------------------------------------
// WeatherDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// A loaded station file: all cleaned readings, the rows inside the active
/// date range, and statistics over those rows.
///
/// `filtered` is always an ordered-by-time subsequence of `original`; both
/// are replaced wholesale, never patched.
#[derive(Debug, Clone)]
pub struct WeatherDataset {
    pub original: Vec<Reading>,
    pub filtered: Vec<Reading>,
    pub filter: DateFilter,
    pub statistics: Statistics,
}

impl WeatherDataset {
    /// Build a dataset from cleaned readings, sorted by time, with the
    /// filter spanning the full range.
    pub fn from_readings(mut readings: Vec<Reading>) -> Self {
        readings.sort_by(|a, b| a.date.cmp(&b.date));
        let filter = DateFilter::spanning(&readings);
        let statistics = Statistics::from_readings(&readings);
        WeatherDataset {
            filtered: readings.clone(),
            original: readings,
            filter,
            statistics,
        }
    }

    /// Re-filter in place: clamp the requested bounds, rebuild `filtered`
    /// from `original`, and recompute statistics from scratch.
    pub fn apply_filter(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.filter.set_range(start, end);
        self.filtered = filter_by_date(&self.original, &self.filter);
        self.statistics = Statistics::from_readings(&self.filtered);
    }

    /// Number of cleaned readings.
    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}
