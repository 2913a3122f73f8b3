use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use super::model::{RawReading, Reading, WeatherDataset, SENTINEL};
use crate::event::{EventSender, WidgetEvent};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a station dataset from a CSV file.
///
/// Expected layout: header row
/// `year,month,day,hour,temp_air,pressure,wind_speed,wind_direction`,
/// missing values encoded as `-9999`.
pub fn load_file(path: &Path) -> Result<WeatherDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "csv" {
        bail!("Unsupported file extension: .{ext}");
    }

    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let raw = read_readings(file)?;
    let readings = clean_readings(raw);
    if readings.is_empty() {
        bail!("{} contains no usable readings", path.display());
    }
    Ok(WeatherDataset::from_readings(readings))
}

/// Load `path` on a detached worker thread and report back with a single
/// `DatasetLoaded` event. No retry, no cancellation, no timeout.
pub fn spawn_load(path: PathBuf, index: usize, events: EventSender) {
    std::thread::spawn(move || {
        let result = load_file(&path);
        events.send(WidgetEvent::DatasetLoaded { index, result });
    });
}

// ---------------------------------------------------------------------------
// CSV ingest
// ---------------------------------------------------------------------------

/// Parse raw rows from CSV. A malformed row aborts the load with a
/// contextual error; there is no per-row recovery beyond sentinel cleaning.
pub fn read_readings<R: Read>(reader: R) -> Result<Vec<RawReading>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (row_no, result) in rdr.deserialize::<RawReading>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Cleaning and field derivation
// ---------------------------------------------------------------------------

/// Pure cleaning pass over parsed rows:
/// * drop rows where `temp_air`, `pressure` or `wind_speed` is the sentinel,
/// * attach the calendar date derived from (year, month, day, hour),
/// * attach unit-converted pressure (kPa) and wind speed (km/h).
///
/// Rows whose tuple names no real calendar instant are dropped as well.
pub fn clean_readings(rows: Vec<RawReading>) -> Vec<Reading> {
    rows.into_iter()
        .filter_map(|row| {
            if row.temp_air == SENTINEL
                || row.pressure == SENTINEL
                || row.wind_speed == SENTINEL
            {
                return None;
            }

            let date = NaiveDate::from_ymd_opt(row.year, row.month, row.day)
                .and_then(|d| d.and_hms_opt(row.hour, 0, 0));
            let Some(date) = date else {
                log::warn!(
                    "dropping row with impossible date {}-{:02}-{:02} {:02}h",
                    row.year,
                    row.month,
                    row.day,
                    row.hour
                );
                return None;
            };

            Some(Reading {
                date,
                temp_air: row.temp_air,
                pressure: row.pressure,
                kilopascal: row.pressure * 0.1,
                wind_speed: row.wind_speed,
                kmh_wind_speed: row.wind_speed * 3.6,
                wind_direction: row.wind_direction,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(temp: f64, pressure: f64, wind: f64) -> RawReading {
        RawReading {
            year: 2016,
            month: 3,
            day: 14,
            hour: 15,
            temp_air: temp,
            pressure,
            wind_speed: wind,
            wind_direction: 200.0,
        }
    }

    #[test]
    fn sentinel_rows_are_dropped() {
        let rows = vec![
            raw(SENTINEL, 1013.0, 3.0),
            raw(5.0, SENTINEL, 3.0),
            raw(5.0, 1013.0, SENTINEL),
            raw(5.0, 1013.0, 3.0),
        ];
        let cleaned = clean_readings(rows);
        assert_eq!(cleaned.len(), 1);
    }

    #[test]
    fn sentinel_direction_does_not_drop_the_row() {
        let mut row = raw(5.0, 1013.0, 3.0);
        row.wind_direction = SENTINEL;
        let cleaned = clean_readings(vec![row]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].wind_direction, SENTINEL);
    }

    #[test]
    fn derived_fields_match_the_conversions() {
        let cleaned = clean_readings(vec![raw(5.0, 1013.0, 3.0)]);
        let r = &cleaned[0];
        assert_eq!(r.kilopascal, 1013.0 * 0.1);
        assert!((r.kilopascal - 101.3).abs() < 1e-9);
        assert_eq!(r.kmh_wind_speed, 3.0 * 3.6);
        assert!((r.kmh_wind_speed - 10.8).abs() < 1e-9);
        assert_eq!(
            r.date,
            NaiveDate::from_ymd_opt(2016, 3, 14)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn impossible_dates_are_dropped() {
        let mut row = raw(5.0, 1013.0, 3.0);
        row.month = 2;
        row.day = 30;
        assert!(clean_readings(vec![row]).is_empty());

        let mut row = raw(5.0, 1013.0, 3.0);
        row.hour = 24;
        assert!(clean_readings(vec![row]).is_empty());
    }

    #[test]
    fn csv_round_trip_through_the_pipeline() {
        let csv = "\
year,month,day,hour,temp_air,pressure,wind_speed,wind_direction
2016,3,14,15,5,1013,3,200
2016,3,14,16,-9999,1013,3,200
2016,3,14,17,6.5,1010,4.2,210
";
        let raw = read_readings(csv.as_bytes()).unwrap();
        assert_eq!(raw.len(), 3);

        let dataset = WeatherDataset::from_readings(clean_readings(raw));
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.filtered.len(), 2);
        assert!(dataset.filtered[0].date < dataset.filtered[1].date);
        assert_eq!(dataset.statistics.wind_rose.total(), 2);
    }

    #[test]
    fn malformed_rows_abort_the_load() {
        let csv = "\
year,month,day,hour,temp_air,pressure,wind_speed,wind_direction
2016,3,14,15,not_a_number,1013,3,200
";
        assert!(read_readings(csv.as_bytes()).is_err());
    }
}
