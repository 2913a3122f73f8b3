use super::model::{Reading, SENTINEL};

// ---------------------------------------------------------------------------
// Compass sectors
// ---------------------------------------------------------------------------

/// One of the 16 compass sectors, 22.5° wide, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl Sector {
    pub const ALL: [Sector; 16] = [
        Sector::N,
        Sector::NNE,
        Sector::NE,
        Sector::ENE,
        Sector::E,
        Sector::ESE,
        Sector::SE,
        Sector::SSE,
        Sector::S,
        Sector::SSW,
        Sector::SW,
        Sector::WSW,
        Sector::W,
        Sector::WNW,
        Sector::NW,
        Sector::NNW,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Sector::N => "N",
            Sector::NNE => "NNE",
            Sector::NE => "NE",
            Sector::ENE => "ENE",
            Sector::E => "E",
            Sector::ESE => "ESE",
            Sector::SE => "SE",
            Sector::SSE => "SSE",
            Sector::S => "S",
            Sector::SSW => "SSW",
            Sector::SW => "SW",
            Sector::WSW => "WSW",
            Sector::W => "W",
            Sector::WNW => "WNW",
            Sector::NW => "NW",
            Sector::NNW => "NNW",
        }
    }

    /// Classify a direction in degrees into its sector.
    ///
    /// N owns both of its boundary degrees: `[348.75, 360) ∪ [0, 11.25]`.
    /// Every other sector is half-open `(lo, hi]` going clockwise, which
    /// leaves NNW open at its top. Total and mutually exclusive over
    /// `[0, 360)`; inputs outside that range are wrapped first.
    pub fn from_degrees(degrees: f64) -> Sector {
        let d = degrees.rem_euclid(360.0);
        if d >= 348.75 || d <= 11.25 {
            return Sector::N;
        }
        let k = ((d - 11.25) / 22.5).ceil() as usize;
        Sector::ALL[k]
    }
}

// ---------------------------------------------------------------------------
// Wind rose
// ---------------------------------------------------------------------------

/// Histogram of wind direction occurrences across the 16 sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindRose {
    counts: [u32; 16],
}

impl WindRose {
    /// Count each reading's direction. Readings whose direction is the
    /// sentinel are skipped: wrapping `-9999` into `[0, 360)` would
    /// fabricate a direction.
    pub fn from_readings(readings: &[Reading]) -> Self {
        let mut counts = [0u32; 16];
        for r in readings {
            if r.wind_direction == SENTINEL {
                continue;
            }
            counts[Sector::from_degrees(r.wind_direction) as usize] += 1;
        }
        WindRose { counts }
    }

    pub fn count(&self, sector: Sector) -> u32 {
        self.counts[sector as usize]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// Statistics – recomputed wholesale from the filtered readings
// ---------------------------------------------------------------------------

/// Per-variable means (display units) and the wind rose, over the rows
/// inside the active date range. `None` means when there are no rows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    pub mean_temp_air: Option<f64>,
    pub mean_kilopascal: Option<f64>,
    pub mean_wind_kmh: Option<f64>,
    pub wind_rose: WindRose,
}

impl Statistics {
    pub fn from_readings(readings: &[Reading]) -> Self {
        Statistics {
            mean_temp_air: mean(readings.iter().map(|r| r.temp_air)),
            mean_kilopascal: mean(readings.iter().map(|r| r.kilopascal)),
            mean_wind_kmh: mean(readings.iter().map(|r| r.kmh_wind_speed)),
            wind_rose: WindRose::from_readings(readings),
        }
    }
}

fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0u32), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / f64::from(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(temp: f64, pressure: f64, wind: f64, direction: f64) -> Reading {
        Reading {
            date: NaiveDate::from_ymd_opt(2016, 3, 14)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap(),
            temp_air: temp,
            pressure,
            kilopascal: pressure * 0.1,
            wind_speed: wind,
            kmh_wind_speed: wind * 3.6,
            wind_direction: direction,
        }
    }

    #[test]
    fn sector_boundaries() {
        assert_eq!(Sector::from_degrees(348.75), Sector::N);
        assert_eq!(Sector::from_degrees(11.25), Sector::N);
        assert_eq!(Sector::from_degrees(11.26), Sector::NNE);
        assert_eq!(Sector::from_degrees(33.75), Sector::NNE);
        assert_eq!(Sector::from_degrees(33.76), Sector::ENE);
        assert_eq!(Sector::from_degrees(348.74), Sector::NNW);
        assert_eq!(Sector::from_degrees(0.0), Sector::N);
        assert_eq!(Sector::from_degrees(359.99), Sector::N);
    }

    #[test]
    fn sector_centers() {
        for (i, sector) in Sector::ALL.iter().enumerate() {
            let center = i as f64 * 22.5;
            assert_eq!(Sector::from_degrees(center), *sector, "center {center}");
        }
    }

    #[test]
    fn classification_is_total_over_the_circle() {
        // Every tenth of a degree lands in exactly one sector (from_degrees
        // returns exactly one, so totality is the only thing to sweep).
        let mut counts = [0u32; 16];
        for i in 0..3600 {
            let deg = f64::from(i) * 0.1;
            counts[Sector::from_degrees(deg) as usize] += 1;
        }
        assert!(counts.iter().all(|&c| c > 0));
        assert_eq!(counts.iter().sum::<u32>(), 3600);
    }

    #[test]
    fn negative_and_wrapped_inputs_are_normalized() {
        assert_eq!(Sector::from_degrees(-90.0), Sector::from_degrees(270.0));
        assert_eq!(Sector::from_degrees(450.0), Sector::from_degrees(90.0));
    }

    #[test]
    fn wind_rose_skips_sentinel_directions() {
        let readings = vec![
            reading(5.0, 1013.0, 3.0, 0.0),
            reading(5.0, 1013.0, 3.0, 90.0),
            reading(5.0, 1013.0, 3.0, SENTINEL),
        ];
        let rose = WindRose::from_readings(&readings);
        assert_eq!(rose.total(), 2);
        assert_eq!(rose.count(Sector::N), 1);
        assert_eq!(rose.count(Sector::E), 1);
    }

    #[test]
    fn means_over_display_units() {
        let readings = vec![
            reading(10.0, 1000.0, 2.0, 180.0),
            reading(20.0, 1020.0, 4.0, 180.0),
        ];
        let stats = Statistics::from_readings(&readings);
        assert_eq!(stats.mean_temp_air, Some(15.0));
        assert_eq!(stats.mean_kilopascal, Some(101.0));
        assert_eq!(stats.mean_wind_kmh, Some(10.8));
        assert_eq!(stats.wind_rose.count(Sector::S), 2);
    }

    #[test]
    fn empty_input_has_no_means() {
        let stats = Statistics::from_readings(&[]);
        assert_eq!(stats.mean_temp_air, None);
        assert_eq!(stats.mean_kilopascal, None);
        assert_eq!(stats.mean_wind_kmh, None);
        assert_eq!(stats.wind_rose.total(), 0);
    }
}
