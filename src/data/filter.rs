use chrono::NaiveDateTime;

use super::model::Reading;

// ---------------------------------------------------------------------------
// Date-range filter over a loaded dataset
// ---------------------------------------------------------------------------

/// Active date filter bounds.
///
/// Invariant: `min_date <= start <= end <= max_date`. `min_date`/`max_date`
/// span the *original* readings so the bounds never shrink as the user
/// narrows the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilter {
    pub min_date: NaiveDateTime,
    pub max_date: NaiveDateTime,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateFilter {
    /// Span the full range of `readings` (assumed sorted by time) with the
    /// filter wide open.
    pub fn spanning(readings: &[Reading]) -> Self {
        let epoch = chrono::DateTime::UNIX_EPOCH.naive_utc();
        let min_date = readings.first().map_or(epoch, |r| r.date);
        let max_date = readings.last().map_or(epoch, |r| r.date);
        DateFilter {
            min_date,
            max_date,
            start: min_date,
            end: max_date,
        }
    }

    /// Set the active range: out-of-order endpoints are swapped, then both
    /// are clamped into `[min_date, max_date]`.
    pub fn set_range(&mut self, a: NaiveDateTime, b: NaiveDateTime) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        self.start = start.clamp(self.min_date, self.max_date);
        self.end = end.clamp(self.min_date, self.max_date);
    }

    /// Whether `date` falls inside the active range (inclusive ends).
    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Wholesale re-filter: the ordered subsequence of `readings` whose dates
/// fall inside the active range.
pub fn filter_by_date(readings: &[Reading], filter: &DateFilter) -> Vec<Reading> {
    readings
        .iter()
        .filter(|r| filter.contains(r.date))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading_at(day: u32, hour: u32) -> Reading {
        let date = NaiveDate::from_ymd_opt(2016, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Reading {
            date,
            temp_air: 1.0,
            pressure: 1000.0,
            kilopascal: 100.0,
            wind_speed: 2.0,
            kmh_wind_speed: 7.2,
            wind_direction: 90.0,
        }
    }

    fn sample() -> Vec<Reading> {
        (1..=10).map(|d| reading_at(d, 6)).collect()
    }

    #[test]
    fn spanning_covers_full_range() {
        let readings = sample();
        let filter = DateFilter::spanning(&readings);
        assert_eq!(filter.min_date, readings[0].date);
        assert_eq!(filter.max_date, readings[9].date);
        assert_eq!(filter.start, filter.min_date);
        assert_eq!(filter.end, filter.max_date);
    }

    #[test]
    fn filtering_is_idempotent() {
        let readings = sample();
        let mut filter = DateFilter::spanning(&readings);
        filter.set_range(reading_at(3, 0).date, reading_at(7, 23).date);

        let once = filter_by_date(&readings, &filter);
        let twice = filter_by_date(&once, &filter);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 5);
    }

    #[test]
    fn filtered_is_ordered_subsequence() {
        let readings = sample();
        let mut filter = DateFilter::spanning(&readings);
        filter.set_range(reading_at(2, 0).date, reading_at(9, 23).date);

        let filtered = filter_by_date(&readings, &filter);
        assert!(filtered.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(filtered.iter().all(|f| readings.contains(f)));
    }

    #[test]
    fn out_of_range_bounds_are_clamped() {
        let readings = sample();
        let mut filter = DateFilter::spanning(&readings);
        let far_past = NaiveDate::from_ymd_opt(1999, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let far_future = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        filter.set_range(far_past, far_future);
        assert_eq!(filter.start, filter.min_date);
        assert_eq!(filter.end, filter.max_date);
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let readings = sample();
        let mut filter = DateFilter::spanning(&readings);
        let a = reading_at(8, 0).date;
        let b = reading_at(2, 0).date;

        filter.set_range(a, b);
        assert_eq!(filter.start, b);
        assert_eq!(filter.end, a);
        assert!(filter.start <= filter.end);
    }
}
