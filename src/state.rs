use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::config::WidgetConfig;
use crate::data::loader;
use crate::data::model::WeatherDataset;
use crate::event::{EventSender, WidgetEvent};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. All mutation goes through
/// [`AppState::apply`], and the dataset is replaced wholesale — never
/// patched — so every frame renders purely from the current state.
pub struct AppState {
    /// The fixed list of station CSV files the navigator cycles through.
    pub sources: Vec<PathBuf>,

    /// Index of the active source in `sources`.
    pub active_source: usize,

    /// Loaded dataset (None until the first load completes).
    pub dataset: Option<WeatherDataset>,

    /// Bumped whenever the charts must redraw from the flat baseline.
    pub generation: u64,

    /// Whether a background load is in flight.
    pub loading: bool,

    /// Status / error message shown in the nav bar.
    pub status_message: Option<String>,

    /// Range-control endpoints being edited; synced from the dataset's
    /// filter whenever the reducer changes it.
    pub range_start: NaiveDateTime,
    pub range_end: NaiveDateTime,
}

impl AppState {
    pub fn new(config: &WidgetConfig) -> Self {
        let epoch = chrono::DateTime::UNIX_EPOCH.naive_utc();
        AppState {
            sources: config.csv_files.clone(),
            active_source: 0,
            dataset: None,
            generation: 0,
            loading: false,
            status_message: None,
            range_start: epoch,
            range_end: epoch,
        }
    }

    /// Display name of the active source (file stem).
    pub fn active_source_name(&self) -> Option<String> {
        self.sources.get(self.active_source).map(|p| {
            p.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
    }

    /// The single reducer: fully re-derive the state affected by `event`.
    pub fn apply(&mut self, event: WidgetEvent, events: &EventSender) {
        match event {
            WidgetEvent::NextDataset => {
                if self.sources.is_empty() {
                    self.status_message = Some("No CSV sources configured".to_string());
                } else {
                    self.request_load(next_index(self.active_source, self.sources.len()), events);
                }
            }
            WidgetEvent::PrevDataset => {
                if self.sources.is_empty() {
                    self.status_message = Some("No CSV sources configured".to_string());
                } else {
                    self.request_load(prev_index(self.active_source, self.sources.len()), events);
                }
            }
            WidgetEvent::OpenFile(path) => {
                self.sources.push(path);
                self.request_load(self.sources.len() - 1, events);
            }
            WidgetEvent::FilterRange { start, end } => {
                if let Some(ds) = &mut self.dataset {
                    ds.apply_filter(start, end);
                    self.range_start = ds.filter.start;
                    self.range_end = ds.filter.end;
                    self.generation += 1;
                }
            }
            WidgetEvent::DatasetLoaded { index, result } => {
                self.loading = false;
                match result {
                    Ok(dataset) => {
                        log::info!(
                            "Loaded {} readings spanning {} – {}",
                            dataset.len(),
                            dataset.filter.min_date,
                            dataset.filter.max_date
                        );
                        if index < self.sources.len() {
                            self.active_source = index;
                        }
                        self.range_start = dataset.filter.start;
                        self.range_end = dataset.filter.end;
                        self.dataset = Some(dataset);
                        self.generation += 1;
                        self.status_message = None;
                    }
                    Err(e) => {
                        log::error!("Failed to load dataset: {e:#}");
                        self.status_message = Some(format!("Error: {e:#}"));
                    }
                }
            }
        }
    }

    /// Kick off a background load of `sources[index]`. The completion
    /// arrives later as a `DatasetLoaded` event.
    pub fn request_load(&mut self, index: usize, events: &EventSender) {
        let Some(path) = self.sources.get(index) else {
            return;
        };
        self.active_source = index;
        self.loading = true;
        self.status_message = None;
        loader::spawn_load(path.clone(), index, events.clone());
    }
}

// ---------------------------------------------------------------------------
// Wrap-around source cycling
// ---------------------------------------------------------------------------

pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

pub fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Reading;
    use crate::event::EventBus;
    use chrono::NaiveDate;
    use eframe::egui;

    fn reading_at(day: u32) -> Reading {
        Reading {
            date: NaiveDate::from_ymd_opt(2016, 3, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            temp_air: 4.0,
            pressure: 1013.0,
            kilopascal: 101.3,
            wind_speed: 3.0,
            kmh_wind_speed: 10.8,
            wind_direction: 45.0,
        }
    }

    fn dataset() -> WeatherDataset {
        WeatherDataset::from_readings((1..=5).map(reading_at).collect())
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        assert_eq!(next_index(0, 3), 1);
        assert_eq!(next_index(2, 3), 0);
        assert_eq!(prev_index(0, 3), 2);
        assert_eq!(prev_index(1, 3), 0);
        assert_eq!(next_index(0, 1), 0);
        assert_eq!(prev_index(0, 1), 0);
    }

    #[test]
    fn load_completion_replaces_the_dataset_wholesale() {
        let bus = EventBus::new(egui::Context::default());
        let sender = bus.sender();
        let mut state = AppState::new(&crate::config::WidgetConfig::empty());

        state.apply(
            WidgetEvent::DatasetLoaded {
                index: 0,
                result: Ok(dataset()),
            },
            &sender,
        );

        let ds = state.dataset.as_ref().unwrap();
        assert_eq!(ds.len(), 5);
        assert_eq!(state.range_start, ds.filter.min_date);
        assert_eq!(state.range_end, ds.filter.max_date);
        assert_eq!(state.generation, 1);
        assert!(!state.loading);
    }

    #[test]
    fn failed_load_keeps_prior_state() {
        let bus = EventBus::new(egui::Context::default());
        let sender = bus.sender();
        let mut state = AppState::new(&crate::config::WidgetConfig::empty());

        state.apply(
            WidgetEvent::DatasetLoaded {
                index: 0,
                result: Ok(dataset()),
            },
            &sender,
        );
        state.apply(
            WidgetEvent::DatasetLoaded {
                index: 0,
                result: Err(anyhow::anyhow!("boom")),
            },
            &sender,
        );

        assert!(state.dataset.is_some());
        assert!(state.status_message.as_deref().unwrap().contains("boom"));
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn filter_event_refilters_and_recomputes_statistics() {
        let bus = EventBus::new(egui::Context::default());
        let sender = bus.sender();
        let mut state = AppState::new(&crate::config::WidgetConfig::empty());
        state.apply(
            WidgetEvent::DatasetLoaded {
                index: 0,
                result: Ok(dataset()),
            },
            &sender,
        );

        state.apply(
            WidgetEvent::FilterRange {
                start: reading_at(2).date,
                end: reading_at(4).date,
            },
            &sender,
        );

        let ds = state.dataset.as_ref().unwrap();
        assert_eq!(ds.filtered.len(), 3);
        assert_eq!(ds.original.len(), 5);
        assert_eq!(ds.statistics.wind_rose.total(), 3);
        assert_eq!(state.range_start, reading_at(2).date);
    }
}
