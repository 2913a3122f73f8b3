use chrono::NaiveTime;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::filter::DateFilter;
use crate::event::{EventSender, WidgetEvent};
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Top bar – dataset navigator
// ---------------------------------------------------------------------------

/// Render the top menu / navigation bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, events: &EventSender) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(events);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button("◀ Prev").clicked() {
            events.send(WidgetEvent::PrevDataset);
        }
        if ui.button("Next ▶").clicked() {
            events.send(WidgetEvent::NextDataset);
        }

        match state.active_source_name() {
            Some(name) => {
                ui.label(format!(
                    "{name}  ({}/{})",
                    state.active_source + 1,
                    state.sources.len()
                ));
            }
            None => {
                ui.label("No station selected");
            }
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} readings, {} in range",
                ds.original.len(),
                ds.filtered.len()
            ));
        }

        if state.loading {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – statistics and date-range controls
// ---------------------------------------------------------------------------

/// Render the statistics panel: per-variable means, the wind rose, and the
/// date-range filter controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, events: &EventSender) {
    ui.heading("Statistics");
    ui.separator();

    let (stats, filter, rows_total, rows_visible) = match &state.dataset {
        Some(ds) => (
            ds.statistics,
            ds.filter,
            ds.original.len(),
            ds.filtered.len(),
        ),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("mean_grid")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    stat_row(ui, "Mean temperature", stats.mean_temp_air, "°C");
                    stat_row(ui, "Mean pressure", stats.mean_kilopascal, "kPa");
                    stat_row(ui, "Mean wind speed", stats.mean_wind_kmh, "km/h");
                    ui.label("Readings in range");
                    ui.label(format!("{rows_visible} / {rows_total}"));
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.strong(format!("Wind rose ({} directions)", stats.wind_rose.total()));
            plot::wind_rose_chart(ui, &stats.wind_rose);

            ui.add_space(8.0);
            ui.strong("Date range");
            range_controls(ui, state, &filter, events);
        });
}

fn stat_row(ui: &mut Ui, label: &str, value: Option<f64>, unit: &str) {
    ui.label(label);
    match value {
        Some(v) => ui.label(format!("{v:.1} {unit}")),
        None => ui.label("–"),
    };
    ui.end_row();
}

// ---------------------------------------------------------------------------
// Date-range controls
// ---------------------------------------------------------------------------

/// Two-endpoint range control over `[min_date, max_date]`: a pair of
/// sliders (commit on drag stop) plus date-picker buttons (commit on
/// change). The reducer clamps and orders whatever is sent.
fn range_controls(ui: &mut Ui, state: &mut AppState, filter: &DateFilter, events: &EventSender) {
    let min_ts = filter.min_date.and_utc().timestamp();
    let max_ts = filter.max_date.and_utc().timestamp();
    if min_ts >= max_ts {
        ui.label("Single-instant dataset, nothing to filter.");
        return;
    }

    let mut commit = false;

    ui.horizontal(|ui: &mut Ui| {
        let mut start_date = state.range_start.date();
        if ui
            .add(DatePickerButton::new(&mut start_date).id_salt("range_start"))
            .changed()
        {
            state.range_start = start_date.and_time(NaiveTime::MIN);
            commit = true;
        }
        ui.label("to");
        let mut end_date = state.range_end.date();
        if ui
            .add(DatePickerButton::new(&mut end_date).id_salt("range_end"))
            .changed()
        {
            // End of the hourly day, so the picked day stays included.
            state.range_end = end_date.and_time(NaiveTime::MIN) + chrono::Duration::hours(23);
            commit = true;
        }
    });

    let mut start_ts = state.range_start.and_utc().timestamp();
    let response = ui.add(
        egui::Slider::new(&mut start_ts, min_ts..=max_ts)
            .text("From")
            .custom_formatter(format_slider_date),
    );
    if response.changed() {
        if let Some(dt) = datetime_from_ts(start_ts) {
            state.range_start = dt;
        }
    }
    if response.drag_stopped() {
        commit = true;
    }

    let mut end_ts = state.range_end.and_utc().timestamp();
    let response = ui.add(
        egui::Slider::new(&mut end_ts, min_ts..=max_ts)
            .text("To")
            .custom_formatter(format_slider_date),
    );
    if response.changed() {
        if let Some(dt) = datetime_from_ts(end_ts) {
            state.range_end = dt;
        }
    }
    if response.drag_stopped() {
        commit = true;
    }

    if ui.small_button("Reset").clicked() {
        state.range_start = filter.min_date;
        state.range_end = filter.max_date;
        commit = true;
    }

    if commit {
        events.send(WidgetEvent::FilterRange {
            start: state.range_start,
            end: state.range_end,
        });
    }
}

fn datetime_from_ts(ts: i64) -> Option<chrono::NaiveDateTime> {
    chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.naive_utc())
}

fn format_slider_date(value: f64, _range: std::ops::RangeInclusive<usize>) -> String {
    match datetime_from_ts(value as i64) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(events: &EventSender) {
    let file = rfd::FileDialog::new()
        .set_title("Open station data")
        .add_filter("Station CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        events.send(WidgetEvent::OpenFile(path));
    }
}
