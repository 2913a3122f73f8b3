use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color;
use crate::data::model::{Reading, WeatherDataset};
use crate::data::stats::{Sector, WindRose};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart specs – one parameterized component, three variants
// ---------------------------------------------------------------------------

/// One chart variant: which derived field is plotted and how it is labelled.
pub struct ChartSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub color: Color32,
    pub accessor: fn(&Reading) -> f64,
}

pub fn chart_specs() -> [ChartSpec; 3] {
    [
        ChartSpec {
            id: "temp_air_chart",
            label: "Air temperature",
            unit: "°C",
            color: color::temperature_color(),
            accessor: |r| r.temp_air,
        },
        ChartSpec {
            id: "pressure_chart",
            label: "Barometric pressure",
            unit: "kPa",
            color: color::pressure_color(),
            accessor: |r| r.kilopascal,
        },
        ChartSpec {
            id: "wind_speed_chart",
            label: "Wind speed",
            unit: "km/h",
            color: color::wind_color(),
            accessor: |r| r.kmh_wind_speed,
        },
    ]
}

// ---------------------------------------------------------------------------
// Central panel – stacked time-series charts
// ---------------------------------------------------------------------------

/// Render the three stacked charts, splitting the available height evenly.
/// Regions are recomputed every frame, so resizing the window reflows the
/// charts without any dedicated event.
pub fn chart_stack(ui: &mut Ui, state: &AppState, reveal: f32) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a station file to view readings  (File → Open…)");
            });
            return;
        }
    };

    let spacing = ui.spacing().item_spacing.y;
    let height = ((ui.available_height() - 2.0 * spacing) / 3.0).max(60.0);

    for spec in chart_specs() {
        time_series_chart(ui, &spec, dataset, height, reveal);
    }
}

/// Draw one axis-scaled line + filled-area chart of `spec`'s field over
/// time, animating up from a flat baseline while `reveal < 1`.
pub fn time_series_chart(
    ui: &mut Ui,
    spec: &ChartSpec,
    dataset: &WeatherDataset,
    height: f32,
    reveal: f32,
) {
    let readings = &dataset.filtered;

    let baseline = readings
        .iter()
        .map(|r| (spec.accessor)(r))
        .fold(f64::INFINITY, f64::min);
    let baseline = if baseline.is_finite() { baseline } else { 0.0 };
    let t = f64::from(smoothstep(reveal));
    let animated = |r: &Reading| {
        let y = (spec.accessor)(r);
        baseline + (y - baseline) * t
    };

    let points: PlotPoints = readings
        .iter()
        .map(|r| [r.timestamp(), animated(r)])
        .collect();

    let line = Line::new(points)
        .name(spec.label)
        .color(spec.color)
        .width(1.5)
        .fill(baseline as f32);

    Plot::new(spec.id)
        .height(height)
        .y_axis_label(format!("{} [{}]", spec.label, spec.unit))
        .x_axis_formatter(format_date_mark)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(line);

            if readings.is_empty() {
                return;
            }
            let Some(pointer) = plot_ui.pointer_coordinate() else {
                return;
            };

            // Nearest reading by time under the cursor.
            let nearest = &readings[nearest_by_time(readings, pointer.x)];
            let value = (spec.accessor)(nearest);
            let x = nearest.timestamp();
            let y = animated(nearest);

            plot_ui.points(
                Points::new(vec![[x, y]])
                    .radius(3.0)
                    .color(spec.color),
            );

            // Flip the label to the other side of the marker near the right
            // edge so it never clips outside the plot.
            let bounds = plot_ui.plot_bounds();
            let span = bounds.max()[0] - bounds.min()[0];
            let anchor = if span > 0.0 && (x - bounds.min()[0]) / span > 0.8 {
                Align2::RIGHT_BOTTOM
            } else {
                Align2::LEFT_BOTTOM
            };
            let label = format!(
                "{}  {:.1} {}",
                nearest.date.format("%Y-%m-%d %H:%M"),
                value,
                spec.unit
            );
            plot_ui.text(Text::new(PlotPoint::new(x, y), RichText::new(label).size(12.0)).anchor(anchor));
        });
}

// ---------------------------------------------------------------------------
// Wind rose (side panel)
// ---------------------------------------------------------------------------

/// 16-sector wind rose as a bar chart, one hue per sector.
pub fn wind_rose_chart(ui: &mut Ui, rose: &WindRose) {
    let colors = color::generate_palette(16);
    let bars: Vec<Bar> = Sector::ALL
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (sector, color))| {
            Bar::new(i as f64, f64::from(rose.count(*sector)))
                .width(0.8)
                .fill(color)
                .name(sector.label())
        })
        .collect();

    Plot::new("wind_rose")
        .height(140.0)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(format_sector_mark)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Index of the reading whose timestamp is closest to `target` seconds.
/// `readings` must be sorted by time; ties resolve to the earlier reading.
pub fn nearest_by_time(readings: &[Reading], target: f64) -> usize {
    let idx = readings.partition_point(|r| r.timestamp() < target);
    if idx == 0 {
        return 0;
    }
    if idx >= readings.len() {
        return readings.len() - 1;
    }
    let before = target - readings[idx - 1].timestamp();
    let after = readings[idx].timestamp() - target;
    if before <= after {
        idx - 1
    } else {
        idx
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn format_date_mark(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    let Some(dt) = chrono::DateTime::from_timestamp(mark.value as i64, 0) else {
        return String::new();
    };
    if mark.step_size >= 86_400.0 {
        dt.format("%d %b").to_string()
    } else {
        dt.format("%d %b %H:%M").to_string()
    }
}

fn format_sector_mark(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    let i = mark.value.round();
    if (mark.value - i).abs() < 1e-6 && (0.0..16.0).contains(&i) {
        Sector::ALL[i as usize].label().to_string()
    } else {
        String::new()
    }
}
