use eframe::egui;

use crate::config::WidgetConfig;
use crate::event::EventBus;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Seconds the chart reveal animation takes after a dataset change.
const REVEAL_SECS: f32 = 0.6;

pub struct WeathervaneApp {
    pub state: AppState,
    events: EventBus,
    /// Reveal animation progress in `[0, 1]`.
    reveal: f32,
    seen_generation: u64,
}

impl WeathervaneApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: WidgetConfig) -> Self {
        let events = EventBus::new(cc.egui_ctx.clone());
        let mut state = AppState::new(&config);
        if !state.sources.is_empty() {
            state.request_load(0, &events.sender());
        }
        WeathervaneApp {
            state,
            events,
            reveal: 1.0,
            seen_generation: 0,
        }
    }
}

impl eframe::App for WeathervaneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Drain the event bus through the reducer ----
        let sender = self.events.sender();
        for event in self.events.drain() {
            self.state.apply(event, &sender);
        }

        // ---- Restart the reveal animation when the charts were rebuilt ----
        if self.state.generation != self.seen_generation {
            self.seen_generation = self.state.generation;
            self.reveal = 0.0;
        }
        if self.reveal < 1.0 {
            self.reveal = (self.reveal + ctx.input(|i| i.stable_dt) / REVEAL_SECS).min(1.0);
            ctx.request_repaint();
        }

        // ---- Top panel: dataset navigator ----
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &sender);
        });

        // ---- Left side panel: statistics and date-range filter ----
        egui::SidePanel::left("stats_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &sender);
            });

        // ---- Central panel: stacked charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_stack(ui, &self.state, self.reveal);
        });
    }
}
