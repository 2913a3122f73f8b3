use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::NaiveDateTime;
use eframe::egui;

use crate::data::model::WeatherDataset;

// ---------------------------------------------------------------------------
// Widget events
// ---------------------------------------------------------------------------

/// The signals that mutate widget state. UI code and background loaders
/// only ever hold an [`EventSender`]; the app drains the bus once per frame
/// and feeds each event to the state reducer.
#[derive(Debug)]
pub enum WidgetEvent {
    /// Advance to the next configured CSV source (wraps around).
    NextDataset,
    /// Go back to the previous configured CSV source (wraps around).
    PrevDataset,
    /// Append an ad-hoc CSV to the source list and load it.
    OpenFile(PathBuf),
    /// Commit a new date range over the loaded dataset.
    FilterRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Completion of a background load (the only message a loader sends).
    DatasetLoaded {
        index: usize,
        result: anyhow::Result<WeatherDataset>,
    },
}

// ---------------------------------------------------------------------------
// Event bus
// ---------------------------------------------------------------------------

/// Cloneable sending half of the bus. Sending also wakes the UI so a
/// completion arriving from a worker thread repaints promptly.
#[derive(Clone)]
pub struct EventSender {
    tx: Sender<WidgetEvent>,
    ctx: egui::Context,
}

impl EventSender {
    pub fn send(&self, event: WidgetEvent) {
        if self.tx.send(event).is_ok() {
            self.ctx.request_repaint();
        }
    }
}

/// The app-owned bus: hand out senders, drain pending events each frame.
pub struct EventBus {
    tx: Sender<WidgetEvent>,
    rx: Receiver<WidgetEvent>,
    ctx: egui::Context,
}

impl EventBus {
    pub fn new(ctx: egui::Context) -> Self {
        let (tx, rx) = mpsc::channel();
        EventBus { tx, rx, ctx }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
            ctx: self.ctx.clone(),
        }
    }

    /// All events received since the last drain, in arrival order.
    pub fn drain(&self) -> Vec<WidgetEvent> {
        self.rx.try_iter().collect()
    }
}
