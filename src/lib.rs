#![cfg_attr(debug_assertions, allow(dead_code, unused_variables,))]

pub trait RequestPaint: Send + Sync {
    fn request_repaint(&self) {}
}

impl RequestPaint for egui::Context {
    fn request_repaint(&self) {
        Self::request_repaint(self)
    }
}

pub struct NoopRepaint;
impl RequestPaint for NoopRepaint {}

pub mod font_icon {
    pub const REMOVE: &str = "✖";
    pub const SUCCESS: &str = "✔";
    pub const EXPORT: &str = "💾";
    pub const LOGS: &str = "📜";
}

mod names;
pub use names::NameList;

pub mod geometry;
pub use geometry::{Slice, WheelGeometry};

pub mod spin;
pub use spin::{ResultNotifier, SpinOutcome, SpinRng, SpinRules, Wheel};

pub mod animation;
pub use animation::SpinAnimation;

pub mod timer;

pub mod config;
pub use config::{Preset, WheelConfig};

pub mod svg;

pub mod logger;

mod queue;
pub use queue::Queue;

pub mod widgets;

mod app;
pub use app::App;
