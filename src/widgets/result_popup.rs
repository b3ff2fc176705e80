use egui::{vec2, Align2, Color32, Id, Key, RichText, Window};

use crate::{config::Strings, font_icon::SUCCESS, ResultNotifier, SpinOutcome};

/// Announces the winner of the last spin until it is dismissed.
#[derive(Default)]
pub struct ResultPopup {
    showing: Option<String>,
    // keys only count once the window has been on screen for a frame
    drawn: bool,
}

impl ResultNotifier for ResultPopup {
    fn notify(&mut self, outcome: &SpinOutcome) {
        self.showing.replace(outcome.name.clone());
        self.drawn = false;
    }
}

impl ResultPopup {
    pub fn is_open(&self) -> bool {
        self.showing.is_some()
    }

    pub fn winner(&self) -> Option<&str> {
        self.showing.as_deref()
    }

    pub fn dismiss(&mut self) {
        self.showing.take();
    }

    pub fn display(&mut self, ctx: &egui::Context, strings: &Strings) {
        let name = match &self.showing {
            Some(name) => name,
            None => return,
        };

        let mut confirmed = false;
        Window::new(strings.result_title.as_str())
            .id(Id::new("spin_result"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(SUCCESS).size(48.0).color(Color32::GREEN));
                    ui.add_space(8.0);
                    ui.heading(name.as_str());
                    ui.add_space(12.0);
                    confirmed = ui.button(strings.confirm.as_str()).clicked();
                });
            });

        let keys = {
            let input = ctx.input();
            input.key_pressed(Key::Enter) || input.key_pressed(Key::Escape)
        };

        self.settle(confirmed, keys);
    }

    fn settle(&mut self, confirmed: bool, keys: bool) {
        if confirmed || (keys && self.drawn) {
            self.dismiss();
        } else {
            self.drawn = true;
        }
    }
}
