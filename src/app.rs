use std::time::Duration;

use egui::{Align, Button, CentralPanel, Color32, Key, Layout, RichText};

use crate::{
    font_icon,
    logger::Record,
    svg,
    widgets::{self, Backdrop, LogWindow, NameEditor, ResultPopup, WheelView},
    SpinAnimation, Wheel, WheelConfig,
};

const SPIN_FILL: Color32 = Color32::WHITE;

pub struct App {
    context: egui::Context,
    config: WheelConfig,
    wheel: Wheel,
    rng: fastrand::Rng,
    animation: SpinAnimation,
    input: String,
    popup: ResultPopup,
    backdrop: Option<Backdrop>,
    logs: flume::Receiver<Record>,
    log_window: LogWindow,
    showing_logs: bool,
}

impl App {
    pub fn new(
        context: egui::Context,
        config: WheelConfig,
        logs: flume::Receiver<Record>,
        backdrop: Option<Backdrop>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                log::debug!("seeding spins with {seed}");
                fastrand::Rng::with_seed(seed)
            }
            None => fastrand::Rng::new(),
        };

        Self {
            context,
            wheel: Wheel::new(config.spin_rules()),
            rng,
            animation: SpinAnimation::default(),
            input: String::new(),
            popup: ResultPopup::default(),
            backdrop,
            logs,
            log_window: LogWindow::with_capacity(500),
            showing_logs: false,
            config,
        }
    }

    fn now(&self) -> f64 {
        self.context.input().time
    }

    fn try_spin(&mut self) {
        let outcome = match self.wheel.spin(&mut self.rng, self.context.clone()) {
            Some(outcome) => outcome,
            None => return,
        };

        let now = self.now();
        self.animation.start(
            outcome.selection.from,
            outcome.selection.target,
            now,
            self.wheel.rules().duration,
        );
    }

    fn try_finish_spin(&mut self) {
        // the popup is painted later in this frame
        self.wheel.poll(&mut self.popup);
    }

    fn export_svg(&self) {
        let rotation = self.wheel.rotation();
        if let Err(err) = svg::export(
            &self.config.svg_path,
            self.wheel.names().as_slice(),
            rotation,
            &self.config,
        ) {
            log::error!("cannot export the wheel: {err:#}");
        }
    }

    fn try_handle_key_press(&mut self) {
        if self.context.input().key_pressed(Key::F12) {
            self.showing_logs = !self.showing_logs;
        }
    }

    fn display_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let spinning = self.wheel.is_spinning();
            let label = if spinning {
                &self.config.strings.spinning
            } else {
                &self.config.strings.spin
            };

            let spin = Button::new(RichText::new(label.as_str()).strong().color(Color32::BLACK))
                .fill(SPIN_FILL);
            if ui.add_enabled(self.wheel.can_spin(), spin).clicked() {
                self.try_spin();
            }

            if ui
                .small_button(font_icon::EXPORT)
                .on_hover_text_at_pointer("Save the wheel as svg")
                .clicked()
            {
                self.export_svg();
            }

            if ui
                .small_button(font_icon::LOGS)
                .on_hover_text_at_pointer("Toggle the log window (F12)")
                .clicked()
            {
                self.showing_logs = !self.showing_logs;
            }
        });
    }

    fn display_wheel(&mut self, ui: &mut egui::Ui) {
        let now = self.now();
        let rotation = self.animation.rotation_at(now);
        if self.animation.is_animating(now) {
            ui.ctx().request_repaint();
        }

        ui.add(WheelView::new(
            self.wheel.names().as_slice(),
            rotation,
            &self.config,
        ));
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        self.log_window.drain(&self.logs);
        self.try_finish_spin();
        self.try_handle_key_press();

        if let Some(header) = &self.config.header {
            widgets::header(ctx, header);
        }
        if let Some(footer) = &self.config.footer {
            widgets::footer(ctx, footer);
        }

        CentralPanel::default().show(ctx, |ui| {
            if let Some(backdrop) = &self.backdrop {
                backdrop.paint(ui, ui.max_rect());
            }

            ui.set_enabled(!self.popup.is_open());
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.add_space(16.0);
                self.display_wheel(ui);
                ui.add_space(12.0);
                self.display_controls(ui);
                ui.add_space(16.0);

                ui.allocate_ui_with_layout(
                    egui::vec2(ui.available_width().min(960.0), ui.available_height()),
                    Layout::top_down(Align::Min),
                    |ui| {
                        ui.add(NameEditor::new(
                            &mut self.input,
                            &mut self.wheel,
                            &self.config.strings,
                        ))
                    },
                );
            });
        });

        self.popup.display(ctx, &self.config.strings);
        self.log_window.display(&mut self.showing_logs, ctx);

        // keep polling the timer while nothing else is drawing
        if self.wheel.is_spinning() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
