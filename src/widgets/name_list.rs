use egui::{style::Margin, Button, Color32, Frame, Key, RichText, Rounding, TextEdit};

use crate::{config::Strings, font_icon::REMOVE, Wheel};

const ADD_FILL: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99);
const CHIP_FILL: Color32 = Color32::from_rgba_premultiplied(0x33, 0x33, 0x33, 0x33);

/// The text box for new names and the list of names already on the wheel.
pub struct NameEditor<'a> {
    input: &'a mut String,
    wheel: &'a mut Wheel,
    strings: &'a Strings,
}

impl<'a> NameEditor<'a> {
    pub fn new(input: &'a mut String, wheel: &'a mut Wheel, strings: &'a Strings) -> Self {
        Self {
            input,
            wheel,
            strings,
        }
    }

    fn display_input(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let add = Button::new(
                RichText::new(&*self.strings.add)
                    .strong()
                    .color(Color32::BLACK),
            )
            .fill(ADD_FILL);
            let clicked = ui.add(add).clicked();

            let resp = ui.add_sized(
                [ui.available_width(), 0.0],
                TextEdit::singleline(self.input).hint_text(self.strings.placeholder.as_str()),
            );
            let entered = resp.lost_focus() && ui.input().key_pressed(Key::Enter);

            // a blank line stays in the box, like it was never submitted
            if (clicked || entered) && self.wheel.add_name(self.input) {
                self.input.clear();
            }
            if entered {
                resp.request_focus();
            }
        });
    }

    fn display_names(&mut self, ui: &mut egui::Ui) -> Option<usize> {
        let mut remove = None;
        ui.horizontal_wrapped(|ui| {
            for (index, name) in self.wheel.names().iter().enumerate() {
                Frame::none()
                    .fill(CHIP_FILL)
                    .rounding(Rounding::same(14.0))
                    .inner_margin(Margin::symmetric(10.0, 2.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(name);
                            if ui.small_button(REMOVE).clicked() {
                                remove.replace(index);
                            }
                        });
                    });
            }
        });
        remove
    }
}

impl<'a> egui::Widget for NameEditor<'a> {
    fn ui(mut self, ui: &mut egui::Ui) -> egui::Response {
        ui.vertical(|ui| {
            self.display_input(ui);
            ui.add_space(6.0);
            ui.heading(&*self.strings.names_heading);
            ui.add_space(4.0);

            if let Some(index) = self.display_names(ui) {
                self.wheel.remove_name(index);
            }
        })
        .response
    }
}
