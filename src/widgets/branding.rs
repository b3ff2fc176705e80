use std::path::Path;

use anyhow::Context;
use egui::{pos2, Align, Color32, Layout, Rect, RichText, Shape, TopBottomPanel};
use egui_extras::RetainedImage;

/// A picture stretched behind the wheel.
pub struct Backdrop {
    image: RetainedImage,
}

impl Backdrop {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| anyhow::anyhow!("cannot read `{}`", path.display()))?;
        let image = RetainedImage::from_image_bytes(path.display().to_string(), &data)
            .map_err(anyhow::Error::msg)
            .with_context(|| anyhow::anyhow!("cannot decode `{}`", path.display()))?;
        Ok(Self { image })
    }

    pub fn paint(&self, ui: &egui::Ui, rect: Rect) {
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        ui.painter().add(Shape::image(
            self.image.texture_id(ui.ctx()),
            rect,
            uv,
            Color32::WHITE,
        ));
    }
}

pub fn header(ctx: &egui::Context, text: &str) {
    TopBottomPanel::top("header").show(ctx, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(6.0);
            ui.label(RichText::new(text).heading().strong());
            ui.add_space(6.0);
        });
    });
}

pub fn footer(ctx: &egui::Context, text: &str) {
    TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.small(text);
        });
    });
}
