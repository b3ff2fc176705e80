#![cfg_attr(debug_assertions, allow(dead_code, unused_variables,))]

use std::path::Path;

use anyhow::Context;
use eframe::NativeOptions;
use egui::{vec2, FontData, FontDefinitions, FontFamily};

use namewheel::{logger, widgets::Backdrop, App, WheelConfig};

const FONT_NAME: &str = "namewheel-custom";

fn load_font(ctx: &egui::Context, path: &Path) -> anyhow::Result<()> {
    let data =
        std::fs::read(path).with_context(|| anyhow::anyhow!("cannot read `{}`", path.display()))?;

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(FONT_NAME.to_string(), FontData::from_owned(data));

    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, FONT_NAME.to_string());
    }

    ctx.set_fonts(fonts);
    Ok(())
}

fn load_backdrop(config: &WheelConfig) -> Option<Backdrop> {
    let path = config.background_image.as_deref()?;
    match Backdrop::load(path) {
        Ok(backdrop) => Some(backdrop),
        Err(err) => {
            log::warn!("no background picture: {err:#}");
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    let logs = logger::init_logger()?;
    let config = WheelConfig::load()?;
    let backdrop = load_backdrop(&config);

    let window = vec2(config.diameter.max(420.0) + 80.0, config.diameter + 420.0);

    eframe::run_native(
        "namewheel",
        NativeOptions {
            initial_window_size: Some(window),
            ..Default::default()
        },
        Box::new(move |cc| {
            if let Some(font) = &config.font {
                if let Err(err) = load_font(&cc.egui_ctx, font) {
                    log::warn!("keeping the default fonts: {err:#}");
                }
            }

            Box::new(App::new(cc.egui_ctx.clone(), config, logs, backdrop))
        }),
    );

    Ok(())
}
