use std::{fmt::Write as _, path::Path};

use anyhow::Context;
use egui::pos2;

use crate::{
    config::{to_hex, WheelConfig},
    geometry::{WheelGeometry, PLACEHOLDER_FILL},
};

const OUTLINE: &str = "#111";
const HUB_FILL: &str = "#111";
const HUB_STROKE: &str = "#fff";

/// Draws the wheel as a standalone svg document, turned by `rotation`
/// degrees the same way the window shows it.
pub fn render<S: AsRef<str>>(names: &[S], rotation: f64, config: &WheelConfig) -> String {
    let size = config.diameter;
    let radius = config.radius();
    let geometry = WheelGeometry::new(pos2(radius, radius), radius)
        .with_label_ratio(config.label_radius_ratio);

    let mut out = String::new();
    // writing into a String can't fail
    let _ = write_document(&mut out, names, rotation % 360.0, size, &geometry, config);
    out
}

fn write_document<S: AsRef<str>>(
    out: &mut String,
    names: &[S],
    rotation: f64,
    size: f32,
    geometry: &WheelGeometry,
    config: &WheelConfig,
) -> std::fmt::Result {
    let (cx, cy, r) = (geometry.center.x, geometry.center.y, geometry.radius);

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    )?;
    writeln!(out, r#"  <g transform="rotate({rotation}, {cx}, {cy})">"#)?;

    if names.is_empty() {
        writeln!(
            out,
            r#"    <circle cx="{cx}" cy="{cy}" r="{r}" fill="{}" />"#,
            to_hex(PLACEHOLDER_FILL)
        )?;
    }

    for slice in geometry.slices(names, &config.palette) {
        let fill = to_hex(slice.color);
        writeln!(out, "    <g>")?;
        if slice.full_circle {
            writeln!(
                out,
                r#"      <circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="{OUTLINE}" stroke-width="1" />"#
            )?;
        } else {
            writeln!(
                out,
                r#"      <path d="{}" fill="{fill}" stroke="{OUTLINE}" stroke-width="1" />"#,
                slice.arc_path(geometry)
            )?;
        }

        let (x, y) = (slice.label_anchor.x, slice.label_anchor.y);
        writeln!(
            out,
            r#"      <text x="{x}" y="{y}" font-size="{}" text-anchor="middle" dominant-baseline="middle" transform="rotate({}, {x}, {y})" fill="{OUTLINE}" font-weight="700">{}</text>"#,
            config.label_font_size,
            slice.label_rotation,
            escape(slice.name),
        )?;
        writeln!(out, "    </g>")?;
    }

    writeln!(
        out,
        r#"    <circle cx="{cx}" cy="{cy}" r="{}" fill="{HUB_FILL}" stroke="{HUB_STROKE}" stroke-width="2" />"#,
        config.hub_radius
    )?;
    writeln!(
        out,
        r#"    <circle cx="{cx}" cy="{cy}" r="{}" fill="{HUB_STROKE}" />"#,
        config.hub_dot_radius
    )?;
    writeln!(out, "  </g>")?;
    writeln!(out, "</svg>")
}

pub fn export<S: AsRef<str>>(
    path: impl AsRef<Path>,
    names: &[S],
    rotation: f64,
    config: &WheelConfig,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render(names, rotation, config))
        .with_context(|| anyhow::anyhow!("cannot write `{}`", path.display()))?;
    log::info!("exported {} names to {}", names.len(), path.display());
    Ok(())
}

fn escape(input: &str) -> String {
    input.chars().fold(String::with_capacity(input.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
        out
    })
}
