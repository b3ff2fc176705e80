use std::sync::Arc;

use egui::{
    emath::Rot2,
    epaint::{Galley, TextShape},
    pos2, vec2, Color32, FontId, Painter, Pos2, Sense, Shape, Stroke,
};

use crate::{
    geometry::{Slice, WheelGeometry, PLACEHOLDER_FILL},
    WheelConfig,
};

const OUTLINE: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);
const POINTER: Color32 = Color32::WHITE;
const BACKING: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

/// Degrees between the points used to trace a slice's rim.
const ARC_STEP: f32 = 4.0;

/// Paints the wheel turned by `rotation` degrees, with the pointer fixed on
/// top.
pub struct WheelView<'a> {
    names: &'a [String],
    rotation: f32,
    config: &'a WheelConfig,
}

impl<'a> WheelView<'a> {
    pub fn new(names: &'a [String], rotation: f64, config: &'a WheelConfig) -> Self {
        Self {
            names,
            rotation: (rotation % 360.0) as f32,
            config,
        }
    }

    fn paint_slice(&self, painter: &Painter, geometry: &WheelGeometry, slice: &Slice<'_>) {
        if slice.full_circle {
            painter.circle(
                geometry.center,
                geometry.radius,
                slice.color,
                Stroke::new(1.0, OUTLINE),
            );
        } else {
            painter.add(Shape::convex_polygon(
                slice.outline(geometry, ARC_STEP),
                slice.color,
                Stroke::new(1.0, OUTLINE),
            ));
        }

        let galley = painter.layout_no_wrap(
            slice.name.to_string(),
            FontId::proportional(self.config.label_font_size),
            OUTLINE,
        );
        painter.add(Self::centered_text(
            slice.label_anchor,
            galley,
            slice.label_rotation.to_radians(),
        ));
    }

    /// Text shapes rotate around their top left corner, so shift it until
    /// the middle of the text lands on `anchor`.
    fn centered_text(anchor: Pos2, galley: Arc<Galley>, angle: f32) -> Shape {
        let half = galley.size() / 2.0;
        let pos = anchor - Rot2::from_angle(angle) * half;
        Shape::Text(TextShape {
            angle,
            ..TextShape::new(pos, galley)
        })
    }

    fn paint_pointer(painter: &Painter, top: Pos2) {
        let points = vec![
            top + vec2(-12.0, -8.0),
            top + vec2(12.0, -8.0),
            top + vec2(0.0, 12.0),
        ];
        painter.add(Shape::convex_polygon(points, POINTER, Stroke::none()));
    }
}

impl<'a> egui::Widget for WheelView<'a> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let size = vec2(self.config.diameter, self.config.diameter);
        let (rect, resp) = ui.allocate_exact_size(size + vec2(0.0, 8.0), Sense::hover());
        if !ui.is_rect_visible(rect) {
            return resp;
        }

        let painter = ui.painter_at(rect.expand(1.0));
        let center = pos2(rect.center().x, rect.top() + 8.0 + self.config.radius());
        let geometry = WheelGeometry::new(center, self.config.radius())
            .with_label_ratio(self.config.label_radius_ratio)
            .rotated(self.rotation);

        painter.circle_filled(center, geometry.radius, BACKING);

        if self.names.is_empty() {
            painter.circle_filled(center, geometry.radius, PLACEHOLDER_FILL);
        }

        for slice in geometry.slices(self.names, &self.config.palette) {
            self.paint_slice(&painter, &geometry, &slice);
        }

        painter.circle(
            center,
            self.config.hub_radius,
            OUTLINE,
            Stroke::new(2.0, Color32::WHITE),
        );
        painter.circle_filled(center, self.config.hub_dot_radius, Color32::WHITE);

        Self::paint_pointer(&painter, pos2(center.x, center.y - geometry.radius));

        resp
    }
}
