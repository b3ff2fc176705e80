use egui::{pos2, Color32, Pos2};

pub const FULL_TURN: f32 = 360.0;

/// Fill for the wheel when there are no names on it.
pub const PLACEHOLDER_FILL: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);

/// Maps an angle in degrees (0 is up, clockwise positive) to a point on the
/// circle of `radius` around `center`.
pub fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    let rad = (angle - 90.0).to_radians();
    pos2(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// The angular width of one slice when the wheel holds `count` names.
pub fn slice_span(count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    FULL_TURN / count as f32
}

/// An svg path for the pie wedge between `start` and `end`.
///
/// The arc is traced from `end` back to `start`, so the sweep flag is always
/// `0`; the large-arc flag is set once the wedge covers more than half the
/// circle.
pub fn arc_path(center: Pos2, radius: f32, start: f32, end: f32) -> String {
    let s = polar(center, radius, end);
    let e = polar(center, radius, start);
    let big = if end - start <= 180.0 { "0" } else { "1" };
    format!(
        "M {} {} L {} {} A {radius} {radius} 0 {big} 0 {} {} Z",
        center.x, center.y, s.x, s.y, e.x, e.y
    )
}

/// Where the wheel sits and how it is turned.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelGeometry {
    pub center: Pos2,
    pub radius: f32,
    /// Distance of the labels from the center, as a fraction of `radius`.
    pub label_ratio: f32,
    /// Clockwise rotation of the whole wheel, in degrees.
    pub rotation: f32,
}

impl WheelGeometry {
    pub const DEFAULT_LABEL_RATIO: f32 = 0.65;

    pub fn new(center: Pos2, radius: f32) -> Self {
        Self {
            center,
            radius,
            label_ratio: Self::DEFAULT_LABEL_RATIO,
            rotation: 0.0,
        }
    }

    pub fn with_label_ratio(self, label_ratio: f32) -> Self {
        Self {
            label_ratio,
            ..self
        }
    }

    pub fn rotated(self, rotation: f32) -> Self {
        Self { rotation, ..self }
    }

    pub fn point_at(&self, radius: f32, angle: f32) -> Pos2 {
        polar(self.center, radius, angle + self.rotation)
    }

    /// One slice per name, in list order, colored from `palette` cyclically.
    pub fn slices<'a, S>(&self, names: &'a [S], palette: &[Color32]) -> Vec<Slice<'a>>
    where
        S: AsRef<str>,
    {
        let span = slice_span(names.len());
        names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let start = index as f32 * span;
                let color = match palette.len() {
                    0 => PLACEHOLDER_FILL,
                    len => palette[index % len],
                };

                let mut slice = Slice {
                    index,
                    name: name.as_ref(),
                    start,
                    end: start + span,
                    color,
                    full_circle: names.len() == 1,
                    label_anchor: self.center,
                    label_rotation: 0.0,
                };
                let mid = slice.mid();
                slice.label_anchor = self.point_at(self.radius * self.label_ratio, mid);
                slice.label_rotation = mid + 90.0 + self.rotation;
                slice
            })
            .collect()
    }
}

/// A derived wedge of the wheel. Angles are in the wheel's own frame, before
/// the wheel's rotation is applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice<'a> {
    pub index: usize,
    pub name: &'a str,
    pub start: f32,
    pub end: f32,
    pub color: Color32,
    pub full_circle: bool,
    /// Center of the label, already rotated with the wheel.
    pub label_anchor: Pos2,
    /// Clockwise label rotation in degrees, already including the wheel's.
    pub label_rotation: f32,
}

impl<'a> Slice<'a> {
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    pub fn mid(&self) -> f32 {
        self.start + self.span() / 2.0
    }

    pub fn arc_path(&self, geometry: &WheelGeometry) -> String {
        arc_path(geometry.center, geometry.radius, self.start, self.end)
    }

    /// The wedge as a triangle fan: the center followed by points along the
    /// arc, at most `step` degrees apart. A lone name yields just the rim.
    pub fn outline(&self, geometry: &WheelGeometry, step: f32) -> Vec<Pos2> {
        let steps = (self.span() / step.max(0.1)).ceil().max(1.0) as usize;
        let arc = (0..=steps).map(|i| {
            let angle = self.start + self.span() * i as f32 / steps as f32;
            geometry.point_at(geometry.radius, angle)
        });

        if self.full_circle {
            // the first and last rim points coincide
            return arc.take(steps).collect();
        }

        std::iter::once(geometry.center).chain(arc).collect()
    }
}
