//! Widget geometry and the small value types passed between mapper and renderer.

use eframe::egui::{pos2, Pos2};

/// Size-derived layout of one joystick widget.
///
/// Recomputed from the surface size on every create/resize and otherwise left alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WidgetGeometry {
    pub width: f32,
    pub height: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub base_radius: f32,
    pub hat_radius: f32,
}

impl WidgetGeometry {
    pub fn from_size(width: f32, height: f32) -> Self {
        let width = sanitize(width);
        let height = sanitize(height);
        let extent = width.min(height);
        Self {
            width,
            height,
            center_x: width / 2.0,
            center_y: height / 2.0,
            base_radius: extent * 4.0 / 11.0,
            hat_radius: extent / 4.0,
        }
    }

    /// The smaller of width and height; every radius scales with it.
    pub fn min_extent(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Offset from center that maps to a full-scale displacement of 1.
    pub fn travel_limit(&self) -> f32 {
        self.min_extent() / 3.0
    }

    pub fn center(&self) -> Pos2 {
        pos2(self.center_x, self.center_y)
    }
}

fn sanitize(extent: f32) -> f32 {
    if extent.is_finite() {
        extent.max(0.0)
    } else {
        0.0
    }
}

/// Where the hat is currently drawn, in widget-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HatPosition {
    pub x: f32,
    pub y: f32,
}

impl HatPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn centered(geometry: &WidgetGeometry) -> Self {
        Self::new(geometry.center_x, geometry.center_y)
    }
}

impl From<HatPosition> for Pos2 {
    fn from(hat: HatPosition) -> Self {
        pos2(hat.x, hat.y)
    }
}

/// Normalized stick deflection reported to the listener.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplacementVector {
    pub x: f32,
    pub y: f32,
}

impl DisplacementVector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Per-draw inputs for the hat layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HatRenderParams {
    pub target_x: f32,
    pub target_y: f32,
    pub distance_from_center: f32,
    pub sin_angle: f32,
    pub cos_angle: f32,
    pub shading_ratio: f32,
}

impl HatRenderParams {
    /// Spacing, in pixels of base radius, between consecutive shadow-trail circles.
    pub const SHADING_RATIO: f32 = 5.0;

    /// Angle terms are zero when the hat sits exactly on the center.
    pub fn new(geometry: &WidgetGeometry, hat: HatPosition) -> Self {
        let dx = hat.x - geometry.center_x;
        let dy = hat.y - geometry.center_y;
        let distance = dx.hypot(dy);
        let (sin_angle, cos_angle) = if distance > 0.0 && distance.is_finite() {
            (dy / distance, dx / distance)
        } else {
            (0.0, 0.0)
        };
        Self {
            target_x: hat.x,
            target_y: hat.y,
            distance_from_center: if distance.is_finite() { distance } else { 0.0 },
            sin_angle,
            cos_angle,
            shading_ratio: Self::SHADING_RATIO,
        }
    }

    pub fn target(&self) -> Pos2 {
        pos2(self.target_x, self.target_y)
    }
}
