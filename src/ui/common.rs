//! # UI Common Components
//!
//! Shared colours and frame styling for the joystick host.

use eframe::egui::{Color32, Frame, Stroke};

/// Creates a styled frame with consistent visual parameters.
pub fn create_frame(bg_color: Color32, border_color: Color32) -> Frame {
    Frame::new()
        .stroke(Stroke::new(1.0, border_color))
        .fill(bg_color)
        .inner_margin(4)
        .outer_margin(2)
}

/// Dark theme palette.
pub struct UiColors;

impl UiColors {
    /// Background behind the joystick surfaces (RGB: 25, 25, 25)
    pub const INNER_BG: Color32 = Color32::from_rgb(25, 25, 25);

    /// Border color for component separation (RGB: 60, 60, 60)
    pub const BORDER: Color32 = Color32::from_rgb(60, 60, 60);

    /// Stick is being dragged (RGB: 50, 200, 20) - Green
    pub const ACTIVE: Color32 = Color32::from_rgb(50, 200, 20);

    /// Stick is at rest (RGB: 160, 160, 160)
    pub const IDLE: Color32 = Color32::from_rgb(160, 160, 160);
}
