//! On-screen joystick widget
//!
//! Turns pointer samples into a normalized two-axis control signal and redraws the shaded
//! joystick for every sample:
//!
//! ```text
//! PointerSample ──► InputMapper ──► ControlStick ──► ShadedRenderer ──► Surface
//!                                        │
//!                                        └──► JoystickListener (x, y, stick id)
//! ```
//!
//! 1. [`geometry`] - Size-derived layout and value types
//! 2. [`input_mapper`] - Touch → hat position and displacement
//! 3. [`widget`] - The widget instance owning geometry, hat, surface and listener

pub mod geometry;
pub mod input_mapper;
pub mod widget;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use geometry::{DisplacementVector, HatPosition, HatRenderParams, WidgetGeometry};
pub use input_mapper::{
    DistanceMetric, HatTravel, InputMapper, MappedInput, MapperSettings, PointerPhase,
    PointerSample,
};
pub use widget::ControlStick;

/// Distinguishes joystick widgets that report to the same consumer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StickId(pub i32);

impl fmt::Display for StickId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "stick#{}", self.0)
    }
}

/// Receives one displacement per processed pointer event.
///
/// `y_percent` is always in `[-1, 1]`. So is `x_percent` under the Euclidean metric or with
/// `clamp_output` set. Under the default vertical-only metric `|x_percent|` is bounded by half
/// the widget width over the travel limit: 1.5 on a square widget, more on a wide one.
pub trait JoystickListener {
    fn on_joystick_moved(&mut self, x_percent: f32, y_percent: f32, stick: StickId);
}

impl<F> JoystickListener for F
where
    F: FnMut(f32, f32, StickId),
{
    fn on_joystick_moved(&mut self, x_percent: f32, y_percent: f32, stick: StickId) {
        self(x_percent, y_percent, stick)
    }
}
