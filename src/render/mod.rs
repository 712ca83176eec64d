//! Rendering subsystem for the joystick widget
//!
//! ```text
//! ControlStick ──► LockedFrame ──► Canvas ──► ShadedRenderer (base → stem → hat)
//!                  (Surface)      (PixelBuffer)
//! ```
//!
//! 1. [`surface`] - Drawable surfaces and scoped acquire/post/discard
//! 2. [`canvas`] - Pixel buffer and raster primitives
//! 3. [`palette`] - Colour ramps for the shading layers
//! 4. [`shaded`] - The layered joystick renderer

pub mod canvas;
pub mod palette;
pub mod shaded;
pub mod surface;

pub use canvas::{Canvas, PixelBuffer};
pub use shaded::ShadedRenderer;
pub use surface::{LockedFrame, RasterSurface, Surface, SurfaceError};
