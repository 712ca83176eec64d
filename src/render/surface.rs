//! Drawable surfaces and scoped frame acquisition.
//!
//! A draw call acquires a [`LockedFrame`] from a [`Surface`], paints into its back buffer and
//! posts it. Dropping the guard without posting discards the frame, so every successful
//! acquisition ends in exactly one post or one discard. A failed acquisition touches nothing.

use thiserror::Error;
use tracing::{debug, trace};

use super::canvas::{Canvas, PixelBuffer};

/// Reasons a surface cannot hand out a frame.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface was never created or has been destroyed.
    #[error("surface is not valid")]
    Invalid,

    /// The surface exists but has no pixels to draw on.
    #[error("surface has zero size")]
    ZeroSized,
}

/// A host-owned drawing target.
pub trait Surface {
    /// Whether a frame could be acquired right now.
    fn is_valid(&self) -> bool;

    /// Sets the pixel size and marks the surface usable.
    fn resize(&mut self, width: usize, height: usize);

    /// Marks the surface unusable until the next [`Surface::resize`].
    fn invalidate(&mut self);

    /// Begins a frame. On success the back buffer may be drawn into.
    fn begin_frame(&mut self) -> Result<(), SurfaceError>;

    fn back_buffer(&mut self) -> &mut PixelBuffer;

    /// Publishes the back buffer as the visible frame.
    fn post_frame(&mut self);

    /// Ends the frame without publishing it.
    fn discard_frame(&mut self);
}

/// Scoped frame: posts on [`LockedFrame::post`], discards on drop otherwise.
pub struct LockedFrame<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    posted: bool,
}

impl<'a, S: Surface + ?Sized> LockedFrame<'a, S> {
    pub fn acquire(surface: &'a mut S) -> Result<Self, SurfaceError> {
        surface.begin_frame()?;
        Ok(Self {
            surface,
            posted: false,
        })
    }

    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(self.surface.back_buffer())
    }

    pub fn post(mut self) {
        self.surface.post_frame();
        self.posted = true;
    }
}

impl<S: Surface + ?Sized> Drop for LockedFrame<'_, S> {
    fn drop(&mut self) {
        if !self.posted {
            self.surface.discard_frame();
        }
    }
}

/// Double-buffered in-memory surface.
///
/// Drawing goes to the back buffer; posting swaps it to the front, where the host reads it.
#[derive(Debug)]
pub struct RasterSurface {
    front: PixelBuffer,
    back: PixelBuffer,
    valid: bool,
    in_frame: bool,
    frames_posted: u64,
    frames_discarded: u64,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterSurface {
    /// A surface that is not valid until it is first resized.
    pub fn new() -> Self {
        Self {
            front: PixelBuffer::new(0, 0),
            back: PixelBuffer::new(0, 0),
            valid: false,
            in_frame: false,
            frames_posted: 0,
            frames_discarded: 0,
        }
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        let mut surface = Self::new();
        surface.resize(width, height);
        surface
    }

    /// The most recently posted frame.
    pub fn front(&self) -> &PixelBuffer {
        &self.front
    }

    /// Number of posted frames; changes whenever [`RasterSurface::front`] does.
    pub fn frames_posted(&self) -> u64 {
        self.frames_posted
    }

    pub fn frames_discarded(&self) -> u64 {
        self.frames_discarded
    }

    pub fn size(&self) -> [usize; 2] {
        [self.back.width(), self.back.height()]
    }
}

impl Surface for RasterSurface {
    fn is_valid(&self) -> bool {
        self.valid && !self.back.is_empty()
    }

    fn resize(&mut self, width: usize, height: usize) {
        debug!("Resizing raster surface to {}x{}", width, height);
        self.front.resize(width, height);
        self.back.resize(width, height);
        self.valid = true;
    }

    fn invalidate(&mut self) {
        debug!("Raster surface invalidated");
        self.valid = false;
    }

    fn begin_frame(&mut self) -> Result<(), SurfaceError> {
        if !self.valid {
            return Err(SurfaceError::Invalid);
        }
        if self.back.is_empty() {
            return Err(SurfaceError::ZeroSized);
        }
        self.in_frame = true;
        Ok(())
    }

    fn back_buffer(&mut self) -> &mut PixelBuffer {
        &mut self.back
    }

    fn post_frame(&mut self) {
        if !self.in_frame {
            return;
        }
        std::mem::swap(&mut self.front, &mut self.back);
        self.in_frame = false;
        self.frames_posted += 1;
        trace!("Posted frame {}", self.frames_posted);
    }

    fn discard_frame(&mut self) {
        if !self.in_frame {
            return;
        }
        self.in_frame = false;
        self.frames_discarded += 1;
        trace!("Discarded frame, {} so far", self.frames_discarded);
    }
}
