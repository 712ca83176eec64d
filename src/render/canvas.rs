//! Software raster canvas.
//!
//! Shapes are sampled at pixel centers without anti-aliasing, so every pixel is either
//! covered by a primitive or untouched. Colours are premultiplied [`Color32`] values and
//! composite with source-over.

use eframe::egui::{pos2, Color32, ColorImage, Pos2, Rect};

use super::palette::{Palette, RadialGradient};

/// Premultiplied RGBA pixel storage, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
}

impl PixelBuffer {
    /// Creates a fully transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color32::TRANSPARENT; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Reallocates to the new size; the content becomes transparent.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Color32::TRANSPARENT);
    }

    /// Copy suitable for uploading as an egui texture.
    pub fn to_color_image(&self) -> ColorImage {
        let rgba: Vec<u8> = self.pixels.iter().flat_map(|c| c.to_array()).collect();
        ColorImage::from_rgba_premultiplied([self.width, self.height], &rgba)
    }
}

/// Source-over compositing of premultiplied colours.
pub fn blend_over(dst: Color32, src: Color32) -> Color32 {
    let src_alpha = src.a() as u32;
    if src_alpha == 255 {
        return src;
    }
    let inverse = 255 - src_alpha;
    let channel = |s: u8, d: u8| (s as u32 + (d as u32 * inverse + 127) / 255).min(255) as u8;
    Color32::from_rgba_premultiplied(
        channel(src.r(), dst.r()),
        channel(src.g(), dst.g()),
        channel(src.b(), dst.b()),
        channel(src.a(), dst.a()),
    )
}

/// Whether `point` lies inside `rect` with corners rounded by `corner`.
///
/// The corner radius is clamped to the half extents. A rect with negative extents contains nothing.
pub fn round_rect_contains(rect: Rect, corner: f32, point: Pos2) -> bool {
    let half_w = rect.width() * 0.5;
    let half_h = rect.height() * 0.5;
    if !(half_w >= 0.0 && half_h >= 0.0) {
        return false;
    }
    let center = rect.center();
    let dx = (point.x - center.x).abs();
    let dy = (point.y - center.y).abs();
    if dx > half_w || dy > half_h {
        return false;
    }
    let radius = corner.min(half_w).min(half_h).max(0.0);
    let qx = dx - (half_w - radius);
    let qy = dy - (half_h - radius);
    qx <= 0.0 || qy <= 0.0 || qx * qx + qy * qy <= radius * radius
}

/// Drawing primitives over a borrowed [`PixelBuffer`].
pub struct Canvas<'a> {
    buffer: &'a mut PixelBuffer,
}

impl<'a> Canvas<'a> {
    pub fn new(buffer: &'a mut PixelBuffer) -> Self {
        Self { buffer }
    }

    pub fn width(&self) -> usize {
        self.buffer.width
    }

    pub fn height(&self) -> usize {
        self.buffer.height
    }

    /// Overwrites every pixel, ignoring what was there.
    pub fn clear(&mut self, color: Color32) {
        self.buffer.pixels.fill(color);
    }

    pub fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        if !(radius > 0.0) {
            return;
        }
        let radius_sq = radius * radius;
        self.shade(Rect::from_center_size(center, [radius * 2.0; 2].into()), |p| {
            (p.distance_sq(center) <= radius_sq).then_some(color)
        });
    }

    /// Ring of `width` centered on the circle of `radius`.
    pub fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32) {
        let half = width * 0.5;
        if !(half > 0.0) || !(radius + half > 0.0) {
            return;
        }
        let outer = radius + half;
        self.shade(Rect::from_center_size(center, [outer * 2.0; 2].into()), |p| {
            ((p.distance(center) - radius).abs() <= half).then_some(color)
        });
    }

    /// Disc whose colour follows `gradient` from the center (t = 0) to the rim (t = 1).
    pub fn fill_radial(&mut self, center: Pos2, radius: f32, gradient: &RadialGradient) {
        if !(radius > 0.0) {
            return;
        }
        self.shade(Rect::from_center_size(center, [radius * 2.0; 2].into()), |p| {
            let d = p.distance(center);
            (d <= radius).then(|| gradient.sample(d / radius))
        });
    }

    /// Concentric rings shrinking by `step` from `outer_radius` inward.
    ///
    /// A pixel at distance `d` takes `palette[floor((outer_radius - d) / step)]`, saturating at
    /// the last entry, which is the colour of the innermost ring that still covers it.
    pub fn fill_rings(&mut self, center: Pos2, outer_radius: f32, step: f32, palette: &Palette) {
        if !(outer_radius > 0.0) || palette.is_empty() {
            return;
        }
        self.shade(
            Rect::from_center_size(center, [outer_radius * 2.0; 2].into()),
            |p| {
                let d = p.distance(center);
                if d > outer_radius {
                    return None;
                }
                let step_index = if step > 0.0 {
                    ((outer_radius - d) / step).floor() as usize
                } else {
                    0
                };
                palette.get(step_index)
            },
        );
    }

    /// Rounded rect whose fill darkens or brightens with horizontal inset depth.
    ///
    /// Step `k` is `outer` shrunk by `k * inset_step` on the left and right edges. A pixel takes
    /// `palette[k]` for the deepest step that still contains it.
    pub fn fill_inset_round_rect(
        &mut self,
        outer: Rect,
        corner: f32,
        inset_step: f32,
        palette: &Palette,
    ) {
        let Some(last) = palette.len().checked_sub(1) else {
            return;
        };
        let inset = |k: usize| {
            let shift = k as f32 * inset_step;
            Rect::from_min_max(
                pos2(outer.min.x + shift, outer.min.y),
                pos2(outer.max.x - shift, outer.max.y),
            )
        };
        self.shade(outer, |p| {
            if !round_rect_contains(outer, corner, p) {
                return None;
            }
            // Containment only shrinks with depth, so bisect for the deepest step.
            let (mut lo, mut hi) = (0, last);
            while lo < hi {
                let mid = (lo + hi + 1) / 2;
                if round_rect_contains(inset(mid), corner, p) {
                    lo = mid;
                } else {
                    hi = mid - 1;
                }
            }
            palette.get(lo)
        });
    }

    /// Composites `shader(pixel_center)` over every pixel whose center falls in `bounds`.
    fn shade(&mut self, bounds: Rect, mut shader: impl FnMut(Pos2) -> Option<Color32>) {
        let (min, max) = (bounds.min, bounds.max);
        let x0 = min.x.floor().max(0.0) as usize;
        let y0 = min.y.floor().max(0.0) as usize;
        let x1 = (max.x.ceil().max(0.0) as usize).min(self.buffer.width);
        let y1 = (max.y.ceil().max(0.0) as usize).min(self.buffer.height);
        let width = self.buffer.width;
        for y in y0..y1 {
            for x in x0..x1 {
                let center = pos2(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(src) = shader(center) {
                    let dst = &mut self.buffer.pixels[y * width + x];
                    *dst = blend_over(*dst, src);
                }
            }
        }
    }
}
