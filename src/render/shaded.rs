//! Pseudo-3-D joystick renderer.
//!
//! Each frame is drawn in three layers on a transparent canvas: the base housing, the static
//! stem, and the draggable hat. Shading that would classically come from overdrawing dozens of
//! nested shapes is expressed as single-pass ramp fills, so each pixel is written once per layer
//! while keeping the same colour bands.

use std::ops::RangeInclusive;

use eframe::egui::{pos2, Color32, Rect};

use super::canvas::Canvas;
use super::palette::{Palette, RadialGradient};
use crate::joystick::geometry::{HatRenderParams, WidgetGeometry};

/// Inset steps of the base housing.
pub const BASE_STEPS: usize = 100;
/// Base steps with the single-slope blue ramp; deeper steps use the double slope.
pub const BASE_SHALLOW_STEPS: usize = 50;
pub const BASE_CORNER_RADIUS: f32 = 50.0;

pub const STEM_OUTLINE_WIDTH: f32 = 15.0;
pub const STEM_LAYER_ALPHA: u8 = 50;
pub const STEM_LAYERS: RangeInclusive<u32> = 2..=100;

/// Rim radius relative to the hat radius.
pub const HAT_RIM_SCALE: f32 = 1.2;
/// Radius lost per highlight ring.
pub const HAT_RING_STEP: f32 = 2.0 / 3.0;

/// Blue channel of base step `step` (1-based).
pub fn base_blue(step: usize) -> u8 {
    let blue = if step <= BASE_SHALLOW_STEPS {
        step
    } else {
        2 * step
    };
    blue.min(255) as u8
}

/// Base ramp, outermost step first.
pub fn base_palette() -> Palette {
    Palette::from_fn(BASE_STEPS, |k| Color32::from_rgb(0, 0, base_blue(k + 1)))
}

/// Colour left after compositing the translucent stem layers in `layers` over opaque white.
pub fn stem_composite(layers: RangeInclusive<u32>) -> Color32 {
    let alpha = STEM_LAYER_ALPHA as f32 / 255.0;
    let mut rgb = [255.0_f32; 3];
    for layer in layers {
        let src = [layer as f32, layer as f32, (2 * layer) as f32];
        for (dst, src) in rgb.iter_mut().zip(src) {
            *dst = src * alpha + *dst * (1.0 - alpha);
        }
    }
    let [r, g, b] = rgb.map(|c| c.round().clamp(0.0, 255.0) as u8);
    Color32::from_rgb(r, g, b)
}

/// Stem highlight: fully layered at the center, a single layer at the rim.
pub fn stem_gradient() -> RadialGradient {
    let first = *STEM_LAYERS.start();
    RadialGradient::new(stem_composite(STEM_LAYERS), stem_composite(first..=first))
}

/// Four-band hat highlight, indexed by ring (0 = outermost).
pub fn hat_palette(hat_radius: f32) -> Palette {
    let hat_radius = hat_radius.max(0.0);
    let tenth = (hat_radius / 10.0) as usize;
    let half = (hat_radius / 2.0) as usize;
    let two_thirds = (hat_radius * 2.0 / 3.0) as usize;
    Palette::from_fn(hat_radius as usize + 1, |ring| {
        if ring <= tenth {
            Color32::from_rgb(0, 0, 52)
        } else if ring <= half {
            Color32::from_rgb(0, 0, (52 + 2 * ring).min(255) as u8)
        } else if ring < two_thirds {
            Color32::BLACK
        } else {
            Color32::from_rgb(0, 0, 255)
        }
    })
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ShadedRenderer;

impl ShadedRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Clears the canvas and draws base, stem and hat in that order.
    pub fn draw_frame(
        &self,
        canvas: &mut Canvas<'_>,
        geometry: &WidgetGeometry,
        hat: &HatRenderParams,
    ) {
        canvas.clear(Color32::TRANSPARENT);
        self.draw_base(canvas, geometry);
        self.draw_stem(canvas, geometry);
        self.draw_hat(canvas, geometry, hat);
    }

    pub fn draw_base(&self, canvas: &mut Canvas<'_>, geometry: &WidgetGeometry) {
        let extent = geometry.min_extent();
        let half_width = extent / 6.0;
        let half_height = extent * 4.0 / 10.0;
        // Steps span the housing's half width; the innermost keeps a two-pixel core.
        let inset_step = (half_width - 2.0).max(0.0) / (BASE_STEPS - 1) as f32;
        let outer = Rect::from_min_max(
            pos2(
                geometry.center_x - half_width + 1.0,
                geometry.center_y - half_height,
            ),
            pos2(
                geometry.center_x + half_width - 1.0,
                geometry.center_y + half_height,
            ),
        );
        canvas.fill_inset_round_rect(outer, BASE_CORNER_RADIUS, inset_step, &base_palette());
    }

    pub fn draw_stem(&self, canvas: &mut Canvas<'_>, geometry: &WidgetGeometry) {
        let extent = geometry.min_extent();
        canvas.stroke_circle(
            geometry.center(),
            extent * 4.0 / 9.0,
            STEM_OUTLINE_WIDTH,
            Color32::WHITE,
        );
        canvas.fill_radial(geometry.center(), extent / 4.0, &stem_gradient());
    }

    pub fn draw_hat(
        &self,
        canvas: &mut Canvas<'_>,
        geometry: &WidgetGeometry,
        hat: &HatRenderParams,
    ) {
        let base_radius = geometry.base_radius;
        let ratio = hat.shading_ratio;

        // Shadow trail from the hat back toward the center, fading and widening.
        if base_radius > 0.0 && ratio > 0.0 {
            let circles = (base_radius / ratio).floor() as u32;
            let offset_step = hat.distance_from_center * ratio / base_radius;
            let radius_step = geometry.hat_radius * ratio / base_radius;
            for i in 1..=circles {
                let shadow = Color32::from_rgba_unmultiplied(0, 0, 0, (255 / i) as u8);
                let step = offset_step * i as f32;
                let center = pos2(
                    hat.target_x - hat.cos_angle * step,
                    hat.target_y - hat.sin_angle * step,
                );
                canvas.fill_circle(center, radius_step * i as f32, shadow);
            }
        }

        canvas.fill_circle(
            hat.target(),
            geometry.hat_radius * HAT_RIM_SCALE,
            Color32::BLACK,
        );
        canvas.fill_rings(
            hat.target(),
            geometry.hat_radius,
            HAT_RING_STEP,
            &hat_palette(geometry.hat_radius),
        );
    }
}
