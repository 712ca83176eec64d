//! Colour ramps used by the shaded renderer.
//!
//! A [`Palette`] is a lookup table indexed by a discrete step (ring index or inset depth).
//! A [`RadialGradient`] interpolates between two colours over a normalized radius.

use eframe::egui::Color32;

/// Lookup table of colours indexed by step.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color32>,
}

impl Palette {
    /// Builds a palette with `len` entries, `f(step)` producing each one.
    pub fn from_fn(len: usize, f: impl Fn(usize) -> Color32) -> Self {
        Self {
            colors: (0..len).map(f).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour at `step`, saturating at the last entry.
    pub fn get(&self, step: usize) -> Option<Color32> {
        let last = self.colors.len().checked_sub(1)?;
        self.colors.get(step.min(last)).copied()
    }
}

/// Two-stop gradient over a normalized radius `t` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub inner: Color32,
    pub outer: Color32,
}

impl RadialGradient {
    pub fn new(inner: Color32, outer: Color32) -> Self {
        Self { inner, outer }
    }

    /// Colour at normalized radius `t`; `t` is clamped to `[0, 1]`.
    pub fn sample(&self, t: f32) -> Color32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let lerp = |a: u8, b: u8| -> u8 {
            (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
        };
        let [ir, ig, ib, ia] = self.inner.to_array();
        let [or, og, ob, oa] = self.outer.to_array();
        Color32::from_rgba_premultiplied(
            lerp(ir, or),
            lerp(ig, og),
            lerp(ib, ob),
            lerp(ia, oa),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_saturates_at_last_entry() {
        let palette = Palette::from_fn(3, |i| Color32::from_rgb(0, 0, i as u8 * 10));
        assert_eq!(palette.get(0), Some(Color32::from_rgb(0, 0, 0)));
        assert_eq!(palette.get(2), Some(Color32::from_rgb(0, 0, 20)));
        assert_eq!(palette.get(99), Some(Color32::from_rgb(0, 0, 20)));
    }

    #[test]
    fn empty_palette_yields_nothing() {
        let palette = Palette::from_fn(0, |_| Color32::WHITE);
        assert!(palette.is_empty());
        assert_eq!(palette.get(0), None);
    }

    #[test]
    fn gradient_hits_both_endpoints() {
        let gradient = RadialGradient::new(Color32::from_rgb(0, 0, 200), Color32::from_rgb(200, 200, 200));
        assert_eq!(gradient.sample(0.0), Color32::from_rgb(0, 0, 200));
        assert_eq!(gradient.sample(1.0), Color32::from_rgb(200, 200, 200));
        assert_eq!(gradient.sample(0.5), Color32::from_rgb(100, 100, 200));
        assert_eq!(gradient.sample(7.0), Color32::from_rgb(200, 200, 200));
        assert_eq!(gradient.sample(f32::NAN), Color32::from_rgb(0, 0, 200));
    }
}
