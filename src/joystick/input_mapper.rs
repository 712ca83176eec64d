//! Pointer sample → hat position and normalized displacement.
//!
//! The travel limit is a third of the widget's smaller side. Inside the limit the hat follows
//! the pointer; beyond it the pointer offset is scaled back onto the limit. How "beyond" is
//! measured is a [`DistanceMetric`]; the default measures only the vertical offset, which gives
//! the stick a wider horizontal range.

use serde::{Deserialize, Serialize};

use super::geometry::{DisplacementVector, HatPosition, WidgetGeometry};

/// How the pointer's distance from center is measured against the travel limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// `|dy|` only.
    #[default]
    VerticalOnly,
    /// `sqrt(dx² + dy²)`.
    Euclidean,
}

/// Which axes the drawn hat follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HatTravel {
    /// The hat is drawn at the (clamped) pointer position.
    #[default]
    Free,
    /// The hat stays on the vertical center line; the reported x is unaffected.
    Vertical,
}

/// Per-stick mapping policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperSettings {
    pub distance_metric: DistanceMetric,
    pub hat_travel: HatTravel,
    /// Clamp each reported axis to `[-1, 1]`.
    pub clamp_output: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One pointer event in widget-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
}

impl PointerSample {
    pub fn down(x: f32, y: f32) -> Self {
        Self { x, y, phase: PointerPhase::Down }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self { x, y, phase: PointerPhase::Move }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self { x, y, phase: PointerPhase::Up }
    }

    pub fn is_release(&self) -> bool {
        self.phase == PointerPhase::Up
    }
}

/// Result of mapping one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MappedInput {
    pub hat: HatPosition,
    pub displacement: DisplacementVector,
}

impl MappedInput {
    /// Hat on center, no deflection.
    pub fn released(geometry: &WidgetGeometry) -> Self {
        Self {
            hat: HatPosition::centered(geometry),
            displacement: DisplacementVector::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputMapper {
    settings: MapperSettings,
}

impl InputMapper {
    pub fn new(settings: MapperSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> MapperSettings {
        self.settings
    }

    pub fn map(&self, geometry: &WidgetGeometry, sample: PointerSample) -> MappedInput {
        if sample.is_release() {
            return MappedInput::released(geometry);
        }

        let limit = geometry.travel_limit();
        // Zero-sized widget: nothing to deflect against.
        if !(limit > 0.0) || !sample.x.is_finite() || !sample.y.is_finite() {
            return MappedInput::released(geometry);
        }

        let x = sample.x.clamp(0.0, geometry.width);
        let y = sample.y.clamp(0.0, geometry.height);
        let dx = x - geometry.center_x;
        let dy = y - geometry.center_y;
        let distance = match self.settings.distance_metric {
            DistanceMetric::VerticalOnly => (dy * dy).sqrt(),
            DistanceMetric::Euclidean => dx.hypot(dy),
        };

        let (effective_dx, effective_dy) = if distance < limit {
            (dx, dy)
        } else {
            let ratio = limit / distance;
            (dx * ratio, dy * ratio)
        };

        let hat = match self.settings.hat_travel {
            HatTravel::Free => HatPosition::new(
                geometry.center_x + effective_dx,
                geometry.center_y + effective_dy,
            ),
            HatTravel::Vertical => {
                HatPosition::new(geometry.center_x, geometry.center_y + effective_dy)
            }
        };

        let mut displacement = DisplacementVector::new(effective_dx / limit, effective_dy / limit);
        if self.settings.clamp_output {
            displacement.x = displacement.x.clamp(-1.0, 1.0);
            displacement.y = displacement.y.clamp(-1.0, 1.0);
        }

        MappedInput { hat, displacement }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> WidgetGeometry {
        WidgetGeometry::from_size(300.0, 300.0)
    }

    fn mapper(distance_metric: DistanceMetric, hat_travel: HatTravel) -> InputMapper {
        InputMapper::new(MapperSettings {
            distance_metric,
            hat_travel,
            clamp_output: false,
        })
    }

    #[test]
    fn inside_the_limit_the_hat_follows_the_pointer() {
        let geometry = square();
        let mapped = InputMapper::default().map(&geometry, PointerSample::moved(150.0, 200.0));
        assert_eq!(mapped.displacement, DisplacementVector::new(0.0, 0.5));
        assert_eq!(mapped.hat, HatPosition::new(150.0, 200.0));
    }

    #[test]
    fn direct_branch_reports_exact_ratios() {
        let geometry = square();
        let limit = geometry.travel_limit();
        let mapper = InputMapper::default();
        for &(px, py) in &[(10.0, 60.0), (299.0, 249.0), (150.0, 150.0), (37.5, 101.25), (260.0, 51.0)] {
            let mapped = mapper.map(&geometry, PointerSample::moved(px, py));
            assert_eq!(mapped.displacement.x, (px - geometry.center_x) / limit);
            assert_eq!(mapped.displacement.y, (py - geometry.center_y) / limit);
            assert_eq!(mapped.hat, HatPosition::new(px, py));
        }
    }

    #[test]
    fn exactly_on_the_limit_takes_the_clamp_branch() {
        let geometry = square();
        let mapped = InputMapper::default().map(&geometry, PointerSample::moved(150.0, 250.0));
        assert_eq!(mapped.displacement, DisplacementVector::new(0.0, 1.0));
        assert_eq!(mapped.hat, HatPosition::new(150.0, 250.0));
    }

    #[test]
    fn beyond_the_limit_scales_onto_the_vertical_limit() {
        let geometry = square();
        let mapped = InputMapper::default().map(&geometry, PointerSample::moved(50.0, 0.0));
        // dy = -150, ratio = 2/3
        assert!((mapped.displacement.y + 1.0).abs() < 1e-6);
        assert!((mapped.displacement.x + 2.0 / 3.0).abs() < 1e-6);
        assert!((mapped.hat.y - 50.0).abs() < 1e-4);
        assert!((mapped.hat.x - (150.0 - 200.0 / 3.0)).abs() < 1e-4);
    }

    #[test]
    fn vertical_metric_ignores_horizontal_overshoot() {
        let geometry = WidgetGeometry::from_size(600.0, 300.0);
        let mapped = InputMapper::default().map(&geometry, PointerSample::moved(550.0, 150.0));
        assert_eq!(mapped.displacement, DisplacementVector::new(2.5, 0.0));
    }

    #[test]
    fn euclidean_metric_clamps_onto_the_circle() {
        let geometry = WidgetGeometry::from_size(600.0, 600.0);
        let mapped = mapper(DistanceMetric::Euclidean, HatTravel::Free)
            .map(&geometry, PointerSample::moved(300.0 + 180.0, 300.0 + 240.0));
        assert!((mapped.displacement.x - 0.6).abs() < 1e-6);
        assert!((mapped.displacement.y - 0.8).abs() < 1e-6);
        let reach = (mapped.hat.x - 300.0).hypot(mapped.hat.y - 300.0);
        assert!((reach - geometry.travel_limit()).abs() < 1e-3);
    }

    #[test]
    fn euclidean_metric_keeps_small_offsets_direct() {
        let geometry = square();
        let mapped = mapper(DistanceMetric::Euclidean, HatTravel::Free)
            .map(&geometry, PointerSample::moved(210.0, 80.0));
        assert_eq!(mapped.displacement, DisplacementVector::new(0.6, -0.7));
    }

    #[test]
    fn vertical_travel_pins_the_hat_to_the_center_line() {
        let geometry = square();
        let mapped = mapper(DistanceMetric::VerticalOnly, HatTravel::Vertical)
            .map(&geometry, PointerSample::moved(200.0, 100.0));
        assert_eq!(mapped.hat, HatPosition::new(150.0, 100.0));
        assert_eq!(mapped.displacement, DisplacementVector::new(0.5, -0.5));
    }

    #[test]
    fn clamp_output_bounds_each_axis() {
        let geometry = WidgetGeometry::from_size(600.0, 300.0);
        let mapper = InputMapper::new(MapperSettings {
            clamp_output: true,
            ..MapperSettings::default()
        });
        let mapped = mapper.map(&geometry, PointerSample::moved(0.0, 180.0));
        assert_eq!(mapped.displacement, DisplacementVector::new(-1.0, 0.3));
    }

    #[test]
    fn pointer_outside_the_widget_is_held_at_its_edge() {
        let geometry = square();
        let mapper = InputMapper::default();

        let right = mapper.map(&geometry, PointerSample::moved(900.0, 150.0));
        assert_eq!(right.hat, HatPosition::new(300.0, 150.0));
        assert_eq!(right.displacement, DisplacementVector::new(1.5, 0.0));

        let corner = mapper.map(&geometry, PointerSample::moved(-500.0, -500.0));
        assert_eq!(corner.hat, HatPosition::new(50.0, 50.0));
        assert_eq!(corner.displacement, DisplacementVector::new(-1.0, -1.0));

        for &(px, py) in &[(900.0, 150.0), (-40.0, 400.0), (150.0, 1e6), (1e6, -1e6)] {
            let mapped = mapper.map(&geometry, PointerSample::moved(px, py));
            assert!((0.0..=300.0).contains(&mapped.hat.x));
            assert!((0.0..=300.0).contains(&mapped.hat.y));
            assert!(mapped.displacement.x.abs() <= 1.5);
            assert!(mapped.displacement.y.abs() <= 1.0);
        }
    }

    #[test]
    fn release_always_recenters() {
        let geometry = square();
        let mapper = InputMapper::default();
        let first = mapper.map(&geometry, PointerSample::up(10.0, 290.0));
        let second = mapper.map(&geometry, PointerSample::up(10.0, 290.0));
        assert_eq!(first, MappedInput::released(&geometry));
        assert_eq!(first, second);
        assert_eq!(first.hat, HatPosition::new(150.0, 150.0));
        assert_eq!(first.displacement, DisplacementVector::ZERO);
    }

    #[test]
    fn zero_sized_widget_reports_no_deflection() {
        let geometry = WidgetGeometry::from_size(0.0, 0.0);
        let mapped = InputMapper::default().map(&geometry, PointerSample::down(0.0, 0.0));
        assert_eq!(mapped.displacement, DisplacementVector::ZERO);
        assert!(!mapped.hat.x.is_nan());
    }

    #[test]
    fn settings_parse_from_snake_case() {
        let settings: MapperSettings =
            toml::from_str("distance_metric = \"euclidean\"\nhat_travel = \"vertical\"").unwrap();
        assert_eq!(settings.distance_metric, DistanceMetric::Euclidean);
        assert_eq!(settings.hat_travel, HatTravel::Vertical);
        assert!(!settings.clamp_output);
    }
}
