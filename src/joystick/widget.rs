//! The joystick widget instance.
//!
//! A [`ControlStick`] exclusively owns its geometry, hat position, surface and listener. Every
//! pointer sample is processed to completion before the next: map, redraw, then notify.

use tracing::{debug, info, trace};

use super::geometry::{DisplacementVector, HatPosition, HatRenderParams, WidgetGeometry};
use super::input_mapper::{InputMapper, MapperSettings, PointerSample};
use super::{JoystickListener, StickId};
use crate::render::{LockedFrame, RasterSurface, ShadedRenderer, Surface};

pub struct ControlStick<S: Surface = RasterSurface> {
    id: StickId,
    geometry: WidgetGeometry,
    hat: HatPosition,
    mapper: InputMapper,
    renderer: ShadedRenderer,
    surface: S,
    listener: Option<Box<dyn JoystickListener>>,
}

impl<S: Surface> ControlStick<S> {
    /// A stick with no geometry yet; nothing is drawn until [`ControlStick::surface_created`].
    pub fn new(id: StickId, settings: MapperSettings, surface: S) -> Self {
        Self {
            id,
            geometry: WidgetGeometry::default(),
            hat: HatPosition::default(),
            mapper: InputMapper::new(settings),
            renderer: ShadedRenderer::new(),
            surface,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl JoystickListener + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    pub fn set_listener(&mut self, listener: impl JoystickListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn id(&self) -> StickId {
        self.id
    }

    pub fn geometry(&self) -> &WidgetGeometry {
        &self.geometry
    }

    pub fn hat(&self) -> HatPosition {
        self.hat
    }

    pub fn settings(&self) -> MapperSettings {
        self.mapper.settings()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Lays the widget out for a fresh surface and draws it at rest.
    pub fn surface_created(&mut self, width: usize, height: usize) {
        info!("{} surface created at {}x{}", self.id, width, height);
        self.relayout(width, height);
    }

    /// Recomputes geometry for the new size and redraws at rest.
    pub fn surface_changed(&mut self, width: usize, height: usize) {
        debug!("{} surface changed to {}x{}", self.id, width, height);
        self.relayout(width, height);
    }

    /// Further draws are skipped until the surface is created again.
    pub fn surface_destroyed(&mut self) {
        info!("{} surface destroyed", self.id);
        self.surface.invalidate();
    }

    /// Processes one pointer sample and returns the displacement sent to the listener.
    pub fn on_touch(&mut self, sample: PointerSample) -> DisplacementVector {
        let mapped = self.mapper.map(&self.geometry, sample);
        self.hat = mapped.hat;
        let drawn = self.draw();

        let displacement = mapped.displacement;
        trace!(
            "{} {:?} at ({}, {}) -> ({}, {}), drawn: {}",
            self.id,
            sample.phase,
            sample.x,
            sample.y,
            displacement.x,
            displacement.y,
            drawn
        );
        if let Some(listener) = self.listener.as_mut() {
            listener.on_joystick_moved(displacement.x, displacement.y, self.id);
        }
        displacement
    }

    fn relayout(&mut self, width: usize, height: usize) {
        self.surface.resize(width, height);
        self.geometry = WidgetGeometry::from_size(width as f32, height as f32);
        self.hat = HatPosition::centered(&self.geometry);
        self.draw();
    }

    /// Draws the current hat position; returns whether a frame was posted.
    fn draw(&mut self) -> bool {
        let params = HatRenderParams::new(&self.geometry, self.hat);
        let mut frame = match LockedFrame::acquire(&mut self.surface) {
            Ok(frame) => frame,
            Err(e) => {
                debug!("{} skipping frame: {}", self.id, e);
                return false;
            }
        };
        self.renderer
            .draw_frame(&mut frame.canvas(), &self.geometry, &params);
        frame.post();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joystick::input_mapper::{DistanceMetric, HatTravel};
    use crate::render::PixelBuffer;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Reports = Rc<RefCell<Vec<(f32, f32, StickId)>>>;

    fn stick(settings: MapperSettings) -> (ControlStick, Reports) {
        let reports: Reports = Rc::default();
        let sink = reports.clone();
        let stick = ControlStick::new(StickId(7), settings, RasterSurface::new())
            .with_listener(move |x: f32, y: f32, id: StickId| {
                sink.borrow_mut().push((x, y, id))
            });
        (stick, reports)
    }

    fn idle_frame(stick: &ControlStick) -> PixelBuffer {
        stick.surface().front().clone()
    }

    #[test]
    fn creation_draws_the_idle_joystick() {
        let (mut stick, reports) = stick(MapperSettings::default());
        stick.surface_created(300, 300);
        assert_eq!(stick.surface().frames_posted(), 1);
        assert_eq!(stick.hat(), HatPosition::new(150.0, 150.0));
        assert!(reports.borrow().is_empty());
    }

    #[test]
    fn square_widget_scenario() {
        let (mut stick, reports) = stick(MapperSettings::default());
        stick.surface_created(300, 300);
        assert_eq!(stick.geometry().travel_limit(), 100.0);

        let out = stick.on_touch(PointerSample::down(150.0, 250.0));
        assert_eq!(out, DisplacementVector::new(0.0, 1.0));
        assert_eq!(stick.hat(), HatPosition::new(150.0, 250.0));

        let out = stick.on_touch(PointerSample::moved(150.0, 200.0));
        assert_eq!(out, DisplacementVector::new(0.0, 0.5));

        assert_eq!(
            *reports.borrow(),
            vec![(0.0, 1.0, StickId(7)), (0.0, 0.5, StickId(7))]
        );
        assert_eq!(stick.surface().frames_posted(), 3);
    }

    #[test]
    fn release_restores_the_idle_frame() {
        let (mut stick, reports) = stick(MapperSettings::default());
        stick.surface_created(300, 300);
        let idle = idle_frame(&stick);

        stick.on_touch(PointerSample::down(100.0, 60.0));
        assert_ne!(*stick.surface().front(), idle);

        let first = stick.on_touch(PointerSample::up(100.0, 60.0));
        let after_first = idle_frame(&stick);
        let second = stick.on_touch(PointerSample::up(100.0, 60.0));

        assert_eq!(first, DisplacementVector::ZERO);
        assert_eq!(first, second);
        assert_eq!(stick.hat(), HatPosition::new(150.0, 150.0));
        assert_eq!(after_first, idle);
        assert_eq!(*stick.surface().front(), idle);
        assert_eq!(reports.borrow().len(), 3);
    }

    #[test]
    fn touching_the_exact_center_draws_the_idle_frame() {
        let (mut stick, _) = stick(MapperSettings::default());
        stick.surface_created(300, 300);
        let idle = idle_frame(&stick);
        let out = stick.on_touch(PointerSample::down(150.0, 150.0));
        assert_eq!(out, DisplacementVector::ZERO);
        assert_eq!(*stick.surface().front(), idle);
    }

    #[test]
    fn invalid_surface_skips_drawing_but_still_reports() {
        let (mut stick, reports) = stick(MapperSettings::default());
        stick.surface_created(300, 300);
        stick.surface_destroyed();

        let out = stick.on_touch(PointerSample::moved(150.0, 200.0));
        assert_eq!(out, DisplacementVector::new(0.0, 0.5));
        assert_eq!(reports.borrow().len(), 1);
        assert_eq!(stick.surface().frames_posted(), 1);
        assert_eq!(stick.surface().frames_discarded(), 0);

        stick.surface_created(300, 300);
        assert_eq!(stick.surface().frames_posted(), 2);
    }

    #[test]
    fn zero_sized_widget_is_inert() {
        let (mut stick, reports) = stick(MapperSettings::default());
        stick.surface_created(0, 0);
        let out = stick.on_touch(PointerSample::down(3.0, 4.0));
        assert_eq!(out, DisplacementVector::ZERO);
        assert_eq!(stick.surface().frames_posted(), 0);
        assert_eq!(*reports.borrow(), vec![(0.0, 0.0, StickId(7))]);
    }

    #[test]
    fn resize_recomputes_geometry_and_recenters() {
        let (mut stick, _) = stick(MapperSettings::default());
        stick.surface_created(300, 300);
        stick.on_touch(PointerSample::down(150.0, 200.0));
        stick.surface_changed(600, 400);
        assert_eq!(*stick.geometry(), WidgetGeometry::from_size(600.0, 400.0));
        assert_eq!(stick.hat(), HatPosition::new(300.0, 200.0));
        assert_eq!(stick.surface().size(), [600, 400]);
        assert_eq!(stick.surface().front().width(), 600);
    }

    #[test]
    fn settings_reach_the_mapper() {
        let settings = MapperSettings {
            distance_metric: DistanceMetric::Euclidean,
            hat_travel: HatTravel::Vertical,
            clamp_output: true,
        };
        let (mut stick, _) = stick(settings);
        stick.surface_created(300, 300);
        assert_eq!(stick.settings(), settings);

        let out = stick.on_touch(PointerSample::moved(210.0, 230.0));
        assert_eq!(stick.hat().x, 150.0);
        assert!((stick.hat().y - 230.0).abs() < 1e-3);
        assert!((out.x - 0.6).abs() < 1e-5);
        assert!((out.y - 0.8).abs() < 1e-5);
    }
}
