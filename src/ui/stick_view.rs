//! Hosts one [`ControlStick`] inside an egui layout.
//!
//! The view owns the stick's pixel surface size, translates egui pointer state into
//! down/move/up samples in surface pixels and shows the stick's latest posted frame as a texture.

use eframe::egui::{
    self, pos2, Color32, Pos2, Rect, Response, RichText, Sense, TextureHandle, TextureOptions,
    Ui, Vec2,
};

use super::common::UiColors;
use crate::config::StickConfig;
use crate::joystick::{ControlStick, DisplacementVector, PointerSample};
use crate::render::RasterSurface;
use crate::signal::SignalSender;

pub struct StickView {
    label: String,
    stick: ControlStick<RasterSurface>,
    texture: Option<TextureHandle>,
    /// `frames_posted` value of the frame currently in `texture`
    uploaded_frame: u64,
    pixel_size: [usize; 2],
    engaged: bool,
    last_pointer: Pos2,
    last_output: DisplacementVector,
}

impl StickView {
    pub fn new(config: &StickConfig, sender: SignalSender) -> Self {
        let stick = ControlStick::new(config.id, config.mapper, RasterSurface::new())
            .with_listener(sender);
        Self {
            label: config.label.clone(),
            stick,
            texture: None,
            uploaded_frame: 0,
            pixel_size: [0, 0],
            engaged: false,
            last_pointer: Pos2::ZERO,
            last_output: DisplacementVector::ZERO,
        }
    }

    /// Lays the stick out as a `side`-point square and processes this frame's pointer input.
    pub fn show(&mut self, ui: &mut Ui, side: f32) {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(side), Sense::drag());
        let pixels_per_point = ui.ctx().pixels_per_point();

        let size = [
            (rect.width() * pixels_per_point).round() as usize,
            (rect.height() * pixels_per_point).round() as usize,
        ];
        if size != self.pixel_size {
            if self.pixel_size == [0, 0] {
                self.stick.surface_created(size[0], size[1]);
            } else {
                self.stick.surface_changed(size[0], size[1]);
            }
            self.pixel_size = size;
        }

        self.handle_pointer(&response, rect, pixels_per_point);
        self.upload(ui.ctx());

        if let Some(texture) = &self.texture {
            ui.painter().image(
                texture.id(),
                rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }

    /// Label and last reading for the status bar.
    pub fn status(&self) -> RichText {
        let text = format!(
            "{} ({}): x {:+.2} y {:+.2}",
            self.label,
            self.stick.id(),
            self.last_output.x,
            self.last_output.y
        );
        let color = if self.engaged {
            UiColors::ACTIVE
        } else {
            UiColors::IDLE
        };
        RichText::new(text).color(color).monospace()
    }

    fn handle_pointer(&mut self, response: &Response, rect: Rect, pixels_per_point: f32) {
        let pressed = response.is_pointer_button_down_on();
        let local = response
            .interact_pointer_pos()
            .map(|p| ((p - rect.min) * pixels_per_point).to_pos2());

        match (pressed, self.engaged, local) {
            (true, false, Some(p)) => {
                self.engaged = true;
                self.last_pointer = p;
                self.last_output = self.stick.on_touch(PointerSample::down(p.x, p.y));
            }
            (true, true, Some(p)) if p != self.last_pointer => {
                self.last_pointer = p;
                self.last_output = self.stick.on_touch(PointerSample::moved(p.x, p.y));
            }
            (false, true, _) => {
                self.engaged = false;
                let p = self.last_pointer;
                self.last_output = self.stick.on_touch(PointerSample::up(p.x, p.y));
            }
            _ => {}
        }
    }

    fn upload(&mut self, ctx: &egui::Context) {
        let posted = self.stick.surface().frames_posted();
        if posted == 0 || (posted == self.uploaded_frame && self.texture.is_some()) {
            return;
        }
        let image = self.stick.surface().front().to_color_image();
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture(
                    format!("joystick-{}", self.stick.id().0),
                    image,
                    TextureOptions::NEAREST,
                ));
            }
        }
        self.uploaded_frame = posted;
    }
}
