//! # RoverController User Interface Module
//!
//! eframe host for the on-screen joysticks. The UI is glue: it gives each
//! [`ControlStick`](crate::joystick::ControlStick) a pixel surface sized to its slot in the
//! layout, forwards pointer input, and shows the frames the sticks post.
//!
//! ## Layout
//! - **Top Panel**: Title
//! - **Central Panel**: The sticks side by side, each as a square
//! - **Bottom Panel**: Last reading per stick
//!
//! Readings leave the UI through the [`SignalSender`] each stick owns; nothing here
//! depends on what consumes them.

pub mod common;
pub mod stick_view;

use eframe::egui;
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;
use crate::signal::SignalSender;

use self::common::{create_frame, UiColors};
use self::stick_view::StickView;

pub struct RoverControlUI {
    sticks: Vec<StickView>,
    repaint_interval: Duration,
}

impl RoverControlUI {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig, sender: SignalSender) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);
        let sticks = config
            .sticks
            .iter()
            .map(|stick| StickView::new(stick, sender.clone()))
            .collect::<Vec<_>>();
        info!("UI hosting {} joystick(s)", sticks.len());
        Self {
            sticks,
            repaint_interval: config.ui.repaint_interval(),
        }
    }
}

impl eframe::App for RoverControlUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(self.repaint_interval);

        egui::TopBottomPanel::top("top_panel")
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.heading("RoverController");
            });

        egui::TopBottomPanel::bottom("bottom_panel")
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    for stick in &self.sticks {
                        ui.label(stick.status());
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.sticks.is_empty() {
                ui.label("No joysticks configured");
                return;
            }
            let count = self.sticks.len() as f32;
            let available = ui.available_size();
            // frame margins and stroke on each side
            let chrome = 14.0;
            let spacing = ui.spacing().item_spacing.x * (count - 1.0);
            let side = ((available.x - spacing) / count - chrome)
                .min(available.y - chrome)
                .max(1.0);

            ui.horizontal(|ui| {
                for stick in &mut self.sticks {
                    create_frame(UiColors::INNER_BG, UiColors::BORDER).show(ui, |ui| {
                        stick.show(ui, side);
                    });
                }
            });
        });
    }
}
