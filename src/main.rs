pub mod config;
pub mod joystick;
pub mod render;
pub mod signal;
pub mod ui;

use crate::config::AppConfig;
use crate::ui::RoverControlUI;
use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Readings buffered between the UI thread and the signal consumer
const SIGNAL_CHANNEL_CAPACITY: usize = 256;
/// This crate at info, the GUI stack from warn up
const DEFAULT_LOG_FILTER: &str = "rovercontroller=info,eframe=warn,egui=warn,winit=warn,wgpu=warn";

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = AppConfig::load_or_create().await?;
    info!(
        "Loaded config with {} stick(s) at {} fps",
        config.sticks.len(),
        config.ui.fps
    );

    let (signal_sender, signal_receiver) = signal::signal_channel(SIGNAL_CHANNEL_CAPACITY);
    let _signal_handle = signal::spawn_signal_log_task(signal_receiver);

    info!("Starting UI");
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_title("RoverController")
        .with_fullscreen(config.ui.fullscreen);

    eframe::run_native(
        "RoverController",
        native_options,
        Box::new(move |cc| Ok(Box::new(RoverControlUI::new(cc, &config, signal_sender)))),
    )
    .map_err(|e| eyre!("UI terminated with an error: {}", e))?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", DEFAULT_LOG_FILTER)
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
