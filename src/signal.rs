//! Control-signal hand-off
//!
//! Bridges [`JoystickListener`] callbacks on the UI thread to an async consumer over a bounded
//! tokio channel. The consumer here only logs; the rover transport plugs in at the same place.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::joystick::{JoystickListener, StickId};

/// One normalized stick reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickSample {
    pub stick: StickId,
    pub x: f32,
    pub y: f32,
}

/// Listener that forwards every reading into a channel without blocking.
///
/// Readings that do not fit (full or closed channel) are dropped with a warning.
#[derive(Clone, Debug)]
pub struct SignalSender {
    tx: mpsc::Sender<StickSample>,
}

impl SignalSender {
    pub fn new(tx: mpsc::Sender<StickSample>) -> Self {
        Self { tx }
    }
}

impl JoystickListener for SignalSender {
    fn on_joystick_moved(&mut self, x_percent: f32, y_percent: f32, stick: StickId) {
        let sample = StickSample {
            stick,
            x: x_percent,
            y: y_percent,
        };
        if let Err(e) = self.tx.try_send(sample) {
            warn!("Dropping {} reading: {}", stick, e);
        }
    }
}

/// Creates the sender half for the sticks and the receiver half for the consumer.
pub fn signal_channel(capacity: usize) -> (SignalSender, mpsc::Receiver<StickSample>) {
    let (tx, rx) = mpsc::channel(capacity);
    debug!("Created stick signal channel with capacity {}", capacity);
    (SignalSender::new(tx), rx)
}

/// Drains readings until every sender is gone.
pub fn spawn_signal_log_task(mut rx: mpsc::Receiver<StickSample>) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut received = 0u64;
        while let Some(sample) = rx.recv().await {
            received += 1;
            debug!(
                "{} -> x: {:.3}, y: {:.3}",
                sample.stick, sample.x, sample.y
            );
        }
        info!("Stick signal channel closed after {} readings", received);
        received
    })
}
