//! Frame clock
//!
//! Converts host timestamps into frame-normalized `dt`, where `1.0` is one
//! frame at the target rate. Long stalls (tab switches, breakpoints) are
//! capped so a single frame never integrates more than a few frames' worth.

use crate::consts::{FRAME_DT, MAX_ELAPSED_MS, TARGET_FPS};

#[derive(Debug, Clone, Default)]
pub struct Ticker {
    last_ms: Option<f64>,
    elapsed_ms: f64,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timestamp (milliseconds) and return the frame `dt`
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            self.elapsed_ms = 1000.0 / TARGET_FPS as f64;
            return FRAME_DT;
        };

        let elapsed = now_ms - last;
        if elapsed <= 0.0 {
            self.elapsed_ms = 0.0;
            return 0.0;
        }

        self.elapsed_ms = elapsed.min(MAX_ELAPSED_MS);
        (self.elapsed_ms * TARGET_FPS as f64 / 1000.0) as f32
    }

    /// Frames per second over the last interval
    pub fn fps(&self) -> u32 {
        if self.elapsed_ms <= 0.0 {
            return 0;
        }
        (1000.0 / self.elapsed_ms).round() as u32
    }
}
