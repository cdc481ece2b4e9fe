use std::time::Duration;

use super::Easing;

/// Endless back-and-forth pulse between two opacities.
///
/// One leg (low to high, or high to low) takes `half_period`. The loop runs
/// until [`GlowLoop::cancel`] is called and never finishes on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowLoop {
    min: f64,
    max: f64,
    half_period: Duration,
    elapsed: Duration,
    running: bool,
}

impl GlowLoop {
    pub fn new(min: f64, max: f64, half_period: Duration) -> Self {
        Self {
            min,
            max,
            half_period,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.running {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    pub fn opacity(&self) -> f64 {
        if self.half_period.is_zero() {
            return self.min;
        }
        let half = self.half_period.as_secs_f64();
        let phase = (self.elapsed.as_secs_f64() / half) % 2.0;
        let t = if phase <= 1.0 { phase } else { 2.0 - phase };
        self.min + (self.max - self.min) * Easing::EaseInOut.apply(t)
    }
}
