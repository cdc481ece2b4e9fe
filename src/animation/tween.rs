use std::time::Duration;

use super::Easing;

/// A timed interpolation from one value to another, optionally held back by a
/// start delay. Time only moves when the owner calls [`Tween::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    delay: Duration,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            delay: Duration::ZERO,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.value()
    }

    /// Fraction of the run completed, ignoring the delay.
    pub fn progress(&self) -> f64 {
        let running = self.elapsed.saturating_sub(self.delay);
        if self.duration.is_zero() {
            return if self.elapsed >= self.delay { 1.0 } else { 0.0 };
        }
        (running.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn value(&self) -> f64 {
        let p = self.progress();
        if p >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_holds_start_value() {
        let mut t = Tween::new(0.0, 10.0, Duration::from_millis(100))
            .with_delay(Duration::from_millis(50));
        assert_eq!(t.advance(Duration::from_millis(49)), 0.0);
        assert_eq!(t.progress(), 0.0);
        assert!(t.advance(Duration::from_millis(11)) > 0.0);
        assert_eq!(t.advance(Duration::from_millis(90)), 10.0);
        assert!(t.is_finished());
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut t = Tween::new(3.0, 7.0, Duration::ZERO);
        assert!(t.is_finished());
        assert_eq!(t.advance(Duration::ZERO), 7.0);
    }

    #[test]
    fn test_linear_midpoint() {
        let mut t = Tween::new(0.0, 100.0, Duration::from_millis(200)).with_easing(Easing::Linear);
        assert!((t.advance(Duration::from_millis(100)) - 50.0).abs() < 1e-9);
    }
}
