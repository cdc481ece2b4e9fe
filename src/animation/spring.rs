//! Spring physics
//!
//! RK4-integrated damped spring, used for the badge pop-in.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    /// Convert "tension/friction" style parameters, as mobile toolkits
    /// express them, into stiffness and damping.
    pub fn from_tension_friction(tension: f64, friction: f64) -> Self {
        Self {
            stiffness: (tension - 30.0) * 3.62 + 194.0,
            damping: (friction - 8.0) * 3.0 + 25.0,
            mass: 1.0,
        }
    }

    /// Springy pop used by achievement badges (tension 100, friction 8).
    pub fn pop() -> Self {
        Self::from_tension_friction(100.0, 8.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::pop()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    // Tuned for unit-scale values (scale factors, opacities).
    const EPSILON: f64 = 0.001;
    const VELOCITY_EPSILON: f64 = 0.01;

    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < Self::EPSILON
            && self.velocity.abs() < Self::VELOCITY_EPSILON
    }

    /// Advance the simulation in sub-steps of at most 1/60 s, so a stalled
    /// terminal cannot blow up the integration. Snaps onto the target once
    /// at rest.
    pub fn advance(&mut self, dt: Duration) {
        const MAX_STEP: f64 = 1.0 / 60.0;
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 && !self.is_settled() {
            let h = remaining.min(MAX_STEP);
            let (dx, dv) = self.slope(h);
            self.value += dx * h;
            self.velocity += dv * h;
            remaining -= h;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    /// Runge-Kutta weighted slope of `(value, velocity)` across a step `h`.
    fn slope(&self, h: f64) -> (f64, f64) {
        let rate = |(x, v): (f64, f64)| (v, self.force(x, v) / self.config.mass);
        let nudge = |(x, v): (f64, f64), (dx, dv): (f64, f64), t: f64| (x + dx * t, v + dv * t);

        let here = (self.value, self.velocity);
        let k1 = rate(here);
        let k2 = rate(nudge(here, k1, h / 2.0));
        let k3 = rate(nudge(here, k2, h / 2.0));
        let k4 = rate(nudge(here, k3, h));
        (
            (k1.0 + 2.0 * (k2.0 + k3.0) + k4.0) / 6.0,
            (k1.1 + 2.0 * (k2.1 + k3.1) + k4.1) / 6.0,
        )
    }

    /// Restoring pull toward the target plus linear drag.
    fn force(&self, x: f64, v: f64) -> f64 {
        -self.config.stiffness * (x - self.target) - self.config.damping * v
    }
}
