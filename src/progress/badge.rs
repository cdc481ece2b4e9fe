use log::debug;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::{Easing, GlowLoop, Spring, SpringConfig, Tween};
use crate::models::{Achievement, HexColor, Rarity};

/// Caller-supplied reaction to a badge press.
pub type BadgePress = Rc<dyn Fn(&Achievement)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgePhase {
    /// Waiting for its turn, then popping in and spinning.
    Entering,
    /// At rest. Terminal for every rarity but legendary.
    Settled,
    /// Legendary only: pulsing until torn down.
    Glowing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeConfig {
    pub stagger: Duration,
    pub spin_duration: Duration,
    pub glow_half_period: Duration,
    pub glow_min: f64,
    pub glow_max: f64,
}

/// When the badge at `index` starts its entrance.
pub fn entrance_delay(index: usize, stagger: Duration) -> Duration {
    stagger * index as u32
}

pub struct AchievementBadge {
    achievement: Achievement,
    phase: BadgePhase,
    delay: Duration,
    elapsed: Duration,
    scale: Spring,
    spin: Tween,
    glow: Option<GlowLoop>,
    on_press: Option<BadgePress>,
    torn_down: bool,
}

impl AchievementBadge {
    pub fn new(achievement: Achievement, index: usize, config: &BadgeConfig) -> Self {
        let delay = entrance_delay(index, config.stagger);
        let glow = (achievement.rarity == Rarity::Legendary)
            .then(|| GlowLoop::new(config.glow_min, config.glow_max, config.glow_half_period));
        let mut scale = Spring::new(SpringConfig::pop(), 0.0);
        scale.set_target(1.0);

        Self {
            achievement,
            phase: BadgePhase::Entering,
            delay,
            elapsed: Duration::ZERO,
            scale,
            spin: Tween::new(0.0, 360.0, config.spin_duration)
                .with_delay(delay)
                .with_easing(Easing::EaseInOut),
            glow,
            on_press: None,
            torn_down: false,
        }
    }

    pub fn with_on_press(mut self, on_press: BadgePress) -> Self {
        self.on_press = Some(on_press);
        self
    }

    pub fn achievement(&self) -> &Achievement {
        &self.achievement
    }

    pub fn phase(&self) -> BadgePhase {
        self.phase
    }

    pub fn entrance_delay(&self) -> Duration {
        self.delay
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.torn_down {
            return;
        }
        let before = self.elapsed;
        self.elapsed = self.elapsed.saturating_add(dt);

        match self.phase {
            BadgePhase::Entering => {
                // Only the part of this frame past the delay moves the spring.
                let active = self.elapsed.saturating_sub(before.max(self.delay));
                if self.elapsed > self.delay {
                    self.scale.advance(active);
                }
                self.spin.advance(dt);

                if self.scale.is_settled() && self.spin.is_finished() {
                    self.settle();
                }
            }
            BadgePhase::Settled => {}
            BadgePhase::Glowing => {
                if let Some(glow) = self.glow.as_mut() {
                    glow.advance(dt);
                }
            }
        }
    }

    fn settle(&mut self) {
        match self.glow.as_mut() {
            Some(glow) => {
                glow.start();
                self.phase = BadgePhase::Glowing;
                debug!("badge '{}' settled, glow started", self.achievement.title);
            }
            None => self.phase = BadgePhase::Settled,
        }
    }

    /// Current scale factor; springs slightly past 1 while popping in.
    pub fn scale(&self) -> f64 {
        if self.elapsed < self.delay {
            0.0
        } else {
            self.scale.value()
        }
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.spin.value()
    }

    /// Glow overlay opacity, only while the legendary loop runs.
    pub fn glow_opacity(&self) -> Option<f64> {
        self.glow
            .as_ref()
            .filter(|g| g.is_running())
            .map(GlowLoop::opacity)
    }

    pub fn is_glowing(&self) -> bool {
        self.glow.as_ref().is_some_and(GlowLoop::is_running)
    }

    pub fn border_color(&self) -> HexColor {
        self.achievement.rarity.accent()
    }

    pub fn sub_progress(&self) -> Option<f64> {
        self.achievement.sub_progress()
    }

    /// Hand the press to the caller. The badge itself does not change.
    pub fn press(&self) {
        if let Some(on_press) = &self.on_press {
            on_press(&self.achievement);
        }
    }

    /// Stop the glow loop. Called on unmount; also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(glow) = self.glow.as_mut() {
            glow.cancel();
            debug!("badge '{}' glow cancelled", self.achievement.title);
        }
    }
}

impl Drop for AchievementBadge {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for AchievementBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AchievementBadge")
            .field("id", &self.achievement.id)
            .field("phase", &self.phase)
            .field("delay", &self.delay)
            .field("glowing", &self.is_glowing())
            .finish()
    }
}
