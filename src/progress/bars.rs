use std::time::Duration;

use crate::animation::{Easing, Tween};
use crate::models::DailyActivity;
use crate::models::progress::max_problems;

/// Rows kept under the bars for the weekday label and the count.
pub const LABEL_ROWS: f64 = 2.0;
/// Smallest bar, in rows. One eighth-block, so an idle day is still visible.
pub const FLOOR_ROWS: f64 = 0.125;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSeriesConfig {
    pub height_rows: u16,
    pub duration: Duration,
    pub stagger: Duration,
}

/// Height of a bar showing `value` problems when the busiest day had `max`.
/// Linear between `floor` and `ceiling`, clamped to both.
pub fn bar_height(value: f64, max: u32, floor: f64, ceiling: f64) -> f64 {
    let ceiling = ceiling.max(floor);
    let ratio = value / max.max(1) as f64;
    (floor + (ceiling - floor) * ratio).clamp(floor, ceiling)
}

#[derive(Debug, Clone)]
pub struct Bar {
    pub activity: DailyActivity,
    grow: Tween,
}

impl Bar {
    #[cfg(test)]
    pub fn start_delay(&self) -> Duration {
        self.grow.delay()
    }

    /// Animated problem count currently shown.
    pub fn shown_problems(&self) -> f64 {
        self.grow.value()
    }
}

/// One bar per day, each growing from zero after a per-index delay.
#[derive(Debug, Clone)]
pub struct ActivityBarSeries {
    config: BarSeriesConfig,
    max: u32,
    bars: Vec<Bar>,
}

impl ActivityBarSeries {
    pub fn new(activities: &[DailyActivity], config: BarSeriesConfig) -> Self {
        let mut series = Self {
            config,
            max: 1,
            bars: Vec::new(),
        };
        series.remount(activities);
        series
    }

    /// Replace the data and restart every bar from zero.
    pub fn remount(&mut self, activities: &[DailyActivity]) {
        self.max = max_problems(activities);
        self.bars = activities
            .iter()
            .enumerate()
            .map(|(i, day)| Bar {
                activity: day.clone(),
                grow: Tween::new(0.0, day.problems as f64, self.config.duration)
                    .with_delay(self.config.stagger * i as u32)
                    .with_easing(Easing::EaseInOut),
            })
            .collect();
    }

    pub fn advance(&mut self, dt: Duration) {
        for bar in &mut self.bars {
            bar.grow.advance(dt);
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn ceiling(&self) -> f64 {
        (self.config.height_rows as f64 - LABEL_ROWS).max(FLOOR_ROWS)
    }

    pub fn height(&self, index: usize) -> Option<f64> {
        self.bars
            .get(index)
            .map(|b| bar_height(b.shown_problems(), self.max, FLOOR_ROWS, self.ceiling()))
    }

    pub fn is_settled(&self) -> bool {
        self.bars.iter().all(|b| b.grow.is_finished())
    }
}
