use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use log::debug;

use crate::animation::{ListenerId, ValueAnimator};

/// A headline number that counts up to its stat.
///
/// The whole number on screen is written by a listener on the animator, and
/// the listener is released again on [`AnimatedCounter::detach`].
#[derive(Debug)]
pub struct AnimatedCounter {
    animator: ValueAnimator,
    shown: Rc<Cell<u64>>,
    listener: Option<ListenerId>,
}

impl AnimatedCounter {
    pub fn new() -> Self {
        let mut animator = ValueAnimator::new(0.0);
        let shown = Rc::new(Cell::new(0));
        let sink = Rc::clone(&shown);
        let listener = animator.subscribe(move |v| sink.set(v.max(0.0).floor() as u64));
        Self {
            animator,
            shown,
            listener: Some(listener),
        }
    }

    /// The number currently displayed.
    pub fn shown(&self) -> u64 {
        self.shown.get()
    }

    #[cfg(test)]
    pub fn value(&self) -> f64 {
        self.animator.value()
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    pub fn count_to(&mut self, target: f64, duration: Duration) {
        self.animator.start(target, duration);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.animator.advance(dt);
    }

    /// Stop the run and drop the display listener; the shown number freezes.
    pub fn detach(&mut self) {
        debug!("counter detached at {:.1}", self.animator.value());
        self.animator.cancel();
        if let Some(id) = self.listener.take() {
            self.animator.unsubscribe(id);
        }
    }
}

impl Default for AnimatedCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(33);

    #[test]
    fn test_shown_floors_running_value() {
        let mut counter = AnimatedCounter::new();
        counter.count_to(127.0, Duration::from_millis(1200));
        for _ in 0..10 {
            counter.advance(FRAME);
        }
        assert_eq!(counter.shown(), counter.value().floor() as u64);
        assert!(counter.shown() < 127);

        for _ in 0..40 {
            counter.advance(FRAME);
        }
        assert_eq!(counter.shown(), 127);
    }

    #[test]
    fn test_detach_freezes_display() {
        let mut counter = AnimatedCounter::new();
        counter.count_to(50.0, Duration::from_millis(500));
        counter.advance(FRAME);
        let frozen = counter.shown();

        counter.detach();
        assert!(!counter.is_attached());
        counter.count_to(90.0, Duration::from_millis(100));
        counter.advance(Duration::from_millis(100));
        assert_eq!(counter.value(), 90.0);
        assert_eq!(counter.shown(), frozen);
    }
}
