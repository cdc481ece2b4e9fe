use std::fmt;
use std::time::Duration;

use super::{Easing, Tween};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(f64)>;

/// Drives one number toward a target over a duration and reports every
/// frame's value to its listeners.
///
/// Retargeting while a run is in flight starts the new run from the last
/// emitted value, so the output never jumps. Listeners live exactly as long as
/// the animator; dropping it releases them.
pub struct ValueAnimator {
    value: f64,
    run: Option<Tween>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl ValueAnimator {
    pub fn new(initial: f64) -> Self {
        Self {
            value: initial,
            run: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    /// Begin (or redirect) a run to `target`. A zero duration lands on the
    /// target at once.
    pub fn start(&mut self, target: f64, duration: Duration) {
        if duration.is_zero() {
            self.run = None;
            self.emit(target);
            return;
        }
        self.run = Some(Tween::new(self.value, target, duration).with_easing(Easing::EaseInOut));
    }

    /// Stop where we are; the last emitted value stays.
    pub fn cancel(&mut self) {
        self.run = None;
    }

    pub fn advance(&mut self, dt: Duration) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let next = run.advance(dt);
        if run.is_finished() {
            self.run = None;
        }
        self.emit(next);
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(f64) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, value: f64) {
        self.value = value;
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }
}

impl fmt::Debug for ValueAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueAnimator")
            .field("value", &self.value)
            .field("run", &self.run)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(33);

    #[test]
    fn test_runs_to_target_and_stops() {
        let mut a = ValueAnimator::new(0.0);
        a.start(127.0, Duration::from_millis(1200));
        for _ in 0..40 {
            a.advance(FRAME);
        }
        assert_eq!(a.value(), 127.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn test_listener_sees_every_frame() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut a = ValueAnimator::new(0.0);
        let sink = Rc::clone(&seen);
        a.subscribe(move |v| sink.borrow_mut().push(v));

        a.start(10.0, Duration::from_millis(99));
        for _ in 0..3 {
            a.advance(FRAME);
        }
        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(*seen.last().unwrap(), 10.0);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut a = ValueAnimator::new(5.0);
        let sink = Rc::clone(&seen);
        a.subscribe(move |v| sink.borrow_mut().push(v));

        a.start(42.0, Duration::ZERO);
        assert_eq!(a.value(), 42.0);
        assert!(!a.is_animating());
        assert_eq!(*seen.borrow(), vec![42.0]);
    }

    #[test]
    fn test_retarget_stays_between_last_value_and_new_target() {
        let mut a = ValueAnimator::new(0.0);
        a.start(100.0, Duration::from_millis(1000));
        for _ in 0..10 {
            a.advance(FRAME);
        }
        let last = a.value();
        assert!(last > 0.0 && last < 100.0);

        for target in [20.0, 5.0] {
            let mut b = ValueAnimator::new(last);
            b.start(target, Duration::from_millis(500));
            let (lo, hi) = (last.min(target), last.max(target));
            let mut prev = last;
            while b.is_animating() {
                b.advance(FRAME);
                let v = b.value();
                assert!(v >= lo - 1e-9 && v <= hi + 1e-9, "{v} escaped [{lo}, {hi}]");
                // Monotonic toward the new target.
                assert!((v - prev) * (target - last) >= -1e-9);
                prev = v;
            }
            assert_eq!(b.value(), target);
        }
    }

    #[test]
    fn test_retarget_mid_run_continues_from_last_value() {
        let mut a = ValueAnimator::new(0.0);
        a.start(100.0, Duration::from_millis(1000));
        for _ in 0..10 {
            a.advance(FRAME);
        }
        let last = a.value();

        // Redirect below where we are now: the first frame must not jump up.
        a.start(5.0, Duration::from_millis(500));
        a.advance(FRAME);
        let v = a.value();
        assert!(v <= last + 1e-9 && v >= 5.0 - 1e-9);
        while a.is_animating() {
            a.advance(FRAME);
        }
        assert_eq!(a.value(), 5.0);
    }

    #[test]
    fn test_cancel_keeps_last_value() {
        let mut a = ValueAnimator::new(0.0);
        a.start(50.0, Duration::from_millis(500));
        a.advance(FRAME);
        let held = a.value();
        a.cancel();
        a.advance(FRAME);
        assert_eq!(a.value(), held);
        assert!(!a.is_animating());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut a = ValueAnimator::new(0.0);
        let c = Rc::clone(&count);
        let id = a.subscribe(move |_| *c.borrow_mut() += 1);

        a.start(1.0, Duration::from_millis(100));
        a.advance(FRAME);
        assert!(a.unsubscribe(id));
        assert!(!a.unsubscribe(id));
        a.advance(FRAME);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_drop_releases_listeners() {
        let token = Rc::new(());
        let mut a = ValueAnimator::new(0.0);
        let held = Rc::clone(&token);
        a.subscribe(move |_| {
            let _ = &held;
        });
        assert_eq!(Rc::strong_count(&token), 2);
        drop(a);
        assert_eq!(Rc::strong_count(&token), 1);
    }
}
