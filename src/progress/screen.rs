use log::{debug, info, warn};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use super::badge::{AchievementBadge, BadgeConfig, BadgePress};
use super::bars::{ActivityBarSeries, BarSeriesConfig};
use super::counter::AnimatedCounter;
use crate::animation::{Easing, Tween};
use crate::config::AppConfig;
use crate::data::{FetchError, ProgressProvider};
use crate::models::{DailyActivity, ProgressScreenData, ProgressStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Week,
    Month,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "Week",
            Period::Month => "Month",
        }
    }
}

/// Timings for everything the progress page animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSettings {
    pub counter_duration: Duration,
    pub entrance_duration: Duration,
    pub entrance_offset_rows: u16,
    pub bars: BarSeriesConfig,
    pub badges: BadgeConfig,
    pub refresh_delay: Duration,
    pub error_display: Duration,
}

impl From<&AppConfig> for ProgressSettings {
    fn from(config: &AppConfig) -> Self {
        let anim = &config.animation;
        Self {
            counter_duration: Duration::from_millis(anim.counter_duration_ms),
            entrance_duration: Duration::from_millis(anim.entrance_duration_ms),
            entrance_offset_rows: anim.entrance_offset_rows,
            bars: BarSeriesConfig {
                height_rows: config.ui.chart_height_rows,
                duration: Duration::from_millis(anim.bar_duration_ms),
                stagger: Duration::from_millis(anim.bar_stagger_ms),
            },
            badges: BadgeConfig {
                stagger: Duration::from_millis(anim.badge_stagger_ms),
                spin_duration: Duration::from_millis(anim.badge_spin_duration_ms),
                glow_half_period: Duration::from_millis(anim.glow_half_period_ms),
                glow_min: anim.glow_min_opacity,
                glow_max: anim.glow_max_opacity,
            },
            refresh_delay: config.data.refresh_delay(),
            error_display: Duration::from_millis(config.ui.error_display_ms),
        }
    }
}

/// The three counters in the page header.
#[derive(Debug, Default)]
pub struct StatCounters {
    pub problems: AnimatedCounter,
    pub hours: AnimatedCounter,
    pub streak: AnimatedCounter,
}

impl StatCounters {
    fn retarget(&mut self, stats: &ProgressStats, duration: Duration) {
        self.problems.count_to(stats.problems_solved as f64, duration);
        self.hours.count_to(stats.hours_learned as f64, duration);
        self.streak.count_to(stats.day_streak as f64, duration);
    }

    fn advance(&mut self, dt: Duration) {
        self.problems.advance(dt);
        self.hours.advance(dt);
        self.streak.advance(dt);
    }

    fn detach(&mut self) {
        self.problems.detach();
        self.hours.detach();
        self.streak.detach();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshError {
    pub message: String,
    remaining: Duration,
}

type RefreshResult = Result<ProgressScreenData, FetchError>;

/// Owns the progress snapshot and every animation drawn from it.
///
/// The snapshot is always present: a refresh only swaps it once a new one has
/// arrived, and a failed refresh leaves the old one in place.
pub struct ProgressScreen {
    provider: Arc<dyn ProgressProvider>,
    settings: ProgressSettings,
    snapshot: ProgressScreenData,
    refreshing: bool,
    pending: Option<Duration>,
    inflight: Option<Receiver<RefreshResult>>,
    error: Option<RefreshError>,
    selected_period: Period,
    fade: Tween,
    slide: Tween,
    counters: StatCounters,
    bars: ActivityBarSeries,
    badges: Vec<AchievementBadge>,
    focused_badge: usize,
    on_badge_press: Option<BadgePress>,
}

impl ProgressScreen {
    /// Load the first snapshot and start the entrance.
    pub fn mount(
        provider: Arc<dyn ProgressProvider>,
        settings: ProgressSettings,
        on_badge_press: Option<BadgePress>,
    ) -> Result<Self, FetchError> {
        let snapshot = provider.fetch_progress_snapshot()?;
        Ok(Self::with_snapshot(provider, settings, snapshot, on_badge_press))
    }

    /// Start the entrance from a snapshot that is already in hand.
    pub fn with_snapshot(
        provider: Arc<dyn ProgressProvider>,
        settings: ProgressSettings,
        snapshot: ProgressScreenData,
        on_badge_press: Option<BadgePress>,
    ) -> Self {
        info!(
            "progress view mounted: level {} ({})",
            snapshot.stats.level, snapshot.stats.rank
        );

        let mut counters = StatCounters::default();
        counters.retarget(&snapshot.stats, settings.counter_duration);
        let bars = ActivityBarSeries::new(&snapshot.activities, settings.bars);
        let badges = build_badges(&snapshot, &settings.badges, on_badge_press.as_ref());

        Self {
            provider,
            settings,
            snapshot,
            refreshing: false,
            pending: None,
            inflight: None,
            error: None,
            selected_period: Period::Week,
            fade: Tween::new(0.0, 1.0, settings.entrance_duration).with_easing(Easing::EaseOut),
            slide: Tween::new(settings.entrance_offset_rows as f64, 0.0, settings.entrance_duration)
                .with_easing(Easing::EaseOut),
            counters,
            bars,
            badges,
            focused_badge: 0,
            on_badge_press,
        }
    }

    pub fn snapshot(&self) -> &ProgressScreenData {
        &self.snapshot
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn selected_period(&self) -> Period {
        self.selected_period
    }

    pub fn select_period(&mut self, period: Period) {
        if self.selected_period != period {
            debug!("period switched to {}", period.label());
            self.selected_period = period;
        }
    }

    /// Activities for the selected period. The feed carries a single week, so
    /// both periods currently see the same days.
    pub fn visible_activities(&self) -> &[DailyActivity] {
        match self.selected_period {
            Period::Week | Period::Month => &self.snapshot.activities,
        }
    }

    pub fn entrance_opacity(&self) -> f64 {
        self.fade.value()
    }

    /// Rows the page is still pushed down by.
    pub fn entrance_offset(&self) -> f64 {
        self.slide.value()
    }

    pub fn counters(&self) -> &StatCounters {
        &self.counters
    }

    pub fn bars(&self) -> &ActivityBarSeries {
        &self.bars
    }

    pub fn badges(&self) -> &[AchievementBadge] {
        &self.badges
    }

    pub fn focused_badge(&self) -> usize {
        self.focused_badge
    }

    pub fn focus_next_badge(&mut self) {
        if self.focused_badge + 1 < self.badges.len() {
            self.focused_badge += 1;
        }
    }

    pub fn focus_prev_badge(&mut self) {
        self.focused_badge = self.focused_badge.saturating_sub(1);
    }

    pub fn press_focused_badge(&self) {
        if let Some(badge) = self.badges.get(self.focused_badge) {
            badge.press();
        }
    }

    /// Start a refresh. The fetch runs on a worker once `refresh_delay` worth
    /// of frames has passed. Returns `false` if one is already running.
    pub fn begin_refresh(&mut self) -> bool {
        if self.refreshing {
            return false;
        }
        self.refreshing = true;
        self.error = None;
        self.pending = Some(self.settings.refresh_delay);
        info!("refresh started");
        if self.settings.refresh_delay.is_zero() {
            self.launch_fetch();
        }
        true
    }

    fn launch_fetch(&mut self) {
        self.pending = None;
        let (tx, rx) = mpsc::channel();
        let provider = Arc::clone(&self.provider);
        thread::spawn(move || {
            // The screen may be gone by now; nobody to tell.
            let _ = tx.send(provider.fetch_progress_snapshot());
        });
        self.inflight = Some(rx);
        debug!("refresh fetch dispatched");
    }

    /// Pick up a finished refresh, if any. Returns `true` when one completed.
    pub fn poll_refresh(&mut self) -> bool {
        let Some(rx) = self.inflight.as_ref() else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                Err(FetchError::Unavailable("refresh worker exited".to_string()))
            }
        };
        self.inflight = None;
        self.finish_refresh(outcome);
        true
    }

    /// Block until the running refresh finishes, skipping any remaining delay.
    #[cfg(test)]
    pub fn wait_refresh(&mut self) {
        if self.pending.is_some() {
            self.launch_fetch();
        }
        if let Some(rx) = self.inflight.take() {
            let outcome = rx.recv().unwrap_or_else(|_| {
                Err(FetchError::Unavailable("refresh worker exited".to_string()))
            });
            self.finish_refresh(outcome);
        }
    }

    fn finish_refresh(&mut self, outcome: RefreshResult) {
        self.refreshing = false;
        match outcome {
            Ok(snapshot) => {
                info!("refresh finished");
                self.apply_snapshot(snapshot);
            }
            Err(e) => {
                warn!("refresh failed, keeping last snapshot: {}", e);
                self.error = Some(RefreshError {
                    message: e.to_string(),
                    remaining: self.settings.error_display,
                });
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: ProgressScreenData) {
        if snapshot == self.snapshot {
            debug!("refreshed snapshot unchanged");
            return;
        }
        self.counters
            .retarget(&snapshot.stats, self.settings.counter_duration);
        if snapshot.activities != self.snapshot.activities {
            self.bars.remount(&snapshot.activities);
        }
        if snapshot.achievements != self.snapshot.achievements {
            for badge in &mut self.badges {
                badge.teardown();
            }
            self.badges =
                build_badges(&snapshot, &self.settings.badges, self.on_badge_press.as_ref());
            self.focused_badge = self.focused_badge.min(self.badges.len().saturating_sub(1));
        }
        self.snapshot = snapshot;
    }

    /// One frame: move every animation, then the timers.
    pub fn advance(&mut self, dt: Duration) {
        self.fade.advance(dt);
        self.slide.advance(dt);
        self.counters.advance(dt);
        self.bars.advance(dt);
        for badge in &mut self.badges {
            badge.advance(dt);
        }
        self.advance_timers(dt);
    }

    /// Refresh delay, error banner and result polling, without touching any
    /// animation. Used while the page is not on screen.
    pub fn advance_timers(&mut self, dt: Duration) {
        if let Some(left) = self.pending.as_mut() {
            *left = left.saturating_sub(dt);
            if left.is_zero() {
                self.launch_fetch();
            }
        }
        if let Some(err) = self.error.as_mut() {
            err.remaining = err.remaining.saturating_sub(dt);
            if err.remaining.is_zero() {
                self.error = None;
            }
        }
        self.poll_refresh();
    }

    /// Tear down looping animations and counter listeners, and drop any
    /// refresh that has not reported yet. Also runs on drop.
    pub fn unmount(&mut self) {
        if self.refreshing {
            debug!("refresh abandoned on unmount");
        }
        self.pending = None;
        self.inflight = None;
        self.refreshing = false;
        self.counters.detach();
        for badge in &mut self.badges {
            badge.teardown();
        }
    }
}

impl Drop for ProgressScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn build_badges(
    snapshot: &ProgressScreenData,
    config: &BadgeConfig,
    on_press: Option<&BadgePress>,
) -> Vec<AchievementBadge> {
    snapshot
        .achievements
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let badge = AchievementBadge::new(a.clone(), i, config);
            match on_press {
                Some(cb) => badge.with_on_press(Rc::clone(cb)),
                None => badge,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MockProvider;
    use crate::models::DataError;
    use crate::progress::badge::BadgePhase;
    use std::cell::RefCell;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FRAME: Duration = Duration::from_millis(33);

    fn settings() -> ProgressSettings {
        let mut config = AppConfig::default();
        config.data.refresh_delay_ms = 0;
        ProgressSettings::from(&config)
    }

    /// Serves queued results, then the mock snapshot.
    struct Scripted {
        queue: Mutex<Vec<RefreshResult>>,
    }

    impl Scripted {
        fn new(mut results: Vec<RefreshResult>) -> Self {
            results.reverse();
            Self {
                queue: Mutex::new(results),
            }
        }
    }

    impl ProgressProvider for Scripted {
        fn fetch_progress_snapshot(&self) -> Result<ProgressScreenData, FetchError> {
            let next = self.queue.lock().unwrap().pop();
            next.unwrap_or_else(|| MockProvider::new().fetch_progress_snapshot())
        }
    }

    /// Counts fetches, answering with the mock snapshot.
    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl ProgressProvider for Counting {
        fn fetch_progress_snapshot(&self) -> Result<ProgressScreenData, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            MockProvider::new().fetch_progress_snapshot()
        }
    }

    fn delayed(ms: u64) -> ProgressSettings {
        let mut config = AppConfig::default();
        config.data.refresh_delay_ms = ms;
        ProgressSettings::from(&config)
    }

    fn mock() -> ProgressScreenData {
        MockProvider::new().fetch_progress_snapshot().unwrap()
    }

    fn run(screen: &mut ProgressScreen, frames: usize) {
        for _ in 0..frames {
            screen.advance(FRAME);
        }
    }

    #[test]
    fn test_entrance_runs_once() {
        let mut screen = ProgressScreen::mount(Arc::new(MockProvider::new()), settings(), None).unwrap();
        assert_eq!(screen.entrance_opacity(), 0.0);
        assert_eq!(screen.entrance_offset(), 3.0);
        run(&mut screen, 30);
        assert_eq!(screen.entrance_opacity(), 1.0);
        assert_eq!(screen.entrance_offset(), 0.0);
        run(&mut screen, 30);
        assert_eq!(screen.entrance_opacity(), 1.0);
    }

    #[test]
    fn test_counters_reach_stats() {
        let mut screen = ProgressScreen::mount(Arc::new(MockProvider::new()), settings(), None).unwrap();
        run(&mut screen, 40);
        assert_eq!(screen.counters().problems.value(), 127.0);
        assert_eq!(screen.counters().problems.shown(), 127);
        assert_eq!(screen.counters().hours.value(), 42.0);
        assert_eq!(screen.counters().streak.value(), 7.0);
    }

    #[test]
    fn test_refresh_keeps_snapshot_visible() {
        let mut screen = ProgressScreen::mount(Arc::new(MockProvider::new()), settings(), None).unwrap();
        let before = screen.snapshot().clone();

        assert!(screen.begin_refresh());
        assert!(screen.is_refreshing());
        assert_eq!(screen.snapshot(), &before);
        assert!(!screen.begin_refresh());

        screen.wait_refresh();
        assert!(!screen.is_refreshing());
        assert_eq!(screen.snapshot(), &before);
        assert_eq!(screen.error_message(), None);
    }

    #[test]
    fn test_refresh_completes_through_frames() {
        let mut screen = ProgressScreen::mount(Arc::new(MockProvider::new()), settings(), None).unwrap();
        screen.begin_refresh();
        for _ in 0..200 {
            screen.advance(FRAME);
            if !screen.is_refreshing() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!screen.is_refreshing());
    }

    #[test]
    fn test_failed_refresh_keeps_last_good_snapshot() {
        let provider = Scripted::new(vec![
            Ok(mock()),
            Err(FetchError::Unavailable("offline".to_string())),
        ]);
        let mut screen = ProgressScreen::mount(Arc::new(provider), settings(), None).unwrap();
        let before = screen.snapshot().clone();

        screen.begin_refresh();
        screen.wait_refresh();
        assert!(!screen.is_refreshing());
        assert_eq!(screen.snapshot(), &before);
        assert!(screen.error_message().unwrap().contains("offline"));

        // The banner fades after its display time, and retry works.
        run(&mut screen, 130);
        assert_eq!(screen.error_message(), None);
        assert!(screen.begin_refresh());
        screen.wait_refresh();
        assert_eq!(screen.error_message(), None);
    }

    #[test]
    fn test_invalid_feed_is_a_recoverable_failure() {
        let provider = Scripted::new(vec![
            Ok(mock()),
            Err(FetchError::Invalid(DataError::UnknownIcon("rocket".to_string()))),
        ]);
        let mut screen = ProgressScreen::mount(Arc::new(provider), settings(), None).unwrap();
        screen.begin_refresh();
        screen.wait_refresh();
        assert!(screen.error_message().unwrap().contains("rocket"));
        assert_eq!(screen.snapshot().stats.problems_solved, 127);
    }

    #[test]
    fn test_new_snapshot_retargets_counters_and_restarts_bars() {
        let mut changed = mock();
        changed.stats.problems_solved = 150;
        changed.activities[0].problems = 1;
        let provider = Scripted::new(vec![Ok(mock()), Ok(changed)]);
        let mut screen = ProgressScreen::mount(Arc::new(provider), settings(), None).unwrap();
        run(&mut screen, 60);
        assert!(screen.bars().is_settled());

        screen.begin_refresh();
        screen.wait_refresh();
        assert_eq!(screen.snapshot().stats.problems_solved, 150);
        assert!(!screen.bars().is_settled());
        // Counter continues from 127 rather than restarting at zero.
        screen.advance(FRAME);
        assert!(screen.counters().problems.value() >= 127.0);
        run(&mut screen, 60);
        assert_eq!(screen.counters().problems.value(), 150.0);
    }

    #[test]
    fn test_period_toggle_does_not_reslice() {
        let mut screen = ProgressScreen::mount(Arc::new(MockProvider::new()), settings(), None).unwrap();
        let week = screen.visible_activities().to_vec();
        screen.select_period(Period::Month);
        assert_eq!(screen.selected_period(), Period::Month);
        assert_eq!(screen.visible_activities(), week.as_slice());
    }

    #[test]
    fn test_badges_cascade_and_press() {
        let pressed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pressed);
        let on_press: BadgePress = Rc::new(move |a| sink.borrow_mut().push(a.title.clone()));
        let mut screen =
            ProgressScreen::mount(Arc::new(MockProvider::new()), settings(), Some(on_press)).unwrap();

        let delays: Vec<u128> = screen
            .badges()
            .iter()
            .map(|b| b.entrance_delay().as_millis())
            .collect();
        assert_eq!(delays, vec![0, 150, 300, 450]);

        screen.focus_next_badge();
        screen.press_focused_badge();
        assert_eq!(*pressed.borrow(), vec!["Streak Master".to_string()]);

        run(&mut screen, 120);
        let phases: Vec<BadgePhase> = screen.badges().iter().map(|b| b.phase()).collect();
        assert_eq!(
            phases,
            vec![
                BadgePhase::Settled,
                BadgePhase::Glowing,
                BadgePhase::Settled,
                BadgePhase::Settled
            ]
        );
    }

    #[test]
    fn test_unmount_stops_glow() {
        let mut screen = ProgressScreen::mount(Arc::new(MockProvider::new()), settings(), None).unwrap();
        run(&mut screen, 120);
        assert!(screen.badges().iter().any(AchievementBadge::is_glowing));
        screen.unmount();
        assert!(!screen.badges().iter().any(AchievementBadge::is_glowing));
    }

    #[test]
    fn test_refresh_delay_counts_frames() {
        let provider = Arc::new(Counting::default());
        let mut screen =
            ProgressScreen::mount(Arc::clone(&provider) as Arc<dyn ProgressProvider>, delayed(500), None)
                .unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        screen.begin_refresh();
        run(&mut screen, 10);
        assert!(screen.is_refreshing());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        for _ in 0..200 {
            screen.advance(FRAME);
            if !screen.is_refreshing() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!screen.is_refreshing());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unmount_cancels_pending_refresh() {
        let provider = Arc::new(Counting::default());
        let mut screen =
            ProgressScreen::mount(Arc::clone(&provider) as Arc<dyn ProgressProvider>, delayed(500), None)
                .unwrap();
        screen.begin_refresh();
        run(&mut screen, 5);
        screen.unmount();
        assert!(!screen.is_refreshing());

        run(&mut screen, 30);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_timers_alone_leave_animations_parked() {
        let mut screen = ProgressScreen::mount(Arc::new(MockProvider::new()), settings(), None).unwrap();
        screen.begin_refresh();
        for _ in 0..90 {
            screen.advance_timers(FRAME);
        }
        assert_eq!(screen.entrance_opacity(), 0.0);
        assert!(!screen.bars().is_settled());
        assert_eq!(screen.counters().problems.shown(), 0);
    }

    #[test]
    fn test_unmount_releases_counter_listeners() {
        let mut screen = ProgressScreen::mount(Arc::new(MockProvider::new()), settings(), None).unwrap();
        run(&mut screen, 5);
        assert!(screen.counters().problems.is_attached());
        screen.unmount();
        assert!(!screen.counters().problems.is_attached());
        assert!(!screen.counters().streak.is_attached());
    }
}
