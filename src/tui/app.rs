use anyhow::{Context, Result};
use chrono::{Local, Timelike};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{info, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::data::{bundled_lesson, MockProvider, ProgressProvider};
use crate::models::{Achievement, ProgressScreenData};
use crate::platform::{Camera, SimulatedCamera, TerminalHaptics, UnavailableCamera};
use crate::progress::{BadgePress, ProgressScreen, ProgressSettings};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::views::{camera, home, learn, profile, progress};
use crate::tui::widgets::{statusbar, tabbar};

const TOAST_FOR: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Camera,
    Learn,
    Progress,
    Profile,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Camera,
        Route::Learn,
        Route::Progress,
        Route::Profile,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Camera => "Camera",
            Route::Learn => "Learn",
            Route::Progress => "Progress",
            Route::Profile => "Profile",
        }
    }

    pub fn index(&self) -> usize {
        Route::ALL.iter().position(|r| r == self).unwrap_or(0)
    }

    pub fn next(&self) -> Route {
        Route::ALL[(self.index() + 1) % Route::ALL.len()]
    }

    pub fn prev(&self) -> Route {
        Route::ALL[(self.index() + Route::ALL.len() - 1) % Route::ALL.len()]
    }

    /// `'1'`..`'5'` to a tab.
    pub fn from_digit(c: char) -> Option<Route> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Route::ALL.get(i)).copied()
    }
}

type Toast = Rc<RefCell<Option<(String, Duration)>>>;

pub struct App {
    pub route: Route,
    pub config: AppConfig,
    pub should_quit: bool,
    pub home: home::HomeScreen,
    pub camera_view: camera::CameraScreen,
    pub learn: learn::LearnSession,
    /// Mounted on the first visit to the Progress tab.
    pub progress: Option<ProgressScreen>,
    pub profile: profile::ProfileScreen,
    provider: Arc<dyn ProgressProvider>,
    startup_snapshot: ProgressScreenData,
    on_badge_press: BadgePress,
    camera: Box<dyn Camera>,
    haptics: TerminalHaptics,
    toast: Toast,
}

impl App {
    pub fn new(
        config: AppConfig,
        provider: Arc<dyn ProgressProvider>,
        camera: Box<dyn Camera>,
    ) -> Result<Self> {
        let toast: Toast = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&toast);
        let on_press: BadgePress = Rc::new(move |a: &Achievement| {
            info!("badge pressed: {}", a.title);
            *sink.borrow_mut() = Some((format!("{} · {}", a.title, a.description), TOAST_FOR));
        });

        let startup_snapshot = provider
            .fetch_progress_snapshot()
            .context("Loading progress snapshot")?;
        let lesson = bundled_lesson().context("Loading bundled lesson")?;

        Ok(App {
            route: Route::Home,
            home: home::HomeScreen::default(),
            camera_view: camera::CameraScreen::new(),
            learn: learn::LearnSession::new(lesson),
            progress: None,
            profile: profile::ProfileScreen::new(&config),
            provider,
            startup_snapshot,
            on_badge_press: on_press,
            camera,
            haptics: TerminalHaptics::new(config.preferences.sound_effects),
            toast,
            should_quit: false,
            config,
        })
    }

    pub fn navigate(&mut self, route: Route) {
        if self.route != route {
            info!("navigate {} -> {}", self.route.title(), route.title());
            self.route = route;
        }
        if route == Route::Progress && self.progress.is_none() {
            self.progress = Some(self.mount_progress());
        }
    }

    fn mount_progress(&self) -> ProgressScreen {
        let settings = ProgressSettings::from(&self.config);
        let on_press = Some(Rc::clone(&self.on_badge_press));
        match ProgressScreen::mount(Arc::clone(&self.provider), settings, on_press.clone()) {
            Ok(screen) => screen,
            Err(e) => {
                warn!("progress fetch failed on mount, using startup snapshot: {}", e);
                ProgressScreen::with_snapshot(
                    Arc::clone(&self.provider),
                    settings,
                    self.startup_snapshot.clone(),
                    on_press,
                )
            }
        }
    }

    /// Latest snapshot: the progress page's once mounted, else the one loaded
    /// at startup.
    pub fn snapshot(&self) -> &ProgressScreenData {
        self.progress
            .as_ref()
            .map(ProgressScreen::snapshot)
            .unwrap_or(&self.startup_snapshot)
    }

    pub fn toast(&self) -> Option<String> {
        self.toast.borrow().as_ref().map(|(msg, _)| msg.clone())
    }

    /// Whether the active view has a dialog or prompt that owns the keyboard.
    fn view_is_modal(&self) -> bool {
        match self.route {
            Route::Camera => self.camera_view.is_modal(),
            Route::Learn => self.learn.is_rating(),
            Route::Profile => self.profile.is_modal(),
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only handle actual key presses; some terminals also report release/repeat
        if key.kind != KeyEventKind::Press {
            return;
        }

        if !self.view_is_modal() {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Tab => {
                    self.navigate(self.route.next());
                    return;
                }
                KeyCode::BackTab => {
                    self.navigate(self.route.prev());
                    return;
                }
                KeyCode::Char(c) if Route::from_digit(c).is_some() => {
                    if let Some(route) = Route::from_digit(c) {
                        self.navigate(route);
                    }
                    return;
                }
                _ => {}
            }
        }

        let target = match self.route {
            Route::Home => self.home.handle_key(key),
            Route::Camera => {
                self.camera_view
                    .handle_key(key, self.camera.as_mut(), &self.haptics)
            }
            Route::Learn => {
                self.learn.handle_key(key);
                None
            }
            Route::Progress => {
                if let Some(screen) = self.progress.as_mut() {
                    progress::handle_key(screen, key);
                }
                None
            }
            Route::Profile => {
                self.profile.handle_key(key);
                self.haptics.set_enabled(self.profile.sound_effects());
                None
            }
        };
        if let Some(route) = target {
            self.navigate(route);
        }
    }

    /// One frame of animation and timers. The progress page only animates
    /// while it is on screen.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(screen) = self.progress.as_mut() {
            if self.route == Route::Progress {
                screen.advance(dt);
            } else {
                screen.advance_timers(dt);
            }
        }
        self.learn.advance(dt);
        if let Some(route) = self.camera_view.advance(dt, self.camera.as_mut()) {
            self.navigate(route);
        }

        let mut toast = self.toast.borrow_mut();
        let expired = match toast.as_mut() {
            Some((_, left)) => {
                *left = left.saturating_sub(dt);
                left.is_zero()
            }
            None => false,
        };
        if expired {
            *toast = None;
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // view
                Constraint::Length(1), // toast
                Constraint::Length(2), // tabs
                Constraint::Length(1), // status bar
            ])
            .split(area);

        match self.route {
            Route::Home => home::render(
                frame,
                chunks[0],
                &self.home,
                &self.config.profile,
                self.snapshot(),
                Local::now().hour(),
            ),
            Route::Camera => camera::render(frame, chunks[0], &self.camera_view),
            Route::Learn => learn::render(frame, chunks[0], &self.learn),
            Route::Progress => {
                if let Some(screen) = self.progress.as_ref() {
                    progress::render(frame, chunks[0], screen);
                }
            }
            Route::Profile => profile::render(
                frame,
                chunks[0],
                &self.profile,
                &self.config,
                &self.snapshot().stats,
            ),
        }

        if let Some(msg) = self.toast() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(format!("  ★ {}", msg), theme::gold()))),
                chunks[1],
            );
        }

        tabbar::render(frame, chunks[2], self.route);
        statusbar::render(frame, chunks[3], self.route);
    }
}

/// Run the TUI event loop.
pub fn run(config: AppConfig, no_camera: bool) -> Result<()> {
    let provider: Arc<dyn ProgressProvider> = Arc::new(MockProvider::new());
    let camera: Box<dyn Camera> = if no_camera {
        info!("camera disabled");
        Box::new(UnavailableCamera)
    } else {
        Box::new(SimulatedCamera::new())
    };
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);
    let mut app = App::new(config, provider, camera)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(tick_rate);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key);
                    if app.should_quit {
                        break;
                    }
                }
                Event::Tick(dt) => app.tick(dt),
                Event::Resize => {}
            }
        }
        Ok(())
    })();

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let mut config = AppConfig::default();
        config.data.refresh_delay_ms = 0;
        config.preferences.sound_effects = false;
        App::new(config, Arc::new(MockProvider::new()), Box::new(SimulatedCamera::new())).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_route_cycle_and_digits() {
        assert_eq!(Route::Home.next(), Route::Camera);
        assert_eq!(Route::Home.prev(), Route::Profile);
        assert_eq!(Route::from_digit('4'), Some(Route::Progress));
        assert_eq!(Route::from_digit('0'), None);
        assert_eq!(Route::from_digit('6'), None);
    }

    #[test]
    fn test_tab_navigation_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.route, Route::Camera);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.route, Route::Home);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.route, Route::Profile);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_home_quick_action_opens_camera() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Camera);
    }

    #[test]
    fn test_capture_flow_lands_on_learn() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter); // grant
        press(&mut app, KeyCode::Char(' '));
        for _ in 0..31 {
            app.tick(Duration::from_millis(33));
        }
        assert_eq!(app.route, Route::Learn);
    }

    #[test]
    fn test_rating_digits_do_not_switch_tabs() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        for _ in 0..5 {
            press(&mut app, KeyCode::Right);
        }
        assert!(app.learn.is_rating());
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.route, Route::Learn);
        assert_eq!(app.learn.rating(), 4);
    }

    #[test]
    fn test_progress_entrance_waits_for_first_visit() {
        let mut app = app();
        for _ in 0..90 {
            app.tick(Duration::from_millis(33));
        }
        assert!(app.progress.is_none());
        assert_eq!(app.snapshot().stats.problems_solved, 127);

        press(&mut app, KeyCode::Char('4'));
        let screen = app.progress.as_ref().unwrap();
        assert!(screen.entrance_opacity() < 1.0);
        assert!(!screen.bars().is_settled());
        assert_eq!(screen.counters().problems.shown(), 0);

        app.tick(Duration::from_millis(33));
        assert!(app.progress.as_ref().unwrap().entrance_opacity() > 0.0);
    }

    #[test]
    fn test_progress_pauses_off_screen_and_mounts_once() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        app.tick(Duration::from_millis(33));
        let opacity = app.progress.as_ref().unwrap().entrance_opacity();

        press(&mut app, KeyCode::Char('1'));
        for _ in 0..30 {
            app.tick(Duration::from_millis(33));
        }
        assert_eq!(app.progress.as_ref().unwrap().entrance_opacity(), opacity);

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.progress.as_ref().unwrap().entrance_opacity(), opacity);
    }

    #[test]
    fn test_badge_press_shows_toast() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Enter);
        assert!(app.toast().unwrap().contains("Problem Solver"));
        for _ in 0..80 {
            app.tick(Duration::from_millis(33));
        }
        assert_eq!(app.toast(), None);
    }

    #[test]
    fn test_every_route_draws() {
        let mut app = App::new(
            AppConfig::default(),
            Arc::new(MockProvider::new()),
            Box::new(UnavailableCamera),
        )
        .unwrap();
        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        for route in Route::ALL {
            app.navigate(route);
            terminal.draw(|f| app.draw(f)).unwrap();
            let out: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
            assert!(out.contains(route.title()));
        }
    }
}
