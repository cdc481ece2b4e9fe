use crossterm::event::{KeyCode, KeyEvent};
use log::{info, warn};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

use crate::platform::{Camera, HapticKind, Haptics};
use crate::tui::app::Route;
use crate::tui::theme;
use crate::tui::widgets::popup;
use crate::utils::format::progress_bar;

/// Simulated shutter-to-result latency.
pub const CAPTURE_DELAY: Duration = Duration::from_millis(1000);
pub const ZOOM_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Undetermined,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Back,
    Front,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Off,
    On,
    Auto,
}

impl Flash {
    pub fn next(self) -> Self {
        match self {
            Flash::Off => Flash::On,
            Flash::On => Flash::Auto,
            Flash::Auto => Flash::Off,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Flash::Off => "off",
            Flash::On => "on",
            Flash::Auto => "auto",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraScreen {
    pub permission: Permission,
    pub facing: Facing,
    pub flash: Flash,
    zoom: f64,
    capture_in: Option<Duration>,
    pub alert: Option<String>,
    pub gallery_prompt: bool,
}

impl Default for CameraScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraScreen {
    pub fn new() -> Self {
        Self {
            permission: Permission::Undetermined,
            facing: Facing::Back,
            flash: Flash::Off,
            zoom: 0.0,
            capture_in: None,
            alert: None,
            gallery_prompt: false,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_capturing(&self) -> bool {
        self.capture_in.is_some()
    }

    pub fn request_permission(&mut self, camera: &mut dyn Camera) {
        self.permission = if camera.request_permission() {
            Permission::Granted
        } else {
            warn!("camera permission denied");
            Permission::Denied
        };
    }

    pub fn toggle_facing(&mut self, haptics: &dyn Haptics) {
        self.facing = match self.facing {
            Facing::Back => Facing::Front,
            Facing::Front => Facing::Back,
        };
        haptics.vibrate(HapticKind::Selection);
    }

    pub fn cycle_flash(&mut self) {
        self.flash = self.flash.next();
    }

    /// Set zoom, clamped to [0, 1].
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = if zoom.is_nan() { 0.0 } else { zoom.clamp(0.0, 1.0) };
    }

    /// Press the shutter. Ignored while a capture is in flight.
    pub fn shutter(&mut self, haptics: &dyn Haptics) -> bool {
        if self.is_capturing() || self.permission != Permission::Granted {
            return false;
        }
        haptics.vibrate(HapticKind::Impact);
        self.capture_in = Some(CAPTURE_DELAY);
        true
    }

    /// Step the pending capture. Returns the route to open once it succeeds.
    pub fn advance(&mut self, dt: Duration, camera: &mut dyn Camera) -> Option<Route> {
        let left = self.capture_in?.saturating_sub(dt);
        if !left.is_zero() {
            self.capture_in = Some(left);
            return None;
        }
        self.capture_in = None;
        match camera.take_picture() {
            Ok(image) => {
                info!("photo captured: {}", image.uri);
                Some(Route::Learn)
            }
            Err(e) => {
                warn!("capture failed: {}", e);
                self.alert = Some("Failed to capture image. Please try again.".to_string());
                None
            }
        }
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        camera: &mut dyn Camera,
        haptics: &dyn Haptics,
    ) -> Option<Route> {
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return None;
        }
        if self.gallery_prompt {
            match key.code {
                KeyCode::Enter => {
                    self.gallery_prompt = false;
                    return Some(Route::Learn);
                }
                KeyCode::Esc => self.gallery_prompt = false,
                _ => {}
            }
            return None;
        }
        if self.permission != Permission::Granted {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('p')) {
                self.request_permission(camera);
            }
            return None;
        }
        match key.code {
            KeyCode::Char(' ') => {
                self.shutter(haptics);
            }
            KeyCode::Char('f') => self.toggle_facing(haptics),
            KeyCode::Char('l') => self.cycle_flash(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.set_zoom(self.zoom + ZOOM_STEP),
            KeyCode::Char('-') => self.set_zoom(self.zoom - ZOOM_STEP),
            KeyCode::Char('g') => self.gallery_prompt = true,
            _ => {}
        }
        None
    }

    /// True when a dialog is open and should swallow global keys.
    pub fn is_modal(&self) -> bool {
        self.alert.is_some() || self.gallery_prompt
    }
}

pub fn render(frame: &mut Frame, area: Rect, screen: &CameraScreen) {
    if screen.permission != Permission::Granted {
        render_permission(frame, area, screen.permission);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let viewfinder = Block::default()
        .title(Span::styled(" Point at a problem ", theme::primary()))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(theme::border(true));
    let status = if screen.is_capturing() {
        Span::styled("● Capturing…", theme::red().add_modifier(Modifier::BOLD))
    } else {
        Span::styled("Camera simulated in the terminal", theme::dim())
    };
    let body = Paragraph::new(vec![Line::from(""), Line::from(status)])
        .alignment(Alignment::Center)
        .block(viewfinder);
    frame.render_widget(body, chunks[0]);

    let facing = match screen.facing {
        Facing::Back => "back",
        Facing::Front => "front",
    };
    let controls = Line::from(vec![
        Span::styled(" camera ", theme::dim()),
        Span::styled(facing, theme::bold()),
        Span::styled("  flash ", theme::dim()),
        Span::styled(screen.flash.as_str(), theme::amber()),
        Span::styled("  zoom ", theme::dim()),
        Span::styled(progress_bar(screen.zoom(), 10), theme::primary()),
        Span::styled(format!(" {:.0}%", screen.zoom() * 100.0), theme::dim()),
    ]);
    let bar = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false));
    frame.render_widget(Paragraph::new(controls).block(bar), chunks[1]);

    if let Some(msg) = &screen.alert {
        popup::render(frame, area, "Error", msg, "[Enter] OK", theme::RED);
    } else if screen.gallery_prompt {
        popup::render(
            frame,
            area,
            "Select Image",
            "Choose an image from your gallery to start learning.",
            "[Enter] Open Gallery  ·  [Esc] Cancel",
            theme::INDIGO,
        );
    }
}

fn render_permission(frame: &mut Frame, area: Rect, permission: Permission) {
    let footer = match permission {
        Permission::Denied => Span::styled("No camera available. [p] try again", theme::red()),
        _ => Span::styled("[Enter] Grant Permission", theme::primary()),
    };
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Camera Access Needed",
            theme::bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "To help you learn, we need access to your camera to capture problems and concepts.",
            theme::dim(),
        )),
        Line::from(""),
        Line::from(footer),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true));
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
