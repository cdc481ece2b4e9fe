use ratatui::style::{Color, Modifier, Style};

use crate::models::HexColor;

pub const BG: Color = Color::Rgb(16, 12, 24);
pub const SURFACE: Color = Color::Rgb(40, 40, 40);
pub const BORDER: Color = Color::Rgb(75, 0, 130);
pub const BORDER_FOCUS: Color = Color::Rgb(138, 43, 226);
pub const TEXT: Color = Color::Rgb(255, 255, 255);
pub const TEXT_DIM: Color = Color::Rgb(170, 170, 170);
pub const PRIMARY: Color = Color::Rgb(138, 43, 226);
pub const INDIGO: Color = Color::Rgb(99, 102, 241);
pub const VIOLET: Color = Color::Rgb(139, 92, 246);
pub const PINK: Color = Color::Rgb(236, 72, 153);
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const FLAME: Color = Color::Rgb(255, 107, 53);
pub const GREEN: Color = Color::Rgb(50, 205, 50);
pub const AMBER: Color = Color::Rgb(245, 158, 11);
pub const RED: Color = Color::Rgb(239, 68, 68);
pub const EMPTY: Color = Color::Rgb(58, 52, 70);
pub const INACTIVE: Color = Color::Rgb(74, 74, 74);

pub fn hex(c: HexColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Blend `color` toward the background. `opacity = 1.0` leaves it untouched.
pub fn fade(color: Color, opacity: f64) -> Color {
    match (color, BG) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let c = HexColor::new(br, bg, bb).mix(HexColor::new(r, g, b), opacity);
            hex(c)
        }
        _ => color,
    }
}

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn primary() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    Style::default().fg(if focused { BORDER_FOCUS } else { BORDER })
}
