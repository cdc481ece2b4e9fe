use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::progress::AchievementBadge;
use crate::tui::theme;
use crate::utils::format::{progress_bar, truncate};

pub const CARD_HEIGHT: u16 = 6;

const SPIN: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Icon glyph for the current spin angle: a spinner while turning, the
/// achievement's own icon once at rest.
pub fn spin_glyph(badge: &AchievementBadge) -> &'static str {
    let deg = badge.rotation_degrees();
    if deg > 0.0 && deg < 360.0 {
        SPIN[(deg / 90.0) as usize % SPIN.len()]
    } else {
        badge.achievement().icon.glyph()
    }
}

/// Shrink `area` around its centre by `scale`, keeping at least a 3x3 box.
fn scaled(area: Rect, scale: f64) -> Option<Rect> {
    let s = scale.clamp(0.0, 1.0);
    let w = (area.width as f64 * s).round() as u16;
    let h = (area.height as f64 * s).round() as u16;
    if w < 3 || h < 3 {
        return None;
    }
    Some(Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    })
}

pub fn render_badge(
    frame: &mut Frame,
    area: Rect,
    badge: &AchievementBadge,
    focused: bool,
    opacity: f64,
) {
    let Some(card) = scaled(area, badge.scale()) else {
        return;
    };
    let a = badge.achievement();
    let accent = theme::hex(badge.border_color());

    let mut border = Style::default().fg(theme::fade(accent, opacity));
    if let Some(glow) = badge.glow_opacity() {
        border = Style::default().fg(theme::fade(accent, glow * opacity));
        if glow > 0.55 {
            border = border.add_modifier(Modifier::BOLD);
        }
    }

    let inner_width = card.width.saturating_sub(4) as usize;
    let title_style = Style::default()
        .fg(theme::fade(theme::hex(a.color), opacity))
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", spin_glyph(badge)), title_style),
            Span::styled(truncate(&a.title, inner_width.saturating_sub(2)), title_style),
        ]),
        Line::from(Span::styled(
            truncate(&a.description, inner_width),
            Style::default().fg(theme::fade(theme::TEXT_DIM, opacity)),
        )),
    ];

    if let (Some(ratio), Some(p), Some(max)) = (badge.sub_progress(), a.progress, a.max_progress) {
        let suffix = format!(" {}/{}", p, max);
        let bar_width = inner_width.saturating_sub(suffix.chars().count());
        lines.push(Line::from(vec![
            Span::styled(
                progress_bar(ratio, bar_width),
                Style::default().fg(theme::fade(accent, opacity)),
            ),
            Span::styled(suffix, Style::default().fg(theme::fade(theme::TEXT_DIM, opacity))),
        ]));
    }

    let block = Block::default()
        .title(Span::styled(format!(" {} ", a.rarity.as_str()), border))
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Double
        } else {
            BorderType::Rounded
        })
        .border_style(border)
        .style(theme::surface());

    frame.render_widget(Clear, card);
    frame.render_widget(Paragraph::new(lines).block(block), card);
}

/// Two-column grid of badges in list order.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    badges: &[AchievementBadge],
    focused: usize,
    opacity: f64,
) {
    let rows = badges.len().div_ceil(2);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows])
        .split(area);

    for (r, pair) in badges.chunks(2).enumerate() {
        let Some(&row) = row_areas.get(r) else {
            break;
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row);
        for (c, badge) in pair.iter().enumerate() {
            let index = r * 2 + c;
            render_badge(frame, cols[c], badge, index == focused, opacity);
        }
    }
}
