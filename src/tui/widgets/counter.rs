use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::progress::AnimatedCounter;
use crate::tui::theme;

/// Headline number card fed by an animated counter.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    counter: &AnimatedCounter,
    suffix: &str,
    color: Color,
    opacity: f64,
) {
    let value = format!("{}{}", counter.shown(), suffix);
    let text = vec![
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(theme::fade(color, opacity))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(theme::fade(theme::TEXT_DIM, opacity)),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::fade(theme::BORDER, opacity)))
        .style(theme::surface());

    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        area,
    );
}
