use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::tui::theme;

const WORDMARK: &str = "LUMINARA";
/// Columns the quadrant-size wordmark needs.
const WORDMARK_WIDTH: u16 = WORDMARK.len() as u16 * 4;

/// App wordmark with a subtitle underneath. Falls back to plain text when
/// the terminal is too narrow for the large letters.
pub fn render(frame: &mut Frame, area: Rect, subtitle: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(1)])
        .split(area);

    if area.width >= WORDMARK_WIDTH {
        let pad = (area.width - WORDMARK_WIDTH) / 2;
        let big = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(Style::default().fg(theme::PRIMARY))
            .lines(vec![WORDMARK.into()])
            .build();
        let mark = Rect {
            x: chunks[0].x + pad,
            width: WORDMARK_WIDTH,
            ..chunks[0]
        };
        frame.render_widget(big, mark);
    } else {
        let title = Paragraph::new(Line::from(Span::styled(
            "✦ Luminara Learn",
            theme::primary().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);
    }

    let sub = Paragraph::new(Line::from(Span::styled(subtitle.to_string(), theme::dim())))
        .alignment(Alignment::Center);
    frame.render_widget(sub, chunks[1]);
}
