use ratatui::{
    layout::Rect,
    style::Modifier,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::tui::app::Route;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, active: Route) {
    let titles: Vec<Line> = Route::ALL
        .iter()
        .enumerate()
        .map(|(i, r)| Line::from(format!("{} {}", i + 1, r.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(theme::dim())
        .highlight_style(theme::primary().add_modifier(Modifier::BOLD))
        .divider("·")
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(theme::border(false)),
        );
    frame.render_widget(tabs, area);
}
