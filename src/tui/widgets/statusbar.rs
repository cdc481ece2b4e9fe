use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::Route;
use crate::tui::theme;

/// Key hints for the active view.
pub fn hints(route: Route) -> &'static [(&'static str, &'static str)] {
    match route {
        Route::Home => &[("[↑↓]", " select  "), ("[Enter]", " open  ")],
        Route::Camera => &[
            ("[Space]", " capture  "),
            ("[f]", " flip  "),
            ("[l]", " flash  "),
            ("[+/-]", " zoom  "),
            ("[g]", " gallery  "),
        ],
        Route::Learn => &[("[←]", " back  "), ("[→]", " next  "), ("[1-5]", " rate  ")],
        Route::Progress => &[
            ("[r]", " refresh  "),
            ("[w/m]", " period  "),
            ("[←→]", " badge  "),
            ("[Enter]", " open  "),
        ],
        Route::Profile => &[("[↑↓]", " select  "), ("[Enter]", " toggle  ")],
    }
}

pub fn render(frame: &mut Frame, area: Rect, route: Route) {
    let mut spans = Vec::new();
    for (key, label) in hints(route) {
        spans.push(Span::styled(*key, theme::primary()));
        spans.push(Span::styled(*label, theme::dim()));
    }
    spans.push(Span::styled("[Tab]", theme::primary()));
    spans.push(Span::styled(" switch  ", theme::dim()));
    spans.push(Span::styled("[q]", theme::primary()));
    spans.push(Span::styled(" quit", theme::dim()));

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
