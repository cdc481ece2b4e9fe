use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::settings::ProfileConfig;
use crate::models::ProgressScreenData;
use crate::tui::app::Route;
use crate::tui::theme;
use crate::tui::widgets::header;
use crate::utils::format::{progress_bar, truncate};

pub const QUOTE: &str =
    "\"The best way to learn is to teach someone else what you've discovered.\"";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickAction {
    pub title: &'static str,
    pub route: Route,
    pub color: Color,
}

pub const QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction {
        title: "Capture Problem",
        route: Route::Camera,
        color: theme::INDIGO,
    },
    QuickAction {
        title: "Browse Topics",
        route: Route::Learn,
        color: theme::VIOLET,
    },
    QuickAction {
        title: "Daily Challenge",
        route: Route::Learn,
        color: theme::PINK,
    },
];

/// Salutation for the local hour (0-23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

#[derive(Debug, Default, Clone)]
pub struct HomeScreen {
    selected: usize,
}

impl HomeScreen {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Route> {
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.selected + 1 < QUICK_ACTIONS.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Enter => Some(QUICK_ACTIONS[self.selected].route),
            _ => None,
        }
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    home: &HomeScreen,
    profile: &ProfileConfig,
    data: &ProgressScreenData,
    hour: u32,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // wordmark
            Constraint::Length(3), // greeting + streak
            Constraint::Length(5), // quick actions
            Constraint::Length(4), // quote
            Constraint::Min(4),    // continue learning
            Constraint::Length(3), // achievements strip
        ])
        .split(area);

    header::render(frame, chunks[0], "Ready to discover something amazing?");

    let greet = vec![
        Line::from(Span::styled(
            format!("  {}, {}!", greeting(hour), profile.first_name()),
            theme::bold(),
        )),
        Line::from(vec![
            Span::styled("  ♨ ", Style::default().fg(theme::FLAME)),
            Span::styled(
                format!("{} day learning streak!", data.stats.day_streak),
                theme::amber(),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(greet), chunks[1]);

    let actions: Vec<Line> = QUICK_ACTIONS
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let marker = if i == home.selected() { "▸ " } else { "  " };
            let mut style = Style::default().fg(a.color);
            if i == home.selected() {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Line::from(vec![
                Span::styled(format!("  {}", marker), theme::primary()),
                Span::styled(format!(" {} ", a.title), style),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(actions).block(section("Quick Actions")),
        chunks[2],
    );

    let quote = vec![
        Line::from(Span::styled(QUOTE, Style::default().fg(theme::TEXT).add_modifier(Modifier::ITALIC))),
        Line::from(Span::styled("- Luminara Learn", theme::dim())),
    ];
    frame.render_widget(
        Paragraph::new(quote)
            .block(section("Today's Inspiration"))
            .wrap(Wrap { trim: true }),
        chunks[3],
    );

    let name_width = 20;
    let bar_width = (chunks[4].width as usize).saturating_sub(name_width + 20).clamp(4, 30);
    let topics: Vec<Line> = data
        .subjects
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled(
                    format!("  {} {:<w$}", s.icon.glyph(), truncate(&s.name, name_width), w = name_width),
                    theme::base(),
                ),
                Span::styled(
                    progress_bar(s.progress as f64 / 100.0, bar_width),
                    Style::default().fg(theme::hex(s.color)),
                ),
                Span::styled(format!(" {}% Complete", s.progress), theme::dim()),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(topics).block(section("Continue Learning")),
        chunks[4],
    );

    let mut strip = vec![Span::raw("  ")];
    for a in data.achievements.iter().take(3) {
        strip.push(Span::styled(
            format!("{} {}", a.icon.glyph(), a.title),
            Style::default().fg(theme::hex(a.rarity.accent())),
        ));
        strip.push(Span::styled("   ", theme::dim()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(strip)).block(section("Achievements")),
        chunks[5],
    );
}

fn section(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), theme::primary()))
        .borders(Borders::TOP)
        .border_type(BorderType::Plain)
        .border_style(theme::border(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MockProvider, ProgressProvider};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(greeting(7), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(20), "Good evening");
        assert_eq!(greeting(2), "Good evening");
    }

    #[test]
    fn test_quick_action_navigation() {
        let mut home = HomeScreen::default();
        assert_eq!(home.handle_key(key(KeyCode::Enter)), Some(Route::Camera));
        home.handle_key(key(KeyCode::Up));
        assert_eq!(home.selected(), 0);
        for _ in 0..5 {
            home.handle_key(key(KeyCode::Down));
        }
        assert_eq!(home.selected(), 2);
        assert_eq!(home.handle_key(key(KeyCode::Enter)), Some(Route::Learn));
    }

    #[test]
    fn test_render_lists_subjects() {
        let data = MockProvider::new().fetch_progress_snapshot().unwrap();
        let profile = ProfileConfig::default();
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), &HomeScreen::default(), &profile, &data, 9))
            .unwrap();
        let out: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(out.contains("Good morning, Peter!"));
        assert!(out.contains("7 day learning streak!"));
        assert!(out.contains(&format!("{}% Complete", data.subjects[0].progress)));
    }
}
