use crossterm::event::{KeyCode, KeyEvent};
use log::info;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

use crate::models::{LearningStep, Lesson};
use crate::tui::theme;
use crate::utils::format::progress_bar;

/// How long the thank-you note stays before the lesson starts over.
pub const RESET_AFTER: Duration = Duration::from_millis(1500);

/// Where the learner is in a guided lesson.
#[derive(Debug, Clone)]
pub struct LearnSession {
    lesson: Lesson,
    step: usize,
    show_rating: bool,
    rating: u8,
    reset_in: Option<Duration>,
}

impl LearnSession {
    pub fn new(lesson: Lesson) -> Self {
        Self {
            lesson,
            step: 0,
            show_rating: false,
            rating: 0,
            reset_in: None,
        }
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn step_count(&self) -> usize {
        self.lesson.steps.len()
    }

    pub fn current_step(&self) -> Option<&LearningStep> {
        self.lesson.steps.get(self.step)
    }

    /// Fraction of the lesson reached, counting the current step.
    pub fn progress_ratio(&self) -> f64 {
        if self.step_count() == 0 {
            return 0.0;
        }
        (self.step + 1) as f64 / self.step_count() as f64
    }

    pub fn is_rating(&self) -> bool {
        self.show_rating
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn next(&mut self) {
        if self.show_rating {
            return;
        }
        if self.step + 1 < self.step_count() {
            self.step += 1;
        } else {
            self.show_rating = true;
        }
    }

    pub fn back(&mut self) {
        if !self.show_rating && self.step > 0 {
            self.step -= 1;
        }
    }

    /// Record a 1-5 star rating. Only the first rating per prompt counts.
    pub fn rate(&mut self, stars: u8) -> bool {
        if !self.show_rating || self.rating > 0 || !(1..=5).contains(&stars) {
            return false;
        }
        info!("lesson '{}' rated {} stars", self.lesson.title, stars);
        self.rating = stars;
        self.reset_in = Some(RESET_AFTER);
        true
    }

    pub fn advance(&mut self, dt: Duration) {
        let Some(left) = self.reset_in else {
            return;
        };
        let left = left.saturating_sub(dt);
        if left.is_zero() {
            self.reset();
        } else {
            self.reset_in = Some(left);
        }
    }

    pub fn reset(&mut self) {
        self.step = 0;
        self.rating = 0;
        self.show_rating = false;
        self.reset_in = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Enter | KeyCode::Char('n') => self.next(),
            KeyCode::Left | KeyCode::Char('b') => self.back(),
            KeyCode::Char(c @ '1'..='5') => {
                self.rate(c as u8 - b'0');
            }
            _ => {}
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, session: &LearnSession) {
    if session.is_rating() {
        render_rating(frame, area, session);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(8),    // step
            Constraint::Length(8), // worked example
        ])
        .split(area);

    let bar_width = chunks[0].width.saturating_sub(6) as usize;
    let header = vec![
        Line::from(Span::styled(
            format!("  Guided Discovery · {}", session.lesson().title),
            theme::bold(),
        )),
        Line::from(Span::styled(
            format!("  Step {} of {}", session.step_index() + 1, session.step_count()),
            theme::dim(),
        )),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(progress_bar(session.progress_ratio(), bar_width), theme::primary()),
        ]),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    if let Some(step) = session.current_step() {
        let text = vec![
            Line::from(Span::styled(
                step.title.as_str(),
                Style::default().fg(theme::INDIGO).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(step.content.as_str(), theme::base())),
            Line::from(""),
            Line::from(vec![
                Span::styled("💡 Hint  ", theme::amber()),
                Span::styled(step.hint.as_str(), theme::dim()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("✦ Fun fact  ", Style::default().fg(theme::VIOLET)),
                Span::styled(step.fact.as_str(), theme::dim()),
            ]),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(true))
            .style(theme::surface());
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            chunks[1],
        );
    }

    let example = &session.lesson().example;
    let mut lines = vec![Line::from(Span::styled(example.equation.as_str(), theme::bold()))];
    lines.extend(
        example
            .steps
            .iter()
            .map(|s| Line::from(Span::styled(format!("  {}", s), theme::dim()))),
    );
    lines.push(Line::from(Span::styled(example.result.as_str(), theme::green())));
    let block = Block::default()
        .title(Span::styled(" Worked example ", theme::primary()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false));
    frame.render_widget(Paragraph::new(lines).block(block), chunks[2]);
}

fn render_rating(frame: &mut Frame, area: Rect, session: &LearnSession) {
    let stars: Vec<Span> = (1..=5u8)
        .map(|i| {
            if i <= session.rating() {
                Span::styled("★ ", theme::gold())
            } else {
                Span::styled("☆ ", theme::dim())
            }
        })
        .collect();

    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled("✔ Great Job!", theme::green().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(
            "How did this learning experience feel?",
            theme::base(),
        )),
        Line::from(""),
        Line::from(stars),
        Line::from(Span::styled("press 1-5", theme::dim())),
    ];
    if session.rating() > 0 {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Thank you for your feedback! 🎉",
            theme::primary(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());
    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bundled_lesson;
    use ratatui::{backend::TestBackend, Terminal};

    fn session() -> LearnSession {
        LearnSession::new(bundled_lesson().unwrap())
    }

    #[test]
    fn test_back_on_first_step_is_noop() {
        let mut s = session();
        s.back();
        assert_eq!(s.step_index(), 0);
        assert_eq!(s.progress_ratio(), 0.2);
    }

    #[test]
    fn test_last_step_opens_rating() {
        let mut s = session();
        for _ in 0..4 {
            s.next();
        }
        assert_eq!(s.step_index(), 4);
        assert!(!s.is_rating());
        s.next();
        assert!(s.is_rating());
        assert_eq!(s.step_index(), 4);
    }

    #[test]
    fn test_rating_resets_after_delay() {
        let mut s = session();
        assert!(!s.rate(4));
        for _ in 0..5 {
            s.next();
        }
        assert!(!s.rate(9));
        assert!(s.rate(4));
        assert!(!s.rate(2));
        assert_eq!(s.rating(), 4);

        s.advance(Duration::from_millis(1400));
        assert!(s.is_rating());
        s.advance(Duration::from_millis(100));
        assert!(!s.is_rating());
        assert_eq!(s.step_index(), 0);
        assert_eq!(s.rating(), 0);
    }

    #[test]
    fn test_render_step_and_rating() {
        let mut s = session();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, f.area(), &s)).unwrap();
        let out: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(out.contains("Step 1 of 5"));

        for _ in 0..5 {
            s.next();
        }
        s.rate(5);
        terminal.draw(|f| render(f, f.area(), &s)).unwrap();
        let out: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(out.contains("Great Job!"));
    }
}
