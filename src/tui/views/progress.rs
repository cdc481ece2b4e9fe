use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::progress::{Period, ProgressScreen};
use crate::tui::theme;
use crate::tui::widgets::{badge, bar_chart::ActivityChart, counter, ring::Ring};
use crate::utils::format::{format_amount, progress_bar, truncate};

const RING_SIZE: u16 = 5;

pub fn handle_key(screen: &mut ProgressScreen, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => {
            screen.begin_refresh();
        }
        KeyCode::Char('w') => screen.select_period(Period::Week),
        KeyCode::Char('m') => screen.select_period(Period::Month),
        KeyCode::Left => screen.focus_prev_badge(),
        KeyCode::Right => screen.focus_next_badge(),
        KeyCode::Enter => screen.press_focused_badge(),
        _ => {}
    }
}

/// Push `area` down by the entrance offset.
fn slide(area: Rect, offset: f64) -> Rect {
    let rows = (offset.max(0.0).round() as u16).min(area.height);
    Rect {
        y: area.y + rows,
        height: area.height - rows,
        ..area
    }
}

fn card(title: &str, opacity: f64) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme::fade(theme::PRIMARY, opacity)),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::fade(theme::BORDER, opacity)))
        .style(theme::surface())
}

pub fn render(frame: &mut Frame, area: Rect, screen: &ProgressScreen) {
    let opacity = screen.entrance_opacity();
    let area = slide(area, screen.entrance_offset());
    let fg = |c| Style::default().fg(theme::fade(c, opacity));
    let data = screen.snapshot();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    // ─── Header ──────────────────────────────────────────────────────────────
    let period = |p: Period| {
        if screen.selected_period() == p {
            fg(theme::TEXT).bg(theme::PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            fg(theme::TEXT_DIM)
        }
    };
    let mut status = vec![
        Span::styled(" Week ", period(Period::Week)),
        Span::raw(" "),
        Span::styled(" Month ", period(Period::Month)),
    ];
    if screen.is_refreshing() {
        status.push(Span::styled("   ↻ Refreshing…", theme::amber()));
    }
    if let Some(err) = screen.error_message() {
        status.push(Span::styled(format!("   ✗ {} [r] retry", err), theme::red()));
    }
    let header = vec![
        Line::from(Span::styled(
            "Your Progress",
            fg(theme::TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Level {} • {} • {} pts",
                data.stats.level, data.stats.rank, data.stats.total_points
            ),
            fg(theme::GOLD),
        )),
        Line::from(status),
    ];
    frame.render_widget(Paragraph::new(header), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    // ─── Left: counters, chart, goals, insight ───────────────────────────────
    let chart_rows = screen.bars().ceiling() as u16 + 2;
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(chart_rows + 2),
            Constraint::Length(data.goals.len() as u16 * 2 + 2),
            Constraint::Min(4),
        ])
        .split(columns[0]);

    let stat_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(left[0]);
    let counters = screen.counters();
    counter::render(frame, stat_cols[0], "Problems", &counters.problems, "", theme::PRIMARY, opacity);
    counter::render(frame, stat_cols[1], "Hours", &counters.hours, "", theme::INDIGO, opacity);
    counter::render(frame, stat_cols[2], "Streak", &counters.streak, " days", theme::FLAME, opacity);

    let solved: u32 = screen.visible_activities().iter().map(|d| d.problems).sum();
    let chart_title = format!("Weekly Activity · {} solved", solved);
    let chart_block = card(&chart_title, opacity);
    let chart_area = chart_block.inner(left[1]);
    frame.render_widget(chart_block, left[1]);
    frame.render_widget(ActivityChart::new(screen.bars()).opacity(opacity), chart_area);

    let goals_block = card("Learning Goals", opacity);
    let goals_area = goals_block.inner(left[2]);
    let bar_width = goals_area.width.saturating_sub(16) as usize;
    let mut goal_lines = Vec::new();
    for g in &data.goals {
        goal_lines.push(Line::from(vec![
            Span::styled(format!("{} ", g.icon.glyph()), fg(theme::hex(g.color))),
            Span::styled(truncate(&g.title, (goals_area.width as usize).saturating_sub(12)), fg(theme::TEXT)),
            Span::styled(format!("  {} · {}", g.goal_type.as_str(), g.deadline.format("%b %d")), fg(theme::TEXT_DIM)),
        ]));
        goal_lines.push(Line::from(vec![
            Span::styled(progress_bar(g.fill_ratio(), bar_width), fg(theme::hex(g.color))),
            Span::styled(
                format!(" {}/{} {}%", format_amount(g.progress), format_amount(g.target), g.completion_percent()),
                fg(theme::TEXT_DIM),
            ),
        ]));
    }
    frame.render_widget(goals_block, left[2]);
    frame.render_widget(Paragraph::new(goal_lines), goals_area);

    let insight = vec![
        Line::from(Span::styled(
            "You're on Fire! ♨",
            fg(theme::FLAME).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your problem-solving speed has improved by 40% this week. \
             Keep challenging yourself with harder problems!",
            fg(theme::TEXT),
        )),
    ];
    frame.render_widget(
        Paragraph::new(insight)
            .block(card("Learning Insights", opacity))
            .wrap(Wrap { trim: true }),
        left[3],
    );

    // ─── Right: subject rings, achievements ──────────────────────────────────
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(RING_SIZE + 4), Constraint::Min(0)])
        .split(columns[1]);

    let subjects_block = card("Subject Mastery", opacity);
    let subjects_area = subjects_block.inner(right[0]);
    frame.render_widget(subjects_block, right[0]);
    if !data.subjects.is_empty() {
        let n = data.subjects.len() as u32;
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, n); n as usize])
            .split(subjects_area);
        for (s, slot) in data.subjects.iter().zip(slots.iter()) {
            let ring_width = RING_SIZE * 2;
            let ring_area = Rect {
                x: slot.x + slot.width.saturating_sub(ring_width) / 2,
                width: ring_width.min(slot.width),
                height: RING_SIZE.min(slot.height),
                ..*slot
            };
            frame.render_widget(
                Ring::new(s.progress as f64, RING_SIZE, 1)
                    .color(theme::fade(theme::hex(s.color), opacity))
                    .label(Span::styled(format!("{}%", s.progress), fg(theme::TEXT))),
                ring_area,
            );
            if slot.height > RING_SIZE {
                let name = Rect {
                    y: slot.y + RING_SIZE,
                    height: slot.height - RING_SIZE,
                    ..*slot
                };
                frame.render_widget(
                    Paragraph::new(vec![
                        Line::from(Span::styled(truncate(&s.name, slot.width as usize), fg(theme::TEXT))),
                        Line::from(Span::styled(
                            format!("{}/{}", s.problems, s.total_problems),
                            fg(theme::TEXT_DIM),
                        )),
                    ])
                    .alignment(Alignment::Center),
                    name,
                );
            }
        }
    }

    let badges_block = card("Achievements", opacity);
    let badges_area = badges_block.inner(right[1]);
    frame.render_widget(badges_block, right[1]);
    badge::render(frame, badges_area, screen.badges(), screen.focused_badge(), opacity);
}
