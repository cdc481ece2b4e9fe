use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::progress::ActivityBarSeries;
use crate::progress::bars::LABEL_ROWS;
use crate::tui::theme;

const EIGHTHS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Glyph for the partial top cell of a bar, `None` when it rounds to empty.
pub fn eighth_block(fraction: f64) -> Option<&'static str> {
    let n = (fraction.clamp(0.0, 1.0) * 8.0).round() as usize;
    if n == 0 { None } else { Some(EIGHTHS[n - 1]) }
}

/// Weekly activity bars with weekday labels and raw counts underneath.
pub struct ActivityChart<'a> {
    series: &'a ActivityBarSeries,
    opacity: f64,
}

impl<'a> ActivityChart<'a> {
    pub fn new(series: &'a ActivityBarSeries) -> Self {
        Self {
            series,
            opacity: 1.0,
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

impl Widget for ActivityChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bars = self.series.bars();
        let label_rows = LABEL_ROWS as u16;
        if bars.is_empty() || area.height <= label_rows || area.width == 0 {
            return;
        }

        let slot = (area.width / bars.len() as u16).max(1);
        let bar_width = slot.saturating_sub(1).clamp(1, 3);
        let base_y = area.bottom() - label_rows - 1;
        let max_rows = (area.height - label_rows) as f64;
        let text = Style::default().fg(theme::fade(theme::TEXT_DIM, self.opacity));

        for (i, bar) in bars.iter().enumerate() {
            let x0 = area.x + slot * i as u16;
            if x0 >= area.right() {
                break;
            }
            let fill = if bar.activity.completed {
                theme::PRIMARY
            } else {
                theme::INACTIVE
            };
            let style = Style::default().fg(theme::fade(fill, self.opacity));

            let height = self.series.height(i).unwrap_or(0.0).min(max_rows);
            let full = height.floor() as u16;
            let partial = eighth_block(height - height.floor());
            let bx = x0 + (slot - bar_width) / 2;

            for dx in 0..bar_width {
                let x = bx + dx;
                if x >= area.right() {
                    break;
                }
                for r in 0..full {
                    if let Some(cell) = buf.cell_mut((x, base_y - r)) {
                        cell.set_symbol("█").set_style(style);
                    }
                }
                if let (Some(glyph), Some(y)) = (partial, base_y.checked_sub(full)) {
                    if y >= area.y {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_symbol(glyph).set_style(style);
                        }
                    }
                }
            }

            let label_width = slot.min(area.right() - x0);
            let day = bar.activity.day_label();
            let count = bar.activity.problems.to_string();
            let centre = |s: &str| x0 + label_width.saturating_sub(s.chars().count() as u16) / 2;
            buf.set_stringn(centre(&day), base_y + 1, &day, label_width as usize, text);
            buf.set_stringn(centre(&count), base_y + 2, &count, label_width as usize, text);
        }
    }
}
