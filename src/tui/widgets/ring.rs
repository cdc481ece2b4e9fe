use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::progress::{RingCell, RingGeometry};
use crate::tui::theme;

/// Circular progress indicator with an optional centred label.
#[derive(Debug, Clone)]
pub struct Ring<'a> {
    percentage: f64,
    geometry: RingGeometry,
    color: Color,
    track: Color,
    label: Option<Line<'a>>,
}

impl<'a> Ring<'a> {
    pub fn new(percentage: f64, size: u16, stroke: u16) -> Self {
        Self {
            percentage,
            geometry: RingGeometry::new(size, stroke),
            color: theme::PRIMARY,
            track: theme::EMPTY,
            label: None,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn label(mut self, label: impl Into<Line<'a>>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Widget for Ring<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let g = self.geometry;
        let width = g.width().min(area.width);
        let height = g.size.min(area.height);

        for row in 0..height {
            for col in 0..width {
                let style = match g.cell(col, row, self.percentage) {
                    RingCell::Outside => continue,
                    RingCell::Track => Style::default().fg(self.track),
                    RingCell::Filled => Style::default().fg(self.color),
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("█").set_style(style);
                }
            }
        }

        if let Some(label) = self.label {
            let mid = Rect {
                x: area.x,
                y: area.y + height / 2,
                width,
                height: 1.min(height),
            };
            Paragraph::new(label)
                .alignment(Alignment::Center)
                .render(mid, buf);
        }
    }
}
