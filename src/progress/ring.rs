//! Geometry for the circular progress indicator.
//!
//! The ring is drawn on a cell grid whose cells are roughly twice as tall as
//! they are wide, so a ring `size` rows high is `2 * size` columns wide.

use std::f64::consts::PI;

/// Clamp to `[0, 100]`. NaN reads as empty.
pub fn clamp_percentage(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}

/// Degrees of arc covered, measured clockwise from twelve o'clock.
pub fn sweep_degrees(percentage: f64) -> f64 {
    clamp_percentage(percentage) * 3.6
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Outer height in rows.
    pub size: u16,
    /// Stroke thickness in rows.
    pub stroke: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingCell {
    Outside,
    Track,
    Filled,
}

impl RingGeometry {
    pub fn new(size: u16, stroke: u16) -> Self {
        let size = size.max(1);
        Self {
            size,
            stroke: stroke.clamp(1, size.div_ceil(2)),
        }
    }

    pub fn width(&self) -> u16 {
        self.size * 2
    }

    /// Classify the cell at `(col, row)` relative to the ring's top-left.
    pub fn cell(&self, col: u16, row: u16, percentage: f64) -> RingCell {
        let r_outer = self.size as f64 / 2.0;
        let r_inner = r_outer - self.stroke as f64;

        // Cell centre in row units, x halved to undo the aspect ratio.
        let x = (col as f64 + 0.5) / 2.0 - r_outer;
        let y = row as f64 + 0.5 - r_outer;
        let dist = (x * x + y * y).sqrt();
        if dist > r_outer || dist < r_inner {
            return RingCell::Outside;
        }

        let mut angle = x.atan2(-y) * 180.0 / PI;
        if angle < 0.0 {
            angle += 360.0;
        }
        if angle < sweep_degrees(percentage) {
            RingCell::Filled
        } else {
            RingCell::Track
        }
    }
}
