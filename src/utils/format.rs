use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format minutes as "Xh Ym" or "Ym".
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, rest)
    } else {
        format!("{}m", rest)
    }
}

/// Trim trailing zeros: 7.5 -> "7.5", 10.0 -> "10".
pub fn format_amount(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Text progress bar for a ratio, clamped to [0, 1].
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Cut `s` to at most `width` terminal columns, ending with "…" when cut.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(125), "2h 5m");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(7.5), "7.5");
        assert_eq!(format_amount(10.0), "10");
    }

    #[test]
    fn test_progress_bar_clamps() {
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(1.4, 4), "████");
        assert_eq!(progress_bar(-1.0, 3), "░░░");
    }

    #[test]
    fn test_truncate_by_columns() {
        assert_eq!(truncate("Algebra", 10), "Algebra");
        assert_eq!(truncate("Algebra Basics", 8), "Algebra…");
        assert_eq!(truncate("数学数学", 5), "数学…");
        assert_eq!(truncate("abc", 0), "");
    }
}
