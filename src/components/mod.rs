pub mod month_view;
pub mod status_bar;
pub mod tooltip;

pub use month_view::{Highlights, MonthView};
pub use status_bar::StatusBar;
pub use tooltip::Tooltip;

/// Shorten `s` to at most `max` characters, ending with an ellipsis when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 1 {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('\u{2026}');
        out
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("Standup", 10), "Standup");
        assert_eq!(truncate("Standup", 5), "Stan\u{2026}");
        assert_eq!(truncate("Café au lait", 4), "Caf\u{2026}");
        assert_eq!(truncate("abc", 1), "a");
        assert_eq!(truncate("abc", 0), "");
    }
}
