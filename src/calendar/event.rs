use chrono::{NaiveDate, NaiveTime};
use ratatui::style::Color;

use crate::theme;

/// A single calendar entry as read from the event source.
///
/// `date` and `time` stay as the source wrote them: cells match on exact
/// string equality, and overlap is judged on the time label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub date: String,
    pub time: String,
    pub duration: String,
    pub title: String,
    pub color: Option<String>,
}

impl CalendarEvent {
    #[cfg(test)]
    pub fn new(date: &str, time: &str, title: &str) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            duration: String::new(),
            title: title.to_string(),
            color: None,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// A date only matches a grid cell if it is written exactly as the cell
    /// formats it, so "2024-3-5" does not count even though it parses.
    pub fn has_canonical_date(&self) -> bool {
        self.parsed_date()
            .is_some_and(|d| d.format("%Y-%m-%d").to_string() == self.date)
    }

    pub fn parsed_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.time, "%H:%M").ok()
    }

    /// Banner color for the event, falling back to the theme's event color.
    pub fn display_color(&self) -> Color {
        self.color
            .as_deref()
            .and_then(theme::parse_color)
            .unwrap_or(theme::current().event_bg)
    }

    /// The "date | time | duration" line shown under the title in the tooltip.
    pub fn schedule_display(&self) -> String {
        if self.duration.is_empty() {
            format!("{} | {}", self.date, self.time)
        } else {
            format!("{} | {} | {}", self.date, self.time, self.duration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_display_includes_duration_when_present() {
        let mut ev = CalendarEvent::new("2024-03-05", "10:00", "Standup");
        assert_eq!(ev.schedule_display(), "2024-03-05 | 10:00");

        ev.duration = "30m".to_string();
        assert_eq!(ev.schedule_display(), "2024-03-05 | 10:00 | 30m");
    }

    #[test]
    fn display_color_parses_hex_and_names() {
        let mut ev = CalendarEvent::new("2024-03-05", "10:00", "Standup");
        ev.color = Some("#ff0080".to_string());
        assert_eq!(ev.display_color(), Color::Rgb(255, 0, 128));

        ev.color = Some("blue".to_string());
        assert_eq!(ev.display_color(), Color::Blue);
    }

    #[test]
    fn unknown_color_falls_back_to_theme() {
        let mut ev = CalendarEvent::new("2024-03-05", "10:00", "Standup");
        ev.color = Some("not-a-color".to_string());
        assert_eq!(ev.display_color(), theme::current().event_bg);
    }

    #[test]
    fn parses_date_and_time() {
        let ev = CalendarEvent::new("2024-02-29", "09:30", "Leap");
        assert_eq!(ev.parsed_date(), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(ev.parsed_time(), NaiveTime::from_hms_opt(9, 30, 0));

        let bad = CalendarEvent::new("2023-02-29", "9am", "Nope");
        assert!(bad.parsed_date().is_none());
        assert!(bad.parsed_time().is_none());
    }
}
