use chrono::Datelike;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = theme::current();
        let w = area.width as usize;

        let month = app.current_date;
        let count = app.store.count_in_month(month.year(), month.month());
        let mut left = format!(
            " {} \u{00b7} {} event{}",
            month.format("%b %Y"),
            count,
            if count == 1 { "" } else { "s" }
        );
        if let Some(selected) = app.selected_date {
            left.push_str(&format!(" \u{00b7} {}", selected.format("%a %b %d")));
        }
        let skipped = app.store.quarantined().len();
        if skipped > 0 {
            left.push_str(&format!(" \u{00b7} {} skipped", skipped));
        }
        left.push(' ');

        // Show status message if present, otherwise show width-aware hints
        let right = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else if w >= 100 {
            " \u{2190}\u{2191}\u{2192}\u{2193}:Move Enter:Select [/]:Month t:Today ?:Help q:Quit ".to_string()
        } else if w >= 70 {
            " [/]:Month t:Today ?:Help q:Quit ".to_string()
        } else {
            " ?:Help q:Quit ".to_string()
        };

        let left_len = left.chars().count();
        let right_len = right.chars().count();
        let line = if left_len + right_len <= w {
            let padding = " ".repeat(w - left_len - right_len);
            Line::from(vec![
                Span::styled(left, theme.status),
                Span::styled(padding, theme.status),
                Span::styled(right, theme.status),
            ])
        } else {
            Line::from(Span::styled(left, theme.status))
        };

        frame.render_widget(Paragraph::new(line).style(theme.status), area);
    }
}
