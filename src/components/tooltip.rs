use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::truncate;
use crate::calendar::{overlap, CalendarEvent};
use crate::theme;

const TOOLTIP_WIDTH: u16 = 40;

pub struct Tooltip;

impl Tooltip {
    /// Event details for the hovered cell, drawn next to `anchor`.
    pub fn render(frame: &mut Frame, bounds: Rect, anchor: Rect, events: &[&CalendarEvent]) {
        if events.is_empty() || bounds.width < 4 || bounds.height < 3 {
            return;
        }
        let theme = theme::current();
        let width = TOOLTIP_WIDTH.min(bounds.width);
        let inner_w = width.saturating_sub(2) as usize;
        let clashes = overlap::conflicting_times(events);

        let mut lines: Vec<Line> = Vec::with_capacity(events.len() * 2);
        for ev in events {
            let title = if ev.title.is_empty() {
                "(untitled)"
            } else {
                ev.title.as_str()
            };
            lines.push(Line::from(Span::styled(
                truncate(title, inner_w),
                theme.tooltip_title,
            )));

            let mut schedule = vec![Span::styled(
                truncate(&ev.schedule_display(), inner_w),
                Style::default(),
            )];
            if clashes.contains(ev.time.as_str()) && inner_w > ev.schedule_display().len() + 2 {
                schedule.push(Span::raw(" "));
                schedule.push(Span::styled("!", theme.conflict));
            }
            lines.push(Line::from(schedule));
        }

        let height = (lines.len() as u16).saturating_add(2).min(bounds.height);
        let area = place(bounds, anchor, width, height);

        let count = events.len();
        let block = Block::default()
            .title(format!(" {} event{} ", count, if count == 1 { "" } else { "s" }))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Below the anchor if it fits, otherwise above it, clamped to `bounds`.
pub fn place(bounds: Rect, anchor: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let x = anchor
        .x
        .min(bounds.right().saturating_sub(width))
        .max(bounds.x);
    let y = if anchor.bottom().saturating_add(height) <= bounds.bottom() {
        anchor.bottom()
    } else {
        anchor.y.saturating_sub(height).max(bounds.y)
    };

    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    #[test]
    fn placed_below_when_room() {
        let bounds = Rect::new(0, 0, 100, 40);
        let anchor = Rect::new(10, 5, 14, 6);
        assert_eq!(place(bounds, anchor, 40, 6), Rect::new(10, 11, 40, 6));
    }

    #[test]
    fn flips_above_and_shifts_left_near_edges() {
        let bounds = Rect::new(0, 0, 100, 40);
        let anchor = Rect::new(84, 32, 14, 6);
        let area = place(bounds, anchor, 40, 6);
        assert_eq!(area, Rect::new(60, 26, 40, 6));
    }

    #[test]
    fn never_exceeds_bounds() {
        let bounds = Rect::new(0, 0, 30, 5);
        let area = place(bounds, Rect::new(2, 2, 5, 2), 40, 12);
        assert_eq!(area.width, 30);
        assert_eq!(area.height, 5);
        assert!(area.right() <= bounds.right());
        assert!(area.bottom() <= bounds.bottom());
    }

    #[test]
    fn lists_each_event_with_schedule() {
        let mut a = CalendarEvent::new("2024-03-05", "10:00", "Standup");
        a.duration = "15 min".to_string();
        let b = CalendarEvent::new("2024-03-05", "10:00", "");

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                Tooltip::render(frame, frame.area(), Rect::new(2, 2, 10, 3), &[&a, &b]);
            })
            .unwrap();

        let buf = terminal.backend().buffer();
        let text: String = (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");

        assert!(text.contains("2 events"));
        assert!(text.contains("Standup"));
        assert!(text.contains("2024-03-05 | 10:00 | 15 min !"));
        assert!(text.contains("(untitled)"));
    }
}
