use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::truncate;
use crate::app::HitMap;
use crate::calendar::{overlap, DayCell};
use crate::theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const PREV_LABEL: &str = " \u{2039} Prev";
const NEXT_LABEL: &str = "Next \u{203a} ";

/// Interaction markers the grid is drawn with.
#[derive(Debug, Clone, Copy)]
pub struct Highlights {
    pub today: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub hovered: Option<NaiveDate>,
}

pub struct MonthView;

impl MonthView {
    /// Draw the month grid and return where each cell and arrow landed.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        month: NaiveDate,
        cells: &[DayCell],
        marks: Highlights,
    ) -> HitMap {
        let theme = theme::current();

        let block = Block::default()
            .title(Line::from(format!(" {} ", month.format("%B %Y"))).centered())
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [nav_row, header_row, grid_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        // Navigation arrows
        let [prev, _, next] = Layout::horizontal([
            Constraint::Length(PREV_LABEL.chars().count() as u16),
            Constraint::Min(0),
            Constraint::Length(NEXT_LABEL.chars().count() as u16),
        ])
        .areas(nav_row);
        frame.render_widget(Paragraph::new(Span::styled(PREV_LABEL, theme.header)), prev);
        frame.render_widget(Paragraph::new(Span::styled(NEXT_LABEL, theme.header)), next);

        // Header row
        let columns = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(header_row);
        for (name, col) in DAY_NAMES.iter().zip(columns.iter()) {
            let label = format!("{:^width$}", name, width = col.width as usize);
            frame.render_widget(Paragraph::new(Span::styled(label, theme.header)), *col);
        }

        let mut hit = HitMap {
            cells: Vec::with_capacity(cells.len()),
            prev,
            next,
        };

        let weeks = cells.len() / 7;
        if weeks == 0 {
            return hit;
        }
        let rows = Layout::vertical(vec![Constraint::Ratio(1, weeks as u32); weeks]).split(grid_area);
        for (week, row) in cells.chunks(7).zip(rows.iter()) {
            let columns = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(*row);
            for (cell, col) in week.iter().zip(columns.iter()) {
                render_cell(frame, *col, cell, &marks);
                hit.cells.push((cell.day, *col));
            }
        }

        hit
    }
}

fn render_cell(frame: &mut Frame, area: Rect, cell: &DayCell, marks: &Highlights) {
    let theme = theme::current();
    let is_today = cell.day == marks.today;
    let is_selected = marks.selected == Some(cell.day);
    let is_hovered = marks.hovered == Some(cell.day);

    let base = if is_today {
        theme.today
    } else if is_hovered && !is_selected {
        theme.hover
    } else {
        Style::default()
    };
    let number_style = if is_today {
        Style::default().add_modifier(Modifier::BOLD)
    } else if !cell.current_month {
        theme.dim
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_selected { theme.selected } else { theme.border })
        .style(base);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let width = inner.width as usize;
    let conflict = overlap::conflict_label(&cell.events);
    let mut lines: Vec<Line> = Vec::new();

    if inner.height < 3 {
        // Too short for banners: mark the day number instead
        let mut spans = vec![Span::styled(format!("{:>2}", cell.day.day()), number_style)];
        if conflict.is_some() {
            spans.push(Span::styled("!", theme.conflict));
        } else if let Some(first) = cell.events.first() {
            spans.push(Span::styled("\u{2022}", Style::default().fg(first.display_color())));
        }
        lines.push(Line::from(spans));
    } else {
        lines.push(Line::from(Span::styled(
            format!("{:>2}", cell.day.day()),
            number_style,
        )));
        if let Some(label) = conflict {
            lines.push(Line::from(Span::styled(
                format!("{:<width$}", truncate(&label, width)),
                theme.conflict,
            )));
        }
        if let Some(first) = cell.events.first() {
            let banner = Style::default()
                .fg(theme.event_fg)
                .bg(first.display_color())
                .add_modifier(Modifier::BOLD);
            lines.push(Line::from(Span::styled(
                format!("{:<width$}", truncate(&first.title, width)),
                banner,
            )));
            if cell.events.len() > 1 {
                let more = format!("+{} more", cell.events.len() - 1);
                lines.push(Line::from(Span::styled(truncate(&more, width), theme.dim)));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::calendar::{grid, CalendarEvent};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn buffer_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(width: u16, height: u16, events: &[CalendarEvent], marks: Highlights) -> (Buffer, HitMap) {
        let month = date(2024, 3, 1);
        let cells = grid::build(month, events);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut hit = HitMap::default();
        terminal
            .draw(|frame| {
                hit = MonthView::render(frame, frame.area(), month, &cells, marks);
            })
            .unwrap();
        (terminal.backend().buffer().clone(), hit)
    }

    fn marks() -> Highlights {
        Highlights {
            today: date(2024, 3, 15),
            selected: None,
            hovered: None,
        }
    }

    #[test]
    fn draws_title_weekdays_and_conflict_badge() {
        let events = vec![
            CalendarEvent::new("2024-03-05", "10:00", "Standup"),
            CalendarEvent::new("2024-03-05", "10:00", "Dentist"),
        ];
        let (buf, _) = draw(100, 40, &events, marks());
        let text = buffer_text(&buf);

        assert!(text.contains("March 2024"));
        assert!(text.contains("Sun"));
        assert!(text.contains("Sat"));
        assert!(text.contains("2 conflicts"));
        assert!(text.contains("Standup"));
        assert!(text.contains("+1 more"));
        assert!(text.contains("Prev"));
        assert!(text.contains("Next"));
    }

    #[test]
    fn no_badge_without_same_time_events() {
        let events = vec![
            CalendarEvent::new("2024-03-05", "10:00", "Standup"),
            CalendarEvent::new("2024-03-05", "11:00", "Dentist"),
        ];
        let (buf, _) = draw(100, 40, &events, marks());
        assert!(!buffer_text(&buf).contains("conflicts"));
    }

    #[test]
    fn hit_map_covers_every_cell_in_order() {
        let (_, hit) = draw(100, 40, &[], marks());
        assert_eq!(hit.cells.len(), 42);
        assert_eq!(hit.cells[0].0, date(2024, 2, 25));
        assert_eq!(hit.cells[41].0, date(2024, 4, 6));

        // Same row, left to right
        assert_eq!(hit.cells[0].1.y, hit.cells[6].1.y);
        assert!(hit.cells[0].1.x < hit.cells[1].1.x);
        // Next row below
        assert!(hit.cells[7].1.y > hit.cells[0].1.y);

        assert!(hit.prev.width > 0);
        assert!(hit.next.x > hit.prev.x);
    }

    #[test]
    fn selected_cell_uses_selected_border() {
        let mut m = marks();
        m.selected = Some(date(2024, 3, 5));
        let (buf, hit) = draw(100, 40, &[], m);

        let (_, rect) = hit
            .cells
            .iter()
            .find(|(d, _)| *d == date(2024, 3, 5))
            .copied()
            .unwrap();
        let corner = &buf[(rect.x, rect.y)];
        assert_eq!(corner.fg, theme::current().selected.fg.unwrap());
    }

    #[test]
    fn hover_background_skips_selected_cell() {
        let day = date(2024, 3, 5);
        let other = date(2024, 3, 6);
        let cell_bg = |m: Highlights, d: NaiveDate| {
            let (buf, hit) = draw(100, 40, &[], m);
            let (_, rect) = hit.cells.iter().find(|(c, _)| *c == d).copied().unwrap();
            buf[(rect.x + 1, rect.y + 1)].bg
        };

        let mut m = marks();
        m.hovered = Some(other);
        assert_eq!(Some(cell_bg(m, other)), theme::current().hover.bg);

        m.hovered = Some(day);
        m.selected = Some(day);
        assert_ne!(Some(cell_bg(m, day)), theme::current().hover.bg);
    }

    #[test]
    fn short_cells_fall_back_to_markers() {
        let events = vec![
            CalendarEvent::new("2024-03-05", "10:00", "a"),
            CalendarEvent::new("2024-03-05", "10:00", "b"),
        ];
        let (buf, _) = draw(70, 24, &events, marks());
        let text = buffer_text(&buf);
        assert!(text.contains(" 5!"));
    }
}
