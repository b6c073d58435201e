use chrono::{Datelike, Local, Months, NaiveDate};
use ratatui::layout::{Position, Rect};
use tracing::debug;

use crate::calendar::{grid, CalendarEvent, DayCell, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// What put the hover where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverSource {
    #[default]
    Keyboard,
    Mouse,
}

/// Screen areas from the last frame, used to resolve mouse positions.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub cells: Vec<(NaiveDate, Rect)>,
    pub prev: Rect,
    pub next: Rect,
}

pub struct App {
    pub running: bool,
    pub today: NaiveDate,
    /// Month anchor: any date inside the displayed month.
    pub current_date: NaiveDate,
    pub hovered_date: Option<NaiveDate>,
    pub hover_source: HoverSource,
    pub selected_date: Option<NaiveDate>,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub hit_map: HitMap,
    pub store: Store,
}

impl App {
    pub fn new(store: Store, today: NaiveDate, anchor: Option<NaiveDate>) -> Self {
        Self {
            running: true,
            today,
            current_date: anchor.unwrap_or(today),
            hovered_date: None,
            hover_source: HoverSource::default(),
            selected_date: None,
            show_help: false,
            status_message: None,
            hit_map: HitMap::default(),
            store,
        }
    }

    pub fn grid(&self) -> Vec<DayCell<'_>> {
        grid::build(self.current_date, self.store.events())
    }

    pub fn change_month(&mut self, direction: Direction) {
        let months = Months::new(1);
        let shifted = match direction {
            Direction::Previous => self.current_date.checked_sub_months(months),
            Direction::Next => self.current_date.checked_add_months(months),
        };
        let Some(shifted) = shifted.filter(|d| grid::can_build(*d)) else {
            debug!(month = %self.current_date.format("%Y-%m"), ?direction, "no month beyond calendar range");
            return;
        };
        self.current_date = shifted;
        self.follow_anchor();
        debug!(month = %self.current_date.format("%Y-%m"), ?direction, "changed month");
    }

    pub fn next_month(&mut self) {
        self.change_month(Direction::Next);
    }

    pub fn prev_month(&mut self) {
        self.change_month(Direction::Previous);
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.current_date = self.today;
        self.follow_anchor();
    }

    /// After the anchor moves, the keyboard cursor jumps to it. A mouse hover
    /// is dropped: the pointer now sits over a different day, which is only
    /// known again once the pointer moves.
    fn follow_anchor(&mut self) {
        match (self.hovered_date, self.hover_source) {
            (None, _) => {}
            (Some(_), HoverSource::Keyboard) => self.hovered_date = Some(self.current_date),
            (Some(_), HoverSource::Mouse) => self.hovered_date = None,
        }
    }

    pub fn in_displayed_month(&self, date: NaiveDate) -> bool {
        date.year() == self.current_date.year() && date.month() == self.current_date.month()
    }

    /// Move the keyboard cursor by `days`, following it into the next or
    /// previous month when it leaves the displayed one.
    pub fn move_cursor(&mut self, days: i64) {
        let start = self.cursor_origin();
        let Some(target) = start
            .checked_add_signed(chrono::Duration::days(days))
            .filter(|d| grid::can_build(*d))
        else {
            return;
        };
        self.hover(Some(target));
        if !self.in_displayed_month(target) {
            self.current_date = target;
        }
    }

    fn cursor_origin(&self) -> NaiveDate {
        self.hovered_date
            .or(self.selected_date.filter(|d| self.in_displayed_month(*d)))
            .unwrap_or(if self.in_displayed_month(self.today) {
                self.today
            } else {
                grid::first_of_month(self.current_date)
            })
    }

    /// Keyboard hover.
    pub fn hover(&mut self, date: Option<NaiveDate>) {
        self.hovered_date = date;
        self.hover_source = HoverSource::Keyboard;
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
        debug!(date = %date, "selected date");
    }

    pub fn select_hovered(&mut self) {
        let date = self.cursor_origin();
        self.hover(Some(date));
        self.select(date);
    }

    pub fn clear_selection(&mut self) {
        self.selected_date = None;
    }

    pub fn hovered_events(&self) -> Vec<&CalendarEvent> {
        match self.hovered_date {
            Some(date) => grid::lookup(&date.format("%Y-%m-%d").to_string(), self.store.events()),
            None => Vec::new(),
        }
    }

    pub fn cell_at(&self, column: u16, row: u16) -> Option<NaiveDate> {
        let pos = Position::new(column, row);
        self.hit_map
            .cells
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(date, _)| *date)
    }

    pub fn mouse_moved(&mut self, column: u16, row: u16) {
        self.hovered_date = self.cell_at(column, row);
        self.hover_source = HoverSource::Mouse;
    }

    pub fn mouse_clicked(&mut self, column: u16, row: u16) {
        let pos = Position::new(column, row);
        if self.hit_map.prev.contains(pos) {
            self.prev_month();
        } else if self.hit_map.next.contains(pos) {
            self.next_month();
        } else if let Some(date) = self.cell_at(column, row) {
            self.select(date);
        }
    }
}
