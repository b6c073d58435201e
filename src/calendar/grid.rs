use chrono::{Datelike, Days, Months, NaiveDate};

use super::event::CalendarEvent;

/// One square of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    /// ISO `YYYY-MM-DD`, the key events are matched against.
    pub date: String,
    pub day: NaiveDate,
    pub current_month: bool,
    pub events: Vec<&'a CalendarEvent>,
}

impl<'a> DayCell<'a> {
    fn new(day: NaiveDate, current_month: bool, events: &'a [CalendarEvent]) -> Self {
        let date = day.format("%Y-%m-%d").to_string();
        let events = lookup(&date, events);
        Self {
            date,
            day,
            current_month,
            events,
        }
    }
}

/// Build the day cells for the month containing `month_anchor`.
///
/// The grid starts on the Sunday on or before the 1st, padded with the tail
/// of the previous month, and is filled with the head of the following month
/// until the last week is complete. The result is always a whole number of
/// weeks in strictly ascending date order.
/// Whether every cell of the month around `anchor` is a representable date:
/// up to six leading days and six trailing days of the next month.
pub fn can_build(anchor: NaiveDate) -> bool {
    let first = first_of_month(anchor);
    first.checked_sub_days(Days::new(6)).is_some()
        && first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.checked_add_days(Days::new(6)))
            .is_some()
}

pub fn build<'a>(month_anchor: NaiveDate, events: &'a [CalendarEvent]) -> Vec<DayCell<'a>> {
    let first = first_of_month(month_anchor);
    let first_weekday = first.weekday().num_days_from_sunday() as u64;
    let days_in_month = days_in_month(first.year(), first.month()) as u64;

    let mut days = Vec::with_capacity(42);

    // Previous month's days
    for back in (1..=first_weekday).rev() {
        days.push(DayCell::new(first - Days::new(back), false, events));
    }

    // Current month's days
    for offset in 0..days_in_month {
        days.push(DayCell::new(first + Days::new(offset), true, events));
    }

    // Next month's days
    let next_first = first + Months::new(1);
    let mut offset = 0;
    while days.len() % 7 != 0 {
        days.push(DayCell::new(next_first + Days::new(offset), false, events));
        offset += 1;
    }

    days
}

/// Events whose `date` is exactly `date`, in source order.
pub fn lookup<'a>(date: &str, events: &'a [CalendarEvent]) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|ev| ev.date == date).collect()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}
