use std::collections::{BTreeMap, BTreeSet};

use super::event::CalendarEvent;

/// True when at least two events in the cell start at the same time label.
///
/// Only identical clock times count; a 10:00-11:00 meeting and a 10:30
/// call are not flagged.
pub fn has_overlap(events: &[&CalendarEvent]) -> bool {
    events.len() > 1
        && events.iter().enumerate().any(|(i, event)| {
            events.iter().enumerate().any(|(j, other)| {
                i != j && event.time == other.time && event.date == other.date
            })
        })
}

/// Time labels held by more than one event, found in a single grouping pass.
pub fn conflicting_times<'a>(events: &[&'a CalendarEvent]) -> BTreeSet<&'a str> {
    let mut by_time: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for ev in events.iter().copied() {
        *by_time.entry((ev.date.as_str(), ev.time.as_str())).or_default() += 1;
    }
    by_time
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((_, time), _)| time)
        .collect()
}

/// Badge text for a cell with overlapping events.
pub fn conflict_label(events: &[&CalendarEvent]) -> Option<String> {
    has_overlap(events).then(|| format!("{} conflicts", events.len()))
}
