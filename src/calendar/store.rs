use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use super::event::CalendarEvent;

/// Sample data compiled into the binary, used when no events file is given.
const BUNDLED_EVENTS: &str = include_str!("../../data/events.json");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read events file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("events data is not a JSON array of events")]
    Parse(#[from] serde_json::Error),
}

/// Why a record was kept out of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEvent {
    #[error("missing date")]
    MissingDate,
    #[error("date {0:?} is not YYYY-MM-DD")]
    InvalidDate(String),
    #[error("missing time")]
    MissingTime,
    #[error("time {0:?} is not HH:MM")]
    InvalidTime(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quarantined {
    /// Position of the record in the source array.
    pub index: usize,
    pub title: Option<String>,
    pub reason: InvalidEvent,
}

impl fmt::Display for Quarantined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record #{}", self.index)?;
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            write!(f, " {title:?}")?;
        }
        write!(f, ": {}", self.reason)
    }
}

// ── JSON record ──

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct EventRecord {
    date: Option<String>,
    time: Option<String>,
    duration: Option<String>,
    title: Option<String>,
    color: Option<String>,
}

impl EventRecord {
    fn into_event(self) -> Result<CalendarEvent, (Option<String>, InvalidEvent)> {
        let Some(date) = self.date else {
            return Err((self.title, InvalidEvent::MissingDate));
        };
        let Some(time) = self.time else {
            return Err((self.title, InvalidEvent::MissingTime));
        };

        let event = CalendarEvent {
            date,
            time,
            duration: self.duration.unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            color: self.color.filter(|c| !c.trim().is_empty()),
        };

        if !event.has_canonical_date() {
            return Err((self.title, InvalidEvent::InvalidDate(event.date)));
        }
        if event.parsed_time().is_none() {
            return Err((self.title, InvalidEvent::InvalidTime(event.time)));
        }
        Ok(event)
    }
}

/// Read-only event source, loaded once before the first frame.
#[derive(Debug, Clone, Default)]
pub struct Store {
    events: Vec<CalendarEvent>,
    quarantined: Vec<Quarantined>,
    source: Option<PathBuf>,
}

impl Store {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut store = Self::from_json(&content)?;
        store.source = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            events = store.events.len(),
            quarantined = store.quarantined.len(),
            "loaded events file"
        );
        Ok(store)
    }

    pub fn bundled() -> Result<Self, StoreError> {
        let store = Self::from_json(BUNDLED_EVENTS)?;
        info!(events = store.events.len(), "loaded bundled sample events");
        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let records: Vec<EventRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    fn from_records(records: Vec<EventRecord>) -> Self {
        let mut events = Vec::with_capacity(records.len());
        let mut quarantined = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            match record.into_event() {
                Ok(event) => events.push(event),
                Err((title, reason)) => {
                    let skipped = Quarantined { index, title, reason };
                    warn!(record = %skipped, "skipping event record");
                    quarantined.push(skipped);
                }
            }
        }

        Self {
            events,
            quarantined,
            source: None,
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn quarantined(&self) -> &[Quarantined] {
        &self.quarantined
    }

    /// File the events came from, `None` for bundled or in-memory data.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of events dated within the given month.
    pub fn count_in_month(&self, year: i32, month: u32) -> usize {
        let prefix = format!("{:04}-{:02}-", year, month);
        self.events
            .iter()
            .filter(|e| e.date.starts_with(&prefix))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_full_records() {
        let store = Store::from_json(
            r##"[
                {"date": "2024-03-05", "time": "10:00", "duration": "1h",
                 "title": "Planning", "color": "#3b82f6"}
            ]"##,
        )
        .unwrap();

        assert_eq!(store.events().len(), 1);
        let ev = &store.events()[0];
        assert_eq!(ev.date, "2024-03-05");
        assert_eq!(ev.time, "10:00");
        assert_eq!(ev.duration, "1h");
        assert_eq!(ev.title, "Planning");
        assert_eq!(ev.color.as_deref(), Some("#3b82f6"));
        assert!(store.quarantined().is_empty());
    }

    #[test]
    fn quarantines_malformed_records_and_keeps_the_rest() {
        let store = Store::from_json(
            r#"[
                {"time": "10:00", "title": "no date"},
                {"date": "2024-03-05", "title": "no time"},
                {"date": "2024-3-5", "time": "10:00", "title": "unpadded"},
                {"date": "2024-02-30", "time": "10:00", "title": "bad day"},
                {"date": "2024-03-05", "time": "10am", "title": "bad time"},
                {"date": "2024-03-06", "time": "11:00", "title": "good"}
            ]"#,
        )
        .unwrap();

        assert_eq!(store.events().len(), 1);
        assert_eq!(store.events()[0].title, "good");

        let reasons: Vec<&InvalidEvent> = store.quarantined().iter().map(|q| &q.reason).collect();
        assert_eq!(
            reasons,
            [
                &InvalidEvent::MissingDate,
                &InvalidEvent::MissingTime,
                &InvalidEvent::InvalidDate("2024-3-5".to_string()),
                &InvalidEvent::InvalidDate("2024-02-30".to_string()),
                &InvalidEvent::InvalidTime("10am".to_string()),
            ]
        );
        assert_eq!(store.quarantined()[2].index, 2);
        assert_eq!(store.quarantined()[2].title.as_deref(), Some("unpadded"));
    }

    #[test]
    fn quarantined_record_describes_itself() {
        let store = Store::from_json(
            r#"[
                {"date": "2024-03-05", "title": "Lunch"},
                {"date": "03/05/2024", "time": "10:00"}
            ]"#,
        )
        .unwrap();
        let text: Vec<String> = store.quarantined().iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            [
                r#"record #0 "Lunch": missing time"#,
                r#"record #1: date "03/05/2024" is not YYYY-MM-DD"#,
            ]
        );
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let store = Store::from_json(r#"[{"date": "2024-03-05", "time": "10:00", "color": ""}]"#)
            .unwrap();
        let ev = &store.events()[0];
        assert_eq!(ev.title, "");
        assert_eq!(ev.duration, "");
        assert_eq!(ev.color, None);
    }

    #[test]
    fn rejects_non_array_json() {
        assert!(matches!(
            Store::from_json(r#"{"events": []}"#),
            Err(StoreError::Parse(_))
        ));
        assert!(matches!(Store::from_json("not json"), Err(StoreError::Parse(_))));
    }

    #[test]
    fn empty_array_is_an_empty_calendar() {
        let store = Store::from_json("[]").unwrap();
        assert!(store.events().is_empty());
        assert!(store.quarantined().is_empty());
    }

    #[test]
    fn loads_from_file_and_remembers_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"date": "2024-03-05", "time": "10:00", "title": "From disk"}}]"#
        )
        .unwrap();

        let store = Store::load(file.path()).unwrap();
        assert_eq!(store.events()[0].title, "From disk");
        assert_eq!(store.source(), Some(file.path()));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = Store::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn bundled_sample_is_valid_and_has_a_conflict() {
        let store = Store::bundled().unwrap();
        assert!(!store.events().is_empty());
        assert!(store.quarantined().is_empty());
        assert_eq!(store.source(), None);

        let mut seen = std::collections::HashSet::new();
        let has_clash = store
            .events()
            .iter()
            .any(|e| !seen.insert((e.date.as_str(), e.time.as_str())));
        assert!(has_clash);
    }

    #[test]
    fn counts_events_per_month() {
        let store = Store::from_json(
            r#"[
                {"date": "2024-03-05", "time": "10:00"},
                {"date": "2024-03-31", "time": "10:00"},
                {"date": "2024-04-01", "time": "10:00"}
            ]"#,
        )
        .unwrap();
        assert_eq!(store.count_in_month(2024, 3), 2);
        assert_eq!(store.count_in_month(2024, 4), 1);
        assert_eq!(store.count_in_month(2024, 5), 0);
    }
}
