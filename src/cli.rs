use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser};

use crate::calendar::grid;

#[derive(Parser, Debug, Clone)]
#[command(name = "month-calendar", version, about = "A month-view calendar for the terminal")]
pub struct Cli {
    /// JSON array of events ({date, time, duration, title, color}).
    /// Defaults to `events_file` from the config, then to bundled sample data.
    #[arg(long, value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// Month to open instead of the current one
    #[arg(long, value_name = "YYYY-MM", value_parser = parse_month)]
    pub month: Option<NaiveDate>,

    /// Config file (default: <config dir>/month-calendar/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate, String> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM, got {s:?}"))?;
    if !grid::can_build(first) {
        return Err(format!("month {s:?} is out of range"));
    }
    Ok(first)
}
