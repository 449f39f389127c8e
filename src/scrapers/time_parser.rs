use crate::clock::{format_timestamp, ReferenceClock};
use crate::error::ScrapeError;
use chrono::{DateTime, Days, Duration, FixedOffset, NaiveTime, TimeZone, Utc};
use tracing::{debug, warn};

const STARTING_IN: &str = "Starting in";
const TODAY: &str = "Today";
const TOMORROW: &str = "Tomorrow";
const STARTING_NOW: &str = "Starting now";

/// Wall-clock time as printed by the site, e.g. "3:15 PM"
const WALL_CLOCK_FORMAT: &str = "%I:%M %p";

/// Outcome of normalizing a match time phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    Scheduled(DateTime<Utc>),
    /// The match is about to begin and can no longer be bet on
    Skip,
}

impl TimeSlot {
    /// `YYYY-MM-DD HH:MM` in UTC, or `None` for [`TimeSlot::Skip`]
    pub fn formatted(&self) -> Option<String> {
        match self {
            TimeSlot::Scheduled(at) => Some(format_timestamp(at)),
            TimeSlot::Skip => None,
        }
    }
}

/// Convert a site time phrase into a UTC start time.
///
/// Recognized phrases, checked in this order:
/// - `Starting in 12 min` → clock instant plus the minutes
/// - `Today / 3:15 PM` → site wall-clock time on the clock's local date
/// - `Tomorrow / 3:15 PM` → same, one day later
/// - `Starting now` → [`TimeSlot::Skip`]
///
/// Wall-clock times are read in `site_offset` and converted to UTC.
pub fn normalize(
    phrase: &str,
    clock: &ReferenceClock,
    site_offset: FixedOffset,
) -> Result<TimeSlot, ScrapeError> {
    debug!(phrase, "Parsing match time");

    if phrase.contains(STARTING_IN) {
        return starting_in(phrase, clock).map(TimeSlot::Scheduled);
    }
    if phrase.contains(TODAY) {
        return site_wall_clock(phrase, TODAY, 0, clock, site_offset).map(TimeSlot::Scheduled);
    }
    if phrase.contains(TOMORROW) {
        return site_wall_clock(phrase, TOMORROW, 1, clock, site_offset).map(TimeSlot::Scheduled);
    }
    if phrase.contains(STARTING_NOW) {
        return Ok(TimeSlot::Skip);
    }

    warn!(phrase, "Time parser encountered unspecified timeslot");
    Err(ScrapeError::UnrecognizedTimeFormat(phrase.to_string()))
}

fn starting_in(phrase: &str, clock: &ReferenceClock) -> Result<DateTime<Utc>, ScrapeError> {
    first_number(phrase)
        .and_then(Duration::try_minutes)
        .and_then(|offset| clock.utc().checked_add_signed(offset))
        .ok_or_else(|| ScrapeError::UnrecognizedTimeFormat(phrase.to_string()))
}

/// First maximal run of ASCII digits, e.g. 1 for "Starting in 1 day 2 hrs"
fn first_number(phrase: &str) -> Option<i64> {
    let digits: String = phrase
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn site_wall_clock(
    phrase: &str,
    marker: &str,
    days_ahead: u64,
    clock: &ReferenceClock,
    site_offset: FixedOffset,
) -> Result<DateTime<Utc>, ScrapeError> {
    let time = NaiveTime::parse_from_str(wall_clock_text(phrase, marker), WALL_CLOCK_FORMAT)
        .map_err(|source| ScrapeError::InvalidTime {
            phrase: phrase.to_string(),
            source,
        })?;

    clock
        .local_date()
        .checked_add_days(Days::new(days_ahead))
        .map(|date| date.and_time(time))
        .and_then(|local| site_offset.from_local_datetime(&local).single())
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| ScrapeError::UnrecognizedTimeFormat(phrase.to_string()))
}

/// "Today / 3:15 PM" → "3:15 PM"
fn wall_clock_text<'a>(phrase: &'a str, marker: &str) -> &'a str {
    phrase
        .split_once(marker)
        .map_or(phrase, |(_, rest)| rest)
        .trim_start_matches(|c: char| c == '/' || c.is_whitespace())
        .trim_end()
}
