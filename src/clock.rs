use chrono::{DateTime, Local, NaiveDate, Utc};

/// Minute precision, no zone suffix. UTC by convention.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Snapshot of "now" taken once at the start of a scrape session.
///
/// The UTC instant resolves "Starting in N min" phrases and stamps every
/// record's `lastUpdate`; the local calendar date anchors "Today" and
/// "Tomorrow" phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceClock {
    utc: DateTime<Utc>,
    local_date: NaiveDate,
}

impl ReferenceClock {
    pub fn now() -> Self {
        Self {
            utc: Utc::now(),
            local_date: Local::now().date_naive(),
        }
    }

    pub fn new(utc: DateTime<Utc>, local_date: NaiveDate) -> Self {
        Self { utc, local_date }
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    pub fn local_date(&self) -> NaiveDate {
        self.local_date
    }

    /// The `lastUpdate` stamp shared by every record of the session
    pub fn last_update(&self) -> String {
        format_timestamp(&self.utc)
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
