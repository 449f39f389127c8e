use thiserror::Error;

/// Errors raised while walking the betting page and normalizing match times
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("missing {what} (selector `{selector}`)")]
    MissingElement { what: &'static str, selector: String },

    #[error("expected {expected} {what} elements (selector `{selector}`), found {found}")]
    StructuralMismatch {
        what: &'static str,
        selector: String,
        expected: usize,
        found: usize,
    },

    #[error("time parser encountered unspecified timeslot: {0:?}")]
    UnrecognizedTimeFormat(String),

    #[error("could not parse match time {phrase:?}")]
    InvalidTime {
        phrase: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("live event checking is enabled but no live indicator selector is configured")]
    MissingLiveSelector,
}
