use serde::{Deserialize, Serialize};

/// One bettable pre-match tennis fixture as written to `output.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "eventDate")]
    pub event_date: String, // UTC, "YYYY-MM-DD HH:MM"
    #[serde(rename = "eventName")]
    pub event_name: String, // "{player1} vs {player2}"
    pub player1: String,
    pub player2: String,
    pub player1_odds: String,
    pub player2_odds: String,
    pub tournament: String,
    #[serde(rename = "lastUpdate")]
    pub last_update: String, // When the page was scraped
}

impl MatchRecord {
    pub fn format(&self) -> String {
        format!(
            "{} | {} | {} ({}) vs {} ({}) | {}",
            self.event_date,
            self.tournament,
            self.player1,
            self.player1_odds,
            self.player2,
            self.player2_odds,
            self.last_update
        )
    }
}

/// Records in page order: tournament by tournament, then match by match
pub type ScrapeResult = Vec<MatchRecord>;
