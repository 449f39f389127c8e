use crate::error::ScrapeError;
use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const TENNIS_URL: &str = "https://sports.bwin.com/en/sports/tennis-5/betting";

/// The betting site publishes kick-off times at UTC+1
const DEFAULT_SITE_OFFSET_SECS: i32 = 3600;

/// CSS selectors locating each piece of match data on the betting page.
///
/// Missing keys in a JSON override fall back to the production site's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    pub tournament_group: String,
    pub tournament_name: String,
    pub match_row: String,
    pub live_indicator: String,
    pub participant_name: String,
    pub time_widget: String,
    pub odds_container: String,
    pub odds_value: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            tournament_group:
                "ms-event-group[class='event-group collapsible ng-star-inserted']".to_string(),
            tournament_name: "div[class='title']".to_string(),
            match_row: "ms-event[class='grid-event ms-active-highlight ng-star-inserted']"
                .to_string(),
            live_indicator: "i[class='live-icon ng-star-inserted']".to_string(),
            participant_name: "div[class='participant']".to_string(),
            time_widget:
                "ms-prematch-timer[class='starting-time timer-badge ng-star-inserted']".to_string(),
            odds_container: "div[class='grid-group-container']".to_string(),
            odds_value: "div[class='option option-value ng-star-inserted']".to_string(),
        }
    }
}

impl SiteSelectors {
    /// Load a selector table from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read selector file {}", path.display()))?;
        serde_json::from_str(&json).context("Failed to deserialize selector table")
    }
}

/// What to do with a match whose markup or time phrase cannot be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole scrape on the first broken match
    #[default]
    Abort,
    /// Log the failure and move on to the next match
    SkipMatch,
}

/// Immutable settings for one scraper instance
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub url: String,
    pub selectors: SiteSelectors,
    pub check_for_live_event: bool,
    pub site_offset: FixedOffset,
    pub failure_policy: FailurePolicy,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url: TENNIS_URL.to_string(),
            selectors: SiteSelectors::default(),
            check_for_live_event: true,
            site_offset: FixedOffset::east_opt(DEFAULT_SITE_OFFSET_SECS).unwrap_or(Utc.fix()),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ScraperConfig {
    /// Validate the selector table and compile it for repeated queries
    pub fn compile_selectors(&self) -> Result<CompiledSelectors, ScrapeError> {
        let raw = &self.selectors;

        let live_indicator = if self.check_for_live_event {
            if raw.live_indicator.trim().is_empty() {
                return Err(ScrapeError::MissingLiveSelector);
            }
            Some(compile(&raw.live_indicator)?)
        } else {
            None
        };

        Ok(CompiledSelectors {
            tournament_group: compile(&raw.tournament_group)?,
            tournament_name: compile(&raw.tournament_name)?,
            match_row: compile(&raw.match_row)?,
            live_indicator,
            participant_name: compile(&raw.participant_name)?,
            time_widget: compile(&raw.time_widget)?,
            odds_container: compile(&raw.odds_container)?,
            odds_value: compile(&raw.odds_value)?,
        })
    }
}

/// Parsed form of [`SiteSelectors`]; `live_indicator` is `None` when live checking is off
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub tournament_group: Selector,
    pub tournament_name: Selector,
    pub match_row: Selector,
    pub live_indicator: Option<Selector>,
    pub participant_name: Selector,
    pub time_widget: Selector,
    pub odds_container: Selector,
    pub odds_value: Selector,
}

fn compile(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_compile() {
        let config = ScraperConfig::default();
        let compiled = config.compile_selectors().unwrap();
        assert!(compiled.live_indicator.is_some());
        assert_eq!(config.site_offset.local_minus_utc(), 3600);
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let mut config = ScraperConfig::default();
        config.selectors.odds_value = "div[class=".to_string();
        match config.compile_selectors() {
            Err(ScrapeError::InvalidSelector { selector, .. }) => assert_eq!(selector, "div[class="),
            other => panic!("expected InvalidSelector, got {:?}", other),
        }
    }

    #[test]
    fn test_live_check_requires_selector() {
        let mut config = ScraperConfig::default();
        config.selectors.live_indicator = String::new();
        assert!(matches!(
            config.compile_selectors(),
            Err(ScrapeError::MissingLiveSelector)
        ));

        config.check_for_live_event = false;
        let compiled = config.compile_selectors().unwrap();
        assert!(compiled.live_indicator.is_none());
    }

    #[test]
    fn test_partial_selector_override() {
        let path = std::env::temp_dir().join("tennis_odds_selectors_test.json");
        std::fs::write(&path, r#"{ "tournament_name": "h2.league" }"#).unwrap();

        let selectors = SiteSelectors::from_json_file(&path).unwrap();
        assert_eq!(selectors.tournament_name, "h2.league");
        assert_eq!(selectors.match_row, SiteSelectors::default().match_row);

        std::fs::remove_file(&path).ok();
    }
}
