use crate::clock::ReferenceClock;
use crate::config::{CompiledSelectors, FailurePolicy, ScraperConfig};
use crate::error::ScrapeError;
use crate::models::{MatchRecord, ScrapeResult};
use crate::scrapers::page::PageNode;
use crate::scrapers::time_parser::{normalize, TimeSlot};
use scraper::Html;
use tracing::{debug, info, warn};

/// Extracts pre-match tennis odds from the betting page
pub struct TennisScraper {
    config: ScraperConfig,
    selectors: CompiledSelectors,
    clock: ReferenceClock,
}

impl TennisScraper {
    pub fn new(config: ScraperConfig, clock: ReferenceClock) -> Result<Self, ScrapeError> {
        let selectors = config.compile_selectors()?;
        debug!(url = %config.url, "Initialised tennis scraper");
        Ok(Self {
            config,
            selectors,
            clock,
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn clock(&self) -> &ReferenceClock {
        &self.clock
    }

    /// Parse a full page of markup and extract every bettable match
    pub fn scrape_markup(&self, html: &str) -> Result<ScrapeResult, ScrapeError> {
        let document = Html::parse_document(html);
        self.extract(document.root_element())
    }

    /// Walk tournament groups under `root` and collect match records in page order
    pub fn extract<N: PageNode>(&self, root: N) -> Result<ScrapeResult, ScrapeError> {
        let tournaments = root.find_all(&self.selectors.tournament_group);
        let tournament_total = tournaments.len();
        let mut records = Vec::new();

        for (tournament_index, tournament) in tournaments.iter().enumerate() {
            let tournament_name = self.tournament_name(tournament)?;
            info!(
                "Scraping tournament {} out of {}: {}",
                tournament_index + 1,
                tournament_total,
                tournament_name
            );

            let matches = tournament.find_all(&self.selectors.match_row);
            let match_total = matches.len();

            for (match_index, event) in matches.iter().enumerate() {
                info!(
                    "Scraping match {} out of {} in this tournament",
                    match_index + 1,
                    match_total
                );

                match self.extract_match(event, &tournament_name) {
                    Ok(Some(record)) => records.push(record),
                    Ok(None) => {}
                    Err(e) => match self.config.failure_policy {
                        FailurePolicy::Abort => return Err(e),
                        FailurePolicy::SkipMatch => {
                            warn!(tournament = %tournament_name, error = %e, "Skipping unreadable match");
                        }
                    },
                }
            }
        }

        info!(records = records.len(), "Updating betting dataset");
        Ok(records)
    }

    /// Build a record for one match, or `None` when it is not bettable
    fn extract_match<N: PageNode>(
        &self,
        event: &N,
        tournament: &str,
    ) -> Result<Option<MatchRecord>, ScrapeError> {
        if self.is_live(event) {
            info!("Event match is live, skipping");
            return Ok(None);
        }

        // Starting now: betting is already closed
        let Some(event_date) = self.event_time(event)?.formatted() else {
            info!("Event match is starting now, skipping");
            return Ok(None);
        };

        let (player1, player2) = self.player_names(event)?;

        let Some((player1_odds, player2_odds)) = self.odds(event) else {
            warn!(%player1, %player2, "No available bets for this match");
            return Ok(None);
        };

        Ok(Some(MatchRecord {
            event_date,
            event_name: format!("{} vs {}", player1, player2),
            player1,
            player2,
            player1_odds,
            player2_odds,
            tournament: tournament.to_string(),
            last_update: self.clock.last_update(),
        }))
    }

    fn tournament_name<N: PageNode>(&self, tournament: &N) -> Result<String, ScrapeError> {
        tournament
            .find_first(&self.selectors.tournament_name)
            .map(|title| title.text_content())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ScrapeError::MissingElement {
                what: "tournament name",
                selector: self.config.selectors.tournament_name.clone(),
            })
    }

    /// A missing live indicator means the match has not started
    pub fn is_live<N: PageNode>(&self, event: &N) -> bool {
        self.selectors
            .live_indicator
            .as_ref()
            .is_some_and(|selector| event.find_first(selector).is_some())
    }

    pub fn event_time<N: PageNode>(&self, event: &N) -> Result<TimeSlot, ScrapeError> {
        let widget = event
            .find_first(&self.selectors.time_widget)
            .ok_or_else(|| ScrapeError::MissingElement {
                what: "match time",
                selector: self.config.selectors.time_widget.clone(),
            })?;

        normalize(&widget.text_content(), &self.clock, self.config.site_offset)
    }

    pub fn player_names<N: PageNode>(&self, event: &N) -> Result<(String, String), ScrapeError> {
        let names: Vec<String> = event
            .find_all(&self.selectors.participant_name)
            .iter()
            .map(PageNode::text_content)
            .collect();

        match names.as_slice() {
            [first, second] if !first.is_empty() && !second.is_empty() => {
                Ok((first.clone(), second.clone()))
            }
            [_, _] => Err(ScrapeError::MissingElement {
                what: "participant name",
                selector: self.config.selectors.participant_name.clone(),
            }),
            other => Err(ScrapeError::StructuralMismatch {
                what: "participant",
                selector: self.config.selectors.participant_name.clone(),
                expected: 2,
                found: other.len(),
            }),
        }
    }

    /// Both winner odds from the first odds group, or `None` when bets are unavailable
    pub fn odds<N: PageNode>(&self, event: &N) -> Option<(String, String)> {
        let container = event.find_first(&self.selectors.odds_container)?;
        let values: Vec<String> = container
            .find_all(&self.selectors.odds_value)
            .iter()
            .map(PageNode::text_content)
            .collect();

        match values.as_slice() {
            [first, second, ..] if !first.is_empty() && !second.is_empty() => {
                Some((first.clone(), second.clone()))
            }
            _ => None,
        }
    }
}
