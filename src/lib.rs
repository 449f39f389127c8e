pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod scrapers;
pub mod utils;

pub use clock::ReferenceClock;
pub use config::{FailurePolicy, ScraperConfig, SiteSelectors};
pub use error::ScrapeError;
pub use models::*;
pub use scrapers::*;
pub use utils::*;
