pub mod page;
pub mod tennis;
pub mod time_parser;

pub use page::{PageNode, PageSource};
pub use tennis::TennisScraper;
pub use time_parser::TimeSlot;
