use anyhow::{Context, Result};
use scraper::{ElementRef, Selector};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A queryable node of a rendered betting page.
///
/// Implemented for `scraper` elements; a browser-driver backend only needs
/// to provide the same three lookups.
pub trait PageNode: Sized {
    /// All descendants matching `selector`, in document order
    fn find_all(&self, selector: &Selector) -> Vec<Self>;

    /// First descendant matching `selector`; `None` is an ordinary answer
    fn find_first(&self, selector: &Selector) -> Option<Self> {
        self.find_all(selector).into_iter().next()
    }

    /// Visible text with runs of whitespace collapsed
    fn text_content(&self) -> String;
}

impl<'a> PageNode for ElementRef<'a> {
    fn find_all(&self, selector: &Selector) -> Vec<Self> {
        self.select(selector).collect()
    }

    fn find_first(&self, selector: &Selector) -> Option<Self> {
        self.select(selector).next()
    }

    fn text_content(&self) -> String {
        let raw = self.text().collect::<String>();
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Where the betting page markup comes from
#[derive(Debug, Clone)]
pub enum PageSource {
    /// Fetch the page over HTTP
    Url(String),
    /// A page saved from a browser session
    File(PathBuf),
}

impl PageSource {
    pub async fn load(&self) -> Result<String> {
        match self {
            PageSource::Url(url) => fetch_page(url).await,
            PageSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read page file {}", path.display())),
        }
    }
}

impl fmt::Display for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSource::Url(url) => write!(f, "{}", url),
            PageSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the raw markup of the betting page
pub async fn fetch_page(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:103.0) Gecko/20100101 Firefox/103.0")
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to fetch betting page")?;

    if !response.status().is_success() {
        anyhow::bail!("Betting page returned error: {}", response.status());
    }

    let html = response.text().await?;
    debug!(bytes = html.len(), "Website successfully loaded");
    Ok(html)
}

/// Save the page markup so selector changes on the site can be inspected offline
pub fn write_html_for_debugging(markup: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, markup)
        .with_context(|| format!("Failed to write page dump {}", path.display()))
}
