//! Scrapers for the stock dashboard: the "most active" symbol listing and per-symbol price
//! history, both read out of HTML tables on Yahoo Finance.
//!
//! ```rust,no_run
//! use stockdash_scrape::{client, history, listing, DateRange};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let http = client::build(client::DEFAULT_USER_AGENT)?;
//! let symbols = listing::fetch_symbols(&http, listing::MOST_ACTIVE_URL).await?;
//! let range = DateRange::parse_iso("2020-01-01", "2020-01-31").expect("valid dates");
//! let series = history::fetch_history(&http, history::HISTORY_URL, &symbols[0], &range).await?;
//! # Ok(())
//! # }
//! ```
pub mod client;
pub mod error;
pub mod history;
pub mod listing;
pub mod table;
pub mod testing;

pub use crate::client::PageSource;
pub use crate::error::ScrapeError;
pub use crate::history::{DateRange, PriceRow, PriceSeries};

/// Stock ticker, e.g. `AAPL`. Taken verbatim from the listing page.
pub type Symbol = String;
