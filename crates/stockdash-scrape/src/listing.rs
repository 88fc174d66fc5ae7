use crate::client::PageSource;
use crate::error::{Result, ScrapeError};
use crate::table::first_table;
use crate::Symbol;
use tracing::{debug, error};

/// Yahoo's "most active" screener, first hundred rows.
pub const MOST_ACTIVE_URL: &str =
    "https://finance.yahoo.com/markets/stocks/most-active/?start=0&count=100";

/// Pull the `Symbol` column out of a listing page.
pub fn parse_symbols(html: &str) -> Result<Vec<Symbol>> {
    let table = first_table(html)?;
    let col = table.column("Symbol").ok_or_else(|| {
        ScrapeError::Parse(format!(
            "listing table has no Symbol column (headers: {:?})",
            table.headers
        ))
    })?;

    let symbols: Vec<Symbol> = table
        .rows
        .into_iter()
        .filter_map(|mut row| (col < row.len()).then(|| row.swap_remove(col)))
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(ScrapeError::Empty("symbols"));
    }
    Ok(symbols)
}

/// Fetch the listing page at `url` and return its symbols in page order.
pub async fn fetch_symbols<S: PageSource>(source: &S, url: &str) -> Result<Vec<Symbol>> {
    let html = source.fetch_page(url).await?;
    let symbols = parse_symbols(&html).map_err(|e| {
        error!("symbol listing unusable: {e}\nURL: {url}");
        e
    })?;
    debug!("{} symbols listed", symbols.len());
    Ok(symbols)
}
