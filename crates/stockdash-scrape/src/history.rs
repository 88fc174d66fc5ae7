use crate::client::PageSource;
use crate::error::{Result, ScrapeError};
use crate::table::first_table;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Historical prices from Yahoo Finance, per ticker
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// History page template; `{symbol}` is substituted per request.
pub const HISTORY_URL: &str = "https://finance.yahoo.com/quote/{symbol}/history/";

/// Formats Yahoo (and people) write dates in.
const DATE_FORMATS: [&str; 3] = ["%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Calendar bounds of a history request. `start <= end` is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Both dates as ISO `YYYY-MM-DD`; `None` if either is malformed.
    pub fn parse_iso(start: &str, end: &str) -> Option<Self> {
        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d").ok()?;
        Some(DateRange { start, end })
    }

    /// Unix seconds at UTC midnight of `start` and `end`.
    pub fn epoch_bounds(&self) -> (i64, i64) {
        let midnight = |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc().timestamp();
        (midnight(self.start), midnight(self.end))
    }
}

/// One row of the history table. `None` marks a cell that didn't hold a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
}

/// Rows in the order the page lists them (Yahoo: newest first).
pub type PriceSeries = Vec<PriceRow>;

// -------------------------------------------------------------------------------------------------

pub fn history_url(template: &str, symbol: &str, range: &DateRange) -> String {
    let (period1, period2) = range.epoch_bounds();
    let base = template.replace("{symbol}", symbol);
    format!("{base}?period1={period1}&period2={period2}")
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell.trim(), fmt).ok())
}

fn strip_thousands(cell: &str) -> String {
    cell.trim().replace(',', "")
}

/// Best-effort float; anything unparseable (or non-finite) is missing.
pub fn coerce_f64(cell: &str) -> Option<f64> {
    strip_thousands(cell)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub fn coerce_volume(cell: &str) -> Option<u64> {
    strip_thousands(cell).parse::<u64>().ok()
}

/// Turn a history page into a price series.
///
/// Columns are read by position: date, open, high, low, close, adj close, volume. Short rows
/// (dividend and split notices span several columns) leave the trailing fields missing.
pub fn parse_history(html: &str) -> Result<PriceSeries> {
    let table = first_table(html)?;

    table
        .rows
        .iter()
        .map(|row| {
            let date = parse_date(&row[0])
                .ok_or_else(|| ScrapeError::Parse(format!("unreadable date `{}`", row[0])))?;
            let num = |i: usize| row.get(i).and_then(|c| coerce_f64(c));
            Ok(PriceRow {
                date,
                open: num(1),
                high: num(2),
                low: num(3),
                close: num(4),
                adj_close: num(5),
                volume: row.get(6).and_then(|c| coerce_volume(c)),
            })
        })
        .collect()
}

/// Fetch and parse the history of `symbol` over `range`.
pub async fn fetch_history<S: PageSource>(
    source: &S,
    template: &str,
    symbol: &str,
    range: &DateRange,
) -> Result<PriceSeries> {
    let url = history_url(template, symbol, range);
    trace!("fetching price history for [{symbol}] {} to {}", range.start, range.end);

    let html = source.fetch_page(&url).await?;
    let series = parse_history(&html).map_err(|e| {
        error!("[{symbol}] price history unusable: {e}\nURL: {url}");
        e
    })?;

    debug!("[{symbol}] {} price rows", series.len());
    Ok(series)
}
