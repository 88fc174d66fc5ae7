use crate::chart::Chart;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockdash_scrape::{history, DateRange, PageSource, ScrapeError, Symbol};
use tracing::{debug, trace};

/// Symbol picked on first load, when the listing has it.
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// What the page's three inputs currently hold, exactly as the browser sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub symbol: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// A selection is either incomplete (nothing to plot) or names a symbol and two dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Empty,
    Loaded { symbol: Symbol, range: DateRange },
}

fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Selection {
    pub fn new(symbol: &str, start: &str, end: &str) -> Self {
        Selection {
            symbol: Some(symbol.to_string()),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }

    /// Missing, blank or malformed fields all land in [`State::Empty`].
    pub fn state(&self) -> State {
        let complete = filled(&self.symbol).zip(filled(&self.start).zip(filled(&self.end)));
        match complete {
            Some((symbol, (start, end))) => match DateRange::parse_iso(start, end) {
                Some(range) => State::Loaded {
                    symbol: symbol.to_string(),
                    range,
                },
                None => State::Empty,
            },
            None => State::Empty,
        }
    }
}

/// Initial values and bounds for the page's inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDefaults {
    pub symbol: Option<Symbol>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

/// Turns selections into charts.
///
/// Holds the symbol list fetched at startup and a [`PageSource`] for history pages. Nothing
/// else is kept between calls; each [`recompute`](Dashboard::recompute) starts from scratch.
#[derive(Debug)]
pub struct Dashboard<S> {
    source: S,
    symbols: Vec<Symbol>,
    history_url: String,
}

impl<S: PageSource> Dashboard<S> {
    pub fn new(source: S, symbols: Vec<Symbol>, history_url: impl Into<String>) -> Self {
        Dashboard {
            source,
            symbols,
            history_url: history_url.into(),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn defaults(&self, today: NaiveDate) -> FormDefaults {
        let symbol = self
            .symbols
            .iter()
            .find(|s| s.as_str() == DEFAULT_SYMBOL)
            .or_else(|| self.symbols.first())
            .cloned();

        FormDefaults {
            symbol,
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(today),
            end: today,
            min_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(today),
            max_date: today,
        }
    }

    /// Rebuild the chart for `selection`.
    ///
    /// An incomplete selection gives the placeholder without touching the network; a complete
    /// one fetches the history page and plots it. Fetch and parse failures are returned as is.
    pub async fn recompute(&self, selection: &Selection) -> Result<Chart, ScrapeError> {
        match selection.state() {
            State::Empty => {
                trace!("incomplete selection {selection:?}; showing placeholder");
                Ok(Chart::placeholder())
            }
            State::Loaded { symbol, range } => {
                let series =
                    history::fetch_history(&self.source, &self.history_url, &symbol, &range)
                        .await?;
                debug!(
                    "[{symbol}] chart rebuilt with {} points ({} to {})",
                    series.len(),
                    range.start,
                    range.end
                );
                Ok(Chart::line(&symbol, &series))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdash_scrape::history::{history_url, HISTORY_URL};
    use stockdash_scrape::testing::StaticPages;

    const ONE_DAY: &str = r#"
        <table>
          <tr><th>Date</th><th>Open</th><th>High</th><th>Low</th><th>Close</th><th>Adj Close</th><th>Volume</th></tr>
          <tr><td>Jan 2, 2020</td><td>74.06</td><td>75.15</td><td>73.80</td><td>75.09</td><td>73.11</td><td>135,480,400</td></tr>
        </table>"#;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dashboard(pages: StaticPages) -> Dashboard<StaticPages> {
        Dashboard::new(
            pages,
            vec!["NVDA".into(), "AAPL".into(), "TSLA".into()],
            HISTORY_URL,
        )
    }

    fn page_for(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        history_url(HISTORY_URL, symbol, &DateRange::new(start, end))
    }

    #[test]
    fn incomplete_selections_are_empty() {
        let cases = [
            Selection::default(),
            Selection {
                symbol: None,
                ..Selection::new("", "2020-01-01", "2020-01-02")
            },
            Selection::new("  ", "2020-01-01", "2020-01-02"),
            Selection::new("AAPL", "", "2020-01-02"),
            Selection {
                end: None,
                ..Selection::new("AAPL", "2020-01-01", "")
            },
            Selection::new("AAPL", "01/01/2020", "2020-01-02"),
        ];
        for selection in cases {
            assert_eq!(selection.state(), State::Empty, "{selection:?}");
        }
    }

    #[test]
    fn complete_selection_is_loaded() {
        let state = Selection::new("AAPL", "2020-01-01", "2020-01-02").state();
        assert_eq!(
            state,
            State::Loaded {
                symbol: "AAPL".into(),
                range: DateRange::new(ymd(2020, 1, 1), ymd(2020, 1, 2)),
            }
        );
    }

    #[test]
    fn defaults_prefer_aapl() {
        let today = ymd(2026, 10, 18);
        let defaults = dashboard(StaticPages::new()).defaults(today);
        assert_eq!(defaults.symbol.as_deref(), Some("AAPL"));
        assert_eq!(defaults.start, ymd(2020, 1, 1));
        assert_eq!(defaults.end, today);
        assert_eq!(defaults.min_date, ymd(2000, 1, 1));
        assert_eq!(defaults.max_date, today);

        let other = Dashboard::new(StaticPages::new(), vec!["NVDA".into()], HISTORY_URL);
        assert_eq!(other.defaults(today).symbol.as_deref(), Some("NVDA"));
    }

    #[tokio::test]
    async fn empty_state_never_fetches() {
        let pages = StaticPages::new();
        let dash = dashboard(pages.clone());

        let chart = dash
            .recompute(&Selection::new("AAPL", "2020-01-01", ""))
            .await
            .unwrap();

        assert!(chart.is_placeholder());
        assert_eq!(chart.points(), 0);
        assert!(pages.requests().is_empty());
    }

    #[tokio::test]
    async fn loaded_chart_is_titled_with_the_symbol() {
        let url = page_for("AAPL", ymd(2020, 1, 1), ymd(2020, 1, 2));
        let dash = dashboard(StaticPages::new().with_page(&url, ONE_DAY));

        let chart = dash
            .recompute(&Selection::new("AAPL", "2020-01-01", "2020-01-02"))
            .await
            .unwrap();

        assert_eq!(chart.title(), "Stock Prices: AAPL");
        assert_eq!(chart.data[0].x, vec![ymd(2020, 1, 2)]);
        assert_eq!(chart.data[0].y, vec![Some(73.11)]);
    }

    #[tokio::test]
    async fn same_start_and_end_gives_at_most_one_entry() {
        let day = ymd(2020, 1, 2);
        let url = page_for("AAPL", day, day);
        let dash = dashboard(StaticPages::new().with_page(&url, ONE_DAY));

        let chart = dash
            .recompute(&Selection::new("AAPL", "2020-01-02", "2020-01-02"))
            .await
            .unwrap();

        assert!(chart.points() <= 1);
    }

    #[tokio::test]
    async fn recompute_is_idempotent() {
        let url = page_for("AAPL", ymd(2020, 1, 1), ymd(2020, 1, 2));
        let pages = StaticPages::new().with_page(&url, ONE_DAY);
        let dash = dashboard(pages.clone());
        let selection = Selection::new("AAPL", "2020-01-01", "2020-01-02");

        let first = dash.recompute(&selection).await.unwrap();
        let second = dash.recompute(&selection).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(pages.requests().len(), 2);
        assert_eq!(dash.symbols(), ["NVDA", "AAPL", "TSLA"]);
    }

    #[tokio::test]
    async fn fetch_failures_reach_the_caller() {
        let dash = dashboard(StaticPages::new());
        let err = dash
            .recompute(&Selection::new("ZZZZ", "2020-01-01", "2020-01-02"))
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }
}
