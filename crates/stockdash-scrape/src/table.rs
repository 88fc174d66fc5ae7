use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use tracing::trace;

/// Text content of an HTML `<table>`, cell by cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of the header whose first word is `name`.
    ///
    /// Yahoo appends tooltip text to some headers (`Close Close price adjusted for splits.`),
    /// so only the leading word is compared.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.split_whitespace().next() == Some(name))
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("bad selector `{css}`: {e}")))
}

fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the first `<table>` found in `html`.
///
/// The first row made only of `<th>` cells, if it comes before any data row, becomes the
/// header; every row holding at least one `<td>` becomes a data row.
pub fn first_table(html: &str) -> Result<Table> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("th, td")?;
    let data_sel = selector("td")?;

    let table = document.select(&table_sel).next().ok_or(ScrapeError::NoTable)?;

    let mut parsed = Table::default();
    let mut seen_header = false;
    for tr in table.select(&row_sel) {
        let cells: Vec<String> = tr.select(&cell_sel).map(cell_text).collect();
        if cells.is_empty() {
            continue;
        }

        let is_header = tr.select(&data_sel).next().is_none();
        if is_header {
            if !seen_header && parsed.rows.is_empty() {
                parsed.headers = cells;
                seen_header = true;
            }
        } else {
            parsed.rows.push(cells);
        }
    }

    trace!(
        "table parsed: {} columns, {} rows",
        parsed.headers.len(),
        parsed.rows.len()
    );
    Ok(parsed)
}
