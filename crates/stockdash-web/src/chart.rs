use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockdash_scrape::PriceSeries;

/// Every chart is drawn at this size.
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;

pub const PLACEHOLDER_TITLE: &str = "Loading Data...";

/// A Plotly figure: `{"data": [...], "layout": {...}}`.
///
/// The browser passes it straight to `Plotly.react`, so field names follow plotly.js.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: String,
    pub mode: String,
    pub x: Vec<NaiveDate>,
    /// `null` in JSON where the adjusted close was missing; Plotly leaves a gap.
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub width: u32,
    pub height: u32,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    /// 0.5 centres the title.
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub gridcolor: String,
    pub zerolinecolor: String,
}

impl Layout {
    /// Shared look for every chart: fixed size, centred title, white background with pale
    /// grid lines (Plotly's `plotly_white`).
    pub fn standard(title: impl Into<String>) -> Self {
        let axis = Axis {
            gridcolor: "#EBF0F8".to_string(),
            zerolinecolor: "#EBF0F8".to_string(),
        };
        Layout {
            title: Title {
                text: title.into(),
                x: 0.5,
            },
            width: WIDTH,
            height: HEIGHT,
            paper_bgcolor: "white".to_string(),
            plot_bgcolor: "white".to_string(),
            xaxis: axis.clone(),
            yaxis: axis,
        }
    }
}

impl Trace {
    fn line(x: Vec<NaiveDate>, y: Vec<Option<f64>>) -> Self {
        Trace {
            kind: "scatter".to_string(),
            mode: "lines".to_string(),
            x,
            y,
        }
    }
}

impl Chart {
    /// Shown while the selection is incomplete: one empty line trace.
    pub fn placeholder() -> Self {
        Chart {
            data: vec![Trace::line(vec![], vec![])],
            layout: Layout::standard(PLACEHOLDER_TITLE),
        }
    }

    /// Date against adjusted close, in series order.
    pub fn line(symbol: &str, series: &PriceSeries) -> Self {
        let (x, y) = series.iter().map(|row| (row.date, row.adj_close)).unzip();
        Chart {
            data: vec![Trace::line(x, y)],
            layout: Layout::standard(format!("Stock Prices: {symbol}")),
        }
    }

    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// Total number of points across all traces.
    pub fn points(&self) -> usize {
        self.data.iter().map(|t| t.x.len()).sum()
    }

    pub fn is_placeholder(&self) -> bool {
        self.title() == PLACEHOLDER_TITLE && self.points() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdash_scrape::PriceRow;

    fn row(d: u32, adj_close: Option<f64>) -> PriceRow {
        PriceRow {
            date: NaiveDate::from_ymd_opt(2020, 1, d).unwrap(),
            open: None,
            high: None,
            low: None,
            close: None,
            adj_close,
            volume: None,
        }
    }

    #[test]
    fn placeholder_has_no_points() {
        let chart = Chart::placeholder();
        assert_eq!(chart.data.len(), 1);
        assert_eq!(chart.points(), 0);
        assert_eq!(chart.title(), "Loading Data...");
        assert!(chart.is_placeholder());
    }

    #[test]
    fn line_plots_adjusted_close_by_date() {
        let chart = Chart::line("MSFT", &vec![row(3, Some(2.0)), row(2, None)]);
        assert_eq!(chart.title(), "Stock Prices: MSFT");
        assert_eq!(chart.points(), 2);
        assert_eq!(chart.data[0].y, vec![Some(2.0), None]);
        assert!(!chart.is_placeholder());
    }

    #[test]
    fn serializes_as_plotly_figure() {
        let chart = Chart::line("AAPL", &vec![row(2, Some(73.11)), row(3, None)]);
        let json = serde_json::to_value(&chart).unwrap();

        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["mode"], "lines");
        assert_eq!(json["data"][0]["x"][0], "2020-01-02");
        assert_eq!(json["data"][0]["y"][1], serde_json::Value::Null);
        assert_eq!(json["layout"]["title"]["text"], "Stock Prices: AAPL");
        assert_eq!(json["layout"]["title"]["x"], 0.5);
        assert_eq!(json["layout"]["width"], 800);
        assert_eq!(json["layout"]["height"], 600);
    }
}
