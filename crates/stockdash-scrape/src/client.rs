use crate::error::{Result, ScrapeError};
use reqwest::Client;
use std::future::Future;
use tracing::{debug, error, trace};

/// Yahoo turns away requests that don't look like they came from a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Build the HTTP client used for every outbound scrape.
///
/// ```rust,no_run
/// use stockdash_scrape::client::{self, DEFAULT_USER_AGENT};
///
/// let client = client::build(DEFAULT_USER_AGENT).expect("tls backend available");
/// ```
pub fn build(user_agent: &str) -> reqwest::Result<Client> {
    reqwest::ClientBuilder::new().user_agent(user_agent).build()
}

/// Anything that can hand back the body of a web page.
///
/// [`reqwest::Client`] is the real implementation; tests substitute fixed HTML.
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
pub trait PageSource {
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

impl PageSource for Client {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        trace!("GET {url}");
        let response = self.get(url).send().await.map_err(|e| {
            error!("request error: {e}\nURL: {url}");
            ScrapeError::Network {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("unexpected status {status}\nURL: {url}");
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| {
            error!("body read error: {e}\nURL: {url}");
            ScrapeError::Network {
                url: url.to_string(),
                source: e,
            }
        })?;
        debug!("{} bytes received from {url}", body.len());

        Ok(body)
    }
}
