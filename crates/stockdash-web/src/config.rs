use dotenv::var;
use stockdash_scrape::{client::DEFAULT_USER_AGENT, history::HISTORY_URL, listing::MOST_ACTIVE_URL};

/// Where the dashboard listens and which pages it scrapes.
///
/// The scrape targets and user agent can be overridden from the environment (or `.env`):
/// `USER_AGENT`, `LISTING_URL`, and `HISTORY_URL` (with a `{symbol}` placeholder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub user_agent: String,
    pub listing_url: String,
    pub history_url: String,
}

impl Settings {
    pub fn from_env(host: impl Into<String>, port: u16) -> Self {
        let or_default = |key: &str, default: &str| var(key).unwrap_or_else(|_| default.to_string());
        Settings {
            host: host.into(),
            port,
            user_agent: or_default("USER_AGENT", DEFAULT_USER_AGENT),
            listing_url: or_default("LISTING_URL", MOST_ACTIVE_URL),
            history_url: or_default("HISTORY_URL", HISTORY_URL),
        }
    }

    /// Root URL of the running dashboard, as a browser would open it.
    pub fn root_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "127.0.0.1".to_string(),
            port: 8050,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            listing_url: MOST_ACTIVE_URL.to_string(),
            history_url: HISTORY_URL.to_string(),
        }
    }
}
