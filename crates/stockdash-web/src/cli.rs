use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing
    #[arg(long, value_enum, ignore_case = true, default_value = "INFO")]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape the symbol listing and serve the dashboard.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8050)]
        port: u16,
    },

    /// Print the "most active" symbols, one per line.
    Symbols,

    /// Print the price history of one symbol as JSON.
    History {
        symbol: String,

        /// ISO date, e.g. 2020-01-01
        start: String,

        /// ISO date, e.g. 2020-12-31
        end: String,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<TraceLevel> for tracing::Level {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::DEBUG => tracing::Level::DEBUG,
            TraceLevel::INFO => tracing::Level::INFO,
            TraceLevel::WARN => tracing::Level::WARN,
            TraceLevel::ERROR => tracing::Level::ERROR,
        }
    }
}
