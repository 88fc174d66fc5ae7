use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use stockdash_scrape::{client, history, listing, DateRange};
use stockdash_web::cli::{Cli, Commands::*};
use stockdash_web::{serve, Settings};
use tracing::{trace, Level};

fn preprocess(trace_level: Level) {
    dotenv().ok();
    tracing_subscriber::fmt().with_max_level(trace_level).init();
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    preprocess(cli.trace.into());
    trace!("Command line input recorded: {cli:#?}");

    match cli.command {
        // "> stockdash serve [--host] [--port]"
        Serve { host, port } => serve(Settings::from_env(host, port)).await?,

        // "> stockdash symbols"
        Symbols => {
            let settings = Settings::from_env("127.0.0.1", 8050);
            let http = client::build(&settings.user_agent)?;
            for symbol in listing::fetch_symbols(&http, &settings.listing_url).await? {
                println!("{symbol}");
            }
        }

        // "> stockdash history AAPL 2020-01-01 2020-12-31"
        History { symbol, start, end } => {
            let settings = Settings::from_env("127.0.0.1", 8050);
            let range = DateRange::parse_iso(&start, &end)
                .ok_or_else(|| anyhow::anyhow!("dates must be YYYY-MM-DD, got {start} and {end}"))?;
            let http = client::build(&settings.user_agent)?;
            let series =
                history::fetch_history(&http, &settings.history_url, &symbol, &range).await?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
    }

    Ok(())
}
