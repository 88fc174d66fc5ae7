use crate::chart::Chart;
use crate::config::Settings;
use crate::controller::{Dashboard, Selection};
use actix_web::{http::StatusCode, middleware::Logger, web, App, HttpResponse, HttpServer, ResponseError};
use serde_json::json;
use stockdash_scrape::{client, listing, PageSource, ScrapeError};
use tera::{Context, Tera};
use tracing::{error, info};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Failures a route can hand back to the browser.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error("page rendering failed: {0}")]
    Template(#[from] tera::Error),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Scrape(e) => e.kind(),
            ApiError::Template(_) => "template",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Scrape(_) => StatusCode::BAD_GATEWAY,
            ApiError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        error!("{self}");
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }))
    }
}

/// The page templates, compiled once at startup.
pub fn templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", INDEX_TEMPLATE)?;
    Ok(tera)
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// The dashboard page: symbol dropdown, two date pickers, and the placeholder chart.
async fn index<S: PageSource + 'static>(
    dashboard: web::Data<Dashboard<S>>,
    tera: web::Data<Tera>,
) -> Result<HttpResponse, ApiError> {
    let today = chrono::Local::now().date_naive();

    let mut context = Context::new();
    context.insert("symbols", dashboard.symbols());
    context.insert("defaults", &dashboard.defaults(today));
    context.insert("placeholder", &Chart::placeholder());
    let body = tera.render("index.html", &context)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// Plotly figure for the current selection.
///
/// `GET /api/chart?symbol=AAPL&start=2020-01-01&end=2020-01-02`
async fn chart<S: PageSource + 'static>(
    dashboard: web::Data<Dashboard<S>>,
    selection: web::Query<Selection>,
) -> Result<HttpResponse, ApiError> {
    let chart = dashboard.recompute(&selection).await?;
    Ok(HttpResponse::Ok().json(chart))
}

/// The symbol list scraped at startup.
async fn symbols<S: PageSource + 'static>(dashboard: web::Data<Dashboard<S>>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.symbols())
}

/// Register the dashboard routes. The app must carry `web::Data<Dashboard<S>>` and
/// `web::Data<Tera>` (see [`templates`]).
pub fn routes<S: PageSource + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index::<S>))
        .route("/api/chart", web::get().to(chart::<S>))
        .route("/api/symbols", web::get().to(symbols::<S>));
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Scrape the symbol listing, then serve the dashboard until shut down.
///
/// A listing that can't be fetched or read stops startup; there is no fallback list.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let http = client::build(&settings.user_agent)?;

    info!("Scraping symbol listing from {}", settings.listing_url);
    let symbols = listing::fetch_symbols(&http, &settings.listing_url).await?;
    info!("{} symbols available", symbols.len());

    let dashboard = web::Data::new(Dashboard::new(http, symbols, settings.history_url.clone()));
    let tera = web::Data::new(templates()?);

    info!("Serving dashboard at {}", settings.root_url());
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(dashboard.clone())
            .app_data(tera.clone())
            .configure(routes::<reqwest::Client>)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    Ok(())
}
