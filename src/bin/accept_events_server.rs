//! # accept-events-server
//!
//! Small demo server for the Accept-Events layer. Routes under `/events`
//! take part in negotiation and echo the ranked preferences as JSON;
//! `/health` is excluded by the route predicate.
//!
//! ```bash
//! accept-events-server --listen 127.0.0.1:3000 --protocol sse --protocol long-poll
//! curl -i -H 'Accept-Events: sse;q=0.9, long-poll;q=0.1' localhost:3000/events/feed
//! ```

use accept_events::protocol::set_announcement;
use accept_events::{AcceptEvents, AcceptEventsLayer, ProtocolList, ServerConfig};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "accept-events-server")]
#[command(about = "Demo server negotiating the Accept-Events header")]
struct Cli {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    listen: String,

    /// Protocols the server supports (repeatable)
    #[arg(short, long = "protocol", default_values_t = ["sse".to_string(), "long-poll".to_string()])]
    protocols: Vec<String>,

    /// Methods whose Accept-Events header is negotiated
    #[arg(long, value_delimiter = ',', default_value = "GET")]
    negotiate: Vec<String>,

    /// Methods whose responses announce the capability
    #[arg(long, value_delimiter = ',', default_value = "GET,HEAD")]
    announce: Vec<String>,
}

async fn events(
    axum::extract::State(supported): axum::extract::State<Arc<ProtocolList>>,
    AcceptEvents(prefs): AcceptEvents,
) -> impl IntoResponse {
    let Some(prefs) = prefs else {
        return (StatusCode::OK, HeaderMap::new(), Json(serde_json::json!([])));
    };

    let mut headers = HeaderMap::new();
    if let Err(e) = set_announcement(&mut headers, supported.iter()) {
        tracing::warn!("Could not announce protocols: {}", e);
    }
    tracing::info!("Negotiated {} for {}", prefs.best().protocol, prefs);

    let body = serde_json::to_value(&prefs).unwrap_or_default();
    (StatusCode::OK, headers, Json(body))
}

async fn health() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,accept_events=debug")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_method_names(&cli.negotiate, &cli.announce)?;
    let supported = Arc::new(ProtocolList::new(cli.protocols.clone()));

    let layer = AcceptEventsLayer::with_config(config)
        .urls(|path: &str| path.starts_with("/events"))
        .protocols(ProtocolList::new(cli.protocols));

    let app = Router::new()
        .route("/events", get(events))
        .route("/events/{*rest}", get(events))
        .route("/health", get(health))
        .with_state(supported)
        .layer(layer.middleware());

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    tracing::info!("Listening on {}", cli.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
