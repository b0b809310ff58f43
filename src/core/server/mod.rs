//! Server-side Accept-Events support for axum.
//!
//! ```text
//! server/
//! ├── middleware  - AcceptEventsLayer
//! └── extract     - AcceptEvents extractor
//! ```
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AcceptEventsLayer`] | Axum middleware layer |
//! | [`AcceptEvents`] | Extractor for negotiated preferences |
//! | [`ServerConfig`] | Which methods negotiate and announce (re-exported from [`config`](crate::core::config)) |
//!
//! # Examples
//!
//! ```
//! use accept_events::{AcceptEvents, AcceptEventsLayer, ServerConfig};
//! use accept_events::protocol::set_announcement;
//! use axum::{response::IntoResponse, routing::get, Router};
//!
//! async fn events(AcceptEvents(prefs): AcceptEvents) -> impl IntoResponse {
//!     let mut headers = axum::http::HeaderMap::new();
//!     if prefs.is_some_and(|p| p.find("sse").is_some()) {
//!         set_announcement(&mut headers, ["sse"]).unwrap();
//!     }
//!     (headers, "events")
//! }
//!
//! let layer = AcceptEventsLayer::with_config(ServerConfig::default());
//! let app: Router = Router::new()
//!     .route("/events", get(events))
//!     .layer(layer.middleware());
//! ```

mod extract;
mod middleware;


pub use crate::core::config::ServerConfig;
pub use extract::AcceptEvents;
pub use middleware::AcceptEventsLayer;
