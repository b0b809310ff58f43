//! accept-events: `Accept-Events` header negotiation for axum servers.
//!
//! A client lists the event-delivery protocols it understands in a
//! structured `Accept-Events` request header:
//!
//! ```text
//! Accept-Events: sse;q=0.9, "web-push";q=0.5;vapid=?1, long-poll;q=0.1
//! ```
//!
//! [`AcceptEventsLayer`] parses that list, drops members it cannot use,
//! keeps the protocols the server supports on the requested route, ranks
//! them by quality value and then by number of parameters, and attaches the
//! result to the request as [`Preferences`]. Eligible responses receive an
//! empty `Accept-Events` header that protocol handlers may fill in.
//!
//! Malformed input never fails a request: the handler simply sees no
//! preferences.
//!
//! ```
//! use accept_events::{AcceptEvents, AcceptEventsLayer, ProtocolList};
//! use axum::{routing::get, Router};
//!
//! async fn events(AcceptEvents(prefs): AcceptEvents) -> String {
//!     prefs
//!         .map(|p| p.best().protocol.clone())
//!         .unwrap_or_else(|| "none".to_string())
//! }
//!
//! let app: Router = Router::new().route("/events", get(events)).layer(
//!     AcceptEventsLayer::new()
//!         .protocols(ProtocolList::new(["sse", "long-poll"]))
//!         .middleware(),
//! );
//! ```

pub mod core;

pub use crate::core::config::ServerConfig;
pub use crate::core::error::{AcceptEventsError, Result};
pub use crate::core::negotiate::{
    AcceptAll, Negotiation, Negotiator, ProtocolList, ProtocolSupport, SkipReason, UrlSupport,
};
pub use crate::core::protocol;
pub use crate::core::server::{AcceptEvents, AcceptEventsLayer};
pub use crate::core::types::{ParamValue, Parameters, Preference, Preferences};
