//! Accept-Events negotiation.
//!
//! # Modules
//!
//! - [`protocol`] - header names, structured-field parsing and formatting
//! - [`types`] - `Preference`, `Preferences` and parameter values
//! - [`config`] - `ServerConfig` method policy
//! - [`negotiate`] - normalizer, support predicates, sorter and controller
//! - [`server`] - axum middleware and extractor

pub mod config;
pub mod error;
pub mod negotiate;
pub mod protocol;
pub mod server;
pub mod types;

pub use config::ServerConfig;
pub use error::{AcceptEventsError, Result};
pub use negotiate::{
    AcceptAll, Negotiation, Negotiator, ProtocolList, ProtocolSupport, SkipReason, UrlSupport,
};
pub use server::{AcceptEvents, AcceptEventsLayer};
pub use types::{ParamValue, Parameters, Preference, Preferences};
