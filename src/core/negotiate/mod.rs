//! The negotiation pipeline.
//!
//! [`Negotiator::negotiate`] is a pure function of the request method, path
//! and headers. It walks the gates in order and stops at the first one that
//! fails:
//!
//! ```text
//! method ─► route ─► (announce) ─► header ─► parse ─► normalize ─► protocols ─► sort
//! ```
//!
//! Every failure degrades to "no negotiated preference"; nothing here ever
//! returns an error to the caller. The axum layer in
//! [`server`](crate::core::server) applies the outcome to the request and
//! response.

mod filter;
mod normalize;
mod sort;

pub use filter::{retain_supported, AcceptAll, ProtocolList, ProtocolSupport, UrlSupport};
pub use normalize::{normalize, normalize_all};
pub use sort::{compare_preferences, sort_preferences};

use crate::core::config::ServerConfig;
use crate::core::protocol::constants::LOG_TARGET;
use crate::core::protocol::{read_accept_events, SfvListParser, StructuredListParser};
use crate::core::types::Preferences;
use axum::http::{HeaderMap, Method};
use std::fmt;
use std::sync::Arc;

/// Why no preference list was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The method is neither negotiated nor announced.
    MethodNotEligible,
    /// The route predicate rejected the path.
    RouteNotSupported,
    /// The request carries no `Accept-Events` header.
    HeaderAbsent,
    /// The header is not visible ASCII.
    HeaderUnreadable,
    /// The header is not a valid structured-field list.
    ParseFailed,
    /// No list member names a protocol.
    NoPreferences,
    /// The protocol predicate rejected every candidate.
    NoSupportedProtocols,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SkipReason::MethodNotEligible => "method not eligible",
            SkipReason::RouteNotSupported => "route not supported",
            SkipReason::HeaderAbsent => "no Accept-Events header",
            SkipReason::HeaderUnreadable => "unreadable Accept-Events header",
            SkipReason::ParseFailed => "Accept-Events header failed to parse",
            SkipReason::NoPreferences => "no protocols in Accept-Events header",
            SkipReason::NoSupportedProtocols => "no supported protocols",
        };
        f.write_str(msg)
    }
}

/// Outcome of negotiating one request.
#[derive(Clone, Debug, PartialEq)]
pub struct Negotiation {
    /// Whether the response should carry the `Accept-Events` capability
    /// header.
    pub announce: bool,
    /// Ranked preferences, present only when negotiation succeeded.
    pub preferences: Option<Preferences>,
    /// Set whenever `preferences` is `None`.
    pub skipped: Option<SkipReason>,
}

impl Negotiation {
    fn skip(announce: bool, reason: SkipReason) -> Self {
        Self {
            announce,
            preferences: None,
            skipped: Some(reason),
        }
    }

    fn ranked(announce: bool, preferences: Preferences) -> Self {
        Self {
            announce,
            preferences: Some(preferences),
            skipped: None,
        }
    }
}

/// Negotiation controller holding the immutable support configuration.
///
/// Cheap to clone; every strategy sits behind an `Arc`.
#[derive(Clone)]
pub struct Negotiator {
    config: ServerConfig,
    urls: Arc<dyn UrlSupport>,
    protocols: Arc<dyn ProtocolSupport>,
    parser: Arc<dyn StructuredListParser>,
}

impl Negotiator {
    /// Accepts every route and protocol with the default method policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            config,
            urls: Arc::new(AcceptAll),
            protocols: Arc::new(AcceptAll),
            parser: Arc::new(SfvListParser),
        }
    }

    /// Sets the route predicate.
    #[must_use]
    pub fn urls(mut self, urls: impl UrlSupport + 'static) -> Self {
        self.urls = Arc::new(urls);
        self
    }

    /// Sets the protocol predicate.
    #[must_use]
    pub fn protocols(mut self, protocols: impl ProtocolSupport + 'static) -> Self {
        self.protocols = Arc::new(protocols);
        self
    }

    /// Replaces the structured-field parser.
    #[must_use]
    pub fn parser(mut self, parser: impl StructuredListParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Runs the full negotiation for one request.
    #[must_use]
    pub fn negotiate(&self, method: &Method, path: &str, headers: &HeaderMap) -> Negotiation {
        let announce = self.config.announces(method);
        let negotiate = self.config.negotiates(method);
        if !announce && !negotiate {
            return Negotiation::skip(false, SkipReason::MethodNotEligible);
        }

        if !UrlSupport::is_supported(self.urls.as_ref(), path) {
            return Negotiation::skip(false, SkipReason::RouteNotSupported);
        }

        if !negotiate {
            return Negotiation::skip(announce, SkipReason::MethodNotEligible);
        }

        let raw = match read_accept_events(headers) {
            None => return Negotiation::skip(announce, SkipReason::HeaderAbsent),
            Some(Err(e)) => {
                tracing::debug!(target: LOG_TARGET, path, "{}", e);
                return Negotiation::skip(announce, SkipReason::HeaderUnreadable);
            }
            Some(Ok(raw)) => raw,
        };

        match self.rank(&raw, path) {
            Ok(preferences) => Negotiation::ranked(announce, preferences),
            Err(reason) => Negotiation::skip(announce, reason),
        }
    }

    /// Parses, normalizes, filters and sorts a raw `Accept-Events` value for
    /// `path`.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] of the first stage that left nothing to
    /// rank.
    pub fn rank(&self, raw: &str, path: &str) -> Result<Preferences, SkipReason> {
        let members = self.parser.parse_list(raw).map_err(|e| {
            tracing::debug!(target: LOG_TARGET, path, "{}", e);
            SkipReason::ParseFailed
        })?;

        let mut entries = normalize_all(members);
        if entries.is_empty() {
            tracing::debug!(target: LOG_TARGET, path, "No protocols specified in the Accept-Events header");
            return Err(SkipReason::NoPreferences);
        }

        retain_supported(&mut entries, self.protocols.as_ref(), path);
        Preferences::new(entries).ok_or_else(|| {
            tracing::debug!(target: LOG_TARGET, path, "No supported protocols in the Accept-Events header");
            SkipReason::NoSupportedProtocols
        })
    }
}

impl Default for Negotiator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Negotiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Negotiator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
