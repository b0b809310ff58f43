//! Server-side support predicates.
//!
//! Two strategies decide what the server is willing to negotiate:
//!
//! - [`UrlSupport`] gates whole routes. It is consulted once per eligible
//!   request, before the request header is looked at.
//! - [`ProtocolSupport`] gates individual protocols on a route.
//!
//! Both are implemented for plain closures, so most callers never name
//! these traits:
//!
//! ```
//! use accept_events::AcceptEventsLayer;
//!
//! let layer = AcceptEventsLayer::new()
//!     .urls(|path: &str| path.starts_with("/events"))
//!     .protocols(|protocol: &str, _path: &str| protocol == "sse");
//! ```

use crate::core::types::Preference;

/// Decides whether a route takes part in negotiation.
pub trait UrlSupport: Send + Sync {
    fn is_supported(&self, path: &str) -> bool;
}

/// Decides whether a protocol can be served on a route.
pub trait ProtocolSupport: Send + Sync {
    fn is_supported(&self, protocol: &str, path: &str) -> bool;
}

impl<F> UrlSupport for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_supported(&self, path: &str) -> bool {
        self(path)
    }
}

impl<F> ProtocolSupport for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn is_supported(&self, protocol: &str, path: &str) -> bool {
        self(protocol, path)
    }
}

/// Accepts every route and every protocol.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl UrlSupport for AcceptAll {
    fn is_supported(&self, _path: &str) -> bool {
        true
    }
}

impl ProtocolSupport for AcceptAll {
    fn is_supported(&self, _protocol: &str, _path: &str) -> bool {
        true
    }
}

/// Accepts a fixed set of protocol names on every route, compared
/// case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct ProtocolList {
    protocols: Vec<String>,
}

impl ProtocolList {
    pub fn new<I, S>(protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            protocols: protocols
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.protocols.iter().map(String::as_str)
    }
}

impl ProtocolSupport for ProtocolList {
    fn is_supported(&self, protocol: &str, _path: &str) -> bool {
        self.protocols
            .iter()
            .any(|p| p.eq_ignore_ascii_case(protocol))
    }
}

/// Removes entries the protocol gate rejects for `path`.
pub fn retain_supported(
    entries: &mut Vec<Preference>,
    support: &dyn ProtocolSupport,
    path: &str,
) {
    entries.retain(|pref| ProtocolSupport::is_supported(support, &pref.protocol, path));
}
