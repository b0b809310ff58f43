//! Axum middleware for Accept-Events negotiation.

use crate::core::config::ServerConfig;
use crate::core::negotiate::{Negotiator, ProtocolSupport, UrlSupport};
use crate::core::protocol::constants::{headers::ACCEPT_EVENTS, LOG_TARGET};
use crate::core::protocol::StructuredListParser;
use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

async fn accept_events_middleware_handler(
    State(state): State<AcceptEventsLayer>,
    req: Request,
    next: Next,
) -> Response {
    state.handle_middleware(req, next).await
}

/// Axum middleware layer that negotiates `Accept-Events`.
///
/// On success the ranked [`Preferences`](crate::core::types::Preferences)
/// are inserted into the request extensions. The next stage always runs
/// exactly once, whatever the header contained.
///
/// # Examples
///
/// ```
/// use accept_events::{AcceptEventsLayer, ProtocolList};
/// use axum::{routing::get, Router};
///
/// let layer = AcceptEventsLayer::new()
///     .urls(|path: &str| path.starts_with("/events"))
///     .protocols(ProtocolList::new(["sse"]));
///
/// let app: Router = Router::new()
///     .route("/events", get(|| async { "ok" }))
///     .layer(layer.middleware());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AcceptEventsLayer {
    negotiator: Negotiator,
}

impl AcceptEventsLayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            negotiator: Negotiator::new(),
        }
    }

    #[must_use]
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            negotiator: Negotiator::with_config(config),
        }
    }

    /// Only negotiate on routes accepted by `urls`.
    #[must_use]
    pub fn urls(mut self, urls: impl UrlSupport + 'static) -> Self {
        self.negotiator = self.negotiator.urls(urls);
        self
    }

    /// Only keep protocols accepted by `protocols`.
    #[must_use]
    pub fn protocols(mut self, protocols: impl ProtocolSupport + 'static) -> Self {
        self.negotiator = self.negotiator.protocols(protocols);
        self
    }

    /// Use a different structured-field parser.
    #[must_use]
    pub fn parser(mut self, parser: impl StructuredListParser + 'static) -> Self {
        self.negotiator = self.negotiator.parser(parser);
        self
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        self.negotiator.config()
    }

    #[inline]
    #[must_use]
    pub fn negotiator(&self) -> &Negotiator {
        &self.negotiator
    }

    #[must_use]
    pub fn middleware(
        &self,
    ) -> impl tower::Layer<
        axum::routing::Route,
        Service = impl tower::Service<
            Request,
            Response = Response,
            Error = std::convert::Infallible,
            Future = impl Send + 'static,
        > + Clone
                      + Send
                      + Sync
                      + 'static,
    > + Clone
           + Send
           + Sync
           + 'static {
        axum::middleware::from_fn_with_state(self.clone(), accept_events_middleware_handler)
    }

    async fn handle_middleware(&self, mut req: Request, next: Next) -> Response {
        let negotiation = self
            .negotiator
            .negotiate(req.method(), req.uri().path(), req.headers());

        if let Some(preferences) = negotiation.preferences {
            tracing::trace!(
                target: LOG_TARGET,
                path = req.uri().path(),
                "Negotiated Accept-Events: {}",
                preferences
            );
            req.extensions_mut().insert(preferences);
        }

        let mut response = next.run(req).await;

        if negotiation.announce {
            // Protocol handlers may already have filled the header in.
            response
                .headers_mut()
                .entry(ACCEPT_EVENTS)
                .or_insert(HeaderValue::from_static(""));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::negotiate::ProtocolList;
    use axum::http::Method;

    #[test]
    fn test_layer_new_uses_default_config() {
        let layer = AcceptEventsLayer::new();
        assert_eq!(layer.config(), &ServerConfig::default());
    }

    #[test]
    fn test_layer_with_config() {
        let layer = AcceptEventsLayer::with_config(ServerConfig::permissive());
        assert!(layer.config().negotiates(&Method::POST));
    }

    #[test]
    fn test_layer_default() {
        let layer: AcceptEventsLayer = Default::default();
        assert!(layer.config().announces(&Method::HEAD));
    }

    #[test]
    fn test_layer_predicates_reach_negotiator() {
        let layer = AcceptEventsLayer::new()
            .urls(|path: &str| path == "/events")
            .protocols(ProtocolList::new(["sse"]));

        let mut headers = axum::http::HeaderMap::new();
        headers.insert(ACCEPT_EVENTS, HeaderValue::from_static("poll, sse"));

        let n = layer.negotiator().negotiate(&Method::GET, "/events", &headers);
        assert_eq!(n.preferences.unwrap().best().protocol, "sse");

        let n = layer.negotiator().negotiate(&Method::GET, "/other", &headers);
        assert!(!n.announce);
    }

    #[test]
    fn test_layer_clone_shares_config() {
        let layer = AcceptEventsLayer::with_config(ServerConfig::permissive());
        let cloned = layer.clone();
        assert_eq!(layer.config(), cloned.config());
    }
}
