//! Header names and well-known parameter names.

/// HTTP header names used by Accept-Events negotiation.
pub mod headers {
    use axum::http::HeaderName;

    /// Carries client preferences on requests and the server capability on
    /// responses.
    pub const ACCEPT_EVENTS: HeaderName = HeaderName::from_static("accept-events");
}

/// Quality-value parameter name.
pub const QUALITY_PARAM: &str = "q";

/// Quality assumed when a member carries no `q` parameter.
pub const DEFAULT_QUALITY: f64 = 1.0;

/// Diagnostic target for negotiation events.
pub const LOG_TARGET: &str = "accept_events";
