//! Error types for Accept-Events negotiation.
//!
//! None of these errors ever reaches an HTTP client. They are produced by the
//! structured-field parser and the protocol normalizer, and the negotiation
//! controller turns every one of them into "no negotiated preference".
//!
//! | Variant | Raised by | Scope |
//! |---------|-----------|-------|
//! | `HeaderParse` | [`StructuredListParser`](crate::core::protocol::StructuredListParser) | whole header |
//! | `InvalidProtocol` | normalizer | one list member |
//! | `InvalidQuality` | normalizer | one list member |
//! | `Config` | [`ServerConfig`](crate::core::config::ServerConfig) builders | setup time |
//!
//! # Examples
//!
//! ```
//! use accept_events::AcceptEventsError;
//!
//! let err = AcceptEventsError::InvalidQuality("q=1.5".into());
//! assert!(err.is_entry_level());
//! assert!(err.to_string().contains("q=1.5"));
//! ```

use thiserror::Error;

/// Result type for Accept-Events operations.
pub type Result<T> = std::result::Result<T, AcceptEventsError>;

/// Errors that can occur while reading an `Accept-Events` header.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AcceptEventsError {
    /// The header value is not a syntactically valid structured-field list.
    #[error("Header parse error: {0}")]
    HeaderParse(String),

    /// A list member cannot name a protocol (inner list, number or empty
    /// string).
    #[error("Invalid protocol: {0}")]
    InvalidProtocol(String),

    /// The `q` parameter is not a number or lies outside `[0, 1]`.
    #[error("Invalid quality value: {0}")]
    InvalidQuality(String),

    /// Invalid configuration supplied when building the layer.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AcceptEventsError {
    /// Returns `true` when the error invalidates a single list member rather
    /// than the whole header.
    #[inline]
    #[must_use]
    pub fn is_entry_level(&self) -> bool {
        matches!(
            self,
            AcceptEventsError::InvalidProtocol(_) | AcceptEventsError::InvalidQuality(_)
        )
    }
}
