//! Reading and writing the `Accept-Events` header.

use super::constants::headers::ACCEPT_EVENTS;
use crate::core::error::{AcceptEventsError, Result};
use crate::core::types::is_token;
use axum::http::{HeaderMap, HeaderValue};

/// Reads the request `Accept-Events` header.
///
/// Returns `None` when the header is absent. Multiple header lines are
/// combined with `", "`, which is equivalent for list-valued fields.
///
/// # Errors
///
/// Returns [`AcceptEventsError::HeaderParse`] when a header line is not
/// visible ASCII.
pub fn read_accept_events(headers: &HeaderMap) -> Option<Result<String>> {
    let mut values = headers.get_all(ACCEPT_EVENTS).iter().peekable();
    values.peek()?;

    let joined = values
        .map(|value| {
            value
                .to_str()
                .map_err(|e| AcceptEventsError::HeaderParse(format!("Unreadable header: {}", e)))
        })
        .collect::<Result<Vec<_>>>()
        .map(|lines| lines.join(", "));
    Some(joined)
}

/// Formats protocol names as an `Accept-Events` response value.
///
/// Names that are valid tokens are written bare, anything else as a quoted
/// string.
///
/// # Examples
///
/// ```
/// use accept_events::protocol::format_announcement;
///
/// assert_eq!(format_announcement(["sse", "web push"]), "sse, \"web push\"");
/// ```
pub fn format_announcement<I, S>(protocols: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    protocols
        .into_iter()
        .map(|p| {
            let p = p.as_ref();
            if is_token(p) {
                p.to_string()
            } else {
                format!("\"{}\"", p.replace('\\', "\\\\").replace('"', "\\\""))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fills the `Accept-Events` response header with the given protocols.
///
/// This is the hook for protocol-specific handlers; it replaces the empty
/// placeholder the negotiation layer would otherwise set.
///
/// # Errors
///
/// Returns [`AcceptEventsError::Config`] when a protocol name cannot be
/// carried in a header value.
pub fn set_announcement<I, S>(headers: &mut HeaderMap, protocols: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let value = HeaderValue::from_str(&format_announcement(protocols))
        .map_err(|e| AcceptEventsError::Config(format!("Invalid protocol name: {}", e)))?;
    headers.insert(ACCEPT_EVENTS, value);
    Ok(())
}
