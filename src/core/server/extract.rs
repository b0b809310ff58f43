//! Handler-side access to negotiated preferences.

use crate::core::types::Preferences;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Extracts the preferences attached by
/// [`AcceptEventsLayer`](super::AcceptEventsLayer).
///
/// Never rejects: `None` means nothing was negotiated for this request.
///
/// ```
/// use accept_events::AcceptEvents;
///
/// async fn handler(AcceptEvents(prefs): AcceptEvents) -> String {
///     match prefs {
///         Some(prefs) => format!("best: {}", prefs.best().protocol),
///         None => "plain response".to_string(),
///     }
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AcceptEvents(pub Option<Preferences>);

impl AcceptEvents {
    /// Returns `true` when the client listed `protocol` and it survived
    /// negotiation.
    #[must_use]
    pub fn wants(&self, protocol: &str) -> bool {
        self.0
            .as_ref()
            .is_some_and(|prefs| prefs.find(protocol).is_some())
    }
}

impl<S> FromRequestParts<S> for AcceptEvents
where
    S: Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AcceptEvents(parts.extensions.get::<Preferences>().cloned()))
    }
}
