//! Negotiated event-protocol preferences.
//!
//! A [`Preference`] is one protocol named by the client in its
//! `Accept-Events` header, together with the parameters it attached. The
//! negotiation layer attaches a ranked, never-empty [`Preferences`] list to
//! the request extensions when at least one supported protocol survives.
//!
//! # Examples
//!
//! ```
//! use accept_events::{Preference, Preferences};
//!
//! let prefs = Preferences::new(vec![
//!     Preference::new("long-poll").with_quality(0.5),
//!     Preference::new("sse"),
//! ])
//! .unwrap();
//!
//! assert_eq!(prefs.best().protocol, "sse");
//! assert_eq!(prefs.protocols().collect::<Vec<_>>(), ["sse", "long-poll"]);
//! ```

use super::param::{write_sf_string, ParamValue, Parameters};
use crate::core::negotiate::sort_preferences;
use crate::core::protocol::constants::{DEFAULT_QUALITY, QUALITY_PARAM};
use serde::Serialize;
use std::fmt;

/// One candidate protocol expressed by the client.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Preference {
    /// Canonical protocol name. Never empty.
    pub protocol: String,
    /// Parameters in header order, `q` included.
    pub params: Parameters,
}

impl Preference {
    #[must_use]
    pub fn new(protocol: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            params: Parameters::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Sets the `q` parameter. Values are clamped to `[0, 1]`; NaN becomes `0`.
    #[must_use]
    pub fn with_quality(self, q: f64) -> Self {
        let q = if q.is_nan() { 0.0 } else { q.clamp(0.0, 1.0) + 0.0 };
        self.with_param(QUALITY_PARAM, ParamValue::Decimal(q))
    }

    /// Quality value from the `q` parameter, `1.0` when absent.
    #[inline]
    #[must_use]
    pub fn quality(&self) -> f64 {
        self.params
            .get(QUALITY_PARAM)
            .and_then(ParamValue::as_f64)
            .unwrap_or(DEFAULT_QUALITY)
    }

    /// Number of parameters other than `q`.
    #[inline]
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.params
            .keys()
            .filter(|name| name.as_str() != QUALITY_PARAM)
            .count()
    }

    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}

/// Renders the preference as a structured-field list member,
/// e.g. `sse;q=0.5;version=2`.
impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_token(&self.protocol) {
            f.write_str(&self.protocol)?;
        } else {
            write_sf_string(f, &self.protocol)?;
        }
        for (name, value) in &self.params {
            match value {
                ParamValue::Boolean(true) => write!(f, ";{}", name)?,
                _ => write!(f, ";{}={}", name, value)?,
            }
        }
        Ok(())
    }
}

pub(crate) fn is_token(s: &str) -> bool {
    sfv::Token::try_from(s.to_string()).is_ok()
}

/// Ranked preference list attached to a request.
///
/// Sorted by quality (descending), then specificity (descending); true ties
/// keep the order the client sent them in. Never empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Preferences(Vec<Preference>);

impl Preferences {
    /// Ranks `entries`. Returns `None` when there is nothing to rank.
    #[must_use]
    pub fn new(mut entries: Vec<Preference>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        sort_preferences(&mut entries);
        Some(Self(entries))
    }

    /// The most preferred protocol.
    #[inline]
    #[must_use]
    pub fn best(&self) -> &Preference {
        &self.0[0]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a list built through [`Preferences::new`].
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Preference> {
        self.0.iter()
    }

    /// Protocol names in rank order.
    pub fn protocols(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.protocol.as_str())
    }

    /// First-ranked entry for `protocol`, compared case-insensitively.
    #[must_use]
    pub fn find(&self, protocol: &str) -> Option<&Preference> {
        self.0
            .iter()
            .find(|p| p.protocol.eq_ignore_ascii_case(protocol))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Preference] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Preference> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Preferences {
    type Item = &'a Preference;
    type IntoIter = std::slice::Iter<'a, Preference>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders the list back into `Accept-Events` syntax.
impl fmt::Display for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pref) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", pref)?;
        }
        Ok(())
    }
}
