//! Method eligibility for Accept-Events negotiation.
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `negotiate_methods` | `GET` | Methods whose `Accept-Events` request header is read |
//! | `announce_methods` | `GET`, `HEAD` | Methods whose responses carry the capability header |
//!
//! # Examples
//!
//! ```
//! use accept_events::ServerConfig;
//! use axum::http::Method;
//!
//! let config = ServerConfig::default();
//! assert!(config.negotiates(&Method::GET));
//! assert!(config.announces(&Method::HEAD));
//! assert!(!config.negotiates(&Method::HEAD));
//!
//! let config = ServerConfig::from_method_names(["GET", "POST"], ["GET"]).unwrap();
//! assert!(config.negotiates(&Method::POST));
//! ```

use crate::core::error::{AcceptEventsError, Result};
use axum::http::Method;
use serde::{Deserialize, Deserializer};

/// Which request methods take part in negotiation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Methods whose `Accept-Events` request header is parsed.
    #[serde(deserialize_with = "deserialize_methods")]
    pub negotiate_methods: Vec<Method>,

    /// Methods whose responses receive the empty `Accept-Events` placeholder.
    #[serde(deserialize_with = "deserialize_methods")]
    pub announce_methods: Vec<Method>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            negotiate_methods: vec![Method::GET],
            announce_methods: vec![Method::GET, Method::HEAD],
        }
    }
}

impl ServerConfig {
    /// Negotiates and announces on both `GET` and `POST`.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            negotiate_methods: vec![Method::GET, Method::POST],
            announce_methods: vec![Method::GET, Method::POST],
        }
    }

    /// Builds a configuration from method names.
    ///
    /// # Errors
    ///
    /// Returns [`AcceptEventsError::Config`] for a name that is not a valid
    /// HTTP method token.
    pub fn from_method_names<N, A, S, T>(negotiate: N, announce: A) -> Result<Self>
    where
        N: IntoIterator<Item = S>,
        A: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Ok(Self {
            negotiate_methods: parse_methods(negotiate)?,
            announce_methods: parse_methods(announce)?,
        })
    }

    #[inline]
    #[must_use]
    pub fn negotiates(&self, method: &Method) -> bool {
        self.negotiate_methods.contains(method)
    }

    #[inline]
    #[must_use]
    pub fn announces(&self, method: &Method) -> bool {
        self.announce_methods.contains(method)
    }
}

fn parse_methods<I, S>(names: I) -> Result<Vec<Method>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.as_ref().trim().to_ascii_uppercase();
            Method::from_bytes(name.as_bytes())
                .map_err(|_| AcceptEventsError::Config(format!("Invalid method: {:?}", name)))
        })
        .collect()
}

fn deserialize_methods<'de, D>(deserializer: D) -> std::result::Result<Vec<Method>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    parse_methods(names).map_err(serde::de::Error::custom)
}
