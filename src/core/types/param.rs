//! Parameter values carried by an `Accept-Events` list member.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Ordered parameter map of a list member. Insertion order is the order the
/// parameters appeared in the header.
pub type Parameters = IndexMap<String, ParamValue>;

/// A parameter value as sent by the client, one variant per
/// structured-field bare item type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Token(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    ByteSequence(Vec<u8>),
    /// Seconds since the Unix epoch.
    Date(i64),
    DisplayString(String),
}

impl ParamValue {
    /// Numeric view of the value, used for `q`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Integer(i) => Some(*i as f64),
            ParamValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Textual view of string and token values.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) | ParamValue::Token(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the value in structured-field syntax.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => write_sf_string(f, s),
            ParamValue::Token(t) => f.write_str(t),
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Decimal(d) => {
                // Structured-field decimals carry at most three fractional digits.
                let rendered = format!("{:.3}", d);
                let trimmed = rendered.trim_end_matches('0');
                if trimmed.ends_with('.') {
                    write!(f, "{}0", trimmed)
                } else {
                    f.write_str(trimmed)
                }
            }
            ParamValue::Boolean(b) => f.write_str(if *b { "?1" } else { "?0" }),
            ParamValue::ByteSequence(bytes) => write!(f, ":{}:", STANDARD.encode(bytes)),
            ParamValue::Date(secs) => write!(f, "@{}", secs),
            ParamValue::DisplayString(s) => write_sf_display_string(f, s),
        }
    }
}

pub(crate) fn write_sf_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("\"")
}

fn write_sf_display_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("%\"")?;
    for byte in s.bytes() {
        match byte {
            b'%' | b'"' => write!(f, "%{:02x}", byte)?,
            0x20..=0x7e => write!(f, "{}", byte as char)?,
            _ => write!(f, "%{:02x}", byte)?,
        }
    }
    f.write_str("\"")
}
