//! Turns parsed list members into [`Preference`] entries.

use crate::core::error::{AcceptEventsError, Result};
use crate::core::protocol::constants::{LOG_TARGET, QUALITY_PARAM};
use crate::core::protocol::{ListMember, PrimaryValue};
use crate::core::types::{ParamValue, Preference};

/// Normalizes one list member.
///
/// The primary value must be a non-empty string literal or a token. A `q`
/// parameter must be numeric and within `[0, 1]`; it is stored back as a
/// decimal. Other parameters pass through untouched.
///
/// # Errors
///
/// [`AcceptEventsError::InvalidProtocol`] or
/// [`AcceptEventsError::InvalidQuality`]; both only invalidate this member.
pub fn normalize(member: ListMember) -> Result<Preference> {
    let protocol = match member.value {
        PrimaryValue::StringLiteral(s) | PrimaryValue::Token(s) => s,
        PrimaryValue::Other(kind) => return Err(AcceptEventsError::InvalidProtocol(kind.to_string())),
    };
    if protocol.is_empty() {
        return Err(AcceptEventsError::InvalidProtocol("empty string".to_string()));
    }

    let mut params = member.params;
    if let Some(raw) = params.get_mut(QUALITY_PARAM) {
        let q = raw
            .as_f64()
            .ok_or_else(|| AcceptEventsError::InvalidQuality(format!("{}: not a number", raw)))?;
        if !(0.0..=1.0).contains(&q) {
            return Err(AcceptEventsError::InvalidQuality(format!("{}: out of range", raw)));
        }
        // -0.0 would rank below 0.0 under total ordering.
        *raw = ParamValue::Decimal(q + 0.0);
    }

    Ok(Preference { protocol, params })
}

/// Normalizes every member, keeping header order and dropping the ones that
/// cannot be used.
pub fn normalize_all(members: Vec<ListMember>) -> Vec<Preference> {
    members
        .into_iter()
        .filter_map(|member| match normalize(member) {
            Ok(pref) => Some(pref),
            Err(e) => {
                tracing::trace!(target: LOG_TARGET, "Dropping Accept-Events member: {}", e);
                None
            }
        })
        .collect()
}
