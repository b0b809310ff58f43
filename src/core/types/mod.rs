//! Core data types for Accept-Events negotiation.

mod param;
mod preference;

pub use param::{ParamValue, Parameters};
pub use preference::{Preference, Preferences};

pub(crate) use preference::is_token;
