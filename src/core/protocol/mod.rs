//! Protocol-level utilities for the `Accept-Events` header.

pub mod constants;
pub mod headers;
pub mod parser;

pub use constants::*;
pub use headers::*;
pub use parser::*;
