//! Typed field extraction from comma-separated lines.

pub mod extract;
pub mod schema;

pub use extract::{Fields, parse_float};
pub use schema::{LineFault, Schema, role};
