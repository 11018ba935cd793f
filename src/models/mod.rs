//! Document models for area statement review.

pub mod statement;

pub use statement::{parse_statement_json_str, AreaStatement, REQUIRED_KEYS};
