//! CLI command implementations

pub mod completions;
pub mod config;
pub mod generate;
pub mod parse;
pub mod schema;
pub mod session;
pub mod validate;
