//! SDA: Structured Data Assistant
//!
//! Turns form-style field values into schema.org JSON-LD markup for FAQ
//! pages, articles, local businesses, events, products and organizations.

pub mod cli;
pub mod core;
pub mod schema;
