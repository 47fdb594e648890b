//! Common utilities for the vision markup front end.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - colored terminal output for recoverable oddities in a document

pub mod warning;
