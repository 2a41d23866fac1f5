//! mypgrade-core — grading engine, CSV import, and state store.
//!
//! This crate holds the MYP grading rules (criterion averages, boundary
//! table, GPA), the reconciler that merges exported CSV scores into the
//! subject document, and the JSON-backed store that owns that document.

pub mod config;
pub mod error;
pub mod grading;
pub mod import;
pub mod model;
pub mod store;
pub mod traits;
pub mod validation;
