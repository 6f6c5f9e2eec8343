//! Core types and trait definitions for the Roster people service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod patch;
pub mod person;
pub mod store;

pub use error::{Error, Result};
pub use person::{Person, PersonBuilder};
