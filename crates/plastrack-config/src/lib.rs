//! # Plastrack Config
//!
//! Type-safe configuration management for the plastic usage tracker.
//!
//! This crate provides the configuration schema with defaults, YAML
//! loading with environment variable overrides, and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
