//! # Plastrack Common
//!
//! Shared types, utilities, and common functionality for the plastic usage
//! tracker.
//!
//! This crate provides the foundational types and utilities used across
//! all other crates in the workspace: the usage record model, the shared
//! error type, date and amount coercion, and logging bootstrap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use logging::*;
pub use types::*;
pub use utils::*;
