//! # Plastrack Web
//!
//! HTTP routes for the plastic usage tracker.
//!
//! This crate wires the record store, the aggregator and the trend chart to
//! an axum router: a form to submit measurements, a tabular analysis view,
//! and a chart view backed by a static artifact.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod add;
pub mod analyze;
pub mod error;
pub mod index;
pub mod pages;
pub mod plot;
pub mod router;

pub use error::*;
pub use router::*;
