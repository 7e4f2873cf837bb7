//! # Plastrack Graphs
//!
//! Aggregation and chart rendering for plastic usage records.
//!
//! This crate sums usage per community and per community-month, and renders
//! the per-community trend chart natively with plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod renderer;
pub mod trend;
pub mod types;
pub mod utils;

pub use aggregator::*;
pub use renderer::*;
pub use trend::*;
pub use types::*;
pub use utils::*;
