//! # Plastrack Server
//!
//! Binary crate for the plastic usage tracker.
//!
//! Parses the command line, loads configuration, prepares the record store
//! and the static directory, then serves the web routes until shutdown.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod error;
pub mod server;

pub use cli::*;
pub use error::*;
pub use server::*;
