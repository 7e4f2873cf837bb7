//! # Plastrack Store
//!
//! Persistence for usage records.
//!
//! The store is a single comma-separated file with the header
//! `Community,Date,Plastic_Used_kg`. Every append rewrites the whole file
//! through a temporary file that is renamed into place.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod csv_store;
pub mod traits;

pub use csv_store::*;
pub use traits::*;
