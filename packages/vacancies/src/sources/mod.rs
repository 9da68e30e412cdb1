//! Listing source implementations.
//!
//! - `HhSource` - hh.ru-compatible REST API over reqwest
//! - `MockSource` - canned pages and details for testing

mod hh;
mod mock;

pub use hh::{HhSource, HhSourceConfig, DEFAULT_API_URL};
pub use mock::{MockSource, MockSourceBuilder};

// Re-export from traits for convenience
pub use crate::traits::source::ListingSource;
