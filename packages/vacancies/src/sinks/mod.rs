//! Sink implementations.
//!
//! Available backends:
//! - `JsonFileSink` - two JSON documents, overwritten each run (always available)
//! - `MemorySink` - keeps the last batch in memory (always available)
//! - `SqliteSink` - normalized relational schema (requires `sqlite` feature)

pub mod json;
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use json::JsonFileSink;
pub use memory::MemorySink;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSink;
