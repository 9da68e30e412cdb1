//! The vacancy pipeline.
//!
//! One run walks a fixed sequence of stages:
//! - Fetch (bounded pagination over the search endpoint)
//! - Filter (drop excluded employers)
//! - Enrich (one detail fetch per listing)
//! - Aggregate (skill frequency table)
//! - Persist (hand the batch to a sink)

pub mod fetch;
pub mod filter;
pub mod runner;
pub mod skills;

pub use fetch::fetch_listings;
pub use filter::{filter_listings, ExcludedEmployers, DEFAULT_EXCLUDED_EMPLOYER};
pub use runner::Pipeline;
pub use skills::{count_skills, enrich_listings, skill_table, Enrichment};
