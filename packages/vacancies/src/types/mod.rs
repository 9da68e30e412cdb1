//! Data types shared across the pipeline.

pub mod batch;
pub mod config;
pub mod listing;
pub mod skill;
