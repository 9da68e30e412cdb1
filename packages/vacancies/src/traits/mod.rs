//! Core trait abstractions.
//!
//! These traits are the seams between the pipeline and the outside world:
//! where listings come from and where a batch ends up.

pub mod sink;
pub mod source;
