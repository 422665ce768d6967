//! Orchestration of the two aireadme operations.
//!
//! This crate ties discovery, relevance matching, and section editing into
//! the externally visible operations: [`collect_guidance`] (read-and-
//! aggregate) and [`update_section`] (read-modify-write).

pub mod guidance;
pub mod update;
pub mod validate;

pub use guidance::{GuidanceOptions, collect_guidance};
pub use update::{UpdateOptions, update_section};
pub use validate::FieldIssue;
