//! Scoring-and-selection core for headcount scenario planning.
//!
//! The crate ingests a raw roster table (CSV or pre-split columns), maps
//! heterogeneous column names onto a canonical schema, derives per-person
//! features, computes a weighted impact score, and selects a top-N subset
//! with aggregate cost statistics. Presentation concerns stay in the
//! `services/api` binary; everything here is pure in-memory data in,
//! structured data out.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
