//! Rubric scoring for spoken self-introduction transcripts.
//!
//! [`evaluation`] holds the scoring engine and the service that feeds it; [`features`] holds
//! the providers that turn raw text into the measurements the engine consumes.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod telemetry;
