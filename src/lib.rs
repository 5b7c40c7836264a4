//! Values scoring and consensus engine.
//!
//! Questionnaire responses flow through a fixed pipeline for one lens at a time:
//! aggregation into factor scores, normalization into a weight profile, archetype
//! matching, policy impact projection with rule-based modifiers, and consensus
//! classification with per-factor divergence drivers. Every engine operation is a
//! pure function over its arguments; lens catalogs are loaded once and borrowed.

pub mod config;
pub mod engine;
pub mod error;
pub mod import;
pub mod lenses;
pub mod report;
pub mod telemetry;
