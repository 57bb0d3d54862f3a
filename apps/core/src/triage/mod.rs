//! # Triage Module
//!
//! Health-risk classification of a profile's medical history. No I/O, no LLM.
//!
//! ## Components
//! - `tier`: the `HealthTier` enum
//! - `taxonomy`: versioned keyword sets (serious, moderate, mild)
//! - `classifier`: `classify` and `ConditionClassifier::assess`
//! - `presentation`: label/color/icon table per tier

pub mod classifier;
pub mod presentation;
pub mod taxonomy;
pub mod tier;

pub use classifier::{classify, ConditionClassifier, TierAssessment};
pub use presentation::TierPresentation;
pub use taxonomy::{ConditionCategory, ConditionTaxonomy, TAXONOMY_VERSION};
pub use tier::{HealthTier, ParseTierError};
