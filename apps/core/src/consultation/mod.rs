//! # Consultation Module
//!
//! Turns a user message (and optionally a profile) into advice text.
//!
//! ## Components
//! - `context`: bounded `ProfileContext` and the system instruction
//! - `fallback`: static guidance templates
//! - `orchestrator`: `ConsultationOrchestrator::consult`

pub mod context;
pub mod fallback;
pub mod orchestrator;

pub use context::{ProfileContext, MAX_CONTEXT_ENTRIES, MAX_ENTRY_CHARS, NO_HISTORY_MARKER};
pub use orchestrator::{AdviceResult, AdviceSource, ConsultationOrchestrator};
