use crate::models::{Gender, UserProfile};
use crate::triage::{ConditionClassifier, HealthTier};
use serde::Serialize;
use std::fmt::Write;

/// History entries injected into the system instruction, at most.
pub const MAX_CONTEXT_ENTRIES: usize = 20;
/// Characters kept from each injected history entry.
pub const MAX_ENTRY_CHARS: usize = 120;
pub const NO_HISTORY_MARKER: &str = "No significant medical history";

pub const BASE_SYSTEM_PROMPT: &str = "You are MedAether AI, a medical assistant. Provide helpful health advice and information. \
Always remind users to consult healthcare professionals for serious conditions. \
Keep responses concise, informative, and empathetic. Do not provide specific drug dosages without \
proper medical consultation. Include relevant precautions and when to seek immediate medical help.";

/// Bounded summary of a profile that is safe to put in front of the language model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileContext {
    pub age: u32,
    pub gender: Gender,
    /// Recomputed from history, never the cached value on the profile.
    pub tier: HealthTier,
    pub history: Vec<String>,
    /// Entries beyond `MAX_CONTEXT_ENTRIES` that were left out.
    pub omitted: usize,
}

impl ProfileContext {
    pub fn from_profile(profile: &UserProfile, classifier: &ConditionClassifier) -> Self {
        let history = profile
            .medical_history
            .iter()
            .take(MAX_CONTEXT_ENTRIES)
            .map(|entry| truncate_chars(entry, MAX_ENTRY_CHARS))
            .collect();

        Self {
            age: profile.age,
            gender: profile.gender,
            tier: classifier.classify(&profile.medical_history),
            history,
            omitted: profile.medical_history.len().saturating_sub(MAX_CONTEXT_ENTRIES),
        }
    }

    /// History as a single comma-separated line, or the no-history marker.
    pub fn history_line(&self) -> String {
        if self.history.is_empty() {
            return NO_HISTORY_MARKER.to_string();
        }
        let mut line = self.history.join(", ");
        if self.omitted > 0 {
            let _ = write!(line, " (+{} more)", self.omitted);
        }
        line
    }

    pub fn render(&self) -> String {
        format!(
            "Patient context: age {}, gender {}, medical history: {}, health status: {}.",
            self.age,
            self.gender,
            self.history_line(),
            self.tier
        )
    }
}

/// System instruction sent with every request, with the profile context appended when known.
pub fn system_instruction(context: Option<&ProfileContext>) -> String {
    match context {
        Some(ctx) => format!(
            "{}\n\n{}\nTailor the advice to this patient context.",
            BASE_SYSTEM_PROMPT,
            ctx.render()
        ),
        None => BASE_SYSTEM_PROMPT.to_string(),
    }
}

fn truncate_chars(entry: &str, max: usize) -> String {
    entry.trim().chars().take(max).collect()
}
