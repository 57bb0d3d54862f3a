//! Health-risk classification over a profile's medical history.
//!
//! Pure and deterministic: no I/O, no shared mutable state, and the result does not depend
//! on the order of the history entries.

use super::taxonomy::{ConditionCategory, ConditionTaxonomy};
use super::tier::HealthTier;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Why a history was assigned its tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAssessment {
    pub tier: HealthTier,
    /// Category of the keyword that decided the tier, `None` for empty or unmatched history.
    pub matched_category: Option<ConditionCategory>,
    pub matched_keyword: Option<String>,
    pub taxonomy_version: u32,
}

/// Classifier bound to one taxonomy.
#[derive(Debug, Clone)]
pub struct ConditionClassifier {
    taxonomy: Arc<ConditionTaxonomy>,
}

impl Default for ConditionClassifier {
    fn default() -> Self {
        Self::new(ConditionTaxonomy::standard())
    }
}

impl ConditionClassifier {
    pub fn new(taxonomy: Arc<ConditionTaxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &ConditionTaxonomy {
        &self.taxonomy
    }

    pub fn classify<S: AsRef<str>>(&self, history: &[S]) -> HealthTier {
        self.assess(history).tier
    }

    /// Classifies `history` and reports which keyword decided it.
    ///
    /// Empty history is green. Otherwise categories are scanned serious, moderate, mild and
    /// the first keyword found as a substring of any entry decides. Non-empty history with
    /// no match is yellow.
    pub fn assess<S: AsRef<str>>(&self, history: &[S]) -> TierAssessment {
        let version = self.taxonomy.version();

        if history.is_empty() {
            return TierAssessment {
                tier: HealthTier::Green,
                matched_category: None,
                matched_keyword: None,
                taxonomy_version: version,
            };
        }

        let entries: Vec<String> = history.iter().map(|e| e.as_ref().to_lowercase()).collect();

        for category in ConditionCategory::PRIORITY {
            let hit = self
                .taxonomy
                .keywords(category)
                .iter()
                .find(|keyword| entries.iter().any(|entry| entry.contains(keyword.as_str())));

            if let Some(keyword) = hit {
                return TierAssessment {
                    tier: category.tier(),
                    matched_category: Some(category),
                    matched_keyword: Some(keyword.clone()),
                    taxonomy_version: version,
                };
            }
        }

        TierAssessment {
            tier: HealthTier::Yellow,
            matched_category: None,
            matched_keyword: None,
            taxonomy_version: version,
        }
    }
}

/// Classifies `history` against the standard taxonomy.
pub fn classify<S: AsRef<str>>(history: &[S]) -> HealthTier {
    ConditionClassifier::default().classify(history)
}
