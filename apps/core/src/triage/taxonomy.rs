//! Condition taxonomy: versioned keyword sets mapping free-text conditions to severity.
//!
//! Keywords are stored lowercase and matched as case-insensitive substrings of history
//! entries. The taxonomy is immutable at runtime; changing a list means bumping the version.

use super::tier::HealthTier;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

pub const TAXONOMY_VERSION: u32 = 1;

const SERIOUS_CONDITIONS: &[&str] = &[
    "diabetes",
    "heart disease",
    "cancer",
    "kidney disease",
    "liver disease",
    "stroke",
    "heart attack",
    "coronary artery disease",
    "chronic kidney disease",
    "cirrhosis",
    "heart failure",
    "chronic obstructive pulmonary disease",
    "tuberculosis",
    "hiv",
    "aids",
];

const MODERATE_CONDITIONS: &[&str] = &[
    "hypertension",
    "asthma",
    "arthritis",
    "thyroid",
    "anxiety",
    "depression",
    "high blood pressure",
    "high cholesterol",
    "osteoporosis",
    "fibromyalgia",
    "migraines",
    "sleep apnea",
    "acid reflux",
    "irritable bowel syndrome",
];

const MILD_CONDITIONS: &[&str] = &[
    "allergies",
    "seasonal allergies",
    "mild asthma",
    "occasional headaches",
    "minor joint pain",
    "occasional insomnia",
];

static STANDARD_TAXONOMY: LazyLock<Arc<ConditionTaxonomy>> = LazyLock::new(|| {
    Arc::new(ConditionTaxonomy::new(
        TAXONOMY_VERSION,
        SERIOUS_CONDITIONS,
        MODERATE_CONDITIONS,
        MILD_CONDITIONS,
    ))
});

/// Severity bucket a keyword belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionCategory {
    Serious,
    Moderate,
    Mild,
}

impl ConditionCategory {
    /// Scan order: the first category with a hit decides the tier.
    pub const PRIORITY: [ConditionCategory; 3] = [
        ConditionCategory::Serious,
        ConditionCategory::Moderate,
        ConditionCategory::Mild,
    ];

    /// Mild conditions share the yellow tier with moderate ones.
    pub fn tier(&self) -> HealthTier {
        match self {
            ConditionCategory::Serious => HealthTier::Red,
            ConditionCategory::Moderate | ConditionCategory::Mild => HealthTier::Yellow,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConditionCategory::Serious => "serious",
            ConditionCategory::Moderate => "moderate",
            ConditionCategory::Mild => "mild",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionTaxonomy {
    version: u32,
    serious: Vec<String>,
    moderate: Vec<String>,
    mild: Vec<String>,
}

impl ConditionTaxonomy {
    pub fn new<S: AsRef<str>>(version: u32, serious: &[S], moderate: &[S], mild: &[S]) -> Self {
        let normalize = |keywords: &[S]| -> Vec<String> {
            keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        };

        Self {
            version,
            serious: normalize(serious),
            moderate: normalize(moderate),
            mild: normalize(mild),
        }
    }

    /// The taxonomy shipped with this build.
    pub fn standard() -> Arc<ConditionTaxonomy> {
        Arc::clone(&STANDARD_TAXONOMY)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn keywords(&self, category: ConditionCategory) -> &[String] {
        match category {
            ConditionCategory::Serious => &self.serious,
            ConditionCategory::Moderate => &self.moderate,
            ConditionCategory::Mild => &self.mild,
        }
    }
}
