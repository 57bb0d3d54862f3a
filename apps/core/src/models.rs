use crate::triage::HealthTier;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

static BLOOD_PRESSURE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,3}/\d{2,3}$").expect("Invalid regex: blood pressure pattern"));

/// Error returned when a stored enum column holds an unexpected value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Implements `as_str`, `Display` and `FromStr` for an enum stored as lowercase text.
macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParseEnumError { kind: $kind, value: other.to_string() }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

text_enum!(Gender, "gender", { Male => "male", Female => "female", Other => "other" });

/// Optional structured health metrics. Each field is range-checked on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct HealthMetrics {
    /// Body weight in kilograms.
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight_kg: Option<f64>,
    /// Height in centimetres.
    #[validate(range(min = 50, max = 250))]
    pub height_cm: Option<u32>,
    /// Systolic/diastolic, e.g. `120/80`.
    #[validate(custom(function = "validate_blood_pressure"))]
    pub blood_pressure: Option<String>,
    /// Fasting blood sugar in mg/dL.
    #[validate(range(min = 30, max = 500))]
    pub blood_sugar_mg_dl: Option<u32>,
}

impl HealthMetrics {
    pub fn is_empty(&self) -> bool {
        self.weight_kg.is_none()
            && self.height_cm.is_none()
            && self.blood_pressure.is_none()
            && self.blood_sugar_mg_dl.is_none()
    }

    /// Fields set in `patch` replace the stored ones; unset fields are kept.
    pub fn overlay(self, patch: HealthMetrics) -> Self {
        Self {
            weight_kg: patch.weight_kg.or(self.weight_kg),
            height_cm: patch.height_cm.or(self.height_cm),
            blood_pressure: patch.blood_pressure.or(self.blood_pressure),
            blood_sugar_mg_dl: patch.blood_sugar_mg_dl.or(self.blood_sugar_mg_dl),
        }
    }
}

fn validate_blood_pressure(value: &str) -> Result<(), ValidationError> {
    if BLOOD_PRESSURE_PATTERN.is_match(value) {
        Ok(())
    } else {
        let mut error = ValidationError::new("blood_pressure_format");
        error.message = Some("Blood pressure format should be XXX/XXX".into());
        Err(error)
    }
}

/// A registered user as the core sees it.
///
/// `health_tier` is a cache of `triage::classify(&medical_history)`. It may be stale between
/// writes; readers that need the true tier recompute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Free-text conditions in insertion order. Duplicates are kept.
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub health_tier: HealthTier,
    #[serde(default)]
    pub metrics: Option<HealthMetrics>,
    /// Names of catalogue health plans the user adopted. Each name appears once.
    #[serde(default)]
    pub adopted_plans: Vec<String>,
    /// Unix timestamp (milliseconds).
    pub created_at: i64,
}

/// Input for profile creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUserProfile {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 150))]
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

/// Partial profile edit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 150))]
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub medical_history: Option<Vec<String>>,
}

/// Front-end surface a consultation came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Web,
    Bot,
}

text_enum!(Channel, "channel", { Web => "web", Bot => "bot" });

/// Who a consultation belongs to: a registered user or an unlinked channel identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Owner {
    User(String),
    Anonymous(String),
}

impl Owner {
    pub fn kind(&self) -> &'static str {
        match self {
            Owner::User(_) => "user",
            Owner::Anonymous(_) => "anonymous",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Owner::User(id) | Owner::Anonymous(id) => id,
        }
    }

    pub fn from_parts(kind: &str, id: String) -> Result<Self, ParseEnumError> {
        match kind {
            "user" => Ok(Owner::User(id)),
            "anonymous" => Ok(Owner::Anonymous(id)),
            other => Err(ParseEnumError {
                kind: "owner kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Data for a consultation record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConsultation {
    pub owner: Owner,
    pub channel: Channel,
    pub message: String,
    pub advice: String,
    pub language: String,
}

/// One orchestrated exchange. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub id: String,
    pub owner: Owner,
    pub channel: Channel,
    pub message: String,
    pub advice: String,
    pub language: String,
    /// Unix timestamp (milliseconds).
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    Low,
    Medium,
    High,
    Critical,
}

text_enum!(ReportSeverity, "report severity", {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    InReview,
    Resolved,
}

text_enum!(ReportStatus, "report status", {
    Pending => "pending",
    InReview => "in_review",
    Resolved => "resolved",
});

/// Community health report submitted through the web channel.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewReport {
    pub user_id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub severity: ReportSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub severity: ReportSeverity,
    pub status: ReportStatus,
    pub submitted_at: i64,
    pub updated_at: i64,
}

/// A chat-bot identity, optionally linked to a web account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotUser {
    pub chat_id: i64,
    pub first_name: Option<String>,
    pub preferred_language: String,
    pub linked_user_id: Option<String>,
    pub consultation_count: i64,
    pub last_interaction: i64,
}

impl BotUser {
    /// Owner used for this identity's consultation records.
    pub fn owner(&self) -> Owner {
        match &self.linked_user_id {
            Some(user_id) => Owner::User(user_id.clone()),
            None => Owner::Anonymous(format!("bot:{}", self.chat_id)),
        }
    }
}
