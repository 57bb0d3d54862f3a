//! # Persistence Gateway
//!
//! Storage boundary for profiles, consultation records, reports and bot identities.
//! Every call is at-most-once and independent; there is no cross-call transaction.

pub mod sqlite;

pub use sqlite::{init_db, SqliteGateway};

use crate::error::AppResult;
use crate::models::{
    BotUser, ConsultationRecord, HealthMetrics, NewConsultation, NewReport, NewUserProfile, Owner, ProfileUpdate,
    ReportRecord, UserProfile,
};
use crate::triage::HealthTier;
use async_trait::async_trait;

#[async_trait]
pub trait PersistenceGateway: Send + Sync + 'static {
    /// Appends a consultation record and returns it with its id and timestamp.
    async fn save_consultation(&self, consultation: NewConsultation) -> AppResult<ConsultationRecord>;

    async fn get_user_profile(&self, id: &str) -> AppResult<Option<UserProfile>>;

    /// Overwrites the cached tier. `AppError::NotFound` for an unknown id.
    async fn update_health_tier(&self, id: &str, tier: HealthTier) -> AppResult<()>;

    /// Stores a new profile with the default tier. Callers recompute the tier afterwards.
    async fn create_user_profile(&self, profile: NewUserProfile) -> AppResult<UserProfile>;

    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> AppResult<UserProfile>;

    /// Merges the set fields of `metrics` into the stored metrics; unset fields keep their value.
    async fn update_health_metrics(&self, id: &str, metrics: HealthMetrics) -> AppResult<UserProfile>;

    /// Adds `plan` to the profile's adopted plans. Adopting a plan twice is a no-op.
    async fn adopt_plan(&self, id: &str, plan: &str) -> AppResult<UserProfile>;

    /// Most recent first, at most `limit` records.
    async fn list_consultations(&self, owner: &Owner, limit: u32) -> AppResult<Vec<ConsultationRecord>>;

    async fn save_report(&self, report: NewReport) -> AppResult<ReportRecord>;

    async fn list_reports(&self, user_id: &str) -> AppResult<Vec<ReportRecord>>;

    /// Creates the bot identity on first contact, otherwise refreshes its name and last interaction.
    async fn upsert_bot_user(&self, chat_id: i64, first_name: Option<String>) -> AppResult<BotUser>;

    async fn get_bot_user(&self, chat_id: i64) -> AppResult<Option<BotUser>>;

    async fn set_bot_language(&self, chat_id: i64, language: &str) -> AppResult<()>;

    async fn link_bot_user(&self, chat_id: i64, user_id: &str) -> AppResult<()>;

    /// Bumps the consultation counter and last interaction time.
    async fn record_bot_consultation(&self, chat_id: i64) -> AppResult<()>;
}
