//! Shared fixtures: a migrated SQLite gateway, a broken gateway and scripted providers.

use crate::consultation::ConsultationOrchestrator;
use crate::error::{AppError, AppResult};
use crate::gateway::{PersistenceGateway, SqliteGateway};
use crate::models::{
    BotUser, ConsultationRecord, Gender, HealthMetrics, NewConsultation, NewReport, NewUserProfile, Owner,
    ProfileUpdate, ReportRecord, UserProfile,
};
use crate::providers::{
    AdviceProvider, DisabledTranslationProvider, ProviderError, TranslationAdapter, TranslationProvider,
    UnavailableAdviceProvider,
};
use crate::triage::HealthTier;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::{tempdir, TempDir};

/// Creates a gateway over a fresh, migrated database file. Keep the `TempDir` alive.
pub async fn create_test_gateway() -> (SqliteGateway, TempDir) {
    let dir = tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.sqlite");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await
        .expect("Failed to create test pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    (SqliteGateway::new(pool), dir)
}

pub fn profile(age: u32, gender: Gender, history: &[&str]) -> UserProfile {
    UserProfile {
        id: "profile-1".to_string(),
        name: "Test User".to_string(),
        age,
        gender,
        medical_history: history.iter().map(|s| s.to_string()).collect(),
        health_tier: HealthTier::Green,
        metrics: None,
        adopted_plans: vec![],
        created_at: 0,
    }
}

pub fn new_profile(name: &str, history: &[&str]) -> NewUserProfile {
    NewUserProfile {
        name: name.to_string(),
        age: 34,
        gender: Gender::Female,
        medical_history: history.iter().map(|s| s.to_string()).collect(),
    }
}

/// Advice provider that replays a fixed result and records what it was sent.
pub struct ScriptedAdvice {
    reply: Result<String, ProviderError>,
    delay: Duration,
    pub calls: AtomicUsize,
    pub last_system: Mutex<Option<String>>,
}

impl ScriptedAdvice {
    pub fn replying(text: &str) -> Self {
        Self::with(Ok(text.to_string()), Duration::ZERO)
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with(Err(error), Duration::ZERO)
    }

    pub fn slow(text: &str, delay: Duration) -> Self {
        Self::with(Ok(text.to_string()), delay)
    }

    fn with(reply: Result<String, ProviderError>, delay: Duration) -> Self {
        Self {
            reply,
            delay,
            calls: AtomicUsize::new(0),
            last_system: Mutex::new(None),
        }
    }

    pub fn system_prompt(&self) -> String {
        self.last_system.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl AdviceProvider for ScriptedAdvice {
    async fn generate_advice(&self, system_context: String, _user_message: String) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_system.lock().unwrap() = Some(system_context);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Translator that always errors.
pub struct FailingTranslator;

#[async_trait]
impl TranslationProvider for FailingTranslator {
    async fn translate(&self, _text: String, _target_language: String) -> Result<String, ProviderError> {
        Err(ProviderError::Http("connection reset".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Translator that tags the text with the target language.
pub struct TaggingTranslator;

#[async_trait]
impl TranslationProvider for TaggingTranslator {
    async fn translate(&self, text: String, target_language: String) -> Result<String, ProviderError> {
        Ok(format!("[{}] {}", target_language, text))
    }

    fn name(&self) -> &'static str {
        "tagging"
    }
}

pub fn adapter(provider: Arc<dyn TranslationProvider>) -> TranslationAdapter {
    TranslationAdapter::new(provider, "en", Duration::from_secs(1))
}

pub fn orchestrator(advice: Arc<dyn AdviceProvider>, translator: Arc<dyn TranslationProvider>) -> ConsultationOrchestrator {
    ConsultationOrchestrator::new(advice, adapter(translator), Duration::from_millis(200))
}

/// No language model and no translation: the configuration of a bare deployment.
pub fn offline_orchestrator() -> ConsultationOrchestrator {
    orchestrator(Arc::new(UnavailableAdviceProvider), Arc::new(DisabledTranslationProvider))
}

/// Gateway whose storage is down. Bot identities still resolve so a chat can reach the
/// consultation path; every other call fails with a database error.
pub struct FailingGateway {
    pub bot_language: &'static str,
    pub saves_attempted: AtomicUsize,
}

impl FailingGateway {
    pub fn new(bot_language: &'static str) -> Self {
        Self {
            bot_language,
            saves_attempted: AtomicUsize::new(0),
        }
    }

    fn down<T>() -> AppResult<T> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl PersistenceGateway for FailingGateway {
    async fn save_consultation(&self, _consultation: NewConsultation) -> AppResult<ConsultationRecord> {
        self.saves_attempted.fetch_add(1, Ordering::SeqCst);
        Self::down()
    }

    async fn get_user_profile(&self, _id: &str) -> AppResult<Option<UserProfile>> {
        Ok(None)
    }

    async fn update_health_tier(&self, _id: &str, _tier: HealthTier) -> AppResult<()> {
        Self::down()
    }

    async fn create_user_profile(&self, _profile: NewUserProfile) -> AppResult<UserProfile> {
        Self::down()
    }

    async fn update_profile(&self, _id: &str, _update: ProfileUpdate) -> AppResult<UserProfile> {
        Self::down()
    }

    async fn update_health_metrics(&self, _id: &str, _metrics: HealthMetrics) -> AppResult<UserProfile> {
        Self::down()
    }

    async fn adopt_plan(&self, _id: &str, _plan: &str) -> AppResult<UserProfile> {
        Self::down()
    }

    async fn list_consultations(&self, _owner: &Owner, _limit: u32) -> AppResult<Vec<ConsultationRecord>> {
        Self::down()
    }

    async fn save_report(&self, _report: NewReport) -> AppResult<ReportRecord> {
        Self::down()
    }

    async fn list_reports(&self, _user_id: &str) -> AppResult<Vec<ReportRecord>> {
        Self::down()
    }

    async fn upsert_bot_user(&self, chat_id: i64, first_name: Option<String>) -> AppResult<BotUser> {
        Ok(BotUser {
            chat_id,
            first_name,
            preferred_language: self.bot_language.to_string(),
            linked_user_id: None,
            consultation_count: 0,
            last_interaction: 0,
        })
    }

    async fn get_bot_user(&self, _chat_id: i64) -> AppResult<Option<BotUser>> {
        Self::down()
    }

    async fn set_bot_language(&self, _chat_id: i64, _language: &str) -> AppResult<()> {
        Self::down()
    }

    async fn link_bot_user(&self, _chat_id: i64, _user_id: &str) -> AppResult<()> {
        Self::down()
    }

    async fn record_bot_consultation(&self, _chat_id: i64) -> AppResult<()> {
        Self::down()
    }
}
