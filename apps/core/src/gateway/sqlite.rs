use super::PersistenceGateway;
use crate::error::{AppError, AppResult};
use crate::models::{
    BotUser, Channel, ConsultationRecord, Gender, HealthMetrics, NewConsultation, NewReport, NewUserProfile, Owner,
    ProfileUpdate, ReportRecord, ReportSeverity, ReportStatus, UserProfile,
};
use crate::triage::HealthTier;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::FromRow;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Opens (creating if missing) the SQLite database and applies the embedded migrations.
pub async fn init_db(database_url: &str) -> AppResult<SqlitePool> {
    info!("Initializing database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Database initialized and migrations applied.");
    Ok(pool)
}

#[derive(Clone)]
pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn require_profile(&self, id: &str) -> AppResult<UserProfile> {
        self.get_user_profile(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user profile {}", id)))
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn corrupt(column: &str, err: impl Display) -> AppError {
    AppError::Internal(format!("corrupt {} column: {}", column, err))
}

// --- Row types ---

const PROFILE_COLUMNS: &str =
    "id, name, age, gender, medical_history, health_tier, metrics, adopted_plans, created_at";
const CONSULTATION_COLUMNS: &str = "id, owner_kind, owner_id, channel, message, advice, language, created_at";
const REPORT_COLUMNS: &str = "id, user_id, title, description, location, severity, status, submitted_at, updated_at";
const BOT_USER_COLUMNS: &str =
    "chat_id, first_name, preferred_language, linked_user_id, consultation_count, last_interaction";

#[derive(FromRow)]
struct ProfileRow {
    id: String,
    name: String,
    age: i64,
    gender: String,
    medical_history: Json<Vec<String>>,
    health_tier: String,
    metrics: Option<Json<HealthMetrics>>,
    adopted_plans: Json<Vec<String>>,
    created_at: i64,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = AppError;

    fn try_from(row: ProfileRow) -> AppResult<Self> {
        Ok(UserProfile {
            id: row.id,
            name: row.name,
            age: u32::try_from(row.age).map_err(|e| corrupt("age", e))?,
            gender: Gender::from_str(&row.gender).map_err(|e| corrupt("gender", e))?,
            medical_history: row.medical_history.0,
            health_tier: HealthTier::from_str(&row.health_tier).map_err(|e| corrupt("health_tier", e))?,
            metrics: row.metrics.map(|m| m.0),
            adopted_plans: row.adopted_plans.0,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct ConsultationRow {
    id: String,
    owner_kind: String,
    owner_id: String,
    channel: String,
    message: String,
    advice: String,
    language: String,
    created_at: i64,
}

impl TryFrom<ConsultationRow> for ConsultationRecord {
    type Error = AppError;

    fn try_from(row: ConsultationRow) -> AppResult<Self> {
        Ok(ConsultationRecord {
            id: row.id,
            owner: Owner::from_parts(&row.owner_kind, row.owner_id).map_err(|e| corrupt("owner_kind", e))?,
            channel: Channel::from_str(&row.channel).map_err(|e| corrupt("channel", e))?,
            message: row.message,
            advice: row.advice,
            language: row.language,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct ReportRow {
    id: String,
    user_id: String,
    title: String,
    description: String,
    location: String,
    severity: String,
    status: String,
    submitted_at: i64,
    updated_at: i64,
}

impl TryFrom<ReportRow> for ReportRecord {
    type Error = AppError;

    fn try_from(row: ReportRow) -> AppResult<Self> {
        Ok(ReportRecord {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            location: row.location,
            severity: ReportSeverity::from_str(&row.severity).map_err(|e| corrupt("severity", e))?,
            status: ReportStatus::from_str(&row.status).map_err(|e| corrupt("status", e))?,
            submitted_at: row.submitted_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct BotUserRow {
    chat_id: i64,
    first_name: Option<String>,
    preferred_language: String,
    linked_user_id: Option<String>,
    consultation_count: i64,
    last_interaction: i64,
}

impl From<BotUserRow> for BotUser {
    fn from(row: BotUserRow) -> Self {
        BotUser {
            chat_id: row.chat_id,
            first_name: row.first_name,
            preferred_language: row.preferred_language,
            linked_user_id: row.linked_user_id,
            consultation_count: row.consultation_count,
            last_interaction: row.last_interaction,
        }
    }
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    // --- Consultations ---

    #[instrument(skip(self, consultation), fields(owner = %consultation.owner.id(), channel = %consultation.channel))]
    async fn save_consultation(&self, consultation: NewConsultation) -> AppResult<ConsultationRecord> {
        let id = Uuid::new_v4().to_string();
        let created_at = now_millis();

        let row = sqlx::query_as::<_, ConsultationRow>(&format!(
            r#"
            INSERT INTO consultations (id, owner_kind, owner_id, channel, message, advice, language, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            CONSULTATION_COLUMNS
        ))
        .bind(&id)
        .bind(consultation.owner.kind())
        .bind(consultation.owner.id())
        .bind(consultation.channel.as_str())
        .bind(&consultation.message)
        .bind(&consultation.advice)
        .bind(&consultation.language)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = %id, "Consultation stored");
        row.try_into()
    }

    async fn list_consultations(&self, owner: &Owner, limit: u32) -> AppResult<Vec<ConsultationRecord>> {
        let rows = sqlx::query_as::<_, ConsultationRow>(&format!(
            r#"
            SELECT {}
            FROM consultations
            WHERE owner_kind = ? AND owner_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
            CONSULTATION_COLUMNS
        ))
        .bind(owner.kind())
        .bind(owner.id())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ConsultationRecord::try_from).collect()
    }

    // --- Profiles ---

    async fn get_user_profile(&self, id: &str) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!("SELECT {} FROM user_profiles WHERE id = ?", PROFILE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserProfile::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn update_health_tier(&self, id: &str, tier: HealthTier) -> AppResult<()> {
        let result = sqlx::query("UPDATE user_profiles SET health_tier = ? WHERE id = ?")
            .bind(tier.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("user profile {}", id)));
        }
        Ok(())
    }

    #[instrument(skip(self, profile))]
    async fn create_user_profile(&self, profile: NewUserProfile) -> AppResult<UserProfile> {
        let id = Uuid::new_v4().to_string();
        let created_at = now_millis();

        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            INSERT INTO user_profiles (id, name, age, gender, medical_history, health_tier, metrics, created_at)
            VALUES (?, ?, ?, ?, ?, ?, NULL, ?)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(&id)
        .bind(&profile.name)
        .bind(i64::from(profile.age))
        .bind(profile.gender.as_str())
        .bind(Json(&profile.medical_history))
        .bind(HealthTier::default().as_str())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        info!(id = %id, "User profile created");
        row.try_into()
    }

    #[instrument(skip(self, update))]
    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> AppResult<UserProfile> {
        // Unchanged fields keep their stored values.
        let current = self.require_profile(id).await?;

        let name = update.name.unwrap_or(current.name);
        let age = update.age.unwrap_or(current.age);
        let gender = update.gender.unwrap_or(current.gender);
        let history = update.medical_history.unwrap_or(current.medical_history);

        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            UPDATE user_profiles
            SET name = ?, age = ?, gender = ?, medical_history = ?
            WHERE id = ?
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(&name)
        .bind(i64::from(age))
        .bind(gender.as_str())
        .bind(Json(&history))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    #[instrument(skip(self, metrics))]
    async fn update_health_metrics(&self, id: &str, metrics: HealthMetrics) -> AppResult<UserProfile> {
        // Only the fields present in the update change.
        let current = self.require_profile(id).await?;
        let merged = current.metrics.unwrap_or_default().overlay(metrics);

        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "UPDATE user_profiles SET metrics = ? WHERE id = ? RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(Json(&merged))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn adopt_plan(&self, id: &str, plan: &str) -> AppResult<UserProfile> {
        let mut current = self.require_profile(id).await?;
        if current.adopted_plans.iter().any(|p| p == plan) {
            return Ok(current);
        }
        current.adopted_plans.push(plan.to_string());

        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "UPDATE user_profiles SET adopted_plans = ? WHERE id = ? RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(Json(&current.adopted_plans))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        info!(id = %id, plan = %plan, "Health plan adopted");
        row.try_into()
    }

    // --- Reports ---

    #[instrument(skip(self, report), fields(user_id = %report.user_id))]
    async fn save_report(&self, report: NewReport) -> AppResult<ReportRecord> {
        let id = Uuid::new_v4().to_string();
        let now = now_millis();

        let row = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            INSERT INTO reports (id, user_id, title, description, location, severity, status, submitted_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(&id)
        .bind(&report.user_id)
        .bind(&report.title)
        .bind(&report.description)
        .bind(&report.location)
        .bind(report.severity.as_str())
        .bind(ReportStatus::default().as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list_reports(&self, user_id: &str) -> AppResult<Vec<ReportRecord>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {} FROM reports WHERE user_id = ? ORDER BY submitted_at DESC, rowid DESC",
            REPORT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReportRecord::try_from).collect()
    }

    // --- Bot users ---

    async fn upsert_bot_user(&self, chat_id: i64, first_name: Option<String>) -> AppResult<BotUser> {
        let row = sqlx::query_as::<_, BotUserRow>(&format!(
            r#"
            INSERT INTO bot_users (chat_id, first_name, last_interaction)
            VALUES (?, ?, ?)
            ON CONFLICT(chat_id) DO UPDATE SET
                first_name = COALESCE(excluded.first_name, bot_users.first_name),
                last_interaction = excluded.last_interaction
            RETURNING {}
            "#,
            BOT_USER_COLUMNS
        ))
        .bind(chat_id)
        .bind(first_name)
        .bind(now_millis())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_bot_user(&self, chat_id: i64) -> AppResult<Option<BotUser>> {
        let row = sqlx::query_as::<_, BotUserRow>(&format!(
            "SELECT {} FROM bot_users WHERE chat_id = ?",
            BOT_USER_COLUMNS
        ))
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BotUser::from))
    }

    async fn set_bot_language(&self, chat_id: i64, language: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE bot_users SET preferred_language = ?, last_interaction = ? WHERE chat_id = ?")
            .bind(language)
            .bind(now_millis())
            .bind(chat_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("bot user {}", chat_id)));
        }
        Ok(())
    }

    async fn link_bot_user(&self, chat_id: i64, user_id: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE bot_users SET linked_user_id = ? WHERE chat_id = ?")
            .bind(user_id)
            .bind(chat_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("bot user {}", chat_id)));
        }
        Ok(())
    }

    async fn record_bot_consultation(&self, chat_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE bot_users
            SET consultation_count = consultation_count + 1, last_interaction = ?
            WHERE chat_id = ?
            "#,
        )
        .bind(now_millis())
        .bind(chat_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("bot user {}", chat_id)));
        }
        Ok(())
    }
}
