use crate::catalogue::{self, HealthPlan, QuickSolution};
use crate::consultation::ConsultationOrchestrator;
use crate::error::{AppError, AppResult};
use crate::gateway::PersistenceGateway;
use crate::models::{
    Channel, ConsultationRecord, HealthMetrics, NewConsultation, NewReport, NewUserProfile, Owner, ProfileUpdate,
    ReportRecord, UserProfile,
};
use crate::profile;
use crate::triage::{HealthTier, TierAssessment, TierPresentation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

/// Records returned by `chat_history`.
pub const CHAT_HISTORY_LIMIT: u32 = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Signed-in user, if any.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Browser session used as the owner of anonymous consultations.
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCard {
    pub profile: UserProfile,
    pub assessment: TierAssessment,
    pub presentation: &'static TierPresentation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub success: bool,
    pub new_status: HealthTier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    /// Defaults to the base language, which returns the text unchanged.
    #[serde(default)]
    pub target_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslateReply {
    pub translated_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanAdoption {
    pub success: bool,
    pub message: String,
    pub adopted_plans: Vec<String>,
}

/// Calling contract of the web front end. Each method is one request handler.
#[derive(Clone)]
pub struct WebChannel {
    gateway: Arc<dyn PersistenceGateway>,
    orchestrator: Arc<ConsultationOrchestrator>,
}

impl WebChannel {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, orchestrator: Arc<ConsultationOrchestrator>) -> Self {
        Self { gateway, orchestrator }
    }

    pub async fn register(&self, new_profile: NewUserProfile) -> AppResult<UserProfile> {
        profile::register(self.gateway.as_ref(), self.orchestrator.classifier(), new_profile).await
    }

    #[instrument(skip(self, request), fields(user_id = ?request.user_id))]
    pub async fn ai_chat(&self, request: ChatRequest) -> AppResult<ChatReply> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::Validation("message must not be empty".to_string()));
        }
        let language = request
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.orchestrator.base_language())
            .to_ascii_lowercase();

        let (owner, user) = match &request.user_id {
            Some(user_id) => (Owner::User(user_id.clone()), Some(self.require_profile(user_id).await?)),
            None => {
                let session = request.session_id.as_deref().unwrap_or("guest");
                (Owner::Anonymous(format!("web:{}", session)), None)
            }
        };

        let result = self.orchestrator.consult(user.as_ref(), message, &language).await;

        self.gateway
            .save_consultation(NewConsultation {
                owner,
                channel: Channel::Web,
                message: message.to_string(),
                advice: result.text.clone(),
                language,
            })
            .await?;

        Ok(ChatReply { response: result.text })
    }

    pub async fn chat_history(&self, user_id: &str) -> AppResult<Vec<ConsultationRecord>> {
        self.gateway
            .list_consultations(&Owner::User(user_id.to_string()), CHAT_HISTORY_LIMIT)
            .await
    }

    /// Recomputes the tier, writes it back and pairs it with its presentation.
    #[instrument(skip(self))]
    pub async fn digital_health_card(&self, user_id: &str) -> AppResult<HealthCard> {
        let (profile, assessment) =
            profile::refresh_health_tier(self.gateway.as_ref(), self.orchestrator.classifier(), user_id).await?;
        Ok(HealthCard {
            presentation: assessment.tier.presentation(),
            profile,
            assessment,
        })
    }

    pub async fn update_health_status(&self, user_id: &str) -> AppResult<StatusUpdate> {
        let (_, assessment) =
            profile::refresh_health_tier(self.gateway.as_ref(), self.orchestrator.classifier(), user_id).await?;
        Ok(StatusUpdate {
            success: true,
            new_status: assessment.tier,
        })
    }

    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> AppResult<UserProfile> {
        profile::edit(self.gateway.as_ref(), self.orchestrator.classifier(), user_id, update).await
    }

    pub async fn update_health_metrics(&self, user_id: &str, metrics: HealthMetrics) -> AppResult<UserProfile> {
        profile::update_metrics(self.gateway.as_ref(), user_id, metrics).await
    }

    #[instrument(skip(self, report), fields(user_id = %report.user_id))]
    pub async fn submit_report(&self, mut report: NewReport) -> AppResult<ReportRecord> {
        report.title = report.title.trim().to_string();
        report.location = report.location.trim().to_string();
        report.validate()?;
        self.require_profile(&report.user_id).await?;

        let record = self.gateway.save_report(report).await?;
        info!(id = %record.id, severity = %record.severity, "Health report submitted");
        Ok(record)
    }

    pub async fn list_reports(&self, user_id: &str) -> AppResult<Vec<ReportRecord>> {
        self.gateway.list_reports(user_id).await
    }

    /// Best-effort translation. A provider failure returns the text unchanged.
    pub async fn translate(&self, request: TranslateRequest) -> AppResult<TranslateReply> {
        if request.text.trim().is_empty() {
            return Err(AppError::Validation("text must not be empty".to_string()));
        }
        let target = request
            .target_language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.orchestrator.base_language())
            .to_ascii_lowercase();

        let translated_text = self.orchestrator.translate_best_effort(&request.text, &target).await;
        Ok(TranslateReply { translated_text })
    }

    pub fn quick_solutions(&self) -> &'static [QuickSolution] {
        catalogue::QUICK_SOLUTIONS
    }

    pub fn health_plans(&self) -> &'static [HealthPlan] {
        catalogue::HEALTH_PLANS
    }

    /// Records a catalogue plan on the profile. Unknown plan names are rejected.
    #[instrument(skip(self))]
    pub async fn adopt_plan(&self, user_id: &str, plan_name: &str) -> AppResult<PlanAdoption> {
        let plan = catalogue::find_plan(plan_name)
            .ok_or_else(|| AppError::Validation(format!("unknown health plan '{}'", plan_name.trim())))?;

        let profile = self.gateway.adopt_plan(user_id, plan.name).await?;
        Ok(PlanAdoption {
            success: true,
            message: format!("{} adopted successfully", plan.name),
            adopted_plans: profile.adopted_plans,
        })
    }

    async fn require_profile(&self, user_id: &str) -> AppResult<UserProfile> {
        self.gateway
            .get_user_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user profile {}", user_id)))
    }
}
