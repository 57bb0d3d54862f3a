use super::context::{system_instruction, ProfileContext};
use super::fallback;
use crate::models::UserProfile;
use crate::providers::{AdviceProvider, ProviderError, Translation, TranslationAdapter, TranslationStatus};
use crate::triage::{ConditionClassifier, HealthTier};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// Where the advice text came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdviceSource {
    Provider { name: String },
    Fallback { reason: ProviderError },
}

impl AdviceSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, AdviceSource::Fallback { .. })
    }
}

/// Outcome of one consultation. Always produced, whatever the providers did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceResult {
    /// Final text in the requested language (or in the base language if translation failed open).
    pub text: String,
    /// Tier injected into the system instruction, `None` for anonymous consultations.
    pub tier_context_used: Option<HealthTier>,
    pub source: AdviceSource,
    pub translation: TranslationStatus,
}

/// Builds the prompt, calls the advice provider, degrades to static guidance and translates.
///
/// Holds only `Arc` handles and immutable settings, so one instance serves every
/// concurrent consultation. It never persists anything and never writes a tier back.
#[derive(Clone)]
pub struct ConsultationOrchestrator {
    advice: Arc<dyn AdviceProvider>,
    translator: TranslationAdapter,
    classifier: ConditionClassifier,
    advice_timeout: Duration,
}

impl ConsultationOrchestrator {
    pub fn new(advice: Arc<dyn AdviceProvider>, translator: TranslationAdapter, advice_timeout: Duration) -> Self {
        Self {
            advice,
            translator,
            classifier: ConditionClassifier::default(),
            advice_timeout,
        }
    }

    pub fn with_classifier(mut self, classifier: ConditionClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn classifier(&self) -> &ConditionClassifier {
        &self.classifier
    }

    pub fn base_language(&self) -> &str {
        self.translator.base_language()
    }

    #[instrument(skip(self, profile, message), fields(language = %language, has_profile = profile.is_some()))]
    pub async fn consult(&self, profile: Option<&UserProfile>, message: &str, language: &str) -> AdviceResult {
        let context = profile.map(|p| ProfileContext::from_profile(p, &self.classifier));
        let tier_context_used = context.as_ref().map(|ctx| ctx.tier);

        let (advice, source) = match self.request_advice(context.as_ref(), message).await {
            Ok(text) => (
                text,
                AdviceSource::Provider {
                    name: self.advice.name().to_string(),
                },
            ),
            Err(reason) => {
                warn!(provider = self.advice.name(), reason = %reason, "Advice provider unavailable, using fallback guidance");
                (fallback::for_context(context.as_ref()), AdviceSource::Fallback { reason })
            }
        };

        let Translation { text, status } = self.translator.translate(&advice, language).await;

        info!(
            tier = ?tier_context_used,
            fallback = source.is_fallback(),
            "Consultation answered"
        );

        AdviceResult {
            text,
            tier_context_used,
            source,
            translation: status,
        }
    }

    /// Translates channel chrome (disclaimers, confirmations). Falls back to the input text.
    pub async fn translate_best_effort(&self, text: &str, language: &str) -> String {
        self.translator.translate(text, language).await.text
    }

    async fn request_advice(&self, context: Option<&ProfileContext>, message: &str) -> Result<String, ProviderError> {
        if !self.advice.is_available() {
            return Err(ProviderError::Unavailable);
        }

        let system = system_instruction(context);
        debug!(provider = self.advice.name(), "Calling advice provider");

        let reply = timeout(
            self.advice_timeout,
            self.advice.generate_advice(system, message.to_string()),
        )
        .await??;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ProviderError::Malformed("empty advice".to_string()));
        }
        Ok(reply.to_string())
    }
}
