//! # Providers
//!
//! Capability boundaries around the external services the consultation flow calls.
//!
//! ## Components
//! - `traits`: `AdviceProvider` and `TranslationProvider` capability traits
//! - `openai`: chat-completions advice provider
//! - `translate`: Google translation provider and the fail-open `TranslationAdapter`
//! - `unavailable`: null variants selected when a capability is not configured

pub mod error;
pub mod openai;
pub mod traits;
pub mod translate;
pub mod unavailable;

pub use error::ProviderError;
pub use openai::OpenAiAdviceProvider;
pub use traits::{AdviceProvider, TranslationProvider};
pub use translate::{GoogleTranslateProvider, Translation, TranslationAdapter, TranslationStatus};
pub use unavailable::{DisabledTranslationProvider, UnavailableAdviceProvider};

use crate::config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Picks the advice provider variant once, at startup.
pub fn select_advice_provider(config: &AppConfig) -> Arc<dyn AdviceProvider> {
    match &config.advice.api_key {
        Some(key) => {
            info!(model = %config.advice.model, "Language model configured");
            Arc::new(OpenAiAdviceProvider::new(key.clone(), &config.advice))
        }
        None => {
            warn!("OPENAI_API_KEY not set: consultations will use fallback guidance");
            Arc::new(UnavailableAdviceProvider)
        }
    }
}

/// Builds the fail-open translation adapter over whichever provider is configured.
pub fn build_translation_adapter(config: &AppConfig) -> TranslationAdapter {
    let provider: Arc<dyn TranslationProvider> = match &config.translation.api_key {
        Some(key) => Arc::new(GoogleTranslateProvider::new(key.clone(), &config.translation)),
        None => {
            warn!("GOOGLE_TRANSLATE_API_KEY not set: replies stay in {}", config.base_language);
            Arc::new(DisabledTranslationProvider)
        }
    };
    TranslationAdapter::new(provider, config.base_language.clone(), config.translation.timeout)
}
