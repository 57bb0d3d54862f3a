use crate::providers::traits::{AdviceProvider, TranslationProvider};
use crate::providers::ProviderError;
use async_trait::async_trait;

/// Null advice provider selected when no language model is configured.
///
/// Every call fails with `ProviderError::Unavailable`, which sends the orchestrator down
/// its fallback path.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableAdviceProvider;

#[async_trait]
impl AdviceProvider for UnavailableAdviceProvider {
    async fn generate_advice(&self, _system_context: String, _user_message: String) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable)
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Null translation provider selected when no translation key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTranslationProvider;

#[async_trait]
impl TranslationProvider for DisabledTranslationProvider {
    async fn translate(&self, _text: String, _target_language: String) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
