use crate::providers::ProviderError;
use async_trait::async_trait;

/// Defines the public interface for a hosted language model that writes health advice.
///
/// Two variants exist: a real HTTP-backed provider and a null provider used when no
/// model is configured. The variant is chosen once at startup, so business logic never
/// branches on whether a client exists.
#[async_trait]
pub trait AdviceProvider: Send + Sync + 'static {
    /// Generates advice for `user_message`, with `system_context` as the system-level instruction.
    async fn generate_advice(&self, system_context: String, user_message: String) -> Result<String, ProviderError>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether this provider can ever answer. The null provider returns `false`.
    fn is_available(&self) -> bool {
        true
    }
}

/// Defines the public interface for a machine translation backend.
///
/// Implementations may fail freely; `TranslationAdapter` is the fail-open wrapper the rest
/// of the crate talks to.
#[async_trait]
pub trait TranslationProvider: Send + Sync + 'static {
    /// Translates `text` into `target_language` (ISO 639-1 code).
    async fn translate(&self, text: String, target_language: String) -> Result<String, ProviderError>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}
