//! Static guidance returned when no language model answer is available.

use super::context::ProfileContext;

const GUIDANCE_STEPS: &str = "1. Monitor your symptoms carefully\n\
2. Stay hydrated and get adequate rest\n\
3. Consult a healthcare professional for personalized advice\n\
4. Seek immediate medical attention if symptoms worsen";

const GUIDANCE_NOTE: &str =
    "Please note: This is general guidance only and not a substitute for professional medical consultation.";

pub const GENERIC_OPENING: &str =
    "I'm here to help with general health information. For your specific concern, I recommend:";

/// Template used when no profile, or a profile without history, is known.
pub fn generic() -> String {
    format!("{}\n\n{}\n\n{}", GENERIC_OPENING, GUIDANCE_STEPS, GUIDANCE_NOTE)
}

/// Template that names the profile's recorded conditions before the general guidance.
pub fn history_aware(context: &ProfileContext) -> String {
    format!(
        "Since your records mention {}, please keep those conditions in mind and tell your doctor about them.\n\n{}\n\n{}\n\n{}",
        context.history_line(),
        GENERIC_OPENING,
        GUIDANCE_STEPS,
        GUIDANCE_NOTE
    )
}

/// Picks the template for the given context.
pub fn for_context(context: Option<&ProfileContext>) -> String {
    match context {
        Some(ctx) if !ctx.history.is_empty() => history_aware(ctx),
        _ => generic(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use crate::triage::HealthTier;

    fn context(history: &[&str]) -> ProfileContext {
        ProfileContext {
            age: 40,
            gender: Gender::Female,
            tier: HealthTier::Yellow,
            history: history.iter().map(|s| s.to_string()).collect(),
            omitted: 0,
        }
    }

    #[test]
    fn test_history_aware_lists_conditions() {
        let text = for_context(Some(&context(&["asthma", "migraines"])));
        assert!(text.contains("asthma, migraines"));
        assert!(text.contains(GENERIC_OPENING));
    }

    #[test]
    fn test_empty_history_gets_generic() {
        assert_eq!(for_context(Some(&context(&[]))), generic());
        assert_eq!(for_context(None), generic());
    }
}
