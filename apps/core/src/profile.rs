//! Profile flows that keep the cached health tier in step with the medical history.
//!
//! Each history mutation is followed by a recompute and a separate `update_health_tier`
//! write. The two writes are not atomic; a reader in between sees a stale tier, which the
//! next recompute reconciles.

use crate::error::{AppError, AppResult};
use crate::gateway::PersistenceGateway;
use crate::models::{HealthMetrics, NewUserProfile, ProfileUpdate, UserProfile};
use crate::triage::{ConditionClassifier, TierAssessment};
use tracing::{info, instrument};
use validator::Validate;

/// Trims entries and drops blank ones. Order and duplicates are kept.
pub fn normalize_history(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[instrument(skip_all)]
pub async fn register<G>(gateway: &G, classifier: &ConditionClassifier, mut new_profile: NewUserProfile) -> AppResult<UserProfile>
where
    G: PersistenceGateway + ?Sized,
{
    new_profile.name = new_profile.name.trim().to_string();
    new_profile.validate()?;
    new_profile.medical_history = normalize_history(new_profile.medical_history);

    let mut profile = gateway.create_user_profile(new_profile).await?;
    let tier = classifier.classify(&profile.medical_history);
    gateway.update_health_tier(&profile.id, tier).await?;
    profile.health_tier = tier;

    info!(id = %profile.id, tier = %tier, "Profile registered");
    Ok(profile)
}

#[instrument(skip(gateway, classifier, update))]
pub async fn edit<G>(gateway: &G, classifier: &ConditionClassifier, id: &str, mut update: ProfileUpdate) -> AppResult<UserProfile>
where
    G: PersistenceGateway + ?Sized,
{
    update.name = update.name.map(|name| name.trim().to_string());
    update.validate()?;
    update.medical_history = update.medical_history.map(normalize_history);
    let history_changed = update.medical_history.is_some();

    let mut profile = gateway.update_profile(id, update).await?;
    if history_changed {
        let tier = classifier.classify(&profile.medical_history);
        gateway.update_health_tier(id, tier).await?;
        profile.health_tier = tier;
    }
    Ok(profile)
}

pub async fn update_metrics<G>(gateway: &G, id: &str, metrics: HealthMetrics) -> AppResult<UserProfile>
where
    G: PersistenceGateway + ?Sized,
{
    metrics.validate()?;
    gateway.update_health_metrics(id, metrics).await
}

/// Recomputes the tier from the stored history and writes it back.
#[instrument(skip(gateway, classifier))]
pub async fn refresh_health_tier<G>(gateway: &G, classifier: &ConditionClassifier, id: &str) -> AppResult<(UserProfile, TierAssessment)>
where
    G: PersistenceGateway + ?Sized,
{
    let mut profile = gateway
        .get_user_profile(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user profile {}", id)))?;

    let assessment = classifier.assess(&profile.medical_history);
    if assessment.tier != profile.health_tier {
        info!(
            from = %profile.health_tier,
            to = %assessment.tier,
            category = assessment.matched_category.map(|c| c.label()).unwrap_or("none"),
            keyword = ?assessment.matched_keyword,
            "Health tier changed"
        );
    }
    gateway.update_health_tier(id, assessment.tier).await?;
    profile.health_tier = assessment.tier;

    Ok((profile, assessment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_history_keeps_order_and_duplicates() {
        let entries = vec![
            "  asthma ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "asthma".to_string(),
            "Migraines".to_string(),
        ];
        assert_eq!(normalize_history(entries), vec!["asthma", "asthma", "Migraines"]);
    }
}
