//! Gateway Tests
//!
//! SQLite persistence through the `PersistenceGateway` trait.

use super::support::{create_test_gateway, new_profile};
use crate::error::AppError;
use crate::gateway::PersistenceGateway;
use crate::models::{
    Channel, Gender, HealthMetrics, NewConsultation, NewReport, Owner, ProfileUpdate, ReportSeverity, ReportStatus,
};
use crate::triage::HealthTier;

fn consultation(owner: Owner, message: &str) -> NewConsultation {
    NewConsultation {
        owner,
        channel: Channel::Web,
        message: message.to_string(),
        advice: format!("advice for {}", message),
        language: "en".to_string(),
    }
}

#[cfg(test)]
mod profile_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_profile() {
        let (gateway, _dir) = create_test_gateway().await;

        let created = gateway
            .create_user_profile(new_profile("Asha", &["asthma", "asthma"]))
            .await
            .expect("Failed to create profile");

        assert!(!created.id.is_empty());
        assert_eq!(created.health_tier, HealthTier::Green);

        let fetched = gateway
            .get_user_profile(&created.id)
            .await
            .expect("Failed to get profile")
            .expect("Profile missing");
        assert_eq!(fetched, created);
        assert_eq!(fetched.medical_history, vec!["asthma", "asthma"]);
    }

    #[tokio::test]
    async fn test_unknown_profile() {
        let (gateway, _dir) = create_test_gateway().await;

        assert!(gateway.get_user_profile("nope").await.unwrap().is_none());
        assert!(matches!(
            gateway.update_health_tier("nope", HealthTier::Red).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            gateway.update_health_metrics("nope", HealthMetrics::default()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_health_tier() {
        let (gateway, _dir) = create_test_gateway().await;
        let created = gateway.create_user_profile(new_profile("Ben", &[])).await.unwrap();

        gateway.update_health_tier(&created.id, HealthTier::Red).await.unwrap();

        let fetched = gateway.get_user_profile(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.health_tier, HealthTier::Red);
    }

    #[tokio::test]
    async fn test_update_profile_keeps_unchanged_fields() {
        let (gateway, _dir) = create_test_gateway().await;
        let created = gateway.create_user_profile(new_profile("Cleo", &["acne"])).await.unwrap();

        let updated = gateway
            .update_profile(
                &created.id,
                ProfileUpdate {
                    age: Some(61),
                    gender: Some(Gender::Other),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Cleo");
        assert_eq!(updated.age, 61);
        assert_eq!(updated.gender, Gender::Other);
        assert_eq!(updated.medical_history, vec!["acne"]);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_health_metrics_round_trip() {
        let (gateway, _dir) = create_test_gateway().await;
        let created = gateway.create_user_profile(new_profile("Dev", &[])).await.unwrap();
        let metrics = HealthMetrics {
            weight_kg: Some(81.5),
            height_cm: Some(177),
            blood_pressure: Some("128/84".to_string()),
            blood_sugar_mg_dl: None,
        };

        let updated = gateway.update_health_metrics(&created.id, metrics.clone()).await.unwrap();

        assert_eq!(updated.metrics, Some(metrics));
    }

    #[tokio::test]
    async fn test_adopt_plan_is_a_set() {
        let (gateway, _dir) = create_test_gateway().await;
        let created = gateway.create_user_profile(new_profile("Lin", &[])).await.unwrap();
        assert!(created.adopted_plans.is_empty());

        gateway.adopt_plan(&created.id, "Heart Health Plan").await.unwrap();
        gateway.adopt_plan(&created.id, "Liver Care Plan").await.unwrap();
        let updated = gateway.adopt_plan(&created.id, "Heart Health Plan").await.unwrap();

        assert_eq!(updated.adopted_plans, vec!["Heart Health Plan", "Liver Care Plan"]);
        assert!(matches!(
            gateway.adopt_plan("nope", "Heart Health Plan").await,
            Err(AppError::NotFound(_))
        ));
    }
}

#[cfg(test)]
mod consultation_tests {
    use super::*;

    #[tokio::test]
    async fn test_consultations_listed_most_recent_first() {
        let (gateway, _dir) = create_test_gateway().await;
        let owner = Owner::User("u-1".to_string());

        for i in 0..25 {
            gateway
                .save_consultation(consultation(owner.clone(), &format!("message {}", i)))
                .await
                .unwrap();
        }

        let listed = gateway.list_consultations(&owner, 20).await.unwrap();

        assert_eq!(listed.len(), 20);
        assert_eq!(listed[0].message, "message 24");
        assert_eq!(listed[19].message, "message 5");
        assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_consultations_are_scoped_by_owner() {
        let (gateway, _dir) = create_test_gateway().await;
        let user = Owner::User("42".to_string());
        let anonymous = Owner::Anonymous("42".to_string());

        let saved = gateway.save_consultation(consultation(user.clone(), "mine")).await.unwrap();
        gateway.save_consultation(consultation(anonymous.clone(), "theirs")).await.unwrap();

        let listed = gateway.list_consultations(&user, 20).await.unwrap();
        assert_eq!(listed, vec![saved]);
        assert_eq!(gateway.list_consultations(&anonymous, 20).await.unwrap().len(), 1);
    }
}

#[cfg(test)]
mod report_tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_list_reports() {
        let (gateway, _dir) = create_test_gateway().await;
        let user = gateway.create_user_profile(new_profile("Eve", &[])).await.unwrap();

        let report = gateway
            .save_report(NewReport {
                user_id: user.id.clone(),
                title: "Contaminated well".to_string(),
                description: "Several neighbours report stomach cramps.".to_string(),
                location: "North district".to_string(),
                severity: ReportSeverity::High,
            })
            .await
            .unwrap();

        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.submitted_at, report.updated_at);

        let listed = gateway.list_reports(&user.id).await.unwrap();
        assert_eq!(listed, vec![report]);
        assert!(gateway.list_reports("someone-else").await.unwrap().is_empty());
    }
}

#[cfg(test)]
mod bot_user_tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_keeps_settings() {
        let (gateway, _dir) = create_test_gateway().await;

        let first = gateway.upsert_bot_user(9, Some("Kai".to_string())).await.unwrap();
        assert_eq!(first.preferred_language, "en");
        assert_eq!(first.consultation_count, 0);

        gateway.set_bot_language(9, "hi").await.unwrap();
        gateway.record_bot_consultation(9).await.unwrap();
        gateway.record_bot_consultation(9).await.unwrap();

        let again = gateway.upsert_bot_user(9, None).await.unwrap();
        assert_eq!(again.first_name.as_deref(), Some("Kai"));
        assert_eq!(again.preferred_language, "hi");
        assert_eq!(again.consultation_count, 2);
        assert!(again.last_interaction >= first.last_interaction);
    }

    #[tokio::test]
    async fn test_link_and_missing_bot_user() {
        let (gateway, _dir) = create_test_gateway().await;
        gateway.upsert_bot_user(3, None).await.unwrap();

        gateway.link_bot_user(3, "profile-7").await.unwrap();
        let user = gateway.get_bot_user(3).await.unwrap().unwrap();
        assert_eq!(user.linked_user_id.as_deref(), Some("profile-7"));
        assert_eq!(user.owner(), Owner::User("profile-7".to_string()));

        assert!(gateway.get_bot_user(4).await.unwrap().is_none());
        assert!(matches!(gateway.set_bot_language(4, "fr").await, Err(AppError::NotFound(_))));
        assert!(matches!(gateway.record_bot_consultation(4).await, Err(AppError::NotFound(_))));
    }
}
