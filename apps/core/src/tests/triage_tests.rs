//! Triage Tests
//!
//! Tier rules over the standard taxonomy.

use crate::triage::{classify, ConditionCategory, ConditionClassifier, HealthTier};

fn permutations(items: &[&'static str]) -> Vec<Vec<&'static str>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

#[test]
fn test_serious_keyword_dominates() {
    let histories: Vec<Vec<&str>> = vec![
        vec!["type 2 diabetes"],
        vec!["asthma", "type 2 diabetes"],
        vec!["seasonal allergies", "Type 2 Diabetes", "migraines"],
        vec!["unrecognized condition xyz", "history of STROKE"],
    ];

    for history in histories {
        assert_eq!(classify(&history), HealthTier::Red, "history {:?}", history);
    }
}

#[test]
fn test_only_moderate_or_mild_is_yellow() {
    assert_eq!(classify(&["hypertension", "acid reflux"]), HealthTier::Yellow);
    assert_eq!(classify(&["seasonal allergies"]), HealthTier::Yellow);
    assert_eq!(classify(&["occasional insomnia", "minor joint pain"]), HealthTier::Yellow);
}

#[test]
fn test_empty_and_unrecognized() {
    let empty: [&str; 0] = [];
    assert_eq!(classify(&empty), HealthTier::Green);
    assert_eq!(classify(&["unrecognized condition xyz"]), HealthTier::Yellow);
}

#[test]
fn test_allergies_alone_is_yellow_not_green() {
    let classifier = ConditionClassifier::default();
    let assessment = classifier.assess(&["allergies"]);

    assert_eq!(assessment.tier, HealthTier::Yellow);
    assert_eq!(assessment.matched_category, Some(ConditionCategory::Mild));
    assert_eq!(assessment.matched_keyword.as_deref(), Some("allergies"));
}

#[test]
fn test_order_independence() {
    let sets: [&[&'static str]; 4] = [
        &["asthma", "allergies", "cancer", "acne"],
        &["migraines", "seasonal allergies", "unknown"],
        &["Thyroid", "depression", "sleep apnea", "occasional headaches"],
        &["chronic kidney disease", "arthritis"],
    ];

    for set in sets {
        let expected = classify(set);
        for permutation in permutations(set) {
            assert_eq!(classify(&permutation), expected, "permutation {:?}", permutation);
        }
    }
}

#[test]
fn test_assess_agrees_with_classify() {
    let classifier = ConditionClassifier::default();
    let histories: Vec<Vec<&str>> = vec![
        vec![],
        vec!["HIV positive"],
        vec!["anxiety"],
        vec!["mild asthma"],
        vec!["broken arm"],
    ];

    for history in histories {
        assert_eq!(classifier.assess(&history).tier, classify(&history));
    }
}
