//! Static tier-to-presentation table used by the health card and the bot status reply.

use super::tier::HealthTier;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierPresentation {
    pub label: &'static str,
    pub description: &'static str,
    /// Hex color used by the web card.
    pub color: &'static str,
    pub icon: &'static str,
    /// Emoji badge used by the chat bot.
    pub badge: &'static str,
}

const GREEN: TierPresentation = TierPresentation {
    label: "Healthy / Fit",
    description: "No major health concerns identified",
    color: "#198754",
    icon: "check-circle",
    badge: "🟢 Healthy",
};

const YELLOW: TierPresentation = TierPresentation {
    label: "Moderate Health Issues",
    description: "Some health conditions requiring monitoring",
    color: "#ffc107",
    icon: "exclamation-triangle",
    badge: "🟡 Moderate Issues",
};

const RED: TierPresentation = TierPresentation {
    label: "Serious Medical Condition",
    description: "Requires immediate medical attention",
    color: "#dc3545",
    icon: "exclamation-circle",
    badge: "🔴 Attention Needed",
};

impl HealthTier {
    pub fn presentation(&self) -> &'static TierPresentation {
        match self {
            HealthTier::Green => &GREEN,
            HealthTier::Yellow => &YELLOW,
            HealthTier::Red => &RED,
        }
    }
}
