use crate::catalogue;
use crate::consultation::ConsultationOrchestrator;
use crate::error::{AppError, AppResult};
use crate::gateway::PersistenceGateway;
use crate::models::{BotUser, Channel, NewConsultation};
use crate::profile;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const BUTTON_QUICK_SOLUTIONS: &str = "🔍 Quick Health Solutions";
pub const BUTTON_HEALTH_PLANS: &str = "💊 Health Plans";
pub const BUTTON_CONSULTATION: &str = "🤖 AI Health Consultation";
pub const BUTTON_STATUS: &str = "📊 Health Status";
pub const BUTTON_REPORTS: &str = "📋 Community Reports";
pub const BUTTON_EMERGENCY: &str = "🆘 Emergency Help";
pub const BUTTON_LANGUAGE: &str = "🌍 Change Language";
pub const BUTTON_ABOUT: &str = "ℹ️ About MedAether";
pub const BUTTON_BACK: &str = "🔙 Back to Main Menu";

/// Language buttons and the codes they select.
pub const LANGUAGE_BUTTONS: &[(&str, &str)] = &[
    ("🇺🇸 English", "en"),
    ("🇮🇳 Hindi", "hi"),
    ("🇪🇸 Spanish", "es"),
    ("🇫🇷 French", "fr"),
    ("🇩🇪 German", "de"),
    ("🇨🇳 Chinese", "zh"),
];

pub const REPLY_PREFIX: &str = "🤖 *MedAether AI Doctor:*\n\n";
pub const DISCLAIMER: &str =
    "⚠️ *Important:* This is general health information only. Always consult healthcare professionals for medical diagnosis and treatment.";
pub const LANGUAGE_CONFIRMATION: &str = "✅ Language updated successfully!";
pub const TECHNICAL_DIFFICULTIES: &str = "😔 Sorry, I'm experiencing technical difficulties. Please try again in a moment.";

const HELP_TEXT: &str = "🆘 *MedAether Help* 🆘

*Available Commands:*
• /start - Start the bot
• /help - Show this help message
• /emergency - Get emergency contacts
• /language - Change language
• /status - Check your health status
• /link <profile id> - Connect your web health profile

*Quick Actions:*
• Send any health-related message for AI consultation

*Emergency:*
If you're experiencing a medical emergency, please contact your local emergency services immediately:
• 🚨 Emergency: 911
• 🏥 Poison Control: 1-800-222-1222";

pub const EMERGENCY_TEXT: &str = "🚨 *EMERGENCY CONTACTS* 🚨

*Immediate Emergency:*
📞 911 - Police/Fire/Medical Emergency

*Medical Emergency:*
🏥 Emergency Room - Go to nearest hospital
☎️ Poison Control: 1-800-222-1222

*Mental Health Crisis:*
🧠 National Suicide Prevention Lifeline: 988
💬 Crisis Text Line: Text HOME to 741741

⚠️ If you're experiencing chest pain, difficulty breathing, severe bleeding, or any life-threatening symptoms, call 911 immediately!";

const CONSULTATION_PROMPT: &str = "🤖 *AI HEALTH CONSULTATION* 🤖

I'm ready to help with your health concerns!

*How to get the best help:*
1. Describe your symptoms clearly
2. Mention your age and gender if relevant
3. Include any existing medical conditions
4. Ask specific questions

💬 Just type your health question below, and I'll provide personalized advice!";

const COMMUNITY_REPORTS_TEXT: &str = "📋 *COMMUNITY HEALTH REPORTS* 📋

*Help your community by reporting health issues:*

🏥 *What to report:*
• Disease outbreaks
• Water/air pollution affecting health
• Food poisoning incidents
• Environmental health hazards

📝 *How to report:*
1. Open the web platform and link this chat with /link <profile id>
2. Go to the \"Community Reports\" section
3. Fill out the report form with the location and details

⚠️ *For immediate emergencies, call 911 directly!*";

const ABOUT_TEXT: &str = "ℹ️ *ABOUT MEDAETHER* ℹ️

🩺 *MedAether* is an AI-driven public health assistant designed to make health guidance accessible to everyone.

*Features:*
• 🤖 AI-powered medical consultations
• 💊 Quick solutions for common health problems
• 📅 Health plans
• 📋 Community health reporting
• 🆔 Digital health cards
• 🌍 Multilingual replies

*Mission:*
To bridge the healthcare gap with instant health guidance and community health awareness.";

pub const VOICE_TEXT: &str = "🎤 I received your voice message! However, voice processing is currently available only on our web platform.

You can also type your question here, and I'll be happy to help! 😊";

const NO_PROFILE_TEXT: &str =
    "❌ No health profile linked. Register on the web platform, then send /link <profile id>.";

/// Reply keyboard shown under a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyboard {
    Main,
    Language,
}

impl Keyboard {
    pub fn rows(&self) -> Vec<Vec<&'static str>> {
        match self {
            Keyboard::Main => vec![
                vec![BUTTON_QUICK_SOLUTIONS, BUTTON_HEALTH_PLANS],
                vec![BUTTON_CONSULTATION, BUTTON_STATUS],
                vec![BUTTON_REPORTS, BUTTON_EMERGENCY],
                vec![BUTTON_LANGUAGE, BUTTON_ABOUT],
            ],
            Keyboard::Language => {
                let mut rows: Vec<Vec<&'static str>> = LANGUAGE_BUTTONS
                    .chunks(2)
                    .map(|pair| pair.iter().map(|(label, _)| *label).collect())
                    .collect();
                rows.push(vec![BUTTON_BACK]);
                rows
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub first_name: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotReply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl BotReply {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// What an incoming chat line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotInput {
    Start,
    Help,
    Emergency,
    LanguageMenu,
    Status,
    Link(String),
    ConsultationPrompt,
    QuickSolutions,
    HealthPlans,
    CommunityReports,
    About,
    SelectLanguage(&'static str),
    BackToMenu,
    Consultation(String),
    Empty,
}

impl BotInput {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return BotInput::Empty;
        }

        if let Some(command) = text.strip_prefix('/') {
            let mut parts = command.splitn(2, char::is_whitespace);
            let name = parts.next().unwrap_or_default().to_ascii_lowercase();
            let arg = parts.next().map(str::trim).unwrap_or_default();
            match name.as_str() {
                "start" => return BotInput::Start,
                "help" => return BotInput::Help,
                "emergency" => return BotInput::Emergency,
                "language" => return BotInput::LanguageMenu,
                "status" => return BotInput::Status,
                "link" => return BotInput::Link(arg.to_string()),
                _ => {}
            }
        }

        if let Some((_, code)) = LANGUAGE_BUTTONS.iter().find(|(label, _)| *label == text) {
            return BotInput::SelectLanguage(*code);
        }

        match text {
            BUTTON_QUICK_SOLUTIONS => BotInput::QuickSolutions,
            BUTTON_HEALTH_PLANS => BotInput::HealthPlans,
            BUTTON_CONSULTATION => BotInput::ConsultationPrompt,
            BUTTON_REPORTS => BotInput::CommunityReports,
            BUTTON_ABOUT => BotInput::About,
            BUTTON_STATUS => BotInput::Status,
            BUTTON_EMERGENCY => BotInput::Emergency,
            BUTTON_LANGUAGE => BotInput::LanguageMenu,
            BUTTON_BACK => BotInput::BackToMenu,
            other => BotInput::Consultation(other.to_string()),
        }
    }
}

/// Calling contract of the chat bot transport.
#[derive(Clone)]
pub struct BotChannel {
    gateway: Arc<dyn PersistenceGateway>,
    orchestrator: Arc<ConsultationOrchestrator>,
}

impl BotChannel {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, orchestrator: Arc<ConsultationOrchestrator>) -> Self {
        Self { gateway, orchestrator }
    }

    #[instrument(skip(self, message), fields(chat_id = message.chat_id))]
    pub async fn handle(&self, message: IncomingMessage) -> AppResult<BotReply> {
        let user = self
            .gateway
            .upsert_bot_user(message.chat_id, message.first_name.clone())
            .await?;

        match BotInput::parse(&message.text) {
            BotInput::Start => Ok(BotReply::with_keyboard(welcome_text(&user), Keyboard::Main)),
            BotInput::Help => Ok(BotReply::plain(HELP_TEXT)),
            BotInput::Emergency => Ok(BotReply::plain(EMERGENCY_TEXT)),
            BotInput::LanguageMenu => Ok(BotReply::with_keyboard(
                "🌍 *Select your preferred language:*",
                Keyboard::Language,
            )),
            BotInput::ConsultationPrompt => Ok(BotReply::plain(CONSULTATION_PROMPT)),
            BotInput::QuickSolutions => Ok(BotReply::plain(catalogue::quick_solutions_text())),
            BotInput::HealthPlans => Ok(BotReply::plain(catalogue::health_plans_text())),
            BotInput::CommunityReports => Ok(BotReply::plain(COMMUNITY_REPORTS_TEXT)),
            BotInput::About => Ok(BotReply::plain(ABOUT_TEXT)),
            BotInput::BackToMenu => Ok(BotReply::with_keyboard("🏠 Back to main menu!", Keyboard::Main)),
            BotInput::SelectLanguage(code) => self.select_language(&user, code).await,
            BotInput::Status => self.health_status(&user).await,
            BotInput::Link(profile_id) => self.link(&user, &profile_id).await,
            BotInput::Consultation(text) => Ok(self.consultation(&user, &text).await),
            BotInput::Empty => Ok(BotReply::with_keyboard("👆 Use the menu below to get started!", Keyboard::Main)),
        }
    }

    /// Voice notes are not transcribed; the sender is asked to type instead.
    pub async fn handle_voice(&self, chat_id: i64, first_name: Option<String>) -> AppResult<BotReply> {
        self.gateway.upsert_bot_user(chat_id, first_name).await?;
        info!(chat_id, "Voice message declined");
        Ok(BotReply::plain(VOICE_TEXT))
    }

    async fn select_language(&self, user: &BotUser, code: &str) -> AppResult<BotReply> {
        self.gateway.set_bot_language(user.chat_id, code).await?;
        info!(chat_id = user.chat_id, language = code, "Bot language changed");

        let confirmation = self.orchestrator.translate_best_effort(LANGUAGE_CONFIRMATION, code).await;
        Ok(BotReply::with_keyboard(confirmation, Keyboard::Main))
    }

    async fn health_status(&self, user: &BotUser) -> AppResult<BotReply> {
        let Some(user_id) = &user.linked_user_id else {
            return Ok(BotReply::plain(NO_PROFILE_TEXT));
        };

        let (profile, assessment) =
            match profile::refresh_health_tier(self.gateway.as_ref(), self.orchestrator.classifier(), user_id).await {
                Ok(found) => found,
                Err(AppError::NotFound(_)) => {
                    warn!(chat_id = user.chat_id, user_id = %user_id, "Linked profile no longer exists");
                    return Ok(BotReply::plain(NO_PROFILE_TEXT));
                }
                Err(e) => return Err(e),
            };

        let text = format!(
            "📊 *YOUR HEALTH STATUS* 📊\n\n👤 *Profile:*\n• Name: {}\n• Status: {}\n\n📈 *Recent Activity:*\n• Total consultations: {}",
            profile.name,
            assessment.tier.presentation().badge,
            user.consultation_count
        );
        Ok(BotReply::plain(text))
    }

    async fn link(&self, user: &BotUser, profile_id: &str) -> AppResult<BotReply> {
        if profile_id.is_empty() {
            return Ok(BotReply::plain("Usage: /link <profile id>"));
        }
        let Some(profile) = self.gateway.get_user_profile(profile_id).await? else {
            return Ok(BotReply::plain(format!("❌ No profile found with id {}", profile_id)));
        };

        self.gateway.link_bot_user(user.chat_id, &profile.id).await?;
        info!(chat_id = user.chat_id, user_id = %profile.id, "Bot user linked to profile");
        Ok(BotReply::with_keyboard(
            format!("✅ Linked to the health profile of {}.", profile.name),
            Keyboard::Main,
        ))
    }

    /// Runs a consultation and persists it. Storage failures become an apology reply.
    async fn consultation(&self, user: &BotUser, text: &str) -> BotReply {
        let language = user.preferred_language.as_str();
        match self.try_consultation(user, text).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(chat_id = user.chat_id, error = %e, "Bot consultation failed");
                BotReply::plain(
                    self.orchestrator
                        .translate_best_effort(TECHNICAL_DIFFICULTIES, language)
                        .await,
                )
            }
        }
    }

    async fn try_consultation(&self, user: &BotUser, text: &str) -> AppResult<BotReply> {
        let language = user.preferred_language.as_str();
        let linked = match &user.linked_user_id {
            Some(user_id) => self.gateway.get_user_profile(user_id).await?,
            None => None,
        };

        let result = self.orchestrator.consult(linked.as_ref(), text, language).await;
        let disclaimer = self.orchestrator.translate_best_effort(DISCLAIMER, language).await;

        self.gateway
            .save_consultation(NewConsultation {
                owner: user.owner(),
                channel: Channel::Bot,
                message: text.to_string(),
                advice: result.text.clone(),
                language: language.to_string(),
            })
            .await?;
        self.gateway.record_bot_consultation(user.chat_id).await?;

        Ok(BotReply::plain(format!("{}{}\n\n{}", REPLY_PREFIX, result.text, disclaimer)))
    }
}

fn welcome_text(user: &BotUser) -> String {
    let name = user.first_name.as_deref().unwrap_or("there");
    format!(
        "🩺 *Welcome to MedAether!* 🩺\n\nHi {}! I'm your AI-powered health companion.\n\n\
*What I can help you with:*\n• 🔍 Quick health solutions\n• 💊 Health plans\n• 🤖 AI medical consultations\n\
• 📊 Health status\n• 📋 Community health reports\n• 🆘 Emergency assistance\n\n\
⚠️ *Medical Disclaimer:* This bot provides general health information only. Always consult healthcare professionals for serious medical conditions.\n\n\
👆 Use the menu below to get started!",
        name
    )
}
