//! # Channels
//!
//! Transport-facing adapters. They resolve identities, call the orchestrator, persist the
//! consultation record and shape the reply for their surface.
//!
//! - `web`: JSON-shaped request handlers
//! - `bot`: chat bot commands, menu buttons and free-text consultations

pub mod bot;
pub mod web;

pub use bot::{BotChannel, BotInput, BotReply, IncomingMessage, Keyboard};
pub use web::{
    ChatReply, ChatRequest, HealthCard, PlanAdoption, StatusUpdate, TranslateReply, TranslateRequest, WebChannel,
    CHAT_HISTORY_LIMIT,
};
