//! MedAether core: health-risk triage and AI-assisted consultations.

pub mod catalogue;
pub mod channels;
pub mod config;
pub mod consultation;
pub mod error;
pub mod gateway;
pub mod models;
pub mod profile;
pub mod providers;
pub mod telemetry;
pub mod triage;

#[cfg(test)]
mod tests;
