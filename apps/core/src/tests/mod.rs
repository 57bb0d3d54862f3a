//! Test Module
//!
//! Cross-module test suite for the MedAether core.
//!
//! ## Test Categories
//! - `triage_tests`: tier rules, serious dominance, order independence
//! - `consultation_tests`: context injection, fallback, timeouts, fail-open translation
//! - `gateway_tests`: SQLite persistence of profiles, consultations, reports, bot users
//! - `channel_tests`: web and bot adapters end to end over a real database, and over a broken one
//! - `concurrency_tests`: many consultations in flight against one orchestrator

mod support;

pub mod gateway_tests;
pub mod triage_tests;
