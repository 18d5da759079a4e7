//! Configuration module for Regn.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{GeneralSettings, LlmSettings, Settings, StreamSettings};
