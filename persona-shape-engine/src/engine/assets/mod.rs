//! Runtime-loaded configuration assets.

/// Questionnaire texts, trait labels and title template loaded from JSON.
pub mod survey_manifest;
