//! Questionnaire answers and the five-trait personality profile.
//!
//! Turns ten 1-7 Likert answers (TIPI-J item order) into percentages for
//! extroversion, agreeableness, conscientiousness, neuroticism and openness.

/// Profile and trait types plus the breakdown handed to the results display.
pub mod profile;

/// Answer collection and the reverse-scored pairing that produces a profile.
pub mod scoring;

pub use profile::{PersonalityProfile, Trait, TraitBreakdown};
pub use scoring::{Answers, ProfileError, score};
