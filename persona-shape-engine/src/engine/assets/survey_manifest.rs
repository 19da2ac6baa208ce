use bevy::prelude::*;
use constants::survey::{DEFAULT_DISPLAY_NAME, QUESTIONS, TITLE_TEMPLATE, TRAIT_LABELS};
use serde::{Deserialize, Serialize};

use crate::personality::Trait;

/// Display name and pole names for one trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitLabelEntry {
    pub key: String,
    pub name: String,
    pub low: String,
    pub high: String,
}

/// Questionnaire text and result labels as a Bevy asset. Mirrors `survey.json`.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath, Resource)]
pub struct SurveyManifest {
    pub questions: Vec<String>,
    pub trait_labels: Vec<TraitLabelEntry>,
    pub default_name: String,
    /// `{name}` is replaced with the display name.
    pub title_template: String,
}

impl Default for SurveyManifest {
    fn default() -> Self {
        Self {
            questions: QUESTIONS.iter().map(|q| q.to_string()).collect(),
            trait_labels: TRAIT_LABELS
                .iter()
                .map(|label| TraitLabelEntry {
                    key: label.key.to_string(),
                    name: label.name.to_string(),
                    low: label.low.to_string(),
                    high: label.high.to_string(),
                })
                .collect(),
            default_name: DEFAULT_DISPLAY_NAME.to_string(),
            title_template: TITLE_TEMPLATE.to_string(),
        }
    }
}

impl SurveyManifest {
    pub fn label_for(&self, trait_kind: Trait) -> Option<&TraitLabelEntry> {
        self.trait_labels
            .iter()
            .find(|label| label.key == trait_kind.key())
    }

    /// Title shown above the shape. Blank names fall back to the default name.
    pub fn display_title(&self, name: &str) -> String {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            self.default_name.as_str()
        } else {
            trimmed
        };
        self.title_template.replace("{name}", name)
    }
}
