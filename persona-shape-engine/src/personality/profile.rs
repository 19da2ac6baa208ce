use serde::{Deserialize, Serialize};

use crate::engine::assets::survey_manifest::SurveyManifest;

/// One of the five personality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    Extroversion,
    Agreeableness,
    Conscientiousness,
    Neuroticism,
    Openness,
}

impl Trait {
    /// Display order used by the results view.
    pub const ALL: [Trait; 5] = [
        Trait::Extroversion,
        Trait::Agreeableness,
        Trait::Conscientiousness,
        Trait::Neuroticism,
        Trait::Openness,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Trait::Extroversion => "extroversion",
            Trait::Agreeableness => "agreeableness",
            Trait::Conscientiousness => "conscientiousness",
            Trait::Neuroticism => "neuroticism",
            Trait::Openness => "openness",
        }
    }
}

/// Trait percentages, each in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub extroversion: u8,
    pub agreeableness: u8,
    pub conscientiousness: u8,
    pub neuroticism: u8,
    pub openness: u8,
}

/// One row of the percentage breakdown shown next to the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitBreakdown {
    #[serde(rename = "trait")]
    pub trait_kind: Trait,
    pub label: String,
    pub low: String,
    pub high: String,
    pub percentage: u8,
}

impl PersonalityProfile {
    pub fn uniform(percentage: u8) -> Self {
        let p = percentage.min(100);
        Self {
            extroversion: p,
            agreeableness: p,
            conscientiousness: p,
            neuroticism: p,
            openness: p,
        }
    }

    pub fn get(&self, trait_kind: Trait) -> u8 {
        match trait_kind {
            Trait::Extroversion => self.extroversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Neuroticism => self.neuroticism,
            Trait::Openness => self.openness,
        }
    }

    /// Rows in display order, labelled from the survey manifest.
    /// Traits the manifest does not label fall back to their key.
    pub fn breakdown(&self, manifest: &SurveyManifest) -> Vec<TraitBreakdown> {
        Trait::ALL
            .iter()
            .map(|&trait_kind| {
                let label = manifest.label_for(trait_kind);
                TraitBreakdown {
                    trait_kind,
                    label: label
                        .map(|l| l.name.clone())
                        .unwrap_or_else(|| trait_kind.key().to_string()),
                    low: label.map(|l| l.low.clone()).unwrap_or_default(),
                    high: label.map(|l| l.high.clone()).unwrap_or_default(),
                    percentage: self.get(trait_kind),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_follows_display_order() {
        let profile = PersonalityProfile {
            extroversion: 83,
            agreeableness: 50,
            conscientiousness: 17,
            neuroticism: 0,
            openness: 100,
        };
        let rows = profile.breakdown(&SurveyManifest::default());

        let order: Vec<Trait> = rows.iter().map(|r| r.trait_kind).collect();
        assert_eq!(order, Trait::ALL.to_vec());
        let percentages: Vec<u8> = rows.iter().map(|r| r.percentage).collect();
        assert_eq!(percentages, vec![83, 50, 17, 0, 100]);
        assert_eq!(rows[0].label, "Extroversion");
        assert_eq!(rows[3].high, "Emotional (T)");
    }

    #[test]
    fn uniform_clamps_to_one_hundred() {
        assert_eq!(PersonalityProfile::uniform(250).openness, 100);
    }

    #[test]
    fn trait_serialises_as_snake_case() {
        let json = serde_json::to_string(&Trait::Conscientiousness).unwrap();
        assert_eq!(json, "\"conscientiousness\"");
    }
}
