/// Number of questionnaire items.
pub const ITEM_COUNT: usize = 10;

/// Inclusive answer range of every item.
pub const MIN_ANSWER: u8 = 1;
pub const MAX_ANSWER: u8 = 7;

/// Substituted when the display name is blank.
pub const DEFAULT_DISPLAY_NAME: &str = "Anonymous";

/// `{name}` is replaced with the display name.
pub const TITLE_TEMPLATE: &str = "\"{name}'s shape\"";

pub const SURVEY_MANIFEST_PATH: &str = "survey.json";

pub const QUESTIONS: [&str; ITEM_COUNT] = [
    "I see myself as extraverted, enthusiastic.",
    "I see myself as critical, quarrelsome.",
    "I see myself as dependable, self-disciplined.",
    "I see myself as anxious, easily upset.",
    "I see myself as open to new experiences, complex.",
    "I see myself as reserved, quiet.",
    "I see myself as sympathetic, warm.",
    "I see myself as disorganised, careless.",
    "I see myself as calm, emotionally stable.",
    "I see myself as conventional, uncreative.",
];

pub struct TraitLabel {
    pub key: &'static str,
    pub name: &'static str,
    pub low: &'static str,
    pub high: &'static str,
}

/// Display order: extroversion, agreeableness, conscientiousness, neuroticism, openness.
pub const TRAIT_LABELS: &[TraitLabel] = &[
    TraitLabel {
        key: "extroversion",
        name: "Extroversion",
        low: "Introverted (I)",
        high: "Extroverted (E)",
    },
    TraitLabel {
        key: "agreeableness",
        name: "Agreeableness",
        low: "Exclusive (H)",
        high: "Cooperative (A)",
    },
    TraitLabel {
        key: "conscientiousness",
        name: "Conscientiousness",
        low: "Relaxed (R)",
        high: "Diligent (C)",
    },
    TraitLabel {
        key: "neuroticism",
        name: "Neuroticism",
        low: "Calm (N)",
        high: "Emotional (T)",
    },
    TraitLabel {
        key: "openness",
        name: "Openness",
        low: "Conservative (S)",
        high: "Creative (O)",
    },
];
