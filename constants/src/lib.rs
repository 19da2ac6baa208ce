/// Camera, light, controls and animation settings for the shape viewer.
pub mod render_settings;

/// Mapping ranges that turn trait percentages into shape parameters.
pub mod shape_tuning;

/// Questionnaire defaults used until the survey manifest has loaded.
pub mod survey;
