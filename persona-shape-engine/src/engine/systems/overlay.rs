use bevy::prelude::*;

use crate::personality::TraitBreakdown;

/// Latest submitted result: title plus per-trait percentages.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ProfileResult {
    pub title: String,
    pub breakdown: Vec<TraitBreakdown>,
}

#[derive(Component)]
pub struct ResultTitleText;

#[derive(Component)]
pub struct BreakdownText;

/// Title top-left, percentage rows underneath. Native builds only; the web
/// host page renders its own results view.
pub fn create_result_overlay(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Val::Px(12.0)),
            row_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ResultTitleText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
                BreakdownText,
            ));
        });
}

pub fn update_result_overlay(
    result: Res<ProfileResult>,
    mut titles: Query<&mut Text, (With<ResultTitleText>, Without<BreakdownText>)>,
    mut rows: Query<&mut Text, (With<BreakdownText>, Without<ResultTitleText>)>,
) {
    for mut text in &mut titles {
        text.0 = result.title.clone();
    }
    for mut text in &mut rows {
        text.0 = format_breakdown(&result.breakdown);
    }
}

/// One line per trait, e.g. `Extroversion  83%  (Introverted (I) / Extroverted (E))`.
pub fn format_breakdown(rows: &[TraitBreakdown]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}  {}%  ({} / {})",
                row.label, row.percentage, row.low, row.high
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
