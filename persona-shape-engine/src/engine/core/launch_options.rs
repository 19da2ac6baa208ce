use bevy::prelude::*;
use constants::survey::ITEM_COUNT;

use crate::engine::assets::survey_manifest::SurveyManifest;
use crate::engine::systems::overlay::ProfileResult;
use crate::engine::systems::scene_commands::SceneCommand;
use crate::personality::{Answers, score};

/// Command line options of the native viewer.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LaunchOptions {
    pub name: Option<String>,
    pub answers: Option<Answers>,
}

impl LaunchOptions {
    /// Parse `--name <text>` and `--answers 6,2,6,...`. The first item is the
    /// program name and is skipped.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut options = LaunchOptions::default();
        let mut args = args.into_iter().skip(1);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--name" => {
                    options.name = Some(args.next().ok_or("--name expects a value")?);
                }
                "--answers" => {
                    let list = args.next().ok_or("--answers expects a value")?;
                    options.answers = Some(parse_answers(&list)?);
                }
                other => return Err(format!("Unknown argument: {other}")),
            }
        }
        Ok(options)
    }
}

/// Comma separated answers; `_` leaves an item unanswered.
fn parse_answers(list: &str) -> Result<Answers, String> {
    let values: Vec<&str> = list.split(',').map(str::trim).collect();
    if values.len() != ITEM_COUNT {
        return Err(format!(
            "--answers expects {} values, got {}",
            ITEM_COUNT,
            values.len()
        ));
    }

    let mut answers = Answers::default();
    for (index, value) in values.iter().enumerate() {
        if *value == "_" {
            continue;
        }
        let parsed = value
            .parse::<u8>()
            .map_err(|_| format!("Answer {} is not a number: {value}", index + 1))?;
        answers.set(index + 1, Some(parsed));
    }
    Ok(answers)
}

/// Score the answers given on the command line and generate their shape.
pub fn submit_launch_answers(
    options: Option<Res<LaunchOptions>>,
    manifest: Res<SurveyManifest>,
    mut result: ResMut<ProfileResult>,
    mut scene_commands: EventWriter<SceneCommand>,
) {
    let Some(options) = options else {
        return;
    };
    let Some(answers) = &options.answers else {
        return;
    };

    match score(answers) {
        Ok(profile) => {
            let name = options.name.as_deref().unwrap_or_default();
            *result = ProfileResult {
                title: manifest.display_title(name),
                breakdown: profile.breakdown(&manifest),
            };
            info!("Generating shape for {:?}", profile);
            scene_commands.write(SceneCommand::Generate(profile));
        }
        Err(err) => error!("Cannot score command line answers: {err}"),
    }
}
