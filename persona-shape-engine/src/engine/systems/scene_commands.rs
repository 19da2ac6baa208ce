use bevy::prelude::*;

use crate::engine::scene::lifecycle::{LifecycleState, SceneError, SceneLifecycle, with_lifecycle};
use crate::engine::scene::surface::SurfaceEvent;
use crate::personality::PersonalityProfile;
use crate::shape::{ShapeSpec, map_profile};

/// User-initiated scene operations, queued by the RPC layer or the command line.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SceneCommand {
    /// Map a profile to a shape and display it.
    Generate(PersonalityProfile),
    /// Display an externally supplied spec.
    Rebuild(ShapeSpec),
    /// Back to the questionnaire: tear the scene down.
    Dispose,
}

/// Outcome of scene operations, for the host page.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SceneNotice {
    StateChanged(LifecycleState),
    Error(String),
}

/// Apply queued surface signals and scene commands to the lifecycle, in
/// arrival order: platform signals first, then user commands.
pub fn apply_scene_commands(world: &mut World) {
    let surface_events: Vec<SurfaceEvent> = world
        .get_resource_mut::<Events<SurfaceEvent>>()
        .map(|mut events| events.drain().collect())
        .unwrap_or_default();
    let commands: Vec<SceneCommand> = world
        .get_resource_mut::<Events<SceneCommand>>()
        .map(|mut events| events.drain().collect())
        .unwrap_or_default();
    if surface_events.is_empty() && commands.is_empty() {
        return;
    }

    let (before, failures) = with_lifecycle(world, |lifecycle, world| {
        let before = lifecycle.state();
        let mut failures: Vec<SceneError> = Vec::new();

        for event in surface_events {
            match event {
                SurfaceEvent::ContextLost => lifecycle.on_context_lost(world),
                SurfaceEvent::ContextRestored => {
                    if let Err(err) = lifecycle.on_context_restored(world) {
                        failures.push(err);
                    }
                }
                SurfaceEvent::Resized { width, height } => {
                    lifecycle.on_resize(world, width, height)
                }
            }
        }

        for command in commands {
            let result = match command {
                SceneCommand::Generate(profile) => lifecycle.rebuild(world, map_profile(&profile)),
                SceneCommand::Rebuild(spec) => lifecycle.rebuild(world, spec),
                SceneCommand::Dispose => {
                    lifecycle.dispose(world);
                    Ok(())
                }
            };
            if let Err(err) = result {
                failures.push(err);
            }
        }
        (before, failures)
    });

    for err in failures {
        error!("Scene operation failed: {err}");
        world.send_event(SceneNotice::Error(err.to_string()));
    }
    let after = world.resource::<SceneLifecycle>().state();
    if after != before {
        info!("Scene state {:?} -> {:?}", before, after);
        world.send_event(SceneNotice::StateChanged(after));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::ledger::RenderResourceLedger;
    use crate::engine::scene::surface::RenderSurface;
    use bevy::ecs::system::RunSystemOnce;

    fn command_world() -> World {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world.init_resource::<Assets<Image>>();
        world.init_resource::<RenderResourceLedger>();
        world.init_resource::<Events<SceneCommand>>();
        world.init_resource::<Events<SurfaceEvent>>();
        world.init_resource::<Events<SceneNotice>>();

        let surface = world.spawn(RenderSurface::new(640.0, 480.0)).id();
        let mut lifecycle = SceneLifecycle::with_seed(3);
        lifecycle.bind_surface(surface);
        world.insert_resource(lifecycle);
        world
    }

    fn notices(world: &mut World) -> Vec<SceneNotice> {
        world
            .resource_mut::<Events<SceneNotice>>()
            .drain()
            .collect()
    }

    #[test]
    fn generate_then_dispose_round_trip() {
        let mut world = command_world();
        world.send_event(SceneCommand::Generate(PersonalityProfile::uniform(40)));
        world.run_system_once(apply_scene_commands).unwrap();

        assert_eq!(
            world.resource::<SceneLifecycle>().state(),
            LifecycleState::Active
        );
        assert_eq!(
            notices(&mut world),
            vec![SceneNotice::StateChanged(LifecycleState::Active)]
        );

        world.send_event(SceneCommand::Dispose);
        world.run_system_once(apply_scene_commands).unwrap();
        assert_eq!(
            notices(&mut world),
            vec![SceneNotice::StateChanged(LifecycleState::Disposed)]
        );
        assert!(world.resource::<RenderResourceLedger>().is_balanced());
    }

    #[test]
    fn invalid_spec_is_reported_not_applied() {
        let mut world = command_world();
        let mut spec = map_profile(&PersonalityProfile::uniform(50));
        spec.motion.pulsation_amplitude = 5.0;
        world.send_event(SceneCommand::Rebuild(spec));
        world.run_system_once(apply_scene_commands).unwrap();

        let notices = notices(&mut world);
        assert_eq!(notices.len(), 1);
        assert!(matches!(notices[0], SceneNotice::Error(_)));
        assert_eq!(
            world.resource::<SceneLifecycle>().state(),
            LifecycleState::Uninitialized
        );
    }

    #[test]
    fn surface_signals_drive_loss_and_restore() {
        let mut world = command_world();
        world.send_event(SceneCommand::Generate(PersonalityProfile::uniform(70)));
        world.run_system_once(apply_scene_commands).unwrap();
        notices(&mut world);

        world.send_event(SurfaceEvent::ContextLost);
        world.run_system_once(apply_scene_commands).unwrap();
        assert_eq!(
            notices(&mut world),
            vec![SceneNotice::StateChanged(LifecycleState::ContextLost)]
        );

        world.send_event(SurfaceEvent::ContextRestored);
        world.run_system_once(apply_scene_commands).unwrap();
        assert_eq!(
            notices(&mut world),
            vec![SceneNotice::StateChanged(LifecycleState::Active)]
        );
    }
}
