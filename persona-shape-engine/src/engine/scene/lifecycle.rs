use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::math::Affine2;
use bevy::pbr::wireframe::Wireframe;
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::handle::{DisplayedShape, ParticleSystem, PatternTexture, SceneHandle, TextureRequest};
use super::ledger::{RenderResourceLedger, ResourceKind};
use super::lighting::{scene_ambient_light, spawn_scene_lights};
use super::materials::{particle_material, shape_material};
use super::surface::{RenderSurface, aspect_ratio_of};
use crate::engine::camera::scene_camera::{set_camera_aspect, spawn_scene_camera};
use crate::engine::mesh::{MeshBuildError, build_shape_mesh, create_particle_mesh};
use crate::engine::systems::animation::{FrameToken, ParticleField, ShapeMotion};
use crate::shape::{GeometryKind, ParticleSpec, ShapeSpec, ShapeSpecError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Active,
    /// The platform dropped the rendering context; waiting for a restore.
    ContextLost,
    Disposed,
}

/// Errors surfaced by scene creation and rebuilds.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    SurfaceUnavailable(String),
    InvalidSpec(ShapeSpecError),
    Geometry(String),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::SurfaceUnavailable(reason) => write!(f, "Surface unavailable: {}", reason),
            SceneError::InvalidSpec(err) => write!(f, "Invalid shape spec: {}", err),
            SceneError::Geometry(reason) => write!(f, "Geometry error: {}", reason),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::InvalidSpec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShapeSpecError> for SceneError {
    fn from(err: ShapeSpecError) -> Self {
        SceneError::InvalidSpec(err)
    }
}

impl From<MeshBuildError> for SceneError {
    fn from(err: MeshBuildError) -> Self {
        SceneError::Geometry(err.0)
    }
}

/// What the texture loader came back with for one request.
#[derive(Debug, Clone)]
pub enum TextureLoadOutcome {
    Loaded(Handle<Image>),
    Failed(String),
}

/// Serializable summary of the scene for the host page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub state: LifecycleState,
    pub animating: bool,
    pub frames: u64,
    pub geometry: Option<GeometryKind>,
    pub particles: u32,
    pub texture: &'static str,
}

/// Owns the scene of one visualization surface and drives its state machine.
///
/// `Uninitialized -> Active -> Disposed`, with `ContextLost` entered from
/// `Active` when the platform drops the rendering context. Every mesh,
/// material and texture created here is released exactly once, or abandoned
/// together with a lost context; see [`RenderResourceLedger`].
#[derive(Resource)]
pub struct SceneLifecycle {
    surface: Option<Entity>,
    state: LifecycleState,
    handle: Option<SceneHandle>,
    /// Scene graph of a lost context, despawned on restore or dispose.
    stale: Option<SceneHandle>,
    latest_spec: Option<ShapeSpec>,
    issued_tokens: u64,
    texture_requests: u64,
    rng: StdRng,
}

impl Default for SceneLifecycle {
    fn default() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }
}

impl SceneLifecycle {
    /// Deterministic particle scatter.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            surface: None,
            state: LifecycleState::Uninitialized,
            handle: None,
            stale: None,
            latest_spec: None,
            issued_tokens: 0,
            texture_requests: 0,
            rng,
        }
    }

    pub fn bind_surface(&mut self, surface: Entity) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<Entity> {
        self.surface
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn handle(&self) -> Option<&SceneHandle> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut SceneHandle> {
        self.handle.as_mut()
    }

    /// Most recent spec accepted by `rebuild`, replayed after a context restore.
    pub fn latest_spec(&self) -> Option<&ShapeSpec> {
        self.latest_spec.as_ref()
    }

    /// Texture the displayed shape is still waiting for.
    pub fn pending_texture(&self) -> Option<&TextureRequest> {
        match &self.handle.as_ref()?.shape.as_ref()?.pattern {
            PatternTexture::Pending(request) => Some(request),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let handle = self.handle.as_ref();
        let shape = handle.and_then(|h| h.shape.as_ref());
        SceneSnapshot {
            state: self.state,
            animating: handle.is_some_and(|h| h.animation.is_running()),
            frames: handle.map_or(0, |h| h.animation.frames()),
            geometry: shape.map(|s| s.spec.geometry.kind()),
            particles: handle
                .and_then(|h| h.particles.as_ref())
                .map_or(0, |p| p.count),
            texture: match shape.map(|s| &s.pattern) {
                None | Some(PatternTexture::None) => "none",
                Some(PatternTexture::Pending(_)) => "pending",
                Some(PatternTexture::Applied(_)) => "applied",
                Some(PatternTexture::Unavailable) => "unavailable",
            },
        }
    }

    /// Allocate the context, camera with orbit controls and lights, and start
    /// the frame loop. A no-op while already active.
    pub fn create(&mut self, world: &mut World) -> Result<(), SceneError> {
        match self.state {
            LifecycleState::Active => return Ok(()),
            LifecycleState::ContextLost => {
                return Err(SceneError::SurfaceUnavailable(
                    "rendering context is lost".to_string(),
                ));
            }
            LifecycleState::Uninitialized | LifecycleState::Disposed => {}
        }

        let surface = self
            .surface
            .ok_or_else(|| SceneError::SurfaceUnavailable("no surface bound".to_string()))?;
        let aspect_ratio = {
            let Some(render_surface) = world.get::<RenderSurface>(surface) else {
                return Err(SceneError::SurfaceUnavailable(format!(
                    "entity {surface} is not a render surface"
                )));
            };
            if !render_surface.capable {
                return Err(SceneError::SurfaceUnavailable(
                    "surface cannot host a rendering context".to_string(),
                ));
            }
            if render_surface.context_lost {
                return Err(SceneError::SurfaceUnavailable(
                    "surface context is lost".to_string(),
                ));
            }
            render_surface.aspect_ratio()
        };

        let camera = spawn_scene_camera(world, surface, aspect_ratio);
        world.insert_resource(scene_ambient_light());
        let lights = spawn_scene_lights(world);
        ledger(world).record_created(ResourceKind::Context);

        self.handle = Some(SceneHandle::new(surface, camera, lights));
        self.state = LifecycleState::Active;
        let token = self.start_animation();
        info!("Scene created on surface {surface} (frame token {:?})", token);
        Ok(())
    }

    /// Replace the displayed shape with one built from `spec`.
    ///
    /// The old mesh, material, texture and particles are released before the
    /// new ones are created. An invalid spec is rejected without touching the
    /// current shape. While the context is lost the spec is only recorded.
    pub fn rebuild(&mut self, world: &mut World, spec: ShapeSpec) -> Result<(), SceneError> {
        spec.validate()?;
        self.latest_spec = Some(spec.clone());

        match self.state {
            LifecycleState::ContextLost => {
                info!("Rebuild deferred until the rendering context is restored");
                return Ok(());
            }
            LifecycleState::Uninitialized | LifecycleState::Disposed => self.create(world)?,
            LifecycleState::Active => {}
        }

        let Some(handle) = self.handle.as_mut() else {
            return Err(SceneError::SurfaceUnavailable(
                "scene handle missing".to_string(),
            ));
        };
        release_displayed(world, handle);

        let kind = spec.geometry.kind();
        populate(
            world,
            handle,
            spec,
            &mut self.rng,
            &mut self.texture_requests,
        )?;
        self.start_animation();
        debug!("Shape rebuilt as {:?}", kind);
        Ok(())
    }

    /// Tear everything down. Safe to call in any state, any number of times.
    pub fn dispose(&mut self, world: &mut World) {
        if matches!(
            self.state,
            LifecycleState::Uninitialized | LifecycleState::Disposed
        ) {
            return;
        }

        if let Some(mut handle) = self.handle.take() {
            handle.animation.cancel();
            release_displayed(world, &mut handle);
            for entity in handle.entities() {
                world.despawn(entity);
            }
            ledger(world).record_released(ResourceKind::Context);
        }
        if let Some(stale) = self.stale.take() {
            discard_stale(world, stale);
        }
        world.insert_resource(AmbientLight::default());

        self.latest_spec = None;
        self.state = LifecycleState::Disposed;
        info!("Scene disposed");
    }

    /// The platform dropped the context. Only an active scene is suspended;
    /// its GPU objects are abandoned, not released.
    pub fn on_context_lost(&mut self, world: &mut World) {
        self.mark_surface_lost(world, true);
        if self.state != LifecycleState::Active {
            debug!("Context loss ignored in state {:?}", self.state);
            return;
        }
        let Some(mut handle) = self.handle.take() else {
            return;
        };

        handle.animation.cancel();
        let mut ledger = ledger(world);
        if let Some(shape) = &handle.shape {
            ledger.record_abandoned(ResourceKind::Geometry);
            ledger.record_abandoned(ResourceKind::Material);
            if matches!(shape.pattern, PatternTexture::Applied(_)) {
                ledger.record_abandoned(ResourceKind::Texture);
            }
        }
        if handle.particles.is_some() {
            ledger.record_abandoned(ResourceKind::Geometry);
            ledger.record_abandoned(ResourceKind::Material);
        }
        ledger.record_abandoned(ResourceKind::Context);

        self.stale = Some(handle);
        self.state = LifecycleState::ContextLost;
        warn!("Rendering context lost, scene suspended");
    }

    /// Rebuild from scratch with the latest spec, as if never created.
    pub fn on_context_restored(&mut self, world: &mut World) -> Result<(), SceneError> {
        self.mark_surface_lost(world, false);
        if self.state != LifecycleState::ContextLost {
            debug!("Context restore ignored in state {:?}", self.state);
            return Ok(());
        }

        if let Some(stale) = self.stale.take() {
            discard_stale(world, stale);
        }
        self.state = LifecycleState::Uninitialized;
        self.create(world)?;
        if let Some(spec) = self.latest_spec.clone() {
            self.rebuild(world, spec)?;
        }
        info!("Rendering context restored, scene rebuilt");
        Ok(())
    }

    /// Track the new surface size and camera aspect. Never rebuilds the shape.
    pub fn on_resize(&mut self, world: &mut World, width: f32, height: f32) {
        if let Some(mut surface) = self
            .surface
            .and_then(|surface| world.get_mut::<RenderSurface>(surface))
        {
            surface.width = width;
            surface.height = height;
        }
        if let Some(handle) = &self.handle {
            set_camera_aspect(world, handle.camera, aspect_ratio_of(width, height));
        }
    }

    /// Bind a loaded pattern to the displayed shape, or fall back to no texture.
    ///
    /// Outcomes for a request that is no longer pending (the shape was rebuilt
    /// or disposed meanwhile) are dropped.
    pub fn resolve_texture(
        &mut self,
        world: &mut World,
        request_id: u64,
        outcome: TextureLoadOutcome,
    ) {
        let Some(shape) = self.handle.as_mut().and_then(|h| h.shape.as_mut()) else {
            debug!("Texture {request_id} resolved after its scene went away");
            return;
        };
        let (path, repeat) = match &shape.pattern {
            PatternTexture::Pending(request) if request.id == request_id => {
                (request.path.clone(), request.repeat)
            }
            _ => {
                debug!("Texture {request_id} is stale, ignoring");
                return;
            }
        };

        let source = match outcome {
            TextureLoadOutcome::Loaded(image) => {
                let source = world.resource::<Assets<Image>>().get(&image).cloned();
                if source.is_none() {
                    warn!("Pattern texture '{path}' reported loaded but has no image data");
                }
                source
            }
            TextureLoadOutcome::Failed(reason) => {
                warn!("Pattern texture '{path}' failed to load ({reason}), shape stays untextured");
                None
            }
        };
        let Some(mut image) = source else {
            shape.pattern = PatternTexture::Unavailable;
            return;
        };

        image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: ImageAddressMode::Repeat,
            address_mode_v: ImageAddressMode::Repeat,
            ..ImageSamplerDescriptor::linear()
        });
        let texture = world.resource_mut::<Assets<Image>>().add(image);
        ledger(world).record_created(ResourceKind::Texture);

        if let Some(material) = world
            .resource_mut::<Assets<StandardMaterial>>()
            .get_mut(&shape.material)
        {
            material.base_color_texture = Some(texture.clone());
            material.uv_transform = Affine2::from_scale(Vec2::splat(repeat));
        }
        shape.pattern = PatternTexture::Applied(texture);
        debug!("Pattern texture '{path}' applied with repeat {repeat}");
    }

    fn start_animation(&mut self) -> Option<FrameToken> {
        let handle = self.handle.as_mut()?;
        let issued = &mut self.issued_tokens;
        Some(handle.animation.ensure_running(|| {
            *issued += 1;
            FrameToken::new(*issued)
        }))
    }

    fn mark_surface_lost(&self, world: &mut World, lost: bool) {
        if let Some(mut surface) = self
            .surface
            .and_then(|surface| world.get_mut::<RenderSurface>(surface))
        {
            surface.context_lost = lost;
        }
    }
}

/// Run `f` with the lifecycle resource taken out of the world.
pub fn with_lifecycle<T>(
    world: &mut World,
    f: impl FnOnce(&mut SceneLifecycle, &mut World) -> T,
) -> T {
    world.resource_scope(|world, mut lifecycle: Mut<SceneLifecycle>| f(&mut lifecycle, world))
}

pub fn resolve_pattern_texture(world: &mut World, request_id: u64, outcome: TextureLoadOutcome) {
    with_lifecycle(world, |lifecycle, world| {
        lifecycle.resolve_texture(world, request_id, outcome)
    });
}

fn ledger(world: &mut World) -> Mut<'_, RenderResourceLedger> {
    world.get_resource_or_insert_with(RenderResourceLedger::default)
}

fn populate(
    world: &mut World,
    handle: &mut SceneHandle,
    spec: ShapeSpec,
    rng: &mut StdRng,
    texture_requests: &mut u64,
) -> Result<(), SceneError> {
    let mesh = build_shape_mesh(&spec.geometry)?;
    let mesh = world.resource_mut::<Assets<Mesh>>().add(mesh);
    ledger(world).record_created(ResourceKind::Geometry);
    let material = world
        .resource_mut::<Assets<StandardMaterial>>()
        .add(shape_material(&spec.material));
    ledger(world).record_created(ResourceKind::Material);

    let mut shape_entity = world.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(material.clone()),
        Transform::default(),
        ShapeMotion {
            rotation_speed: spec.motion.rotation_speed,
            pulsation_amplitude: spec.motion.pulsation_amplitude,
            pulsation_frequency: spec.motion.pulsation_frequency,
            base_scale: 1.0,
        },
    ));
    if spec.material.wireframe {
        shape_entity.insert(Wireframe);
    }
    let entity = shape_entity.id();

    let pattern = match &spec.material.pattern {
        Some(pattern) => {
            *texture_requests += 1;
            PatternTexture::Pending(TextureRequest {
                id: *texture_requests,
                path: pattern.path.clone(),
                repeat: pattern.repeat,
            })
        }
        None => PatternTexture::None,
    };

    handle.particles = spec.particles.as_ref().map(|particles| {
        spawn_particles(
            world,
            particles,
            spec.motion.particle_rotation_speed,
            rng,
        )
    });
    handle.shape = Some(DisplayedShape {
        entity,
        mesh,
        material,
        pattern,
        spec,
    });
    Ok(())
}

fn spawn_particles(
    world: &mut World,
    spec: &ParticleSpec,
    rotation_speed: f32,
    rng: &mut StdRng,
) -> ParticleSystem {
    let positions = spec.scatter(rng);
    let mesh = world
        .resource_mut::<Assets<Mesh>>()
        .add(create_particle_mesh(&positions, spec.size));
    ledger(world).record_created(ResourceKind::Geometry);
    let material = world
        .resource_mut::<Assets<StandardMaterial>>()
        .add(particle_material(spec));
    ledger(world).record_created(ResourceKind::Material);

    let entity = world
        .spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::default(),
            ParticleField { rotation_speed },
        ))
        .id();

    ParticleSystem {
        entity,
        mesh,
        material,
        count: spec.count,
    }
}

/// Release the displayed shape and particles, leaving camera and lights.
fn release_displayed(world: &mut World, handle: &mut SceneHandle) {
    if let Some(shape) = handle.shape.take() {
        world.despawn(shape.entity);
        world.resource_mut::<Assets<Mesh>>().remove(&shape.mesh);
        ledger(world).record_released(ResourceKind::Geometry);
        world
            .resource_mut::<Assets<StandardMaterial>>()
            .remove(&shape.material);
        ledger(world).record_released(ResourceKind::Material);
        if let PatternTexture::Applied(texture) = &shape.pattern {
            world.resource_mut::<Assets<Image>>().remove(texture);
            ledger(world).record_released(ResourceKind::Texture);
        }
    }
    if let Some(particles) = handle.particles.take() {
        world.despawn(particles.entity);
        world.resource_mut::<Assets<Mesh>>().remove(&particles.mesh);
        ledger(world).record_released(ResourceKind::Geometry);
        world
            .resource_mut::<Assets<StandardMaterial>>()
            .remove(&particles.material);
        ledger(world).record_released(ResourceKind::Material);
    }
}

/// Drop the entities of a lost context. Its resources were already abandoned.
fn discard_stale(world: &mut World, stale: SceneHandle) {
    for entity in stale.entities() {
        world.despawn(entity);
    }
}
