use bevy::prelude::*;

use crate::engine::systems::animation::AnimationState;
use crate::shape::ShapeSpec;

/// A pattern image requested for the displayed shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRequest {
    /// Unique per rebuild, so a late load never lands on a newer shape.
    pub id: u64,
    pub path: String,
    pub repeat: f32,
}

/// Texture binding state of the displayed shape's material.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternTexture {
    None,
    Pending(TextureRequest),
    Applied(Handle<Image>),
    /// Load failed; the shape stays untextured.
    Unavailable,
}

/// Mesh, material and entity of the shape on screen.
#[derive(Debug)]
pub struct DisplayedShape {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub pattern: PatternTexture,
    pub spec: ShapeSpec,
}

#[derive(Debug)]
pub struct ParticleSystem {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub count: u32,
}

/// Everything one visualization surface owns while a context is alive.
#[derive(Debug)]
pub struct SceneHandle {
    pub(crate) surface: Entity,
    pub(crate) camera: Entity,
    pub(crate) lights: Vec<Entity>,
    pub(crate) shape: Option<DisplayedShape>,
    pub(crate) particles: Option<ParticleSystem>,
    pub(crate) animation: AnimationState,
}

impl SceneHandle {
    pub(crate) fn new(surface: Entity, camera: Entity, lights: Vec<Entity>) -> Self {
        Self {
            surface,
            camera,
            lights,
            shape: None,
            particles: None,
            animation: AnimationState::default(),
        }
    }

    pub fn surface(&self) -> Entity {
        self.surface
    }

    pub fn camera(&self) -> Entity {
        self.camera
    }

    pub fn lights(&self) -> &[Entity] {
        &self.lights
    }

    pub fn shape(&self) -> Option<&DisplayedShape> {
        self.shape.as_ref()
    }

    pub fn particles(&self) -> Option<&ParticleSystem> {
        self.particles.as_ref()
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationState {
        &mut self.animation
    }

    /// Every entity spawned for this handle.
    pub(crate) fn entities(&self) -> Vec<Entity> {
        let mut entities = vec![self.camera];
        entities.extend(self.lights.iter().copied());
        entities.extend(self.shape.as_ref().map(|shape| shape.entity));
        entities.extend(self.particles.as_ref().map(|particles| particles.entity));
        entities
    }
}
