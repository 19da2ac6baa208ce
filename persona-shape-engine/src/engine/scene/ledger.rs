use bevy::prelude::*;
use serde::Serialize;

/// GPU-backed resource categories owned by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Geometry,
    Material,
    Texture,
    Context,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceCounters {
    pub created: u32,
    pub released: u32,
    /// Dropped with a lost context instead of being released.
    pub abandoned: u32,
    pub peak_live: u32,
}

impl ResourceCounters {
    pub fn live(&self) -> u32 {
        self.created - self.released - self.abandoned
    }
}

/// Accounting of every resource the scene lifecycle creates and lets go of.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderResourceLedger {
    pub geometry: ResourceCounters,
    pub materials: ResourceCounters,
    pub textures: ResourceCounters,
    pub contexts: ResourceCounters,
}

impl RenderResourceLedger {
    pub fn counters(&self, kind: ResourceKind) -> &ResourceCounters {
        match kind {
            ResourceKind::Geometry => &self.geometry,
            ResourceKind::Material => &self.materials,
            ResourceKind::Texture => &self.textures,
            ResourceKind::Context => &self.contexts,
        }
    }

    fn counters_mut(&mut self, kind: ResourceKind) -> &mut ResourceCounters {
        match kind {
            ResourceKind::Geometry => &mut self.geometry,
            ResourceKind::Material => &mut self.materials,
            ResourceKind::Texture => &mut self.textures,
            ResourceKind::Context => &mut self.contexts,
        }
    }

    pub fn record_created(&mut self, kind: ResourceKind) {
        let counters = self.counters_mut(kind);
        counters.created += 1;
        counters.peak_live = counters.peak_live.max(counters.live());
    }

    pub fn record_released(&mut self, kind: ResourceKind) {
        let counters = self.counters_mut(kind);
        debug_assert!(counters.live() > 0, "{kind:?} released more often than created");
        counters.released += 1;
    }

    pub fn record_abandoned(&mut self, kind: ResourceKind) {
        let counters = self.counters_mut(kind);
        debug_assert!(counters.live() > 0, "{kind:?} abandoned more often than created");
        counters.abandoned += 1;
    }

    pub fn live(&self, kind: ResourceKind) -> u32 {
        self.counters(kind).live()
    }

    /// True when nothing is held: every resource was released or abandoned.
    pub fn is_balanced(&self) -> bool {
        [
            ResourceKind::Geometry,
            ResourceKind::Material,
            ResourceKind::Texture,
            ResourceKind::Context,
        ]
        .iter()
        .all(|&kind| self.live(kind) == 0)
    }
}
