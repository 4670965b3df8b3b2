//! ECS Resources - Shared state accessible by all systems

use bevy::prelude::*;
use hashbrown::HashSet;

use crate::world::Zone;

/// The rectangle in which foragers draw the archer's fire.
#[derive(Resource, Clone, Copy, Debug)]
pub struct CombatZone(pub Zone);

/// Gold counter shown in the HUD. Absent when no UI is bound.
#[derive(Resource, Default, Debug)]
pub struct GoldCount {
    pub delivered: u32,
}

impl GoldCount {
    pub fn increment(&mut self) -> u32 {
        self.delivered += 1;
        self.delivered
    }

    pub fn label(&self) -> String {
        format!("Gold Bags Collected: {}", self.delivered)
    }
}

/// Running combat tallies, for logs and tests.
#[derive(Resource, Default, Debug)]
pub struct CombatStats {
    pub arrows_fired: usize,
    pub arrows_expired: usize,
    pub hits: usize,
    pub bags_dropped: usize,
}

/// Ordered pairs currently overlapping. Trigger-enter fires only when a
/// pair first shows up here.
#[derive(Resource, Default, Debug)]
pub struct OverlapPairs(pub HashSet<(Entity, Entity)>);

impl OverlapPairs {
    fn key(a: Entity, b: Entity) -> (Entity, Entity) {
        if a <= b { (a, b) } else { (b, a) }
    }

    pub fn contains(&self, a: Entity, b: Entity) -> bool {
        self.0.contains(&Self::key(a, b))
    }

    /// Returns true when the pair is new.
    pub fn insert(&mut self, a: Entity, b: Entity) -> bool {
        self.0.insert(Self::key(a, b))
    }

    /// Forget a pair so the next overlap counts as a fresh entry.
    pub fn forget(&mut self, a: Entity, b: Entity) {
        self.0.remove(&Self::key(a, b));
    }

    /// Forget every pair involving `entity`.
    pub fn forget_all(&mut self, entity: Entity) {
        self.0.retain(|&(a, b)| a != entity && b != entity);
    }
}
