//! ECS Messages - Signals passed between simulation systems.
//!
//! Overlap reports stand in for the physics engine's trigger callbacks;
//! the rest carry the forager → archer → arrow → forager loop.

use bevy::prelude::*;

use crate::components::Category;

/// `entity` started overlapping `other`. Written once per direction.
#[derive(Message, Clone, Copy, Debug)]
pub struct TriggerEnterMsg {
    pub entity: Entity,
    pub other: Entity,
    pub other_category: Category,
}

/// An arrow connected with a forager.
#[derive(Message, Clone, Copy, Debug)]
pub struct ArrowHitMsg {
    pub forager: Entity,
    pub arrow: Entity,
}

/// Assign (`Some`) or clear (`None`) an archer's target.
/// Foragers outside the combat zone send `None` every frame.
#[derive(Message, Clone, Copy, Debug)]
pub struct SetArcherTargetMsg {
    pub archer: Entity,
    pub target: Option<Entity>,
}

/// A forager handed one bag in at the shed.
#[derive(Message, Clone, Copy, Debug)]
pub struct BagDeliveredMsg {
    pub forager: Entity,
}

/// An archer released an arrow.
#[derive(Message, Clone, Copy, Debug)]
pub struct ArrowFiredMsg {
    pub archer: Entity,
    pub target: Entity,
    pub origin: Vec2,
    pub direction: Vec2,
}
