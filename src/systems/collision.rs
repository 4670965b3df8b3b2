//! Collision system - Circle overlap detection with trigger-enter semantics

use bevy::prelude::*;

use crate::components::{Collider, Held, Position};
use crate::messages::TriggerEnterMsg;
use crate::resources::OverlapPairs;

/// Test every active collider pair. New overlaps produce one
/// `TriggerEnterMsg` per side; pairs that separated, vanished or went
/// inactive are dropped so their next contact counts as a fresh entry.
pub fn detect_overlaps_system(
    colliders: Query<(Entity, &Position, &Collider), Without<Held>>,
    mut pairs: ResMut<OverlapPairs>,
    mut enters: MessageWriter<TriggerEnterMsg>,
) {
    let bodies: Vec<(Entity, Vec2, Collider)> = colliders.iter()
        .map(|(e, p, c)| (e, p.0, *c))
        .collect();

    let mut touching = OverlapPairs::default();
    for (i, &(a, a_pos, a_col)) in bodies.iter().enumerate() {
        for &(b, b_pos, b_col) in &bodies[i + 1..] {
            let reach = a_col.radius + b_col.radius;
            if a_pos.distance_squared(b_pos) > reach * reach {
                continue;
            }
            touching.insert(a, b);
            if pairs.contains(a, b) {
                continue;
            }
            enters.write(TriggerEnterMsg { entity: a, other: b, other_category: b_col.category });
            enters.write(TriggerEnterMsg { entity: b, other: a, other_category: a_col.category });
        }
    }

    *pairs = touching;
}
