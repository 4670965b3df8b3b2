//! Sync systems - Publish animation flags and cosmetic tweens for the renderer
//!
//! Simulation state is authoritative; these only copy it out.

use bevy::prelude::*;

use crate::archer::Archer;
use crate::components::*;
use crate::constants::WALKING_SPEED_SQ_THRESHOLD;
use crate::forager::Forager;

/// Walking follows realized velocity, so a forager that did not move last
/// step reads as standing even when it has somewhere to go.
pub fn animation_sync_system(
    mut foragers: Query<(&Motion, &mut AnimationFlags), With<Forager>>,
    mut archers: Query<(&Archer, &mut AnimationFlags), Without<Forager>>,
) {
    for (motion, mut anim) in foragers.iter_mut() {
        let walking = motion.velocity.length_squared() > WALKING_SPEED_SQ_THRESHOLD;
        if anim.walking != walking {
            anim.walking = walking;
        }
    }
    for (archer, mut anim) in archers.iter_mut() {
        if anim.shooting != archer.shooting {
            anim.shooting = archer.shooting;
        }
    }
}

pub fn scale_in_system(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut ScaleIn)>,
) {
    let dt = time.delta_secs();
    for (entity, mut tween) in query.iter_mut() {
        if tween.advance(dt) {
            commands.entity(entity).remove::<ScaleIn>();
        }
    }
}
