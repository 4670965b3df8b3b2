//! Movement systems - Fixed-step forager steering and free-flight bodies

use bevy::prelude::*;

use crate::components::*;
use crate::forager::{Forager, step_towards};

/// Forager think + move, once per fixed step.
/// Rescans for the nearest free bag when idle-handed, walks toward the
/// bag / shed / idle anchor, then records realized velocity.
pub fn forager_seek_system(
    time: Res<Time>,
    mut foragers: Query<(Entity, &mut Forager, &mut Position, &mut Motion, &mut AnimationFlags), Without<Bag>>,
    bags: Query<(Entity, &Position), (With<Bag>, Without<Held>, Without<Forager>)>,
    sheds: Query<&Position, (With<Shed>, Without<Forager>, Without<Bag>)>,
) {
    let dt = time.delta_secs();

    for (entity, mut forager, mut pos, mut motion, mut anim) in foragers.iter_mut() {
        let before = forager.state;

        // Pursued bag was taken or removed since last step.
        if let Some(bag) = forager.pursued_bag() {
            if !bags.contains(bag) {
                forager.abandon_pursuit();
            }
        }

        if !forager.has_bag() && forager.pursued_bag().is_none() {
            match forager.choose_nearest(pos.0, bags.iter().map(|(e, p)| (e, p.0))) {
                Some(bag) => trace!("Forager {:?}: nearest gold bag {:?}", entity, bag),
                None => trace!("Forager {:?}: no gold bags found", entity),
            }
        }

        let bag_pos = forager.pursued_bag()
            .and_then(|bag| bags.get(bag).ok())
            .map(|(_, p)| p.0);
        let shed_pos = forager.shed
            .and_then(|shed| sheds.get(shed).ok())
            .map(|p| p.0);

        if let Some(target) = forager.plan(pos.0, bag_pos, shed_pos) {
            let from = pos.0;
            pos.0 = step_towards(from, target, forager.speed * dt);
            anim.flip_x = target.x < from.x;
        }

        motion.record(pos.0, dt);

        if forager.state != before {
            debug!("Forager {:?}: {} -> {}", entity, before.name(), forager.state.name());
        }
    }
}

/// Launched bags glide with drag until they settle.
pub fn bag_flight_system(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Position, &mut BagFlight), Without<Held>>,
) {
    let dt = time.delta_secs();
    for (entity, mut pos, mut flight) in query.iter_mut() {
        pos.0 += flight.step(dt);
        if flight.is_settled() {
            commands.entity(entity).remove::<BagFlight>();
        }
    }
}

/// Arrows fly straight at constant speed.
pub fn arrow_flight_system(
    time: Res<Time>,
    mut query: Query<(&mut Position, &Arrow)>,
) {
    let dt = time.delta_secs();
    for (mut pos, arrow) in query.iter_mut() {
        pos.0 += arrow.velocity * dt;
    }
}
