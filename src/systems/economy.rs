//! Economy systems - Bag pickup, shed delivery, pickup cooldowns, gold count

use bevy::prelude::*;

use crate::components::*;
use crate::forager::{CooldownTick, Forager};
use crate::messages::{BagDeliveredMsg, TriggerEnterMsg};
use crate::resources::{GoldCount, OverlapPairs};

/// Forager overlaps: touching a free bag picks it up (unless it is the one
/// under cooldown), touching the assigned shed while carrying delivers.
/// Whenever a forager's hands change its contacts are forgotten, so
/// anything it is already standing on reports a fresh entry next step.
pub fn forager_trigger_system(
    mut commands: Commands,
    mut enters: MessageReader<TriggerEnterMsg>,
    mut foragers: Query<(Entity, &mut Forager)>,
    free_bags: Query<(), (With<Bag>, Without<Held>)>,
    mut pairs: ResMut<OverlapPairs>,
    mut delivered: MessageWriter<BagDeliveredMsg>,
) {
    let mut rng = rand::rng();
    let mut claimed: Vec<Entity> = Vec::new();

    for enter in enters.read() {
        let Ok((entity, mut forager)) = foragers.get_mut(enter.entity) else { continue };
        let other = enter.other;
        trace!("Forager {:?} collided with {:?} ({})", entity, other, enter.other_category.name());

        match enter.other_category {
            Category::Bag if !forager.has_bag() => {
                if !free_bags.contains(other) || claimed.contains(&other) {
                    continue;
                }
                if forager.excludes(other) {
                    debug!("Forager {:?}: cannot pick up recently dropped bag, still on cooldown", entity);
                    continue;
                }
                if forager.pick_up(other) {
                    claimed.push(other);
                    commands.entity(other).insert(Held).remove::<(BagFlight, ScaleIn)>();
                    pairs.forget_all(entity);
                    info!("Forager {:?} picked up gold bag {:?}", entity, other);
                }
            }
            Category::Shed if forager.has_bag() && forager.shed == Some(other) => {
                let anchor = forager.home.random_point(&mut rng);
                if let Some(bag) = forager.deliver(anchor) {
                    commands.entity(bag).despawn();
                    pairs.forget_all(entity);
                    delivered.write(BagDeliveredMsg { forager: entity });
                    info!("Forager {:?} delivered gold bag {:?}", entity, bag);
                }
            }
            _ => {}
        }
    }
}

/// Run pickup cooldowns on frame time. On expiry the dropped bag becomes
/// eligible again; a forager still standing on it gets a fresh contact.
pub fn forager_cooldown_system(
    time: Res<Time>,
    mut foragers: Query<(Entity, &mut Forager)>,
    mut pairs: ResMut<OverlapPairs>,
) {
    let dt = time.delta_secs();
    for (entity, mut forager) in foragers.iter_mut() {
        if let CooldownTick::Expired { bag } = forager.tick_cooldown(dt) {
            if let Some(bag) = bag {
                pairs.forget(entity, bag);
            }
            info!("Forager {:?}: cooldown ended, dropped bag can be picked up again", entity);
        }
    }
}

/// Count deliveries in the HUD. Without a bound counter they are dropped.
pub fn gold_count_system(
    mut events: MessageReader<BagDeliveredMsg>,
    gold_count: Option<ResMut<GoldCount>>,
) {
    let Some(mut gold_count) = gold_count else {
        events.clear();
        return;
    };
    for _ in events.read() {
        gold_count.increment();
        info!("{}", gold_count.label());
    }
}
