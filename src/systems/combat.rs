//! Combat systems - Zone signalling, archer firing cycle, arrows and hits

use bevy::prelude::*;

use crate::archer::Archer;
use crate::components::*;
use crate::forager::Forager;
use crate::messages::{ArrowFiredMsg, ArrowHitMsg, SetArcherTargetMsg, TriggerEnterMsg};
use crate::resources::{CombatStats, CombatZone, OverlapPairs};
use crate::world::arrow_bundle;

// ============================================================================
// FRAME TICK
// ============================================================================

/// Remove arrows that outlived their lifetime without hitting anything.
pub fn arrow_lifetime_system(
    mut commands: Commands,
    time: Res<Time>,
    mut arrows: Query<(Entity, &mut Arrow)>,
    mut stats: ResMut<CombatStats>,
) {
    let dt = time.delta_secs();
    for (entity, mut arrow) in arrows.iter_mut() {
        arrow.ttl -= dt;
        if arrow.ttl <= 0.0 {
            commands.entity(entity).despawn();
            stats.arrows_expired += 1;
        }
    }
}

/// Every frame: foragers inside the combat zone ask their archer to target
/// them, foragers outside tell it to stand down. The clear is repeated every
/// frame while outside, not only on exit.
pub fn combat_zone_system(
    zone: Option<Res<CombatZone>>,
    mut foragers: Query<(Entity, &mut Forager, &Position)>,
    mut targets: MessageWriter<SetArcherTargetMsg>,
) {
    let Some(zone) = zone else { return };

    for (entity, mut forager, pos) in foragers.iter_mut() {
        let inside = zone.0.contains(pos.0);
        if inside != forager.in_combat_zone {
            if inside {
                info!("Forager {:?} entered the combat zone, archer should attack", entity);
            } else {
                debug!("Forager {:?} left the combat zone", entity);
            }
            forager.in_combat_zone = inside;
        }

        if let Some(archer) = forager.archer {
            targets.write(SetArcherTargetMsg { archer, target: inside.then_some(entity) });
        }
    }
}

/// Apply target assignments in the order they were sent.
pub fn apply_archer_target_system(
    mut events: MessageReader<SetArcherTargetMsg>,
    mut archers: Query<&mut Archer>,
) {
    for event in events.read() {
        if let Ok(mut archer) = archers.get_mut(event.archer) {
            archer.set_target(event.target);
        }
    }
}

/// Advance every archer's draw timer.
pub fn archer_cycle_system(
    time: Res<Time>,
    mut archers: Query<&mut Archer>,
) {
    let dt = time.delta_secs();
    for mut archer in archers.iter_mut() {
        archer.advance(dt);
    }
}

/// Release arrows for finished draws, aimed at the target's current position.
pub fn archer_fire_system(
    mut commands: Commands,
    mut archers: Query<(Entity, &mut Archer, &Position)>,
    targets: Query<&Position, Without<Archer>>,
    mut fired: MessageWriter<ArrowFiredMsg>,
) {
    for (entity, mut archer, pos) in archers.iter_mut() {
        let Some(target) = archer.take_shot() else { continue };

        let Ok(target_pos) = targets.get(target) else {
            debug!("Archer {:?}: target {:?} is gone", entity, target);
            archer.set_target(None);
            continue;
        };

        let origin = pos.0 + archer.shoot_offset;
        let direction = (target_pos.0 - origin).normalize_or_zero();
        commands.spawn(arrow_bundle(
            Arrow::new(direction, archer.arrow_speed, archer.arrow_lifetime),
            origin,
        ));
        fired.write(ArrowFiredMsg { archer: entity, target, origin, direction });
    }
}

/// Tally released arrows.
pub fn arrow_fired_stats_system(
    mut fired: MessageReader<ArrowFiredMsg>,
    mut stats: ResMut<CombatStats>,
) {
    for shot in fired.read() {
        stats.arrows_fired += 1;
        debug!("Archer {:?} fired at {:?} from ({:.1},{:.1}) heading ({:.2},{:.2})",
            shot.archer, shot.target, shot.origin.x, shot.origin.y, shot.direction.x, shot.direction.y);
    }
}

// ============================================================================
// FIXED TICK
// ============================================================================

/// Arrow overlaps: a forager takes the hit and the arrow is spent;
/// anything else is only logged.
pub fn arrow_trigger_system(
    mut commands: Commands,
    mut enters: MessageReader<TriggerEnterMsg>,
    arrows: Query<(), With<Arrow>>,
    foragers: Query<(), With<Forager>>,
    mut hits: MessageWriter<ArrowHitMsg>,
) {
    let mut spent: Vec<Entity> = Vec::new();

    for enter in enters.read() {
        let arrow = enter.entity;
        if !arrows.contains(arrow) || spent.contains(&arrow) {
            continue;
        }
        debug!("Arrow {:?} collided with {:?} ({})", arrow, enter.other, enter.other_category.name());

        if enter.other_category == Category::Forager && foragers.contains(enter.other) {
            hits.write(ArrowHitMsg { forager: enter.other, arrow });
            commands.entity(arrow).despawn();
            spent.push(arrow);
            info!("Forager {:?} hit by arrow", enter.other);
        } else {
            debug!("Arrow hit something else: {}", enter.other_category.name());
        }
    }
}

/// Hit response: a carrying forager drops its bag where it stands,
/// starts the pickup cooldown and immediately looks for another bag.
pub fn arrow_hit_response_system(
    mut commands: Commands,
    mut hits: MessageReader<ArrowHitMsg>,
    mut foragers: Query<(&mut Forager, &Position), Without<Bag>>,
    mut bags: Query<(Entity, &mut Position, Has<Held>), (With<Bag>, Without<Forager>)>,
    mut pairs: ResMut<OverlapPairs>,
    mut stats: ResMut<CombatStats>,
) {
    for hit in hits.read() {
        stats.hits += 1;
        let Ok((mut forager, pos)) = foragers.get_mut(hit.forager) else { continue };

        let Some(bag) = forager.drop_bag() else {
            debug!("Forager {:?} hit with empty hands", hit.forager);
            continue;
        };

        if let Ok((_, mut bag_pos, _)) = bags.get_mut(bag) {
            bag_pos.0 = pos.0;
            commands.entity(bag).remove::<Held>();
        }
        pairs.forget_all(hit.forager);
        stats.bags_dropped += 1;
        info!("Forager {:?} dropped bag {:?}, cooldown started for {:.1} seconds",
            hit.forager, bag, forager.cooldown_duration);

        let free = bags.iter()
            .filter(|(e, _, held)| !*held && *e != bag)
            .map(|(e, p, _)| (e, p.0));
        if let Some(next) = forager.choose_nearest(pos.0, free) {
            debug!("Forager {:?} now pursuing bag {:?}", hit.forager, next);
        }
    }
}
