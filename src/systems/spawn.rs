//! Spawn systems - Gold mine launches new bags

use bevy::prelude::*;

use crate::components::*;
use crate::spawner::Spawner;
use crate::world::bag_bundle;

/// Launch a bag from each spawner whose interval elapsed.
pub fn spawner_system(
    mut commands: Commands,
    time: Res<Time>,
    mut spawners: Query<(&mut Spawner, &Position)>,
) {
    let dt = time.delta_secs();
    let mut rng = rand::rng();

    for (mut spawner, pos) in spawners.iter_mut() {
        if !spawner.tick(dt) {
            continue;
        }
        let landing = spawner.pick_landing(&mut rng);
        let velocity = spawner.launch_velocity(pos.0, landing);
        let bag = commands.spawn((
            bag_bundle(pos.0),
            BagFlight { velocity, drag: spawner.drag },
            ScaleIn::default(),
        )).id();
        debug!("Spawned gold bag {:?} toward ({:.1},{:.1})", bag, landing.x, landing.y);
    }
}
