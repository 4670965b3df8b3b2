//! Gold mine spawner - periodically launches bags into one of two lands.

use bevy::prelude::*;
use rand::Rng;

use crate::world::Zone;

#[derive(Component, Clone, Debug)]
pub struct Spawner {
    pub interval: f32,
    pub since_last: f32,
    pub launch_speed: f32,
    pub drag: f32,
    /// Green land, yellow land.
    pub lands: [Zone; 2],
}

impl Spawner {
    /// Accumulate frame time. True when a bag is due; the timer restarts at zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.since_last += dt;
        if self.since_last >= self.interval {
            self.since_last = 0.0;
            true
        } else {
            false
        }
    }

    /// Pick a land with even odds and a landing point inside it.
    pub fn pick_landing(&self, rng: &mut impl Rng) -> Vec2 {
        let land = if rng.random_bool(0.5) { &self.lands[0] } else { &self.lands[1] };
        land.random_point(rng)
    }

    /// Launch velocity from `origin` toward `landing`.
    pub fn launch_velocity(&self, origin: Vec2, landing: Vec2) -> Vec2 {
        (landing - origin).normalize_or_zero() * self.launch_speed
    }
}
