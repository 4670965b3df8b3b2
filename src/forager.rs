//! Forager - the goblin's foraging state machine.
//!
//! Pure state transitions live here so they can be driven from systems and
//! exercised directly in tests. Carrying and pursuing share one enum, so a
//! forager can never hold a bag while chasing another.

use bevy::prelude::*;

use crate::constants::*;
use crate::world::HomeArea;

/// What the forager is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForagerState {
    /// Walking to the idle anchor.
    #[default]
    SeekingIdle,
    /// Standing at the idle anchor.
    AtIdle,
    /// Walking to a free bag (weak handle, may vanish).
    PursuingBag(Entity),
    /// Carrying a bag (owned, inactive) back to the shed.
    ReturningToShed(Entity),
}

impl ForagerState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SeekingIdle => "Seeking idle",
            Self::AtIdle => "At idle",
            Self::PursuingBag(_) => "Pursuing bag",
            Self::ReturningToShed(_) => "Returning to shed",
        }
    }
}

/// Pickup cooldown after being hit. `bag` is the one this forager dropped;
/// picking up any other bag clears it while the timer keeps running.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cooldown {
    pub remaining: f32,
    pub bag: Option<Entity>,
}

/// Outcome of advancing a forager's cooldown by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownTick {
    Inactive,
    Running,
    Expired { bag: Option<Entity> },
}

#[derive(Component, Clone, Debug)]
pub struct Forager {
    pub state: ForagerState,
    pub speed: f32,
    pub home: HomeArea,
    pub idle_anchor: Vec2,
    pub cooldown: Option<Cooldown>,
    pub cooldown_duration: f32,
    pub shed: Option<Entity>,
    pub archer: Option<Entity>,
    /// Result of this frame's combat zone test.
    pub in_combat_zone: bool,
}

impl Forager {
    pub fn new(home: HomeArea, idle_anchor: Vec2) -> Self {
        Self {
            state: ForagerState::SeekingIdle,
            speed: FORAGER_SPEED,
            home,
            idle_anchor,
            cooldown: None,
            cooldown_duration: DROPPED_BAG_COOLDOWN,
            shed: None,
            archer: None,
            in_combat_zone: false,
        }
    }

    pub fn with_shed(mut self, shed: Option<Entity>) -> Self {
        self.shed = shed;
        self
    }

    pub fn with_archer(mut self, archer: Option<Entity>) -> Self {
        self.archer = archer;
        self
    }

    pub fn has_bag(&self) -> bool {
        matches!(self.state, ForagerState::ReturningToShed(_))
    }

    pub fn carried_bag(&self) -> Option<Entity> {
        match self.state {
            ForagerState::ReturningToShed(bag) => Some(bag),
            _ => None,
        }
    }

    pub fn pursued_bag(&self) -> Option<Entity> {
        match self.state {
            ForagerState::PursuingBag(bag) => Some(bag),
            _ => None,
        }
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.cooldown.is_some()
    }

    /// True while `bag` is the one this forager dropped and the cooldown runs.
    pub fn excludes(&self, bag: Entity) -> bool {
        self.cooldown.is_some_and(|c| c.bag == Some(bag))
    }

    /// Pick the nearest eligible bag and start pursuing it.
    /// Only acts when neither carrying nor already pursuing.
    pub fn choose_nearest(
        &mut self,
        position: Vec2,
        bags: impl IntoIterator<Item = (Entity, Vec2)>,
    ) -> Option<Entity> {
        if self.has_bag() || self.pursued_bag().is_some() {
            return None;
        }
        let found = nearest_bag(position, bags.into_iter().filter(|(bag, _)| !self.excludes(*bag)));
        if let Some(bag) = found {
            self.state = ForagerState::PursuingBag(bag);
        }
        found
    }

    /// Stop chasing a bag that is no longer free.
    pub fn abandon_pursuit(&mut self) {
        if self.pursued_bag().is_some() {
            self.state = ForagerState::SeekingIdle;
        }
    }

    /// Where to walk this step, if anywhere. Marks arrival at the idle anchor.
    pub fn plan(
        &mut self,
        position: Vec2,
        bag_position: Option<Vec2>,
        shed_position: Option<Vec2>,
    ) -> Option<Vec2> {
        match self.state {
            ForagerState::PursuingBag(_) => bag_position,
            ForagerState::ReturningToShed(_) => shed_position,
            ForagerState::SeekingIdle => {
                if position.distance(self.idle_anchor) < IDLE_ARRIVAL_EPSILON {
                    self.state = ForagerState::AtIdle;
                    None
                } else {
                    Some(self.idle_anchor)
                }
            }
            ForagerState::AtIdle => None,
        }
    }

    /// Take `bag` if allowed. Clears the cooldown's bag reference on success.
    pub fn pick_up(&mut self, bag: Entity) -> bool {
        if self.has_bag() || self.excludes(bag) {
            return false;
        }
        self.state = ForagerState::ReturningToShed(bag);
        if let Some(cooldown) = self.cooldown.as_mut() {
            cooldown.bag = None;
        }
        true
    }

    /// Hand the carried bag in and head for a fresh idle anchor.
    pub fn deliver(&mut self, next_anchor: Vec2) -> Option<Entity> {
        let bag = self.carried_bag()?;
        self.state = ForagerState::SeekingIdle;
        self.idle_anchor = next_anchor;
        Some(bag)
    }

    /// Arrow hit: let go of the carried bag and start the pickup cooldown.
    pub fn drop_bag(&mut self) -> Option<Entity> {
        let bag = self.carried_bag()?;
        self.cooldown = Some(Cooldown { remaining: self.cooldown_duration, bag: Some(bag) });
        self.state = ForagerState::SeekingIdle;
        Some(bag)
    }

    pub fn tick_cooldown(&mut self, dt: f32) -> CooldownTick {
        let Some(cooldown) = self.cooldown.as_mut() else {
            return CooldownTick::Inactive;
        };
        cooldown.remaining -= dt;
        if cooldown.remaining > 0.0 {
            return CooldownTick::Running;
        }
        let bag = cooldown.bag;
        self.cooldown = None;
        CooldownTick::Expired { bag }
    }
}

/// Nearest bag by squared distance. Ties go to the first one seen.
pub fn nearest_bag(
    position: Vec2,
    bags: impl IntoIterator<Item = (Entity, Vec2)>,
) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for (bag, at) in bags {
        let d = position.distance_squared(at);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((bag, d));
        }
    }
    best.map(|(bag, _)| bag)
}

/// Move up to `max_step` toward `to` without overshooting.
pub fn step_towards(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let offset = to - from;
    let dist = offset.length();
    if dist <= max_step || dist == 0.0 {
        to
    } else {
        from + offset / dist * max_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bags(n: usize) -> (World, Vec<Entity>) {
        let mut world = World::new();
        let ids = (0..n).map(|_| world.spawn_empty().id()).collect();
        (world, ids)
    }

    fn forager() -> Forager {
        Forager::new(HomeArea { center: Vec2::ZERO, radius: HOME_RADIUS }, Vec2::new(1.0, 0.0))
    }

    #[test]
    fn nearest_prefers_first_on_tie() {
        let (_world, ids) = bags(3);
        let found = nearest_bag(Vec2::ZERO, [
            (ids[0], Vec2::new(2.0, 0.0)),
            (ids[1], Vec2::new(0.0, 2.0)),
            (ids[2], Vec2::new(3.0, 0.0)),
        ]);
        assert_eq!(found, Some(ids[0]));
    }

    #[test]
    fn carrying_and_pursuing_are_exclusive() {
        let (_world, ids) = bags(2);
        let mut f = forager();
        assert_eq!(f.choose_nearest(Vec2::ZERO, [(ids[0], Vec2::X)]), Some(ids[0]));
        assert_eq!(f.pursued_bag(), Some(ids[0]));
        assert!(!f.has_bag());

        assert!(f.pick_up(ids[0]));
        assert!(f.has_bag());
        assert_eq!(f.pursued_bag(), None);

        // No scanning while carrying.
        assert_eq!(f.choose_nearest(Vec2::ZERO, [(ids[1], Vec2::X)]), None);
        assert!(!f.pick_up(ids[1]));
        assert_eq!(f.carried_bag(), Some(ids[0]));
    }

    #[test]
    fn cooldown_excludes_only_the_dropped_bag() {
        let (_world, ids) = bags(2);
        let mut f = forager();
        assert!(f.pick_up(ids[0]));
        assert_eq!(f.drop_bag(), Some(ids[0]));
        assert!(f.is_on_cooldown());
        assert!(!f.has_bag());

        // Dropped bag is closer but excluded.
        let picked = f.choose_nearest(Vec2::ZERO, [(ids[0], Vec2::ZERO), (ids[1], Vec2::splat(4.0))]);
        assert_eq!(picked, Some(ids[1]));
        assert!(!f.pick_up(ids[0]));

        assert_eq!(f.tick_cooldown(0.5), CooldownTick::Running);
        assert!(f.excludes(ids[0]));
        assert_eq!(f.tick_cooldown(0.5), CooldownTick::Expired { bag: Some(ids[0]) });
        assert!(!f.excludes(ids[0]));
        assert_eq!(f.tick_cooldown(0.5), CooldownTick::Inactive);

        f.abandon_pursuit();
        assert!(f.pick_up(ids[0]));
    }

    #[test]
    fn pickup_clears_cooldown_bag_but_not_timer() {
        let (_world, ids) = bags(2);
        let mut f = forager();
        f.pick_up(ids[0]);
        f.drop_bag();
        assert!(f.pick_up(ids[1]));
        let cooldown = f.cooldown.expect("timer keeps running");
        assert_eq!(cooldown.bag, None);
        assert_eq!(f.tick_cooldown(2.0), CooldownTick::Expired { bag: None });
    }

    #[test]
    fn hit_without_bag_changes_nothing() {
        let mut f = forager();
        assert_eq!(f.drop_bag(), None);
        assert!(!f.is_on_cooldown());
        assert_eq!(f.state, ForagerState::SeekingIdle);
    }

    #[test]
    fn delivery_resets_to_new_anchor() {
        let (_world, ids) = bags(1);
        let mut f = forager();
        f.pick_up(ids[0]);
        assert_eq!(f.deliver(Vec2::new(2.0, 2.0)), Some(ids[0]));
        assert_eq!(f.state, ForagerState::SeekingIdle);
        assert_eq!(f.idle_anchor, Vec2::new(2.0, 2.0));
        assert_eq!(f.deliver(Vec2::ZERO), None);
    }

    #[test]
    fn plan_marks_arrival_at_idle() {
        let mut f = forager();
        assert_eq!(f.plan(Vec2::ZERO, None, None), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(f.plan(Vec2::new(0.95, 0.0), None, None), None);
        assert_eq!(f.state, ForagerState::AtIdle);
        assert_eq!(f.plan(Vec2::ZERO, None, None), None);
    }

    #[test]
    fn missing_shed_means_no_walk() {
        let (_world, ids) = bags(1);
        let mut f = forager();
        f.pick_up(ids[0]);
        assert_eq!(f.plan(Vec2::ZERO, None, None), None);
        assert!(f.has_bag());
    }

    #[test]
    fn step_towards_does_not_overshoot() {
        assert_eq!(step_towards(Vec2::ZERO, Vec2::new(1.0, 0.0), 5.0), Vec2::new(1.0, 0.0));
        let p = step_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.1);
        assert!((p.x - 0.1).abs() < 1e-6);
    }
}
