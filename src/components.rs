//! ECS Components - Shared data attached to simulation entities.
//! Forager and archer state live in their own modules.

use bevy::prelude::*;

use crate::constants::*;

// ============================================================================
// CORE COMPONENTS
// ============================================================================

/// World-space position. Systems write this directly in place of a
/// rigid-body `MovePosition`.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position(pub Vec2);

/// Velocity measured from realized displacement over the last fixed step.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Motion {
    pub velocity: Vec2,
    pub previous: Vec2,
}

impl Motion {
    pub fn at(position: Vec2) -> Self {
        Self { velocity: Vec2::ZERO, previous: position }
    }

    /// Record the position reached this step. Returns the realized velocity.
    pub fn record(&mut self, position: Vec2, dt: f32) -> Vec2 {
        self.velocity = if dt > 0.0 { (position - self.previous) / dt } else { Vec2::ZERO };
        self.previous = position;
        self.velocity
    }
}

/// Flags the renderer reads. Nothing in the simulation reads them back.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationFlags {
    pub walking: bool,
    pub shooting: bool,
    pub flip_x: bool,
}

// ============================================================================
// COLLISION
// ============================================================================

/// Closed set of collision categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Forager,
    Bag,
    Shed,
    Arrow,
    Archer,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Forager => "Forager",
            Self::Bag => "GoldBag",
            Self::Shed => "Shed",
            Self::Arrow => "Arrow",
            Self::Archer => "Archer",
        }
    }
}

/// Circular trigger volume.
#[derive(Component, Clone, Copy, Debug)]
pub struct Collider {
    pub radius: f32,
    pub category: Category,
}

impl Collider {
    pub fn new(radius: f32, category: Category) -> Self {
        Self { radius, category }
    }
}

// ============================================================================
// GOLD BAGS
// ============================================================================

/// Gold bag marker. Free-standing until a forager picks it up.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Bag;

/// Inactive bag: carried by a forager, invisible and intangible.
/// Removing it reactivates the bag in place.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Held;

/// Zero-gravity launch velocity of a freshly spawned bag.
#[derive(Component, Clone, Copy, Debug)]
pub struct BagFlight {
    pub velocity: Vec2,
    pub drag: f32,
}

impl BagFlight {
    /// Advance one step. Returns the displacement to apply.
    pub fn step(&mut self, dt: f32) -> Vec2 {
        let delta = self.velocity * dt;
        self.velocity *= (1.0 - self.drag * dt).max(0.0);
        if self.velocity.length() < BAG_REST_SPEED {
            self.velocity = Vec2::ZERO;
        }
        delta
    }

    pub fn is_settled(&self) -> bool {
        self.velocity == Vec2::ZERO
    }
}

/// Pop-in scale tween played on fresh bags. Purely cosmetic.
#[derive(Component, Clone, Copy, Debug)]
pub struct ScaleIn {
    pub elapsed: f32,
    pub duration: f32,
    pub scale: f32,
}

impl Default for ScaleIn {
    fn default() -> Self {
        Self { elapsed: 0.0, duration: SCALE_IN_SECONDS, scale: 0.0 }
    }
}

impl ScaleIn {
    /// Advance the tween. Returns true once the full scale is reached.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let t = if self.duration > 0.0 { self.elapsed / self.duration } else { 1.0 };
        self.scale = ease_out_bounce(t);
        self.elapsed >= self.duration
    }
}

/// Standard out-bounce curve, 0 → 1 over t ∈ [0, 1].
pub fn ease_out_bounce(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    let t = t.clamp(0.0, 1.0);
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

// ============================================================================
// SCENERY
// ============================================================================

/// Drop-off point for gold bags.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Shed;

/// Short-lived projectile. `heading` is the sprite rotation in radians.
#[derive(Component, Clone, Copy, Debug)]
pub struct Arrow {
    pub velocity: Vec2,
    pub heading: f32,
    pub ttl: f32,
}

impl Arrow {
    pub fn new(direction: Vec2, speed: f32, lifetime: f32) -> Self {
        Self {
            velocity: direction * speed,
            heading: direction.y.atan2(direction.x),
            ttl: lifetime,
        }
    }
}
