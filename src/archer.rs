//! Archer - target tracking and the cancellable firing cycle.
//!
//! The cycle is an explicit timer rather than a suspended routine:
//! `Idle` until a target is set, `Waiting` while the bow is drawn,
//! `Firing` for the single frame in which the arrow is released.
//! Clearing the target drops straight back to `Idle`, so a pending
//! release can never fire after the target is gone.

use bevy::prelude::*;

use crate::constants::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum FiringPhase {
    #[default]
    Idle,
    Waiting { remaining: f32 },
    Firing,
}

#[derive(Component, Clone, Debug)]
pub struct Archer {
    pub target: Option<Entity>,
    pub phase: FiringPhase,
    pub interval: f32,
    pub arrow_speed: f32,
    pub arrow_lifetime: f32,
    /// Arrow spawn point relative to the archer.
    pub shoot_offset: Vec2,
    pub shooting: bool,
}

impl Default for Archer {
    fn default() -> Self {
        Self {
            target: None,
            phase: FiringPhase::Idle,
            interval: SHOOT_INTERVAL,
            arrow_speed: ARROW_SPEED,
            arrow_lifetime: ARROW_LIFETIME,
            shoot_offset: Vec2::ZERO,
            shooting: false,
        }
    }
}

impl Archer {
    pub fn is_cycling(&self) -> bool {
        self.phase != FiringPhase::Idle
    }

    /// Assign or clear the target. Clearing cancels the cycle immediately.
    pub fn set_target(&mut self, target: Option<Entity>) {
        self.target = target;
        if target.is_none() && self.is_cycling() {
            self.phase = FiringPhase::Idle;
            self.shooting = false;
        }
    }

    /// Run the cycle timer for one frame. Starts a draw when a target is set.
    pub fn advance(&mut self, dt: f32) {
        match self.phase {
            FiringPhase::Idle => {
                if self.target.is_some() {
                    self.begin_draw();
                }
            }
            FiringPhase::Waiting { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    FiringPhase::Firing
                } else {
                    FiringPhase::Waiting { remaining }
                };
            }
            FiringPhase::Firing => {}
        }
    }

    /// Resolve a finished draw. Returns the target to shoot at, if still set,
    /// and starts the next draw while a target remains.
    pub fn take_shot(&mut self) -> Option<Entity> {
        if self.phase != FiringPhase::Firing {
            return None;
        }
        let shot = self.target;
        self.shooting = false;
        if self.target.is_some() {
            self.begin_draw();
        } else {
            self.phase = FiringPhase::Idle;
        }
        shot
    }

    fn begin_draw(&mut self) {
        self.shooting = true;
        self.phase = FiringPhase::Waiting { remaining: self.interval };
    }
}
