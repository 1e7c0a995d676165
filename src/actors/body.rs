//! Kinematic intent shared by the concrete actors.
//!
//! Actors only compute the velocity they want; collision resolution belongs to
//! the host physics, which writes the resolved velocity back every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default downward acceleration in units per second squared.
pub const DEFAULT_GRAVITY: f32 = 980.0;

const ZERO_EPSILON: f32 = 0.00001;

/// Horizontal orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1 for left, 1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Facing for a signed horizontal value, `None` when it is zero.
    pub fn from_axis(axis: f32) -> Option<Self> {
        if is_zero_approx(axis) {
            None
        } else if axis < 0.0 {
            Some(Self::Left)
        } else {
            Some(Self::Right)
        }
    }
}

/// Velocity intent for one actor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub velocity: Vec2,
    pub gravity: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl Body {
    pub fn with_gravity(gravity: f32) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    /// Ease horizontal speed towards `target` and fall under `gravity_scale`
    /// times the body's gravity.
    pub fn accelerate(&mut self, target: f32, acceleration: f32, gravity_scale: f32, delta: f64) {
        let delta = delta as f32;
        self.velocity.x = move_toward(self.velocity.x, target, acceleration * delta);
        self.velocity.y += self.gravity * gravity_scale * delta;
    }
}

/// Move `from` towards `to` by at most `max_delta`.
pub fn move_toward(from: f32, to: f32, max_delta: f32) -> f32 {
    if (to - from).abs() <= max_delta {
        to
    } else {
        from + (to - from).signum() * max_delta
    }
}

pub fn is_zero_approx(value: f32) -> bool {
    value.abs() < ZERO_EPSILON
}
