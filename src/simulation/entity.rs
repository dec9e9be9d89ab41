//! Simulated point entities and their boundary-reflecting motion

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Vec2};

/// Frame dimensions entities are confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

impl FrameSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and greater than zero
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Clamp a position into `[0, width] x [0, height]`
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.min(self.width).max(0.0), pos.y.min(self.height).max(0.0))
    }
}

/// A person-like point wandering the frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEntity {
    pub id: EntityId,
    pub position: Vec2,
    /// Each component lies in [-1, 1]
    pub velocity: Vec2,
}

impl SimEntity {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            id: EntityId::new(),
            position,
            velocity,
        }
    }

    /// Advance one tick.
    ///
    /// An axis whose next coordinate leaves the frame has its velocity
    /// inverted, then the coordinate is clamped to the edge. Speed is never
    /// lost; the entity sits on the wall for that tick and moves away on the next.
    pub fn step(&mut self, frame: FrameSize, speed: f32) {
        let next = self.position + self.velocity * speed;

        if next.x < 0.0 || next.x > frame.width {
            self.velocity.x = -self.velocity.x;
        }
        if next.y < 0.0 || next.y > frame.height {
            self.velocity.y = -self.velocity.y;
        }

        self.position = frame.clamp(next);
    }
}
