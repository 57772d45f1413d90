use crate::model::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The visible part of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub origin: Position,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Position::default(),
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn new(origin: Position, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Both dimensions finite and positive.
    pub fn has_positive_size(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.origin.x
            && position.x <= self.origin.x + self.width
            && position.y >= self.origin.y
            && position.y <= self.origin.y + self.height
    }

    /// A uniformly random point inside the viewport.
    pub fn random_position<R: Rng>(&self, rng: &mut R) -> Position {
        Position {
            x: self.origin.x + rng.random::<f64>() * self.width,
            y: self.origin.y + rng.random::<f64>() * self.height,
        }
    }
}
