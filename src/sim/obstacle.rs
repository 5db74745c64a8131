//! Static level geometry
//!
//! Every obstacle answers the same question, "do I block right now?", through
//! [`Obstacle::is_solid`]. Echo platforms carry their solidity as state inside
//! the kind; walls and question blocks are always solid.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::ECHO_INTERACTION_RANGE;

/// What an obstacle is, and any state that comes with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Wall or platform, always solid
    Static,
    /// Platform that flips between passable and solid on activation
    Echo { solid: bool, interaction_range: f32 },
    /// Solid block linked to a question in the bank
    Quiz { tag: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub bounds: Rect,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn wall(bounds: Rect) -> Self {
        Self {
            bounds,
            kind: ObstacleKind::Static,
        }
    }

    /// Echo platform, starts passable
    pub fn echo(bounds: Rect) -> Self {
        Self::echo_with_range(bounds, ECHO_INTERACTION_RANGE)
    }

    pub fn echo_with_range(bounds: Rect, interaction_range: f32) -> Self {
        Self {
            bounds,
            kind: ObstacleKind::Echo {
                solid: false,
                interaction_range,
            },
        }
    }

    pub fn quiz(bounds: Rect, tag: impl Into<String>) -> Self {
        Self {
            bounds,
            kind: ObstacleKind::Quiz { tag: tag.into() },
        }
    }

    /// Whether the obstacle currently blocks movement
    #[inline]
    pub fn is_solid(&self) -> bool {
        match self.kind {
            ObstacleKind::Static | ObstacleKind::Quiz { .. } => true,
            ObstacleKind::Echo { solid, .. } => solid,
        }
    }

    /// Flip an echo platform's solidity and return the new state.
    ///
    /// Other kinds never change; they report `true`.
    pub fn activate(&mut self) -> bool {
        match &mut self.kind {
            ObstacleKind::Echo { solid, .. } => {
                *solid = !*solid;
                *solid
            }
            _ => true,
        }
    }

    pub fn is_toggleable(&self) -> bool {
        matches!(self.kind, ObstacleKind::Echo { .. })
    }

    /// Activation distance for echo platforms
    pub fn interaction_range(&self) -> Option<f32> {
        match self.kind {
            ObstacleKind::Echo {
                interaction_range, ..
            } => Some(interaction_range),
            _ => None,
        }
    }

    /// Question tag for quiz blocks
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            ObstacleKind::Quiz { tag } => Some(tag.as_str()),
            _ => None,
        }
    }
}
