//! Backdrop selection and scroll state
//!
//! Each level names a backdrop kind. Only the win and title backdrops animate;
//! their scroll state lives in the variant itself.

use serde::{Deserialize, Serialize};

/// Backdrop selector used by level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackgroundKind {
    #[default]
    Default,
    Win,
    Title,
}

const SCROLL_SPEED: f32 = 0.1;
const SPIN_SPEED: f32 = 0.1;

/// Live backdrop with its animation state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Background {
    #[default]
    Default,
    Win { tile_x: f32 },
    Title { tile_x: f32, rotation: f32 },
}

impl Background {
    pub fn new(kind: BackgroundKind) -> Self {
        match kind {
            BackgroundKind::Default => Self::Default,
            BackgroundKind::Win => Self::Win { tile_x: 0.0 },
            BackgroundKind::Title => Self::Title {
                tile_x: 0.0,
                rotation: 0.0,
            },
        }
    }

    pub fn kind(&self) -> BackgroundKind {
        match self {
            Self::Default => BackgroundKind::Default,
            Self::Win { .. } => BackgroundKind::Win,
            Self::Title { .. } => BackgroundKind::Title,
        }
    }

    /// Switch backdrop. Scroll state carries over when the kind is unchanged.
    pub fn set_kind(&mut self, kind: BackgroundKind) {
        if self.kind() != kind {
            *self = Self::new(kind);
        }
    }

    /// Tile scroll offset (x) and tile rotation in degrees
    pub fn tile_offset(&self) -> (f32, f32) {
        match *self {
            Self::Default => (0.0, 0.0),
            Self::Win { tile_x } => (tile_x, 0.0),
            Self::Title { tile_x, rotation } => (tile_x, rotation),
        }
    }

    pub fn update(&mut self, dt: f32) {
        match self {
            Self::Default => {}
            Self::Win { tile_x } => *tile_x += SCROLL_SPEED * dt,
            Self::Title { tile_x, rotation } => {
                *tile_x += SCROLL_SPEED * dt;
                *rotation += SPIN_SPEED * dt;
            }
        }
    }
}
