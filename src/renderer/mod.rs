//! Draw pass
//!
//! The simulation never draws. [`scene::draw_frame`] walks a [`GameState`]
//! and issues parameter-only draw calls against a [`RenderSurface`]; hosts
//! implement the surface over whatever graphics API they use. [`DrawList`]
//! records the calls for headless runs and tests.
//!
//! [`GameState`]: crate::sim::GameState

pub mod draw_list;
pub mod scene;

pub use draw_list::{DrawCommand, DrawList};
pub use scene::{draw_fps, draw_frame};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// RGBA, 0..1
pub type Color = [f32; 4];

/// Canvas clear color (#e1d1d1)
pub const CLEAR_COLOR: Color = [0.882, 0.820, 0.820, 1.0];
/// Hint and credit text (#7e5e5e)
pub const HINT_COLOR: Color = [0.494, 0.369, 0.369, 1.0];
pub const TEXT_COLOR: Color = [0.0, 0.0, 0.0, 1.0];
/// Aim line while the drag is tall enough to launch
pub const AIM_ACTIVE_COLOR: Color = [0.0, 0.0, 0.0, 1.0];
pub const AIM_INACTIVE_COLOR: Color = [0.0, 0.0, 0.0, 0.2];
pub const BLOOD_COLOR: Color = [1.0, 0.0, 0.0, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// Texture slots a host must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    Hero,
    /// Solid black, stretched over blocks
    Block,
    Orb,
    /// Collected orb; also used for particles, trails and the transition
    OrbCollected,
    Spike,
    Bugger,
    Title,
    Backdrop,
}

/// Color blended over a texture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub color: Color,
    pub amount: f32,
}

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: TextureId,
    pub pos: Vec2,
    /// Stretch to this size; natural texture size when `None`
    pub size: Option<Vec2>,
    /// Anchor inside the quad, (0, 0) top-left to (1, 1) bottom-right
    pub pivot: Vec2,
    /// Negative components mirror
    pub scale: Vec2,
    /// Degrees
    pub rotation: f32,
    pub alpha: f32,
    pub tint: Option<Tint>,
}

impl Sprite {
    pub fn new(texture: TextureId, pos: Vec2) -> Self {
        Self {
            texture,
            pos,
            size: None,
            pivot: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            alpha: 1.0,
            tint: None,
        }
    }

    pub fn centered(mut self) -> Self {
        self.pivot = Vec2::splat(0.5);
        self
    }

    pub fn sized(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn scaled(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn tinted(mut self, color: Color, amount: f32) -> Self {
        self.tint = Some(Tint { color, amount });
        self
    }
}

/// A rectangle filled with a repeating texture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiledQuad {
    pub texture: TextureId,
    pub rect: Rect,
    /// Scroll of the tile pattern
    pub tile_offset: Vec2,
    pub tile_scale: Vec2,
    /// Degrees
    pub tile_rotation: f32,
    pub tile_alpha: f32,
}

/// A line of bitmap text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub pos: Vec2,
    pub scale: f32,
    pub alpha: f32,
    pub color: Color,
}

impl TextRun {
    pub fn new(text: impl Into<String>, pos: Vec2) -> Self {
        Self {
            text: text.into(),
            pos,
            scale: 1.0,
            alpha: 1.0,
            color: TEXT_COLOR,
        }
    }
}

/// Dashed quadratic curve of the aim preview
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimCurve {
    pub p0: Vec2,
    pub control: Vec2,
    pub p2: Vec2,
    pub dash_offset: f32,
    pub color: Color,
}

/// Host drawing backend
pub trait RenderSurface {
    fn clear(&mut self, color: Color);
    fn sprite(&mut self, sprite: &Sprite);
    fn tiled(&mut self, quad: &TiledQuad);
    fn text(&mut self, text: &TextRun);
    fn curve(&mut self, curve: &AimCurve);
}
