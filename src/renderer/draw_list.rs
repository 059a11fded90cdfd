//! Recording render surface

use serde::{Deserialize, Serialize};

use super::{AimCurve, Color, RenderSurface, Sprite, TextRun, TextureId, TiledQuad};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear(Color),
    Sprite(Sprite),
    Tiled(TiledQuad),
    Text(TextRun),
    Curve(AimCurve),
}

/// Records every draw call of a frame in order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sprites using `texture`, in draw order
    pub fn sprites(&self, texture: TextureId) -> impl Iterator<Item = &Sprite> {
        self.commands.iter().filter_map(move |cmd| match cmd {
            DrawCommand::Sprite(sprite) if sprite.texture == texture => Some(sprite),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }
}

impl RenderSurface for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn sprite(&mut self, sprite: &Sprite) {
        self.commands.push(DrawCommand::Sprite(*sprite));
    }

    fn tiled(&mut self, quad: &TiledQuad) {
        self.commands.push(DrawCommand::Tiled(*quad));
    }

    fn text(&mut self, text: &TextRun) {
        self.commands.push(DrawCommand::Text(text.clone()));
    }

    fn curve(&mut self, curve: &AimCurve) {
        self.commands.push(DrawCommand::Curve(*curve));
    }
}
