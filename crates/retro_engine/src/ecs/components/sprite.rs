//! Sprite component
//!
//! Holds an opaque handle into whatever sprite or pattern table the renderer
//! owns, plus per-instance draw flags. The engine never interprets the handle.

use crate::ecs::Component;

/// Opaque renderer-side sprite identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteHandle(pub u32);

/// Visual representation of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteComponent {
    /// Renderer-side sprite
    pub handle: SpriteHandle,

    /// Whether this sprite should be drawn
    pub visible: bool,

    /// Mirror horizontally
    pub flip_x: bool,

    /// Mirror vertically
    pub flip_y: bool,

    /// Palette slot
    pub palette: u8,

    /// Draw layer (higher values draw later)
    pub layer: u8,
}

impl Component for SpriteComponent {
    const NAME: &'static str = "sprite";
}

impl SpriteComponent {
    /// Create a visible, unflipped sprite on palette 0, layer 0
    pub fn new(handle: SpriteHandle) -> Self {
        Self {
            handle,
            visible: true,
            flip_x: false,
            flip_y: false,
            palette: 0,
            layer: 0,
        }
    }

    /// Builder pattern: Set palette
    pub fn with_palette(mut self, palette: u8) -> Self {
        self.palette = palette;
        self
    }

    /// Builder pattern: Set layer
    pub fn with_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }
}

/// Sprite factory
pub struct SpriteFactory;

impl SpriteFactory {
    /// Sprite for a pattern-table tile index
    pub fn tile(index: u32) -> SpriteComponent {
        SpriteComponent::new(SpriteHandle(index))
    }

    /// Sprite that exists but is not drawn yet
    pub fn hidden(index: u32) -> SpriteComponent {
        SpriteComponent {
            visible: false,
            ..SpriteComponent::new(SpriteHandle(index))
        }
    }
}
