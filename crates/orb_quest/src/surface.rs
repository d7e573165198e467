use bevy::prelude::*;
use bevy::utils::HashMap;
use orb_shell::canvas::CanvasLayout;

use crate::grid::OrbColor;
use crate::render::DrawSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    origin: Vec2,
    scale: Vec2,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

/// One orb image painted during the last frame, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub color: OrbColor,
    pub top_left: Vec2,
    pub scale: Vec2,
}

impl SpriteDraw {
    pub fn center(&self, image_size: Vec2) -> Vec2 {
        self.top_left + image_size * self.scale / 2.0
    }
}

/// Drawing surface backed by sprites.
///
/// Painting records one [`SpriteDraw`] per image; a system then moves the orb
/// sprites to match.
#[derive(Resource, Debug, Default)]
pub struct SpriteSurface {
    layout: CanvasLayout,
    image_sizes: HashMap<OrbColor, Vec2>,
    current: Placement,
    saved: Vec<Placement>,
    draws: Vec<SpriteDraw>,
}

impl SpriteSurface {
    pub const fn layout(&self) -> &CanvasLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: CanvasLayout) {
        self.layout = layout;
    }

    pub fn image_size(&self, color: OrbColor) -> Option<Vec2> {
        self.image_sizes.get(&color).copied()
    }

    pub fn set_image_size(&mut self, color: OrbColor, size: Vec2) {
        self.image_sizes.insert(color, size);
    }

    pub fn draws(&self) -> &[SpriteDraw] {
        &self.draws
    }
}

impl DrawSurface for SpriteSurface {
    fn size(&self) -> f32 {
        self.layout.size
    }

    fn clear(&mut self) {
        self.draws.clear();
        self.saved.clear();
        self.current = Placement::default();
    }

    fn save(&mut self) {
        self.saved.push(self.current);
    }

    fn restore(&mut self) {
        match self.saved.pop() {
            Some(placement) => self.current = placement,
            None => warn!("Restore without a matching save"),
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.current.origin += self.current.scale * Vec2::new(x, y);
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.current.scale *= Vec2::new(x, y);
    }

    fn image_width(&self, color: OrbColor) -> Option<f32> {
        self.image_size(color).map(|size| size.x)
    }

    fn draw_image(&mut self, color: OrbColor) {
        self.draws.push(SpriteDraw {
            color,
            top_left: self.current.origin,
            scale: self.current.scale,
        });
    }
}
