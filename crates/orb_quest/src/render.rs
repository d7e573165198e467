use core::ops::{Deref, DerefMut};

use crate::grid::{Grid, OrbColor, Tile};

/// A square 2D canvas with a save/restore transform stack, in pixels.
pub trait DrawSurface {
    /// Side length of the surface.
    fn size(&self) -> f32;
    /// Paints the whole surface white.
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, x: f32, y: f32);
    /// Natural width of an orb image, `None` while it is still loading.
    fn image_width(&self, color: OrbColor) -> Option<f32>;
    /// Draws the orb image with its top-left corner at the current origin.
    fn draw_image(&mut self, color: OrbColor);
}

/// Saved drawing state, restored when dropped.
pub struct SavedState<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawSurface + ?Sized> SavedState<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawSurface + ?Sized> Deref for SavedState<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for SavedState<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// Draws one tile so that its image is `size * scale` pixels wide and
/// centered on `(size * center_x, size * center_y)`. Images that are not
/// loaded yet are skipped.
pub fn render_tile<S: DrawSurface + ?Sized>(surface: &mut S, tile: &Tile) {
    let Some(image_width) = surface.image_width(tile.color) else {
        return;
    };
    if image_width <= 0.0 {
        return;
    }

    let size = surface.size();
    let width = size * tile.scale;
    let ratio = width / image_width;

    let mut state = SavedState::new(surface);
    state.translate(
        size.mul_add(tile.center_x, -width / 2.0),
        size.mul_add(tile.center_y, -width / 2.0),
    );
    state.scale(ratio, ratio);
    state.draw_image(tile.color);
}

pub fn render_grid<S: DrawSurface + ?Sized>(surface: &mut S, grid: &Grid) {
    surface.clear();
    for tile in grid.tiles() {
        render_tile(surface, tile);
    }
}
