use bevy::prelude::Resource;

pub const GRID_SIZE: usize = 5;
pub const PHASE_TICKS: u64 = 15;
pub const TICKS_PER_SECOND: f64 = 30.0;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbConfig {
    /// Orbs per row and per column.
    pub grid_size: usize,
    /// Length of every animation phase (shrink, slide, grow).
    pub phase_ticks: u64,
    pub ticks_per_second: f64,
    /// Scale a cleared orb shrinks to before sliding away.
    pub cleared_scale: f32,
    /// How far a cleared orb slides, in surface widths.
    pub slide_distance: f32,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            phase_ticks: PHASE_TICKS,
            ticks_per_second: TICKS_PER_SECOND,
            cleared_scale: 0.0,
            slide_distance: 1.0,
        }
    }
}

impl OrbConfig {
    /// Scale of an orb at rest, one grid band wide.
    pub fn rest_scale(&self) -> f32 {
        1.0 / self.grid_size as f32
    }

    /// Scale of a selected orb, half its resting size.
    pub fn selected_scale(&self) -> f32 {
        self.rest_scale() / 2.0
    }
}
