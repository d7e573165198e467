use core::fmt::{self, Display, Formatter};

use strum::{Display as StrumDisplay, EnumCount, EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::scheduler::TweenTarget;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("Position {pos} is outside the {size}x{size} grid")]
    OutOfBounds { pos: GridPos, size: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u64);

impl TileId {
    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileKind {
    #[default]
    Orb,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumCount, StrumDisplay,
)]
#[strum(serialize_all = "lowercase")]
pub enum OrbColor {
    #[default]
    Red,
    Blue,
    Green,
}

impl OrbColor {
    pub const fn image_path(self) -> &'static str {
        match self {
            Self::Red => "images/red_orb.png",
            Self::Blue => "images/blue_orb.png",
            Self::Green => "images/green_orb.png",
        }
    }

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        rng.choice(Self::iter()).unwrap_or_default()
    }
}

/// Attributes of a tile that transformations animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileField {
    CenterX,
    CenterY,
    Scale,
}

/// A single orb. Positions and scale are fractions of the surface size.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub color: OrbColor,
    pub center_x: f32,
    pub center_y: f32,
    pub scale: f32,
}

impl Tile {
    pub const fn field(&self, field: TileField) -> f32 {
        match field {
            TileField::CenterX => self.center_x,
            TileField::CenterY => self.center_y,
            TileField::Scale => self.scale,
        }
    }

    pub fn field_mut(&mut self, field: TileField) -> &mut f32 {
        match field {
            TileField::CenterX => &mut self.center_x,
            TileField::CenterY => &mut self.center_y,
            TileField::Scale => &mut self.scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub col: usize,
    pub row: usize,
}

impl GridPos {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl Display for GridPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Square arrangement of tiles, stored column-major (`col * size + row`).
/// Every slot holds exactly one tile.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    tiles: Vec<Tile>,
    next_id: u64,
}

impl Grid {
    pub fn random(size: usize, rng: &mut fastrand::Rng) -> Self {
        Self::from_fn(size, |_| OrbColor::random(rng))
    }

    pub fn from_fn(size: usize, mut color_at: impl FnMut(GridPos) -> OrbColor) -> Self {
        let mut grid = Self {
            size,
            tiles: Vec::with_capacity(size * size),
            next_id: 0,
        };
        for col in 0..size {
            for row in 0..size {
                let pos = GridPos::new(col, row);
                let tile = grid.new_tile(pos, color_at(pos));
                grid.tiles.push(tile);
            }
        }
        grid
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// Center of slot `index` along either axis.
    pub fn coordinate(&self, index: usize) -> f32 {
        let band = 1.0 / self.size as f32;
        (index as f32).mul_add(band, band / 2.0)
    }

    pub fn rest_scale(&self) -> f32 {
        1.0 / self.size as f32
    }

    /// Band index for a ratio along one axis of the surface.
    ///
    /// Picks the first slot whose center plus half a band lies past `ratio`,
    /// and the last slot when none does.
    pub fn box_from_coordinate(&self, ratio: f32) -> usize {
        let first = self.coordinate(0);
        (0..self.size)
            .find(|&index| ratio < self.coordinate(index) + first)
            .unwrap_or_else(|| self.size.saturating_sub(1))
    }

    /// Grid cell under a surface-local point.
    pub fn cell_at(&self, x: f32, y: f32, surface_size: f32) -> GridPos {
        GridPos::new(
            self.box_from_coordinate(x / surface_size),
            self.box_from_coordinate(y / surface_size),
        )
    }

    pub fn tile_at(&self, pos: GridPos) -> Result<&Tile, GridError> {
        let index = self.index(pos)?;
        self.tiles.get(index).ok_or(GridError::OutOfBounds {
            pos,
            size: self.size,
        })
    }

    /// Puts `tile` in the slot at `pos` and returns the tile it displaced.
    pub fn set_tile(&mut self, pos: GridPos, tile: Tile) -> Result<Tile, GridError> {
        let index = self.index(pos)?;
        let size = self.size;
        let slot = self
            .tiles
            .get_mut(index)
            .ok_or(GridError::OutOfBounds { pos, size })?;
        Ok(core::mem::replace(slot, tile))
    }

    /// Replaces the tile at `pos` with a fresh orb resting on that slot.
    pub fn respawn(&mut self, pos: GridPos, color: OrbColor) -> Result<TileId, GridError> {
        self.index(pos)?;
        let tile = self.new_tile(pos, color);
        let id = tile.id;
        self.set_tile(pos, tile)?;
        Ok(id)
    }

    /// Exchanges which slots two tiles occupy. The tiles themselves, including
    /// their on-screen position, are untouched.
    pub fn swap(&mut self, a: GridPos, b: GridPos) -> Result<(), GridError> {
        let a = self.index(a)?;
        let b = self.index(b)?;
        self.tiles.swap(a, b);
        Ok(())
    }

    pub fn position_of(&self, id: TileId) -> Option<GridPos> {
        self.tiles
            .iter()
            .position(|tile| tile.id == id)
            .map(|index| GridPos::new(index / self.size, index % self.size))
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|tile| tile.id == id)
    }

    /// Tiles in storage order, which is also paint order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = &Tile> {
        (0..self.size).filter_map(move |col| self.tile_at(GridPos::new(col, row)).ok())
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = &Tile> {
        (0..self.size).filter_map(move |row| self.tile_at(GridPos::new(col, row)).ok())
    }

    fn index(&self, pos: GridPos) -> Result<usize, GridError> {
        if pos.col < self.size && pos.row < self.size {
            Ok(pos.col * self.size + pos.row)
        } else {
            Err(GridError::OutOfBounds {
                pos,
                size: self.size,
            })
        }
    }

    fn new_tile(&mut self, pos: GridPos, color: OrbColor) -> Tile {
        let id = TileId(self.next_id);
        self.next_id += 1;
        Tile {
            id,
            kind: TileKind::Orb,
            color,
            center_x: self.coordinate(pos.col),
            center_y: self.coordinate(pos.row),
            scale: self.rest_scale(),
        }
    }
}

impl TweenTarget for Grid {
    fn field_mut(&mut self, tile: TileId, field: TileField) -> Option<&mut f32> {
        self.tile_mut(tile).map(|tile| tile.field_mut(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: usize) -> Grid {
        Grid::from_fn(size, |pos| {
            if (pos.col + pos.row) % 2 == 0 {
                OrbColor::Red
            } else {
                OrbColor::Blue
            }
        })
    }

    #[test]
    fn slots_are_centered_in_fifths() {
        let grid = checkerboard(5);
        let centers: Vec<f32> = (0..5).map(|index| grid.coordinate(index)).collect();
        for (center, expected) in centers.iter().zip([0.1, 0.3, 0.5, 0.7, 0.9]) {
            assert!(
                (center - expected).abs() < 1e-6,
                "slot center {center} should be {expected}"
            );
        }
        let tile = grid.tile_at(GridPos::new(3, 1)).unwrap();
        assert!((tile.center_x - 0.7).abs() < 1e-6, "x follows the column");
        assert!((tile.center_y - 0.3).abs() < 1e-6, "y follows the row");
        assert!((tile.scale - 0.2).abs() < 1e-6, "fresh tiles rest at 1/5");
    }

    #[test]
    fn swap_exchanges_slots_and_keeps_tiles() {
        let mut grid = checkerboard(5);
        let a = GridPos::new(0, 0);
        let b = GridPos::new(0, 1);
        let before_a = grid.tile_at(a).unwrap().clone();
        let before_b = grid.tile_at(b).unwrap().clone();

        grid.swap(a, b).unwrap();

        assert_eq!(grid.tile_at(a).unwrap(), &before_b, "a now holds b's tile");
        assert_eq!(grid.tile_at(b).unwrap(), &before_a, "b now holds a's tile");
        assert_eq!(
            grid.position_of(before_a.id),
            Some(b),
            "identity follows the tile"
        );
    }

    #[test]
    fn swap_leaves_every_other_slot_alone() {
        let mut grid = checkerboard(5);
        let snapshot = grid.clone();
        let a = GridPos::new(2, 3);
        let b = GridPos::new(4, 0);
        grid.swap(a, b).unwrap();

        for col in 0..5 {
            for row in 0..5 {
                let pos = GridPos::new(col, row);
                let expected = match pos {
                    p if p == a => b,
                    p if p == b => a,
                    p => p,
                };
                assert_eq!(
                    grid.tile_at(pos).unwrap(),
                    snapshot.tile_at(expected).unwrap(),
                    "slot {pos} holds the tile from {expected}"
                );
            }
        }
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let mut grid = checkerboard(5);
        let outside = GridPos::new(5, 0);
        assert_eq!(
            grid.tile_at(outside).unwrap_err(),
            GridError::OutOfBounds {
                pos: outside,
                size: 5
            },
            "column 5 does not exist"
        );
        assert!(
            grid.swap(GridPos::new(0, 0), GridPos::new(0, 9)).is_err(),
            "swap checks both ends"
        );
    }

    #[test]
    fn respawn_puts_a_fresh_tile_on_the_slot() {
        let mut grid = checkerboard(5);
        let pos = GridPos::new(1, 4);
        let old = grid.tile_at(pos).unwrap().clone();
        grid.tile_mut(old.id).unwrap().center_x = 3.0;

        let id = grid.respawn(pos, OrbColor::Green).unwrap();

        let tile = grid.tile_at(pos).unwrap();
        assert_ne!(id, old.id, "a new identity is minted");
        assert_eq!(tile.color, OrbColor::Green, "requested color is used");
        assert!(
            (tile.center_x - 0.3).abs() < 1e-6,
            "the new tile sits on its slot"
        );
        assert_eq!(grid.position_of(old.id), None, "old tile is gone");
    }

    #[test]
    fn box_from_coordinate_uses_shifted_bands() {
        let grid = checkerboard(5);
        assert_eq!(grid.box_from_coordinate(0.0), 0, "left edge");
        assert_eq!(grid.box_from_coordinate(0.19), 0, "just inside the first band");
        assert_eq!(grid.box_from_coordinate(0.21), 1, "second band");
        assert_eq!(grid.box_from_coordinate(0.5), 2, "middle");
        assert_eq!(grid.box_from_coordinate(0.99), 4, "right edge");
        assert_eq!(grid.box_from_coordinate(1.5), 4, "past the edge clamps");
    }

    #[test]
    fn box_from_coordinate_is_monotonic_and_in_range() {
        let grid = checkerboard(5);
        let mut previous = 0;
        for step in 0..1000 {
            let ratio = step as f32 / 1000.0;
            let index = grid.box_from_coordinate(ratio);
            assert!(index < 5, "{ratio} mapped outside the grid");
            assert!(index >= previous, "{ratio} went backwards");
            previous = index;
        }
    }

    #[test]
    fn cell_at_resolves_surface_points() {
        let grid = checkerboard(5);
        assert_eq!(
            grid.cell_at(10.0, 310.0, 320.0),
            GridPos::new(0, 4),
            "bottom-left corner"
        );
        assert_eq!(
            grid.cell_at(160.0, 70.0, 320.0),
            GridPos::new(2, 1),
            "center column, second row"
        );
    }

    #[test]
    fn tween_target_reaches_tiles_by_id() {
        let mut grid = checkerboard(5);
        let id = grid.tile_at(GridPos::new(2, 2)).unwrap().id;
        *TweenTarget::field_mut(&mut grid, id, TileField::Scale).unwrap() = 0.05;
        assert_eq!(
            grid.tile_at(GridPos::new(2, 2)).unwrap().scale,
            0.05,
            "write lands on the tile"
        );
    }
}
