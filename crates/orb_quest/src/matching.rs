use tracing::debug;

use crate::config::OrbConfig;
use crate::controller::GameCommand;
use crate::grid::{Grid, GridError, GridPos, Tile, TileField};
use crate::scheduler::{Scheduler, Transformation, Tween};
use crate::tween::Easing;

/// A full row or column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(usize),
    Column(usize),
}

impl Line {
    /// Slots along the line, in order.
    pub fn cells(self, size: usize) -> impl Iterator<Item = GridPos> {
        (0..size).map(move |index| match self {
            Self::Row(row) => GridPos::new(index, row),
            Self::Column(col) => GridPos::new(col, index),
        })
    }

    /// Axis a cleared orb slides along when leaving this line.
    pub const fn exit_field(self) -> TileField {
        match self {
            Self::Row(_) => TileField::CenterX,
            Self::Column(_) => TileField::CenterY,
        }
    }
}

/// Uniform lines found by one detection pass, rows before columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub lines: Vec<Line>,
}

impl MatchReport {
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn is_uniform<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> bool {
    let mut colors = tiles.into_iter().map(|tile| tile.color);
    colors
        .next()
        .is_some_and(|first| colors.all(|color| color == first))
}

/// Scans every row and every column. A tile can belong to a matched row and
/// a matched column at once; both lines are reported.
pub fn find_matches(grid: &Grid) -> MatchReport {
    let rows = (0..grid.size())
        .filter(|&row| is_uniform(grid.row(row)))
        .map(Line::Row);
    let columns = (0..grid.size())
        .filter(|&col| is_uniform(grid.column(col)))
        .map(Line::Column);
    MatchReport {
        lines: rows.chain(columns).collect(),
    }
}

/// True when no row or column is uniform.
pub fn is_settled(grid: &Grid) -> bool {
    find_matches(grid).is_empty()
}

/// Queues the clearing animation for every matched line.
///
/// Each tile shrinks for one phase, then slides off the surface for another and
/// asks for a replacement at its slot when it gets there. A value-less marker
/// spanning the slide reports the number of lines once every tile is done.
/// Returns the number of matched lines.
pub fn schedule_clears(
    grid: &Grid,
    report: &MatchReport,
    scheduler: &mut Scheduler<GameCommand>,
    config: &OrbConfig,
) -> Result<usize, GridError> {
    if report.is_empty() {
        return Ok(0);
    }

    let now = scheduler.current_tick();
    let end_shrink = now + config.phase_ticks;
    let end_slide = end_shrink + config.phase_ticks;

    for &line in &report.lines {
        let field = line.exit_field();
        for pos in line.cells(grid.size()) {
            let tile = grid.tile_at(pos)?;
            scheduler.push(Transformation::tween(
                now,
                end_shrink,
                Tween {
                    tile: tile.id,
                    field: TileField::Scale,
                    from: tile.scale,
                    to: config.cleared_scale,
                },
                Easing::WindupOvershoot,
            ));
            let start = tile.field(field);
            scheduler.push(
                Transformation::tween(
                    end_shrink,
                    end_slide,
                    Tween {
                        tile: tile.id,
                        field,
                        from: start,
                        to: start + config.slide_distance,
                    },
                    Easing::EaseBoth,
                )
                .then(GameCommand::NewOrbAt(pos)),
            );
        }
        debug!("Clearing {line:?}");
    }

    let count = report.count();
    scheduler.push(
        Transformation::marker(end_shrink, end_slide).then(GameCommand::EndCheck(count)),
    );
    Ok(count)
}
