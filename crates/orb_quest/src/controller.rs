use orb_shell::platform::Platform;
use tracing::{debug, info, warn};

use crate::config::OrbConfig;
use crate::grid::{Grid, GridError, GridPos, OrbColor, TileField};
use crate::matching::{find_matches, schedule_clears};
use crate::render::{DrawSurface, render_grid};
use crate::scheduler::{Scheduler, Transformation, Tween};
use crate::tween::Easing;

/// Game logic run when a transformation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Look for uniform lines and start clearing them.
    CheckForGroups,
    /// Put a fresh random orb on a slot whose orb slid away.
    NewOrbAt(GridPos),
    /// A clearing pass finished with this many lines.
    EndCheck(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    OrbSelected,
    Animating,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Something is still animating.
    Ignored,
    Selected(GridPos),
    /// The selected cell was clicked again.
    Cancelled(GridPos),
    Swapped(GridPos, GridPos),
}

/// One play session: the grid, its animations, the score and the selection.
pub struct OrbGame {
    config: OrbConfig,
    grid: Grid,
    scheduler: Scheduler<GameCommand>,
    score: u32,
    high_score: u32,
    selected: Option<GridPos>,
    rng: fastrand::Rng,
    platform: Box<dyn Platform>,
}

impl OrbGame {
    pub fn new(config: OrbConfig, platform: Box<dyn Platform>) -> Self {
        Self::with_rng(config, platform, fastrand::Rng::new())
    }

    pub fn with_rng(
        config: OrbConfig,
        platform: Box<dyn Platform>,
        mut rng: fastrand::Rng,
    ) -> Self {
        let grid = Grid::random(config.grid_size, &mut rng);
        Self::with_grid(config, platform, grid, rng)
    }

    pub fn with_grid(
        config: OrbConfig,
        platform: Box<dyn Platform>,
        grid: Grid,
        rng: fastrand::Rng,
    ) -> Self {
        let high_score = platform.high_score();
        info!("Starting with high score {high_score}");
        Self {
            config,
            grid,
            scheduler: Scheduler::new(),
            score: 0,
            high_score,
            selected: None,
            rng,
            platform,
        }
    }

    pub const fn config(&self) -> &OrbConfig {
        &self.config
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn scheduler(&self) -> &Scheduler<GameCommand> {
        &self.scheduler
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn high_score(&self) -> u32 {
        self.high_score
    }

    pub const fn selected(&self) -> Option<GridPos> {
        self.selected
    }

    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if !self.scheduler.is_idle() {
            Phase::Animating
        } else if self.selected.is_some() {
            Phase::OrbSelected
        } else {
            Phase::Idle
        }
    }

    /// Handles a click at surface-local pixel coordinates.
    pub fn click(&mut self, x: f32, y: f32, surface_size: f32) -> Result<ClickOutcome, GridError> {
        let pos = self.grid.cell_at(x, y, surface_size);
        self.click_cell(pos)
    }

    pub fn click_cell(&mut self, pos: GridPos) -> Result<ClickOutcome, GridError> {
        if !self.scheduler.is_idle() {
            return Ok(ClickOutcome::Ignored);
        }

        match self.selected {
            None => {
                self.schedule_select(pos)?;
                self.selected = Some(pos);
                debug!("Selected {pos}");
                Ok(ClickOutcome::Selected(pos))
            }
            Some(selected) if selected == pos => {
                self.schedule_deselect(pos)?;
                self.selected = None;
                debug!("Deselected {pos}");
                Ok(ClickOutcome::Cancelled(pos))
            }
            Some(selected) => {
                self.schedule_swap(selected, pos)?;
                self.selected = None;
                debug!("Swapping {selected} and {pos}");
                Ok(ClickOutcome::Swapped(selected, pos))
            }
        }
    }

    fn resize(
        &mut self,
        pos: GridPos,
        from: f32,
        to: f32,
        start: u64,
        end: u64,
    ) -> Result<(), GridError> {
        let tile = self.grid.tile_at(pos)?.id;
        self.scheduler.push(Transformation::tween(
            start,
            end,
            Tween {
                tile,
                field: TileField::Scale,
                from,
                to,
            },
            Easing::WindupOvershoot,
        ));
        Ok(())
    }

    fn schedule_select(&mut self, pos: GridPos) -> Result<(), GridError> {
        let now = self.scheduler.current_tick();
        let (rest, selected) = (self.config.rest_scale(), self.config.selected_scale());
        self.resize(pos, rest, selected, now, now + self.config.phase_ticks)
    }

    fn schedule_deselect(&mut self, pos: GridPos) -> Result<(), GridError> {
        let now = self.scheduler.current_tick();
        let (rest, selected) = (self.config.rest_scale(), self.config.selected_scale());
        self.resize(pos, selected, rest, now, now + self.config.phase_ticks)
    }

    /// Queues the swap animation for the tiles at `selected` and `other` and
    /// exchanges their slots right away.
    ///
    /// `other` shrinks, both tiles move to each other's place, then both grow
    /// back. When the selected tile is back to full size the grid is checked
    /// for matches.
    pub fn schedule_swap(&mut self, selected: GridPos, other: GridPos) -> Result<(), GridError> {
        let first = self.grid.tile_at(selected)?.clone();
        let second = self.grid.tile_at(other)?.clone();

        let phase = self.config.phase_ticks;
        let end_shrink = self.scheduler.current_tick() + phase;
        let end_move = end_shrink + phase;
        let end_grow = end_move + phase;
        let (rest, small) = (self.config.rest_scale(), self.config.selected_scale());

        self.resize(other, rest, small, self.scheduler.current_tick(), end_shrink)?;

        for (mover, target) in [(&second, &first), (&first, &second)] {
            for field in [TileField::CenterX, TileField::CenterY] {
                self.scheduler.push(Transformation::tween(
                    end_shrink,
                    end_move,
                    Tween {
                        tile: mover.id,
                        field,
                        from: mover.field(field),
                        to: target.field(field),
                    },
                    Easing::EaseBoth,
                ));
            }
        }

        self.resize(other, small, rest, end_move, end_grow)?;
        self.scheduler.push(
            Transformation::tween(
                end_move,
                end_grow,
                Tween {
                    tile: first.id,
                    field: TileField::Scale,
                    from: small,
                    to: rest,
                },
                Easing::WindupOvershoot,
            )
            .then(GameCommand::CheckForGroups),
        );

        self.grid.swap(selected, other)
    }

    /// Starts clearing every uniform line. Returns how many were found.
    pub fn check_for_groups(&mut self) -> Result<usize, GridError> {
        let report = find_matches(&self.grid);
        let count = schedule_clears(&self.grid, &report, &mut self.scheduler, &self.config)?;
        if count > 0 {
            info!("Found {count} matching lines");
        }
        Ok(count)
    }

    pub fn execute(&mut self, command: GameCommand) -> Result<(), GridError> {
        match command {
            GameCommand::CheckForGroups => {
                self.check_for_groups()?;
            }
            GameCommand::NewOrbAt(pos) => {
                let color = OrbColor::random(&mut self.rng);
                self.grid.respawn(pos, color)?;
                debug!("New {color} orb at {pos}");
            }
            GameCommand::EndCheck(count) => {
                self.score = self
                    .score
                    .saturating_add(u32::try_from(count).unwrap_or(u32::MAX));
                info!("Score is now {}", self.score);
                if self.score > self.high_score {
                    self.high_score = self.platform.set_high_score(self.score);
                    info!("New high score {}", self.high_score);
                }
                self.check_for_groups()?;
            }
        }
        Ok(())
    }

    /// Applies the current tick's transformations and runs whatever completed.
    /// Does not advance the tick.
    pub fn step(&mut self) {
        let commands = self.scheduler.apply_and_purge(&mut self.grid);
        for command in commands {
            if let Err(err) = self.execute(command) {
                warn!("{command:?} failed: {err}");
            }
        }
    }

    /// One full frame: step, paint, advance.
    pub fn frame(&mut self, surface: &mut impl DrawSurface) {
        self.step();
        render_grid(surface, &self.grid);
        self.scheduler.advance();
    }

    /// One frame without painting.
    pub fn update(&mut self) {
        self.step();
        self.scheduler.advance();
    }
}
