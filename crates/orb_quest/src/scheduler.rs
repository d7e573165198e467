//! Tick-driven animation of tile attributes.
//!
//! A [`Scheduler`] owns a tick counter and an ordered list of
//! [`Transformation`]s. An external driver calls [`Scheduler::apply_and_purge`]
//! once per frame, paints, then calls [`Scheduler::advance`].

use tracing::trace;

use crate::grid::{TileField, TileId};
use crate::tween::Easing;

/// Anything transformations can write into.
pub trait TweenTarget {
    /// The animated attribute of `tile`, or `None` if the tile is gone.
    fn field_mut(&mut self, tile: TileId, field: TileField) -> Option<&mut f32>;
}

/// The value half of a transformation: which attribute moves, and between
/// which values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub tile: TileId,
    pub field: TileField,
    pub from: f32,
    pub to: f32,
}

/// A time-bounded change, optionally followed by a completion command `C`.
///
/// Without a [`Tween`] the transformation only marks time and fires its
/// command when `end_tick` is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation<C> {
    start_tick: u64,
    end_tick: u64,
    tween: Option<Tween>,
    easing: Easing,
    on_done: Option<C>,
}

impl<C> Transformation<C> {
    pub fn tween(start_tick: u64, end_tick: u64, tween: Tween, easing: Easing) -> Self {
        Self::new(start_tick, end_tick, Some(tween), easing)
    }

    /// A value-less transformation that only waits for `end_tick`.
    pub fn marker(start_tick: u64, end_tick: u64) -> Self {
        Self::new(start_tick, end_tick, None, Easing::Linear)
    }

    /// Attaches the command fired when the transformation completes.
    #[must_use]
    pub fn then(mut self, command: C) -> Self {
        self.on_done = Some(command);
        self
    }

    fn new(start_tick: u64, end_tick: u64, tween: Option<Tween>, easing: Easing) -> Self {
        debug_assert!(
            end_tick > start_tick,
            "transformation ends at tick {end_tick}, not after its start {start_tick}"
        );
        Self {
            start_tick,
            end_tick,
            tween,
            easing,
            on_done: None,
        }
    }

    pub const fn start_tick(&self) -> u64 {
        self.start_tick
    }

    pub const fn end_tick(&self) -> u64 {
        self.end_tick
    }

    pub const fn tween_ref(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    pub const fn easing(&self) -> Easing {
        self.easing
    }

    pub const fn on_done(&self) -> Option<&C> {
        self.on_done.as_ref()
    }

    pub const fn is_active_at(&self, tick: u64) -> bool {
        self.start_tick <= tick && tick <= self.end_tick
    }

    /// Eased value at `tick`, `None` outside the transformation's span or when
    /// it carries no value.
    pub fn value_at(&self, tick: u64) -> Option<f32> {
        let tween = self.tween.as_ref()?;
        if !self.is_active_at(tick) {
            return None;
        }
        let fraction =
            (tick - self.start_tick) as f64 / (self.end_tick - self.start_tick) as f64;
        let progress = self.easing.apply(fraction) as f32;
        Some((tween.to - tween.from).mul_add(progress, tween.from))
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler<C> {
    tick: u64,
    active: Vec<Transformation<C>>,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self {
            tick: 0,
            active: Vec::new(),
        }
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// True when nothing is animating.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active(&self) -> &[Transformation<C>] {
        &self.active
    }

    pub fn push(&mut self, transformation: Transformation<C>) {
        self.active.push(transformation);
    }

    /// Applies every live transformation at the current tick, in list order,
    /// then drops the ones whose end tick has passed.
    ///
    /// Returns the completion commands of transformations ending on this tick,
    /// in list order. Each command is handed out once; running this twice for
    /// the same tick does not repeat it. Anything pushed while the caller
    /// handles the commands is first applied on the next tick.
    pub fn apply_and_purge(&mut self, target: &mut impl TweenTarget) -> Vec<C> {
        let tick = self.tick;
        let mut fired = Vec::new();

        for transformation in &mut self.active {
            if !transformation.is_active_at(tick) {
                continue;
            }
            if let (Some(value), Some(tween)) =
                (transformation.value_at(tick), transformation.tween.as_ref())
            {
                match target.field_mut(tween.tile, tween.field) {
                    Some(slot) => *slot = value,
                    None => trace!("Tile {:?} left the grid, skipping write", tween.tile),
                }
            }
            if tick == transformation.end_tick {
                if let Some(command) = transformation.on_done.take() {
                    fired.push(command);
                }
            }
        }

        self.active
            .retain(|transformation| transformation.end_tick >= tick);

        fired
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
