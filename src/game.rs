use crate::engine::{FrameBuilder, ViewLayout};
use crate::renderer::DrawCall;
use crate::sim::{HeldKeys, Tuning, step};
use crate::world::{Caster, GridMap};

/// Owns the single live caster and drives one tick per frame:
/// integrate input, then rebuild the draw feed.
///
/// The caster is only ever mutated through [`Game::tick`], so there is
/// exactly one writer and no aliasing.
pub struct Game {
    grid: GridMap,
    caster: Caster,
    tuning: Tuning,
    frame: FrameBuilder,
    calls: Vec<DrawCall>,
}

impl Game {
    pub fn new(grid: GridMap, caster: Caster, tuning: Tuning, layout: ViewLayout) -> Self {
        let mut game = Self {
            grid,
            caster,
            tuning,
            frame: FrameBuilder::new(layout),
            calls: Vec::new(),
        };
        game.rebuild();
        game
    }

    /// Advance by `dt` seconds with `keys` held, then rebuild the frame.
    pub fn tick(&mut self, dt: f32, keys: HeldKeys) {
        step(&mut self.caster, &self.grid, dt, keys, &self.tuning);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.frame.build(&self.caster, &self.grid, &mut self.calls);
    }

    /// Draw calls for the current state, in paint order.
    #[inline]
    pub fn frame(&self) -> &[DrawCall] {
        &self.calls
    }

    #[inline]
    pub fn caster(&self) -> &Caster {
        &self.caster
    }

    #[inline]
    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    #[inline]
    pub fn layout(&self) -> &ViewLayout {
        self.frame.layout()
    }
}
