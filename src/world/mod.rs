mod caster;
mod grid;

pub use glam::{IVec2, Vec2};

pub use caster::{Caster, rotate};
pub use grid::{Cell, GridMap, MapError, OPEN, WALL};
