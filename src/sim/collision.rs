//! Point-vs-grid collision with axis-independent wall sliding.
//!
//! A blocked move is retried as a Y-only step, then as an X-only step.
//! That order is part of the contract: swapping it changes how the caster
//! rounds a corner, so movement would no longer be reproducible.

use glam::Vec2;

use crate::world::{Caster, GridMap};

/// Which branch of the slide resolver committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Full move accepted.
    Moved,
    /// Only the Y component was accepted.
    SlidY,
    /// Only the X component was accepted.
    SlidX,
    /// Nothing moved this tick.
    Blocked,
}

/// `true` if a body of half-extent `radius` centred at `p` overlaps a wall.
///
/// `radius == 0` is the plain point test; otherwise all four corners
/// `(x ± r, y ± r)` must be open.
#[inline]
pub fn is_blocked(grid: &GridMap, p: Vec2, radius: f32) -> bool {
    if radius <= 0.0 {
        return grid.is_wall(p.x, p.y);
    }
    [
        Vec2::new(p.x - radius, p.y - radius),
        Vec2::new(p.x + radius, p.y - radius),
        Vec2::new(p.x - radius, p.y + radius),
        Vec2::new(p.x + radius, p.y + radius),
    ]
    .iter()
    .any(|c| grid.is_wall(c.x, c.y))
}

/// Move `caster` towards `proposed`, sliding along walls when blocked.
pub fn try_move(caster: &mut Caster, grid: &GridMap, proposed: Vec2, radius: f32) -> MoveOutcome {
    let pos = caster.pos;

    if !is_blocked(grid, proposed, radius) {
        caster.pos = proposed;
        return MoveOutcome::Moved;
    }

    /* vertical slide first, then horizontal */
    if !is_blocked(grid, Vec2::new(pos.x, proposed.y), radius) {
        caster.pos.y = proposed.y;
        MoveOutcome::SlidY
    } else if !is_blocked(grid, Vec2::new(proposed.x, pos.y), radius) {
        caster.pos.x = proposed.x;
        MoveOutcome::SlidX
    } else {
        MoveOutcome::Blocked
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    /// Tile size 1 keeps the fixtures readable: world coords == cell coords.
    fn grid(text: &str) -> GridMap {
        GridMap::parse(text, 1.0).unwrap()
    }

    fn at(x: f32, y: f32) -> Caster {
        Caster::new(Vec2::new(x, y), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.66))
    }

    #[test]
    fn free_move_commits_both_axes() {
        let g = grid("#####\n#...#\n#...#\n#...#\n#####\n");
        let mut c = at(1.5, 1.5);
        assert_eq!(try_move(&mut c, &g, Vec2::new(2.2, 2.4), 0.0), MoveOutcome::Moved);
        assert_eq!(c.pos, Vec2::new(2.2, 2.4));
    }

    #[test]
    fn blocked_diagonal_prefers_y_slide() {
        // Wall at (2,1).  Diagonal from (1.5,1.5) into it: (1.5, y_new) is
        // open, and (x_new, 1.5) is the wall, so only Y may change.
        let g = grid("#####\n#.#.#\n#...#\n#...#\n#####\n");
        let mut c = at(1.5, 1.5);
        let out = try_move(&mut c, &g, Vec2::new(2.2, 1.8), 0.0);
        assert_eq!(out, MoveOutcome::SlidY);
        assert_eq!(c.pos, Vec2::new(1.5, 1.8));
    }

    #[test]
    fn y_slide_wins_even_when_x_slide_is_also_open() {
        // Only the diagonal target (2,2) is solid; both single-axis moves
        // are legal and the resolver must pick Y.
        let g = grid("#####\n#...#\n#.#.#\n#...#\n#####\n");
        let mut c = at(1.5, 1.5);
        let out = try_move(&mut c, &g, Vec2::new(2.5, 2.5), 0.0);
        assert_eq!(out, MoveOutcome::SlidY);
        assert_eq!(c.pos, Vec2::new(1.5, 2.5));
    }

    #[test]
    fn falls_back_to_x_slide_when_y_is_walled() {
        // Walls at (1,2) and (2,2).  Moving down-right from (1.5,1.5):
        // (1.5, 2.3) is a wall, (2.3, 1.5) is open.
        let g = grid("#####\n#...#\n###.#\n#...#\n#####\n");
        let mut c = at(1.5, 1.5);
        let out = try_move(&mut c, &g, Vec2::new(2.3, 2.3), 0.0);
        assert_eq!(out, MoveOutcome::SlidX);
        assert_eq!(c.pos, Vec2::new(2.3, 1.5));
    }

    #[test]
    fn inside_corner_blocks_everything() {
        let g = grid("####\n#..#\n####\n");
        let mut c = at(1.5, 1.5);
        let out = try_move(&mut c, &g, Vec2::new(0.9, 0.9), 0.0);
        assert_eq!(out, MoveOutcome::Blocked);
        assert_eq!(c.pos, Vec2::new(1.5, 1.5));
    }

    #[test]
    fn radius_keeps_body_off_the_wall() {
        let g = grid("#####\n#...#\n#...#\n#...#\n#####\n");
        // Point test lets us stand 0.05 from the east wall...
        assert!(!is_blocked(&g, Vec2::new(3.95, 2.0), 0.0));
        // ...a 0.1 body does not fit there.
        assert!(is_blocked(&g, Vec2::new(3.95, 2.0), 0.1));

        let mut c = at(3.5, 2.0);
        let out = try_move(&mut c, &g, Vec2::new(3.95, 2.0), 0.1);
        // a straight push resolves as a zero-length Y slide
        assert_ne!(out, MoveOutcome::Moved);
        assert_eq!(c.pos, Vec2::new(3.5, 2.0));
    }
}
