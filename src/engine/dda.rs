//! Grid DDA: one ray per screen column, stepping cell boundary to cell
//! boundary until it lands in a wall.
//!
//! Distances are in *tile* units and measured perpendicular to the camera
//! plane (no fisheye).  Multiply by the tile size for world units.

use glam::{IVec2, Vec2};

use crate::world::{Caster, GridMap};

/// Which family of grid lines the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallSide {
    /// Crossed an x = const line (stepped along X); east/west face.
    Vertical = 0,
    /// Crossed a y = const line (stepped along Y); north/south face.
    Horizontal = 1,
}

/// Result of casting one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub perp_wall_dist: f32,
    pub side: WallSide,
    pub hit_cell: IVec2,
    pub ray_dir: Vec2,
}

impl RayHit {
    /// World-space point where the ray meets the wall face.
    #[inline]
    pub fn hit_point(&self, origin: Vec2, tile_size: f32) -> Vec2 {
        origin + self.ray_dir * self.perp_wall_dist * tile_size
    }
}

/// Normalised camera coordinate of column `x` out of `w`: −1 … <1.
#[inline]
pub fn camera_x(x: usize, w: usize) -> f32 {
    2.0 * x as f32 / w as f32 - 1.0
}

/// Cast the ray for screen column `x` of `w`.
pub fn cast_column(caster: &Caster, grid: &GridMap, x: usize, w: usize) -> RayHit {
    debug_assert!(w > 0 && x < w);
    cast_ray(caster.pos, caster.ray_dir(camera_x(x, w)), grid)
}

/// Cast every column `0..w` into `out` (cleared first).
pub fn cast_all(caster: &Caster, grid: &GridMap, w: usize, out: &mut Vec<RayHit>) {
    out.clear();
    out.extend((0..w).map(|x| cast_column(caster, grid, x, w)));
}

/// Walk the grid from world point `origin` along `ray_dir`.
pub fn cast_ray(origin: Vec2, ray_dir: Vec2, grid: &GridMap) -> RayHit {
    let p = origin / grid.tile_size(); // tile space
    let mut cell = p.floor().as_ivec2();

    /* length of ray from one x/y side to the next ------------------------*/
    let delta = Vec2::new(inv_abs(ray_dir.x), inv_abs(ray_dir.y));

    /* step direction and distance to the first boundary ------------------*/
    let (step_x, side_x) = axis_start(ray_dir.x, p.x, cell.x, delta.x);
    let (step_y, side_y) = axis_start(ray_dir.y, p.y, cell.y, delta.y);
    let mut side_dist = Vec2::new(side_x, side_y);

    /* DDA -----------------------------------------------------------------*/
    let mut side;
    loop {
        if side_dist.x < side_dist.y {
            side_dist.x += delta.x;
            cell.x += step_x;
            side = WallSide::Vertical;
        } else {
            side_dist.y += delta.y;
            cell.y += step_y;
            side = WallSide::Horizontal;
        }
        if grid.cell_is_wall(cell.x, cell.y) {
            break;
        }
    }

    /* distance projected on the camera direction --------------------------*/
    let perp_wall_dist = match side {
        WallSide::Vertical => (cell.x as f32 - p.x + (1 - step_x) as f32 / 2.0) / ray_dir.x,
        WallSide::Horizontal => (cell.y as f32 - p.y + (1 - step_y) as f32 / 2.0) / ray_dir.y,
    };

    RayHit {
        perp_wall_dist,
        side,
        hit_cell: cell,
        ray_dir,
    }
}

/// `|1 / d|`, +∞ for a zero component.
#[inline]
fn inv_abs(d: f32) -> f32 {
    if d == 0.0 { f32::INFINITY } else { (1.0 / d).abs() }
}

/// Step sign and initial side distance along one axis.
///
/// A ray parallel to the axis never crosses its grid lines: side distance
/// is pinned to +∞ instead of `0 · ∞ = NaN`.
#[inline]
fn axis_start(dir: f32, p: f32, cell: i32, delta: f32) -> (i32, f32) {
    if dir == 0.0 {
        (1, f32::INFINITY)
    } else if dir < 0.0 {
        (-1, (p - cell as f32) * delta)
    } else {
        (1, (cell as f32 + 1.0 - p) * delta)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
