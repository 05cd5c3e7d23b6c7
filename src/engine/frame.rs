//! Per-frame draw feed: top-down map, caster marker, debug rays and the
//! 3-D strip view.
//!
//! Screen layout (pixels, y down):
//!
//! ```text
//! 0                 view_left                          screen_width
//! +------------------+-----------------------------------+
//! |  top-down map    |  3-D view: ray_count strips,      |
//! |  1 px = 1 world  |  column 0 at the RIGHT edge       |
//! |  unit            |                                   |
//! +------------------+-----------------------------------+
//! ```
//!
//! Columns are laid out right-to-left: ray `x` is painted at
//! `view_left + (w − 1 − x) · strip_width`.  With the map drawn y-down and
//! the camera plane pointing to the caster's right, this keeps the 3-D view
//! un-mirrored relative to the map.

use super::dda::{RayHit, WallSide, cast_all};
use super::projection::{project, shade};
use crate::renderer::{DiscFill, DrawCall, LineSeg, RectFill, Rgba, WallStrip};
use crate::world::{Caster, GridMap, OPEN};

const MAP_WALL: Rgba = 0x00_888888;
const MAP_FLOOR: Rgba = 0x00_555555;
const CASTER_COLOUR: Rgba = 0x00_E4B57B;
const CEILING: Rgba = 0x00_383838;
const FLOOR: Rgba = 0x00_202020;
/// Debug-ray colour and alpha, by the side the ray hit.
const RAY_VERTICAL: (Rgba, u8) = (0x00_500000, 0x96);
const RAY_HORIZONTAL: (Rgba, u8) = (0x00_920000, 0x7D);

const CASTER_RADIUS: f32 = 8.0;
/// Length of the heading line, in map pixels.
const HEADING_LEN: f32 = 15.0;
const HEADING_WIDTH: u8 = 4;

/// Fixed screen geometry of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewLayout {
    pub screen_width: u32,
    pub screen_height: u32,
    /// First pixel column of the 3-D view (= map width in pixels).
    pub view_left: u32,
    /// Number of rays / strips across the 3-D view.
    pub ray_count: usize,
    pub debug_rays: bool,
    /// Distance (tiles) at which walls fade to black.
    pub shade_distance: f32,
}

impl ViewLayout {
    #[inline]
    pub fn view_width(&self) -> u32 {
        self.screen_width.saturating_sub(self.view_left)
    }

    /// Left pixel and width of the strip for ray `x` (right-to-left).
    ///
    /// Integer partition of the view: strips tile it exactly even when
    /// `view_width` is not a multiple of `ray_count`.
    pub fn strip_span(&self, x: usize) -> (i32, i32) {
        let w = self.ray_count as i64;
        let vw = self.view_width() as i64;
        let slot = w - 1 - x as i64;
        let left = slot * vw / w;
        let right = (slot + 1) * vw / w;
        (self.view_left as i32 + left as i32, (right - left) as i32)
    }
}

/// Reusable frame assembler; keeps its ray buffer between frames.
pub struct FrameBuilder {
    layout: ViewLayout,
    hits: Vec<RayHit>,
}

impl FrameBuilder {
    pub fn new(layout: ViewLayout) -> Self {
        Self {
            layout,
            hits: Vec::with_capacity(layout.ray_count),
        }
    }

    #[inline]
    pub fn layout(&self) -> &ViewLayout {
        &self.layout
    }

    /// Ray results of the last built frame, indexed by column.
    #[inline]
    pub fn hits(&self) -> &[RayHit] {
        &self.hits
    }

    /// Rebuild `out` (cleared first) for the current caster state.
    pub fn build(&mut self, caster: &Caster, grid: &GridMap, out: &mut Vec<DrawCall>) {
        out.clear();
        self.emit_map(grid, out);
        self.emit_caster(caster, out);

        cast_all(caster, grid, self.layout.ray_count, &mut self.hits);
        self.emit_backdrop(out);
        for (x, hit) in self.hits.iter().enumerate() {
            if self.layout.debug_rays {
                let (colour, alpha) = match hit.side {
                    WallSide::Vertical => RAY_VERTICAL,
                    WallSide::Horizontal => RAY_HORIZONTAL,
                };
                out.push(DrawCall::Line(LineSeg {
                    from: caster.pos,
                    to: hit.hit_point(caster.pos, grid.tile_size()),
                    colour,
                    alpha,
                    width: 1,
                }));
            }
            out.push(DrawCall::Strip(self.strip(x, hit)));
        }
    }

    fn strip(&self, x: usize, hit: &RayHit) -> WallStrip {
        let slice = project(hit.perp_wall_dist, self.layout.screen_height);
        let (screen_x, width) = self.layout.strip_span(x);
        WallStrip {
            screen_x,
            y_start: slice.draw_start,
            width,
            height: slice.height(),
            colour: shade(hit.side, hit.perp_wall_dist, self.layout.shade_distance),
        }
    }

    /* one rect per cell, 1 px gap so the grid reads */
    fn emit_map(&self, grid: &GridMap, out: &mut Vec<DrawCall>) {
        let tile = grid.tile_size();
        let size = (tile - 1.0).max(1.0) as i32;
        out.extend(grid.cells().map(|(cx, cy, v)| {
            DrawCall::Rect(RectFill {
                x: (cx as f32 * tile) as i32,
                y: (cy as f32 * tile) as i32,
                w: size,
                h: size,
                colour: if v == OPEN { MAP_FLOOR } else { MAP_WALL },
            })
        }));
    }

    fn emit_caster(&self, caster: &Caster, out: &mut Vec<DrawCall>) {
        out.push(DrawCall::Disc(DiscFill {
            centre: caster.pos,
            radius: CASTER_RADIUS,
            colour: CASTER_COLOUR,
        }));
        out.push(DrawCall::Line(LineSeg {
            from: caster.pos,
            to: caster.pos + caster.dir * HEADING_LEN,
            colour: CASTER_COLOUR,
            alpha: u8::MAX,
            width: HEADING_WIDTH,
        }));
    }

    /* ceiling above the horizon, floor below */
    fn emit_backdrop(&self, out: &mut Vec<DrawCall>) {
        let l = &self.layout;
        let half = (l.screen_height / 2) as i32;
        let (x, w) = (l.view_left as i32, l.view_width() as i32);
        out.push(DrawCall::Rect(RectFill {
            x,
            y: 0,
            w,
            h: half,
            colour: CEILING,
        }));
        out.push(DrawCall::Rect(RectFill {
            x,
            y: half,
            w,
            h: l.screen_height as i32 - half,
            colour: FLOOR,
        }));
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
