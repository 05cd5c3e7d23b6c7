use crate::engine::dda::WallSide;
use crate::renderer::Rgba;

/// Base colour of an east/west wall face.
pub const VERTICAL_FACE: Rgba = 0x00_888888;
/// Base colour of a north/south wall face (darker: cheap directional light).
pub const HORIZONTAL_FACE: Rgba = 0x00_555555;

/// Vertical extent of one wall strip on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallSlice {
    pub line_height: i32,
    pub draw_start: i32,
    pub draw_end: i32,
}

impl WallSlice {
    /// Pixel rows covered, `draw_end - draw_start`.
    #[inline]
    pub fn height(&self) -> i32 {
        self.draw_end - self.draw_start
    }
}

/// Project a perpendicular wall distance (tile units) onto a screen of
/// `screen_height` rows.
///
/// A zero or negative distance (caster standing on the face) gives the
/// tallest possible line instead of a division fault.
pub fn project(perp_wall_dist: f32, screen_height: u32) -> WallSlice {
    let h = screen_height as i32;
    let line_height = if perp_wall_dist > 0.0 {
        // float→int `as` saturates, so a tiny distance clamps to i32::MAX
        (screen_height as f32 / perp_wall_dist).floor() as i32
    } else {
        i32::MAX
    };

    let half = h / 2;
    let draw_start = (half - line_height / 2).max(0);
    let draw_end = half.saturating_add(line_height / 2).min(h - 1);

    WallSlice {
        line_height,
        draw_start,
        draw_end,
    }
}

/// Brightness factor in `[0, 1]`: 1 at the caster, 0 at `shade_distance`
/// tiles and beyond.
#[inline]
pub fn shade_factor(perp_wall_dist: f32, shade_distance: f32) -> f32 {
    (1.0 - perp_wall_dist / shade_distance).clamp(0.0, 1.0)
}

/// Final strip colour: side base colour darkened by distance.
pub fn shade(side: WallSide, perp_wall_dist: f32, shade_distance: f32) -> Rgba {
    let base = match side {
        WallSide::Vertical => VERTICAL_FACE,
        WallSide::Horizontal => HORIZONTAL_FACE,
    };
    scale_rgb(base, shade_factor(perp_wall_dist, shade_distance))
}

/// Multiply each channel of a 0x00RRGGBB colour by `k ∈ [0, 1]`.
#[inline]
pub fn scale_rgb(c: Rgba, k: f32) -> Rgba {
    let ch = |shift: u32| (((c >> shift) & 0xFF) as f32 * k).round() as u32 & 0xFF;
    (ch(16) << 16) | (ch(8) << 8) | ch(0)
}
