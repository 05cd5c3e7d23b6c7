//! ---------------------------------------------------------------------------
//! Software (CPU) rasteriser
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Calls arrive in paint order (map, caster, rays, strips), so later
//!   calls simply overwrite earlier ones; only lines blend.
//! * Everything is clipped to the buffer; off-screen calls are no-ops.
//! ---------------------------------------------------------------------------

use crate::renderer::{DiscFill, LineSeg, RectFill, Renderer, Rgba, WallStrip};

/// Background for pixels no call touches.
const CLEAR: Rgba = 0x00_202020;

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(CLEAR);
    }

    fn draw_rect(&mut self, r: &RectFill) {
        self.fill(r.x, r.y, r.w, r.h, r.colour);
    }

    fn draw_disc(&mut self, d: &DiscFill) {
        let r2 = d.radius * d.radius;
        let y0 = (d.centre.y - d.radius).floor() as i32;
        let y1 = (d.centre.y + d.radius).ceil() as i32;
        for y in y0..y1 {
            // sample at pixel centres
            let dy = y as f32 + 0.5 - d.centre.y;
            let span = r2 - dy * dy;
            if span < 0.0 {
                continue;
            }
            let half = span.sqrt();
            let x0 = (d.centre.x - half).round() as i32;
            let x1 = (d.centre.x + half).round() as i32;
            self.fill(x0, y, x1 - x0, 1, d.colour);
        }
    }

    fn draw_line(&mut self, l: &LineSeg) {
        let (x0, y0) = (l.from.x.round() as i32, l.from.y.round() as i32);
        let (x1, y1) = (l.to.x.round() as i32, l.to.y.round() as i32);
        let (colour, alpha) = (l.colour, l.alpha);
        let pen = l.width.max(1) as i32;
        if pen == 1 {
            bresenham(x0, y0, x1, y1, |x, y| self.blend(x, y, colour, alpha));
            return;
        }
        // square pen; overlapping stamps blend again, so wide lines are
        // expected to be opaque
        let lo = -(pen - 1) / 2;
        bresenham(x0, y0, x1, y1, |x, y| {
            for py in lo..lo + pen {
                for px in lo..lo + pen {
                    self.blend(x + px, y + py, colour, alpha);
                }
            }
        });
    }

    fn draw_strip(&mut self, s: &WallStrip) {
        self.fill(s.screen_x, s.y_start, s.width, s.height, s.colour);
    }

    fn end_frame<F, R>(&mut self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        submit(&self.scratch, self.width, self.height)
    }
}

/*──────────────────────── pixel helpers ──────────────────────────────*/
impl Software {
    /// Clipped solid fill of `w × h` pixels at `(x, y)`.
    fn fill(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Rgba) {
        let x0 = x.clamp(0, self.width as i32) as usize;
        let x1 = x.saturating_add(w).clamp(0, self.width as i32) as usize;
        let y0 = y.clamp(0, self.height as i32) as usize;
        let y1 = y.saturating_add(h).clamp(0, self.height as i32) as usize;
        if x0 >= x1 {
            return;
        }
        for row in y0..y1 {
            let base = row * self.width;
            self.scratch[base + x0..base + x1].fill(colour);
        }
    }

    /// Alpha-blend one pixel (`alpha` 0‥255) if it is on screen.
    fn blend(&mut self, x: i32, y: i32, colour: Rgba, alpha: u8) {
        if !(0..self.width as i32).contains(&x) || !(0..self.height as i32).contains(&y) {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.scratch[idx] = mix(self.scratch[idx], colour, alpha as u32);
    }
}

/// Per-channel `dst + (src − dst) · a / 255`.
#[inline]
fn mix(dst: Rgba, src: Rgba, a: u32) -> Rgba {
    let inv = 255 - a;
    let ch = |shift: u32| {
        let d = (dst >> shift) & 0xFF;
        let s = (src >> shift) & 0xFF;
        ((s * a + d * inv + 127) / 255) << shift
    };
    ch(16) | ch(8) | ch(0)
}

/// Integer Bresenham line walk, calling `plot` for every pixel including
/// both end points.
fn bresenham(mut x0: i32, mut y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32)) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(x0, y0);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
