//! Rendering abstraction layer.
//!
//! *The rest of the crate never touches a pixel buffer directly.*
//! The frame builder produces a list of [`DrawCall`]s in paint order and
//! hands them to a type that implements [`Renderer`].
//!
//! * Any surface that can fill shapes and stroke lines can be a
//!   back-end; [`software::Software`] is the CPU one used by the viewer.
//! * A blanket impl [`RendererExt`] adds `draw_frame` so call-sites stay
//!   short.
//!
//! All coordinates are screen pixels, origin top-left, y down.

use glam::Vec2;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Axis-aligned filled rectangle (map cells, backdrop, caster body).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectFill {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub colour: Rgba,
}

/// Line blended over what is already there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSeg {
    pub from: Vec2,
    pub to: Vec2,
    pub colour: Rgba,
    pub alpha: u8, // 255 = opaque
    pub width: u8, // pixels, square pen
}

/// Filled circle (caster marker).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscFill {
    pub centre: Vec2,
    pub radius: f32,
    pub colour: Rgba,
}

/// One column strip of the 3-D view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallStrip {
    pub screen_x: i32,
    pub y_start: i32,
    pub width: i32,
    pub height: i32,
    pub colour: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCall {
    Rect(RectFill),
    Disc(DiscFill),
    Line(LineSeg),
    Strip(WallStrip),
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    fn draw_rect(&mut self, rect: &RectFill);

    fn draw_disc(&mut self, disc: &DiscFill);

    fn draw_line(&mut self, line: &LineSeg);

    fn draw_strip(&mut self, strip: &WallStrip);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software callers pass `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F, R>(&mut self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R;
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F, R>(&mut self, width: usize, height: usize, calls: &[DrawCall], submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        self.begin_frame(width, height);
        for c in calls {
            match c {
                DrawCall::Rect(r) => self.draw_rect(r),
                DrawCall::Disc(d) => self.draw_disc(d),
                DrawCall::Line(l) => self.draw_line(l),
                DrawCall::Strip(s) => self.draw_strip(s),
            }
        }
        self.end_frame(submit)
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;
