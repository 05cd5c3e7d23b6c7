use glam::Vec2;

/// The viewpoint: position, facing direction and camera plane.
///
/// * `pos` is in world units (divide by the grid's tile size for cells).
/// * `plane` is perpendicular to `dir`; its length against `dir` sets the
///   field of view (0.66 ≈ 66°).
/// * Only [`Caster::rotate`] touches `dir`/`plane`, and it always turns
///   both by the same angle, so they stay perpendicular.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Caster {
    pub pos: Vec2,
    pub dir: Vec2,
    pub plane: Vec2,
}

impl Caster {
    pub fn new(pos: Vec2, dir: Vec2, plane: Vec2) -> Self {
        Self { pos, dir, plane }
    }

    /// Turn by `angle` radians (positive = clockwise on a y-down screen).
    pub fn rotate(&mut self, angle: f32) {
        self.dir = rotate(self.dir, angle);
        self.plane = rotate(self.plane, angle);
    }

    /// Ray direction through normalised screen coordinate `camera_x`
    /// (−1 = first column, 0 = centre).
    #[inline]
    pub fn ray_dir(&self, camera_x: f32) -> Vec2 {
        self.dir + self.plane * camera_x
    }
}

/// Standard 2-D rotation.  The new `y` is built from the *old* `x`.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    let old_x = v.x;
    Vec2::new(v.x * c - v.y * s, old_x * s + v.y * c)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    fn start() -> Caster {
        Caster::new(Vec2::new(256.0, 256.0), Vec2::new(-1.0, 0.0), Vec2::new(0.0, 0.66))
    }

    #[test]
    fn quarter_turn_maps_axes() {
        let v = rotate(Vec2::X, FRAC_PI_2);
        assert!((v - Vec2::Y).length() < 1e-6);
        let v = rotate(Vec2::Y, FRAC_PI_2);
        assert!((v + Vec2::X).length() < 1e-6);
    }

    #[test]
    fn rotation_preserves_lengths_and_angle() {
        let mut c = start();
        let dir_len = c.dir.length();
        let plane_len = c.plane.length();
        let dot = c.dir.dot(c.plane);

        for i in 0..500 {
            c.rotate(if i % 3 == 0 { -0.137 } else { 0.051 });
            assert!((c.dir.length() - dir_len).abs() < 1e-4);
            assert!((c.plane.length() - plane_len).abs() < 1e-4);
            assert!((c.dir.dot(c.plane) - dot).abs() < 1e-4);
        }
    }

    #[test]
    fn full_circle_returns_home() {
        let mut c = start();
        let steps = 120;
        for _ in 0..steps {
            c.rotate(TAU / steps as f32);
        }
        assert!((c.dir - start().dir).length() < 1e-4, "dir drifted: {:?}", c.dir);
        assert!((c.plane - start().plane).length() < 1e-4);

        // left then right by the same amounts cancels out
        for a in [0.3, 1.1, 2.9] {
            c.rotate(-a);
        }
        for a in [2.9, 1.1, 0.3] {
            c.rotate(a);
        }
        assert!((c.dir - start().dir).length() < 1e-4);
    }

    #[test]
    fn ray_dir_spans_the_plane() {
        let c = start();
        assert_eq!(c.ray_dir(0.0), c.dir);
        assert_eq!(c.ray_dir(-1.0), Vec2::new(-1.0, -0.66));
        assert_eq!(c.ray_dir(1.0), Vec2::new(-1.0, 0.66));
    }
}
