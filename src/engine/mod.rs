//! Ray casting and frame assembly.
//!
//! * [`dda`] walks the grid for each screen column.
//! * [`projection`] turns a wall distance into a shaded vertical slice.
//! * [`frame`] stitches map, caster, rays and strips into one draw feed.

pub mod dda;
pub mod frame;
pub mod projection;

pub use dda::{RayHit, WallSide, camera_x, cast_all, cast_column, cast_ray};
pub use frame::{FrameBuilder, ViewLayout};
pub use projection::{WallSlice, project, shade, shade_factor};
