mod clock;
mod collision;
mod input;
mod integrator;

pub use clock::{FrameClock, MAX_DT};
pub use collision::{MoveOutcome, is_blocked, try_move};
pub use input::HeldKeys;
pub use integrator::{Tuning, step};
