use bitflags::bitflags;

bitflags! {
    /// Movement keys held during one tick.
    ///
    /// The host owns key capture (down inserts, up removes); the sim only
    /// ever sees a `Copy` snapshot.  Conventional binding is W/S/A/D.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HeldKeys: u8 {
        const FORWARD      = 0b0001;
        const BACKWARD     = 0b0010;
        const ROTATE_LEFT  = 0b0100;
        const ROTATE_RIGHT = 0b1000;
    }
}

