//! Power commands

use crate::command::{Command, ADDRESS, TERMINATOR};

/// `CAM_Power`: switch the camera between on and standby.
///
/// ## Payload format
///
/// `81 01 04 00 0p FF` where `p` = 2 (on) or 3 (standby).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Power {
    pub on: bool,
}

impl Command for Power {
    fn to_payload(&self) -> Vec<u8> {
        vec![
            ADDRESS,
            0x01,
            0x04,
            0x00,
            if self.on { 0x02 } else { 0x03 },
            TERMINATOR,
        ]
    }
}
