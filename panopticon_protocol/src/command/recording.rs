//! On-camera recording commands

use crate::command::{Command, ADDRESS, TERMINATOR};

/// Start or stop recording to the camera's own storage.
///
/// This lives in the vendor extension category (`0x7E`), not core VISCA;
/// cameras without on-board recording ignore it.
///
/// ## Payload format
///
/// `81 01 7E 04 1D 0p FF` where `p` = 2 (start) or 3 (stop).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    pub start: bool,
}

impl Command for Record {
    fn to_payload(&self) -> Vec<u8> {
        vec![
            ADDRESS,
            0x01,
            0x7e,
            0x04,
            0x1d,
            if self.start { 0x02 } else { 0x03 },
            TERMINATOR,
        ]
    }
}
