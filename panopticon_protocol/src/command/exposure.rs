//! Exposure commands

use crate::command::{Command, ADDRESS, TERMINATOR};

/// `CAM_AE`: automatic exposure mode.
///
/// ## Payload format
///
/// `81 01 04 39 0p FF` where `p` is the mode code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExposureMode {
    Auto = 0x00,
    Manual = 0x03,
    ShutterPriority = 0x0a,
    IrisPriority = 0x0b,
    Bright = 0x0d,
}

impl Command for ExposureMode {
    fn to_payload(&self) -> Vec<u8> {
        vec![ADDRESS, 0x01, 0x04, 0x39, *self as u8, TERMINATOR]
    }
}
