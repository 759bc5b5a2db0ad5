//! White balance commands

use crate::command::{Command, ADDRESS, TERMINATOR};

/// `CAM_WB`: white balance mode.
///
/// ## Payload format
///
/// `81 01 04 35 0p FF` where `p` is the mode code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WhiteBalanceMode {
    Auto = 0x00,
    Indoor = 0x01,
    Outdoor = 0x02,
    /// Hold the last one-push measurement; trigger a new one with
    /// [WhiteBalanceOnePushTrigger].
    OnePush = 0x05,
}

impl Command for WhiteBalanceMode {
    fn to_payload(&self) -> Vec<u8> {
        vec![ADDRESS, 0x01, 0x04, 0x35, *self as u8, TERMINATOR]
    }
}

/// `CAM_WB` one-push trigger: measure white balance once while in
/// [one-push mode][WhiteBalanceMode::OnePush].
///
/// ## Payload format
///
/// `81 01 04 10 05 FF`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WhiteBalanceOnePushTrigger;

impl Command for WhiteBalanceOnePushTrigger {
    fn to_payload(&self) -> Vec<u8> {
        vec![ADDRESS, 0x01, 0x04, 0x10, 0x05, TERMINATOR]
    }
}
