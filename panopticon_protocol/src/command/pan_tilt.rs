//! Pan/tilt drive commands

use crate::{
    command::{Command, ADDRESS, TERMINATOR},
    util::nibbles,
};

/// Horizontal drive direction codes.
///
/// The discriminants are the on-wire codes, so numeric-option binding
/// layers can map their integers with [FromPrimitive][num_traits::FromPrimitive].
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PanDirection {
    Left = 1,
    Right = 2,
    Stop = 3,
}

/// Vertical drive direction codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TiltDirection {
    Up = 1,
    Down = 2,
    Stop = 3,
}

/// `Pan-tiltDrive`: continuous pan/tilt motion.
///
/// ## Payload format
///
/// `81 01 06 01 VV WW 0p 0t FF`:
///
/// * `VV`: pan speed, masked to 5 bits (callers keep it within 1-24)
/// * `WW`: tilt speed, masked to 5 bits
/// * `p`: pan direction code, masked to 2 bits
/// * `t`: tilt direction code, masked to 2 bits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanTiltDrive {
    pub pan_speed: u8,
    pub tilt_speed: u8,
    pub pan: PanDirection,
    pub tilt: TiltDirection,
}

impl PanTiltDrive {
    /// Stops motion on both axes.
    ///
    /// The camera ignores the speed bytes of a stop; `0x18` goes on the
    /// wire for both.
    pub const fn stop() -> Self {
        Self {
            pan_speed: 0x18,
            tilt_speed: 0x18,
            pan: PanDirection::Stop,
            tilt: TiltDirection::Stop,
        }
    }
}

impl Command for PanTiltDrive {
    fn to_payload(&self) -> Vec<u8> {
        vec![
            ADDRESS,
            0x01,
            0x06,
            0x01,
            self.pan_speed & 0x1f,
            self.tilt_speed & 0x1f,
            (self.pan as u8) & 0x03,
            (self.tilt as u8) & 0x03,
            TERMINATOR,
        ]
    }
}

/// `Pan-tiltDrive` absolute position move.
///
/// ## Payload format
///
/// `81 01 06 02 VV WW 0Y 0Y 0Y 0Y 0Z 0Z 0Z 0Z FF` with pan (`Y`) and tilt
/// (`Z`) as signed 16-bit positions split into nibbles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanTiltAbsolute {
    pub pan: i16,
    pub tilt: i16,
    pub pan_speed: u8,
    pub tilt_speed: u8,
}

impl Command for PanTiltAbsolute {
    fn to_payload(&self) -> Vec<u8> {
        let mut payload = vec![
            ADDRESS,
            0x01,
            0x06,
            0x02,
            self.pan_speed & 0x1f,
            self.tilt_speed & 0x1f,
        ];
        payload.extend_from_slice(&nibbles(self.pan as u16));
        payload.extend_from_slice(&nibbles(self.tilt as u16));
        payload.push(TERMINATOR);
        payload
    }
}

/// `Pan-tiltDrive` home: return to the mechanical home position.
///
/// ## Payload format
///
/// `81 01 06 04 FF`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanTiltHome;

impl Command for PanTiltHome {
    fn to_payload(&self) -> Vec<u8> {
        vec![ADDRESS, 0x01, 0x06, 0x04, TERMINATOR]
    }
}
