//! Focus commands

use crate::{
    command::{Command, ADDRESS, TERMINATOR},
    util::nibbles,
};

/// `CAM_Focus`: continuous focus drive.
///
/// ## Payload format
///
/// `81 01 04 08 pq FF` where `p` = 0 (stop), 2 (far) or 3 (near), and `q`
/// is the speed masked to 3 bits for the moving variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusDrive {
    Stop,
    /// Push focus towards infinity.
    Far { speed: u8 },
    /// Pull focus towards the camera.
    Near { speed: u8 },
}

impl Command for FocusDrive {
    fn to_payload(&self) -> Vec<u8> {
        let p = match *self {
            FocusDrive::Stop => 0x00,
            FocusDrive::Far { speed } => 0x20 | (speed & 0x07),
            FocusDrive::Near { speed } => 0x30 | (speed & 0x07),
        };
        vec![ADDRESS, 0x01, 0x04, 0x08, p, TERMINATOR]
    }
}

/// `CAM_FocusMode`: automatic or manual focus.
///
/// ## Payload format
///
/// `81 01 04 38 0p FF` where `p` = 2 (auto) or 3 (manual).
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FocusMode {
    Auto = 0x02,
    Manual = 0x03,
}

impl Command for FocusMode {
    fn to_payload(&self) -> Vec<u8> {
        vec![ADDRESS, 0x01, 0x04, 0x38, *self as u8, TERMINATOR]
    }
}

/// `CAM_Focus` one-push trigger: run a single autofocus cycle while in
/// manual mode.
///
/// ## Payload format
///
/// `81 01 04 18 01 FF`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusOnePush;

impl Command for FocusOnePush {
    fn to_payload(&self) -> Vec<u8> {
        vec![ADDRESS, 0x01, 0x04, 0x18, 0x01, TERMINATOR]
    }
}

/// `CAM_Focus` direct: absolute focus position.
///
/// ## Payload format
///
/// `81 01 04 48 0p 0q 0r 0s FF` with the position split into nibbles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusDirect {
    pub position: u16,
}

impl Command for FocusDirect {
    fn to_payload(&self) -> Vec<u8> {
        let mut payload = vec![ADDRESS, 0x01, 0x04, 0x48];
        payload.extend_from_slice(&nibbles(self.position));
        payload.push(TERMINATOR);
        payload
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Result;

    #[test]
    fn drive_codes() -> Result<()> {
        assert_eq!(
            hex::decode("8101040833ff")?,
            FocusDrive::Near { speed: 3 }.to_payload()
        );
        assert_eq!(
            hex::decode("8101040823ff")?,
            FocusDrive::Far { speed: 3 }.to_payload()
        );
        assert_eq!(hex::decode("8101043802ff")?, FocusMode::Auto.to_payload());
        Ok(())
    }
}
