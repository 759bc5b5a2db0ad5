//! Stored position presets

use crate::command::{Command, ADDRESS, TERMINATOR};

/// `CAM_Memory` action codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresetAction {
    /// Clear the stored position.
    Reset = 0x00,
    /// Store the current position.
    Set = 0x01,
    /// Move to the stored position.
    Recall = 0x02,
}

/// `CAM_Memory`: store, recall or clear a position preset.
///
/// Preset numbers are 1-based at this interface (1-100, caller-enforced)
/// and 0-based on the wire.
///
/// ## Payload format
///
/// `81 01 04 3F 0a pp FF` where `a` is the action code and `pp` the
/// 0-based preset index masked to 7 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preset {
    pub action: PresetAction,
    pub number: u8,
}

impl Command for Preset {
    fn to_payload(&self) -> Vec<u8> {
        vec![
            ADDRESS,
            0x01,
            0x04,
            0x3f,
            self.action as u8,
            self.number.wrapping_sub(1) & 0x7f,
            TERMINATOR,
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Result;

    #[test]
    fn recall_is_zero_based_on_the_wire() -> Result<()> {
        let cmd = Preset {
            action: PresetAction::Recall,
            number: 1,
        };
        assert_eq!(hex::decode("8101043f0200ff")?, cmd.to_payload());

        let cmd = Preset {
            action: PresetAction::Recall,
            number: 100,
        };
        assert_eq!(hex::decode("8101043f0263ff")?, cmd.to_payload());
        Ok(())
    }

    #[test]
    fn set_and_reset_codes() {
        let set = Preset {
            action: PresetAction::Set,
            number: 7,
        };
        assert_eq!(0x01, set.to_payload()[4]);
        let reset = Preset {
            action: PresetAction::Reset,
            number: 7,
        };
        assert_eq!(0x00, reset.to_payload()[4]);
    }

    #[test]
    fn index_is_masked_not_rejected() {
        let cmd = Preset {
            action: PresetAction::Recall,
            number: 200,
        };
        assert_eq!(199 & 0x7f, cmd.to_payload()[5]);
    }
}
