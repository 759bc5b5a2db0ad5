//! # VISCA commands and inquiries
//!
//! Command payloads are short fixed-shape byte sequences starting with the
//! camera address byte `0x81` and ending with the terminator `0xFF`.
//! Numeric parameters are masked into narrow bit fields before insertion;
//! out-of-range input is silently truncated, never rejected. Range
//! validation (speeds 1-24 / 1-7, presets 1-100) is the caller's job.
//!
//! Commands are grouped into modules by their functional area, and
//! re-exported here.

mod exposure;
mod focus;
mod inquiry;
mod pan_tilt;
mod power;
mod preset;
mod recording;
mod white_balance;
mod zoom;

pub use self::{
    exposure::ExposureMode,
    focus::{FocusDirect, FocusDrive, FocusMode, FocusOnePush},
    inquiry::VersionInquiry,
    pan_tilt::{PanDirection, PanTiltAbsolute, PanTiltDrive, PanTiltHome, TiltDirection},
    power::Power,
    preset::{Preset, PresetAction},
    recording::Record,
    white_balance::{WhiteBalanceMode, WhiteBalanceOnePushTrigger},
    zoom::{ZoomDirect, ZoomDrive},
};

/// Camera address byte opening every payload. VISCA-over-IP always
/// addresses device 1.
pub const ADDRESS: u8 = 0x81;

/// Terminator byte closing every payload.
pub const TERMINATOR: u8 = 0xff;

/// A VISCA command payload.
///
/// Commands are fire-and-forget: the camera's ACK/completion replies are
/// never decoded by this client.
pub trait Command {
    /// Encodes the command as device-native bytes, `0x81 .. 0xFF`.
    fn to_payload(&self) -> Vec<u8>;
}

/// A VISCA inquiry payload.
///
/// Inquiries request device status. This client only uses them as liveness
/// probes, and never decodes the response.
pub trait Inquiry {
    /// Encodes the inquiry as device-native bytes, `0x81 .. 0xFF`.
    fn to_payload(&self) -> Vec<u8>;
}
