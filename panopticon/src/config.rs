//! Client configuration.

use panopticon_protocol::DEFAULT_PORT;

/// Configuration for one camera, as presented by a host runtime.
///
/// The controller takes explicit parameters everywhere; the default
/// speeds here exist for binding layers which let users omit a speed per
/// action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraConfig {
    /// Camera IP address or host name.
    pub host: String,
    /// VISCA-over-IP UDP port.
    pub port: u16,
    /// Default pan/tilt speed (1-24).
    pub pan_tilt_speed: u8,
    /// Default zoom speed (1-7).
    pub zoom_speed: u8,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            pan_tilt_speed: 12,
            zoom_speed: 4,
        }
    }
}

impl CameraConfig {
    /// `true` when `other` points at a different camera endpoint.
    ///
    /// Speed defaults are not part of the endpoint; changing them never
    /// warrants a reconnect.
    pub fn endpoint_changed(&self, other: &Self) -> bool {
        self.host != other.host || self.port != other.port
    }
}
