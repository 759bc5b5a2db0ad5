use std::io::Error as IoError;
use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not create or bind a UDP socket: {0}")]
    Transport(#[source] IoError),

    #[error("datagram send failed: {0}")]
    Send(#[source] IoError),

    #[error("timeout waiting for a response from the camera")]
    ResponseTimeout,

    #[error("no camera endpoint configured")]
    Configuration,

    #[error("channel unavailable, likely closed")]
    ChannelUnavailable,

    #[error(transparent)]
    Protocol(#[from] panopticon_protocol::Error),
}
