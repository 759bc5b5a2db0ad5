#![doc = include_str!("../README.md")]

#[macro_use]
extern crate num_derive;

#[macro_use]
extern crate tracing;

pub mod command;
mod error;
mod packet;
mod util;

pub use crate::{
    error::Error,
    packet::{PayloadType, SequenceCounter, ViscaPacket},
};

/// Result type.
pub type Result<T = ()> = std::result::Result<T, Error>;

/// The well-known VISCA-over-IP UDP port.
pub const DEFAULT_PORT: u16 = 52381;
