#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

mod config;
mod controller;
mod diagnostics;
mod error;
mod module;
mod udp;

pub use {
    crate::{
        config::CameraConfig,
        controller::{CameraController, ConnectionState, ControllerEvent},
        error::Error,
        module::{CameraModule, HostLifecycle},
        udp::ViscaUdpChannel,
    },
    panopticon_protocol as protocol,
};
pub type Result<T = ()> = std::result::Result<T, Error>;
