//! Host-runtime adapter.
//!
//! Control surfaces and automation runtimes drive plugin lifecycles with
//! init/destroy/config-update callbacks. [HostLifecycle] is the seam
//! between such a host and the camera client: the host calls these at the
//! matching lifecycle points and stays ignorant of the protocol
//! underneath, while the client stays ignorant of any specific host API.

use crate::{config::CameraConfig, controller::CameraController, Error, Result};

/// Lifecycle hooks a host runtime drives.
#[allow(async_fn_in_trait)]
pub trait HostLifecycle {
    /// Brings the module up with `config`.
    async fn start(&mut self, config: CameraConfig) -> Result;

    /// Tears the module down. Never fails.
    async fn stop(&mut self);

    /// Applies a changed `config` to a running module.
    async fn reconfigure(&mut self, config: CameraConfig) -> Result;
}

/// Owns a [CameraController] on behalf of a host runtime.
pub struct CameraModule {
    config: CameraConfig,
    controller: Option<CameraController>,
}

impl CameraModule {
    pub fn new() -> Self {
        Self {
            config: CameraConfig::default(),
            controller: None,
        }
    }

    /// The managed controller, while started. Also present after a failed
    /// start, so hosts can run diagnostics against it.
    pub fn controller(&self) -> Option<&CameraController> {
        self.controller.as_ref()
    }

    async fn connect(&mut self) -> Result {
        if let Some(mut old) = self.controller.take() {
            old.disconnect();
        }

        if self.config.host.is_empty() {
            warn!("no camera IP address configured");
            return Err(Error::Configuration);
        }

        let mut controller = CameraController::new(self.config.host.clone(), self.config.port);
        let r = controller.connect().await;
        self.controller = Some(controller);
        r
    }
}

impl HostLifecycle for CameraModule {
    async fn start(&mut self, config: CameraConfig) -> Result {
        self.config = config;
        self.connect().await
    }

    async fn stop(&mut self) {
        debug!("module stopping");
        if let Some(mut controller) = self.controller.take() {
            controller.disconnect();
        }
    }

    async fn reconfigure(&mut self, config: CameraConfig) -> Result {
        let endpoint_changed = self.config.endpoint_changed(&config);
        self.config = config;
        if endpoint_changed {
            self.connect().await
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tokio::net::UdpSocket;

    /// Fake camera which answers every probe.
    async fn fake_camera() -> std::net::SocketAddr {
        let sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = sock.local_addr().unwrap();
        tokio::task::spawn(async move {
            let mut b = [0u8; 64];
            loop {
                let (_, peer) = sock.recv_from(&mut b).await.unwrap();
                sock.send_to(&[0x90, 0x50, 0xff], peer).await.unwrap();
            }
        });
        addr
    }

    #[tokio::test]
    async fn start_without_host_is_a_configuration_error() {
        let mut m = CameraModule::new();
        let e = m.start(CameraConfig::default()).await.unwrap_err();
        assert!(matches!(e, Error::Configuration));
        assert!(m.controller().is_none());
        m.stop().await;
    }

    #[tokio::test]
    async fn reconfigure_reconnects_only_on_endpoint_changes() {
        let addr = fake_camera().await;
        let config = CameraConfig {
            host: addr.ip().to_string(),
            port: addr.port(),
            ..CameraConfig::default()
        };

        let mut m = CameraModule::new();
        m.start(config.clone()).await.unwrap();
        assert!(m.controller().unwrap().is_connected());

        // A speed-only change keeps the existing connection.
        let speeds = CameraConfig {
            zoom_speed: 7,
            ..config.clone()
        };
        m.reconfigure(speeds).await.unwrap();
        assert!(m.controller().unwrap().is_connected());

        m.stop().await;
        assert!(m.controller().is_none());
    }
}
