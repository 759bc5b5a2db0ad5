//! Connection diagnostics.
//!
//! Best-effort guidance for when the camera cannot be reached. Nothing
//! here is authoritative: a UDP send succeeding proves only that the OS
//! accepted the datagram, and the device-side checklist is static text.

use crate::controller::CameraController;
use panopticon_protocol::DEFAULT_PORT;
use std::time::Duration;
use tokio::{net::UdpSocket, time::timeout};

/// Guard on the reachability probe. Binding and sending normally complete
/// immediately; this bounds pathological name resolution.
const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(3);

impl CameraController {
    /// Produces an ordered list of likely causes for a connection failure.
    ///
    /// Reachability findings come first, followed by the static
    /// device-side setup checklist. Safe to call in any state; never
    /// fails.
    pub async fn diagnose_connection(&self) -> Vec<String> {
        debug!(
            "running connection diagnostics for {}:{}",
            self.host(),
            self.port()
        );
        let reachable = reachability_probe(self.host(), self.port()).await;
        build_report(self.host(), self.port(), reachable)
    }
}

/// Sends one short datagram to the endpoint on a throwaway socket.
///
/// Only the OS-level send result matters; no reply is awaited.
async fn reachability_probe(host: &str, port: u16) -> bool {
    let r = timeout(REACHABILITY_TIMEOUT, async {
        let sock = UdpSocket::bind("0.0.0.0:0").await?;
        sock.send_to(b"test", (host, port)).await?;
        Ok::<_, std::io::Error>(())
    })
    .await;

    match r {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            debug!("reachability probe failed: {e}");
            false
        }
        Err(_) => {
            debug!("reachability probe timed out");
            false
        }
    }
}

/// Assembles the report from the probe outcome and the configured
/// endpoint.
fn build_report(host: &str, port: u16, reachable: bool) -> Vec<String> {
    let mut report = Vec::new();

    if !reachable {
        report.push(format!(
            "Network unreachable: cannot send UDP packets to {host}:{port}"
        ));
    }

    if port != DEFAULT_PORT {
        report.push(format!(
            "Non-standard port: using port {port} instead of standard VISCA port {DEFAULT_PORT}"
        ));
    }

    report.push("Camera setup checklist:".to_owned());
    report.push("1. Enable VISCA over IP in the camera menu: Network → VISCA over IP → Enable".to_owned());
    report.push("2. Check the camera's IP settings: Network → IPv4 Address".to_owned());
    report.push(format!("3. Ensure the firewall allows UDP port {DEFAULT_PORT}"));
    report.push("4. The camera may need to be in REMOTE mode".to_owned());
    report.push("5. Check for VISCA address conflicts (the address should be 1)".to_owned());

    report
}
