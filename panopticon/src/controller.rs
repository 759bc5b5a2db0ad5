use crate::{udp::ViscaUdpChannel, Result};
use futures::{pin_mut, StreamExt};
use panopticon_protocol::{
    command::{
        Command, ExposureMode, FocusDirect, FocusDrive, FocusMode, FocusOnePush, Inquiry,
        PanDirection, PanTiltAbsolute, PanTiltDrive, PanTiltHome, Power, Preset, PresetAction,
        Record, TiltDirection, VersionInquiry, WhiteBalanceMode, WhiteBalanceOnePushTrigger,
        ZoomDirect, ZoomDrive,
    },
    SequenceCounter, ViscaPacket,
};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
    time::interval,
};
use tokio_stream::wrappers::IntervalStream;

/// Connection state of a [CameraController].
///
/// Transitions are driven only by [connect][CameraController::connect] /
/// [disconnect][CameraController::disconnect] calls and by health-check
/// outcomes. Sending a command never changes state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// A connect attempt or health check failed. Reconnection is the
    /// caller's responsibility; nothing retries automatically.
    Failed,
}

/// Out-of-band notifications for [CameraController::events] subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The liveness probe succeeded and the controller is connected.
    Connected,
    /// A health check failed while connected: the camera stopped
    /// responding.
    LinkLost,
}

/// [CameraController] drives a single VISCA-over-IP camera.
///
/// ## General design
///
/// The endpoint is fixed at construction; to control a different camera,
/// build a new controller. One UDP socket is open at most, owned by the
/// controller's [ViscaUdpChannel], and one background task runs at most:
/// the health monitor spawned on a successful connect.
///
/// Commands are fire-and-forget. Each command call takes one sequence
/// number and performs exactly one datagram send; no reply is awaited and
/// replies are never matched to the command that caused them. The camera's
/// ACK/completion stream is not decoded anywhere in this crate.
pub struct CameraController {
    host: String,
    port: u16,
    channel: Arc<ViscaUdpChannel>,
    sequence: Arc<SequenceCounter>,
    state: Arc<watch::Sender<ConnectionState>>,
    events: broadcast::Sender<ControllerEvent>,
    monitor: Option<JoinHandle<()>>,
}

impl CameraController {
    /// Timeout for the liveness probe used by [connect][Self::connect],
    /// [health_check][Self::health_check] and the background monitor.
    const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
    /// Period of the background health monitor.
    const HEALTH_CHECK_PERIOD: Duration = Duration::from_secs(30);
    /// Depth of the event broadcast buffer.
    const EVENT_CHANNEL_SIZE: usize = 16;

    /// Creates a controller for the camera at `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        let (events, _) = broadcast::channel(Self::EVENT_CHANNEL_SIZE);
        Self {
            host: host.into(),
            port,
            channel: Arc::new(ViscaUdpChannel::new()),
            sequence: Arc::new(SequenceCounter::new()),
            state: Arc::new(state),
            events,
            monitor: None,
        }
    }

    /// Configured camera host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Configured camera port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Connects to the camera: binds a socket, sends a version inquiry,
    /// and waits up to [PROBE_TIMEOUT][Self::PROBE_TIMEOUT] for any reply
    /// datagram.
    ///
    /// On success the state becomes [ConnectionState::Connected] and the
    /// background health monitor starts. On failure the state becomes
    /// [ConnectionState::Failed], the socket is closed, a diagnostic
    /// report is logged, and the error is returned.
    ///
    /// Calling this on an already-connected controller disconnects first,
    /// so there is never more than one open socket or monitor task.
    pub async fn connect(&mut self) -> Result {
        self.disconnect();
        info!("connecting to camera at {}:{}", self.host, self.port);
        self.state.send_replace(ConnectionState::Connecting);

        match self.try_connect().await {
            Ok(()) => {
                self.state.send_replace(ConnectionState::Connected);
                info!("connected to camera at {}:{}", self.host, self.port);
                let _ = self.events.send(ControllerEvent::Connected);
                self.start_monitor();
                Ok(())
            }
            Err(e) => {
                self.state.send_replace(ConnectionState::Failed);
                self.channel.close();
                error!("connection to {}:{} failed: {e}", self.host, self.port);
                for line in self.diagnose_connection().await {
                    info!("  {line}");
                }
                Err(e)
            }
        }
    }

    async fn try_connect(&self) -> Result {
        self.channel.open((self.host.as_str(), self.port)).await?;
        probe(&self.channel, &self.sequence, Self::PROBE_TIMEOUT).await
    }

    /// Disconnects: stops the health monitor, closes the socket, and
    /// resets the state to [ConnectionState::Disconnected].
    ///
    /// Best-effort; never fails, and safe to call repeatedly. A probe
    /// outstanding on the monitor is cancelled along with its task.
    pub fn disconnect(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.abort();
        }
        self.channel.close();
        self.state.send_replace(ConnectionState::Disconnected);
    }

    /// `true` iff the controller currently believes the camera is
    /// reachable.
    pub fn is_connected(&self) -> bool {
        *self.state.borrow() == ConnectionState::Connected
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Subscribes to connection state changes.
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Subscribes to controller notifications.
    pub fn events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    /// One-shot liveness probe.
    ///
    /// Returns `true` when the camera answered within
    /// [PROBE_TIMEOUT][Self::PROBE_TIMEOUT]. This is not a pure query: on
    /// failure the state transitions to [ConnectionState::Failed] as a
    /// side effect.
    ///
    /// Must not run concurrently with the background monitor's probe or
    /// with [connect][Self::connect] on the same controller: the channel
    /// supports one outstanding receive (see [ViscaUdpChannel]).
    pub async fn health_check(&self) -> bool {
        match probe(&self.channel, &self.sequence, Self::PROBE_TIMEOUT).await {
            Ok(()) => true,
            Err(e) => {
                debug!("health check failed: {e}");
                self.state.send_replace(ConnectionState::Failed);
                false
            }
        }
    }

    /// Starts the periodic health monitor, cancelling any previous one.
    ///
    /// The monitor re-runs the liveness probe every
    /// [HEALTH_CHECK_PERIOD][Self::HEALTH_CHECK_PERIOD]. On the first
    /// failure it marks the state [ConnectionState::Failed], broadcasts
    /// [ControllerEvent::LinkLost], and exits; it is not restarted
    /// automatically.
    fn start_monitor(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.abort();
        }

        let channel = self.channel.clone();
        let sequence = self.sequence.clone();
        let state = self.state.clone();
        let events = self.events.clone();
        let endpoint = format!("{}:{}", self.host, self.port);

        self.monitor = Some(tokio::task::spawn(async move {
            let ticks = IntervalStream::new(interval(Self::HEALTH_CHECK_PERIOD));
            pin_mut!(ticks);
            // interval's first tick fires immediately; the first probe
            // belongs one full period after connect.
            ticks.next().await;

            while ticks.next().await.is_some() {
                match probe(&channel, &sequence, Self::PROBE_TIMEOUT).await {
                    Ok(()) => trace!("health check ok"),
                    Err(e) => {
                        warn!("lost connection to camera at {endpoint}: {e}");
                        state.send_replace(ConnectionState::Failed);
                        let _ = events.send(ControllerEvent::LinkLost);
                        return;
                    }
                }
            }
        }));
    }

    /// Encodes `cmd`, stamps the next sequence number, and sends it as one
    /// datagram.
    ///
    /// Issuing commands while disconnected is the caller's to guard; the
    /// controller does not check its own state here, and a send on a
    /// closed socket surfaces as
    /// [ChannelUnavailable][crate::Error::ChannelUnavailable].
    async fn send_command<C: Command>(&self, cmd: C) -> Result {
        let pkt = ViscaPacket::command(self.sequence.next(), cmd.to_payload());
        self.channel.send(&pkt).await
    }

    /// Powers the camera on.
    pub async fn power_on(&self) -> Result {
        self.send_command(Power { on: true }).await
    }

    /// Puts the camera into standby.
    pub async fn power_off(&self) -> Result {
        self.send_command(Power { on: false }).await
    }

    /// Starts a continuous pan/tilt drive. Speeds are 1-24; out-of-range
    /// values are truncated on the wire, not rejected.
    pub async fn pan_tilt_move(
        &self,
        pan_speed: u8,
        tilt_speed: u8,
        pan: PanDirection,
        tilt: TiltDirection,
    ) -> Result {
        self.send_command(PanTiltDrive {
            pan_speed,
            tilt_speed,
            pan,
            tilt,
        })
        .await
    }

    /// Stops pan/tilt motion.
    pub async fn pan_tilt_stop(&self) -> Result {
        self.send_command(PanTiltDrive::stop()).await
    }

    /// Moves to an absolute pan/tilt position.
    pub async fn pan_tilt_absolute(
        &self,
        pan: i16,
        tilt: i16,
        pan_speed: u8,
        tilt_speed: u8,
    ) -> Result {
        self.send_command(PanTiltAbsolute {
            pan,
            tilt,
            pan_speed,
            tilt_speed,
        })
        .await
    }

    /// Returns to the mechanical home position.
    pub async fn pan_tilt_home(&self) -> Result {
        self.send_command(PanTiltHome).await
    }

    /// Stops zoom motion.
    pub async fn zoom_stop(&self) -> Result {
        self.send_command(ZoomDrive::Stop).await
    }

    /// Zooms in. Speed is 1-7.
    pub async fn zoom_tele(&self, speed: u8) -> Result {
        self.send_command(ZoomDrive::Tele { speed }).await
    }

    /// Zooms out. Speed is 1-7.
    pub async fn zoom_wide(&self, speed: u8) -> Result {
        self.send_command(ZoomDrive::Wide { speed }).await
    }

    /// Moves to an absolute zoom position.
    pub async fn zoom_direct(&self, position: u16) -> Result {
        self.send_command(ZoomDirect { position }).await
    }

    /// Stops focus motion.
    pub async fn focus_stop(&self) -> Result {
        self.send_command(FocusDrive::Stop).await
    }

    /// Pulls focus towards the camera. Speed is 1-7.
    pub async fn focus_near(&self, speed: u8) -> Result {
        self.send_command(FocusDrive::Near { speed }).await
    }

    /// Pushes focus towards infinity. Speed is 1-7.
    pub async fn focus_far(&self, speed: u8) -> Result {
        self.send_command(FocusDrive::Far { speed }).await
    }

    /// Switches to automatic focus.
    pub async fn focus_auto(&self) -> Result {
        self.send_command(FocusMode::Auto).await
    }

    /// Switches to manual focus.
    pub async fn focus_manual(&self) -> Result {
        self.send_command(FocusMode::Manual).await
    }

    /// Triggers a single autofocus cycle while in manual mode.
    pub async fn focus_one_push(&self) -> Result {
        self.send_command(FocusOnePush).await
    }

    /// Moves to an absolute focus position.
    pub async fn focus_direct(&self, position: u16) -> Result {
        self.send_command(FocusDirect { position }).await
    }

    /// Saves the current position as preset `number` (1-100).
    pub async fn preset_save(&self, number: u8) -> Result {
        self.send_command(Preset {
            action: PresetAction::Set,
            number,
        })
        .await
    }

    /// Recalls preset `number` (1-100).
    pub async fn preset_recall(&self, number: u8) -> Result {
        self.send_command(Preset {
            action: PresetAction::Recall,
            number,
        })
        .await
    }

    /// Clears preset `number` (1-100).
    pub async fn preset_reset(&self, number: u8) -> Result {
        self.send_command(Preset {
            action: PresetAction::Reset,
            number,
        })
        .await
    }

    /// Sets the white balance mode.
    pub async fn white_balance(&self, mode: WhiteBalanceMode) -> Result {
        self.send_command(mode).await
    }

    /// Triggers a one-push white balance measurement.
    pub async fn white_balance_one_push_trigger(&self) -> Result {
        self.send_command(WhiteBalanceOnePushTrigger).await
    }

    /// Sets the automatic exposure mode.
    pub async fn exposure(&self, mode: ExposureMode) -> Result {
        self.send_command(mode).await
    }

    /// Starts on-camera recording.
    pub async fn record_start(&self) -> Result {
        self.send_command(Record { start: true }).await
    }

    /// Stops on-camera recording.
    pub async fn record_stop(&self) -> Result {
        self.send_command(Record { start: false }).await
    }
}

impl Drop for CameraController {
    fn drop(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.abort();
        }
    }
}

/// Sends a version inquiry and waits for any reply datagram.
///
/// Success means only that something answered before `deadline`; the reply
/// is not decoded.
async fn probe(
    channel: &ViscaUdpChannel,
    sequence: &SequenceCounter,
    deadline: Duration,
) -> Result {
    let pkt = ViscaPacket::inquiry(sequence.next(), VersionInquiry.to_payload());
    channel.send(&pkt).await?;
    channel.recv_one(deadline).await.map(|_| ())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;
    use tokio::net::UdpSocket;

    /// Binds a fake camera on loopback which answers `replies` probes with
    /// an arbitrary datagram, then goes silent.
    async fn fake_camera(replies: usize) -> (std::net::SocketAddr, JoinHandle<()>) {
        let sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = sock.local_addr().unwrap();
        let task = tokio::task::spawn(async move {
            let mut b = [0u8; 64];
            for _ in 0..replies {
                let (_, peer) = sock.recv_from(&mut b).await.unwrap();
                // An ACK-ish body; the client never decodes it.
                sock.send_to(&[0x90, 0x50, 0xff], peer).await.unwrap();
            }
        });
        (addr, task)
    }

    #[tokio::test]
    async fn connect_success() {
        let (addr, _camera) = fake_camera(1).await;
        let mut c = CameraController::new(addr.ip().to_string(), addr.port());
        c.connect().await.unwrap();
        assert!(c.is_connected());
        assert_eq!(ConnectionState::Connected, c.state());
        assert!(c.monitor.is_some());

        c.disconnect();
        assert!(!c.is_connected());
        assert_eq!(ConnectionState::Disconnected, c.state());
    }

    #[tokio::test]
    async fn connect_probe_is_a_version_inquiry() {
        let sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = sock.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();
        tokio::task::spawn(async move {
            let mut b = [0u8; 64];
            let (l, peer) = sock.recv_from(&mut b).await.unwrap();
            sock.send_to(&[0x90, 0x50, 0xff], peer).await.unwrap();
            let _ = tx.send(b[..l].to_vec());
        });

        let mut c = CameraController::new(addr.ip().to_string(), addr.port());
        c.connect().await.unwrap();

        // Inquiry payload type, 5 byte payload, sequence 1.
        assert_eq!(
            hex::decode("011000050000000181090002ff").unwrap(),
            rx.await.unwrap()
        );
        c.disconnect();
    }

    #[tokio::test]
    async fn commands_are_sequenced_fire_and_forget() {
        let sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = sock.local_addr().unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::channel(4);
        tokio::task::spawn(async move {
            let mut b = [0u8; 64];
            let (_, peer) = sock.recv_from(&mut b).await.unwrap();
            sock.send_to(&[0x90, 0x50, 0xff], peer).await.unwrap();
            loop {
                let (l, _) = sock.recv_from(&mut b).await.unwrap();
                if tx.send(b[..l].to_vec()).await.is_err() {
                    return;
                }
            }
        });

        let mut c = CameraController::new(addr.ip().to_string(), addr.port());
        c.connect().await.unwrap();

        // The probe took sequence 1; commands continue from there and
        // return without waiting for any reply.
        c.power_on().await.unwrap();
        c.pan_tilt_stop().await.unwrap();
        assert_eq!(
            hex::decode("01000006000000028101040002ff").unwrap(),
            rx.recv().await.unwrap()
        );
        assert_eq!(
            hex::decode("01000009000000038101060118180303ff").unwrap(),
            rx.recv().await.unwrap()
        );
        // A fire-and-forget send never changes the connection state.
        assert!(c.is_connected());
        c.disconnect();
    }

    #[tokio::test]
    async fn reconnect_replaces_monitor() {
        let (addr, _camera) = fake_camera(2).await;
        let mut c = CameraController::new(addr.ip().to_string(), addr.port());
        c.connect().await.unwrap();
        let first = c.monitor.as_ref().unwrap().abort_handle();

        c.connect().await.unwrap();
        assert!(c.is_connected());

        // The first monitor task must have been cancelled; only one timer
        // runs at a time.
        for _ in 0..100 {
            if first.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(first.is_finished());
        assert!(c.monitor.is_some());
        c.disconnect();
    }

    #[tokio::test(start_paused = true)]
    async fn connect_timeout() {
        // A camera that never answers.
        let sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = sock.local_addr().unwrap();

        let mut c = CameraController::new(addr.ip().to_string(), addr.port());
        let e = c.connect().await.unwrap_err();
        assert!(matches!(e, Error::ResponseTimeout));
        assert_eq!(ConnectionState::Failed, c.state());
        assert!(!c.is_connected());
        assert!(c.monitor.is_none());

        // The socket was released on failure; sends now fail.
        assert!(matches!(
            c.pan_tilt_stop().await,
            Err(Error::ChannelUnavailable)
        ));
    }

    #[tokio::test]
    async fn health_check_ok() {
        let (addr, _camera) = fake_camera(2).await;
        let mut c = CameraController::new(addr.ip().to_string(), addr.port());
        c.connect().await.unwrap();
        assert!(c.health_check().await);
        assert!(c.is_connected());
        c.disconnect();
    }

    #[tokio::test]
    async fn health_check_failure_flips_state() {
        // No socket is open, so the probe cannot even send.
        let c = CameraController::new("192.0.2.1", 52381);
        assert!(!c.health_check().await);
        assert_eq!(ConnectionState::Failed, c.state());
        assert!(!c.is_connected());
    }

    #[tokio::test]
    async fn disconnect_twice() {
        let mut c = CameraController::new("192.0.2.1", 52381);
        c.disconnect();
        assert_eq!(ConnectionState::Disconnected, c.state());
        c.disconnect();
        assert_eq!(ConnectionState::Disconnected, c.state());
    }
}
