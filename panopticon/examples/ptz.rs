use clap::{Parser, Subcommand};
use panopticon::{
    protocol::{
        command::{PanDirection, TiltDirection},
        DEFAULT_PORT,
    },
    CameraController, Result,
};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Subcommand)]
enum Action {
    /// Start a continuous pan/tilt drive.
    Move {
        #[clap(value_enum)]
        pan: PanDirection,
        #[clap(value_enum)]
        tilt: TiltDirection,
        /// Speed for both axes (1-24).
        #[clap(short, long, default_value_t = 12)]
        speed: u8,
    },
    /// Stop pan/tilt motion.
    Stop,
    /// Return to the home position.
    Home,
    /// Zoom in (1-7).
    In {
        #[clap(short, long, default_value_t = 4)]
        speed: u8,
    },
    /// Zoom out (1-7).
    Out {
        #[clap(short, long, default_value_t = 4)]
        speed: u8,
    },
    /// Recall a stored preset (1-100).
    Recall { preset: u8 },
    /// Save the current position as a preset (1-100).
    Save { preset: u8 },
}

/// Drive a VISCA-over-IP PTZ camera.
#[derive(Debug, Parser)]
#[clap(verbatim_doc_comment)]
struct CliParser {
    /// IP address of the camera.
    #[clap(short, long)]
    pub ip: String,

    /// VISCA-over-IP UDP port.
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[clap(subcommand)]
    action: Action,
}

#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .compact()
        .init();
    let opts = CliParser::parse();

    let mut camera = CameraController::new(opts.ip, opts.port);
    camera.connect().await?;

    match opts.action {
        Action::Move { pan, tilt, speed } => camera.pan_tilt_move(speed, speed, pan, tilt).await?,
        Action::Stop => camera.pan_tilt_stop().await?,
        Action::Home => camera.pan_tilt_home().await?,
        Action::In { speed } => camera.zoom_tele(speed).await?,
        Action::Out { speed } => camera.zoom_wide(speed).await?,
        Action::Recall { preset } => camera.preset_recall(preset).await?,
        Action::Save { preset } => camera.preset_save(preset).await?,
    }
    info!("sent");

    camera.disconnect();
    Ok(())
}
