use clap::Parser;
use panopticon::{protocol::DEFAULT_PORT, CameraController, Result};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

/// Connection check and diagnostics for a VISCA-over-IP camera.
#[derive(Debug, Parser)]
#[clap(verbatim_doc_comment)]
struct CliParser {
    /// IP address of the camera.
    #[clap(short, long)]
    pub ip: String,

    /// VISCA-over-IP UDP port.
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
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
    match camera.connect().await {
        Ok(()) => info!("camera is reachable and responding"),
        Err(e) => {
            info!("connect failed: {e}");
            for line in camera.diagnose_connection().await {
                info!("{line}");
            }
        }
    }
    camera.disconnect();
    Ok(())
}
