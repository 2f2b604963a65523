use clap::Parser;
use drishti_api::VisionServer;
use drishti_server::{http, startup};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "drishti-server", about = "Camera-to-object-segmentation service")]
struct Args {
    /// Path to the robot's JSON configuration.
    #[arg(long, default_value = "robot.json")]
    config: PathBuf,

    /// Address to serve the HTTP API on.
    #[arg(long, default_value = "127.0.0.1:8085")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let args = Args::parse();
    info!("loading robot config from {}", args.config.display());
    let config = startup::load_config(&args.config)?;
    let directory = startup::build_directory(&config)?;
    info!("registered {} camera(s)", directory.len());

    let state = http::ApiState {
        server: Arc::new(VisionServer::new(Arc::new(directory))),
    };
    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("drishti-server listening on {}", args.bind);
    axum::serve(listener, http::router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}
