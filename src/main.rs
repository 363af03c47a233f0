use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tokio::fs;
use tracing::info;

use twitch_points_launcher::{config, engine, launch, logging};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Dotenv file holding credentials and the channel list
    #[arg(short, long)]
    env_file: Option<String>,
    /// Write the assembled settings as YAML to this path and exit
    #[arg(short, long)]
    dump_config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    match &args.env_file {
        Some(path) => {
            dotenv::from_path(path).context("Reading env file")?;
        }
        None => {
            dotenv::dotenv().ok();
        }
    }

    let settings = config::Settings::assemble(config::RawEnv::capture())
        .context("Assembling settings from environment")?;
    let _guard = logging::init(&settings.logger)?;
    info!(
        "Assembled settings for {} channels",
        settings.streamers.len()
    );

    if let Some(path) = args.dump_config {
        fs::write(&path, serde_yaml::to_string(&settings)?)
            .await
            .context("Writing settings file")?;
        info!("Wrote settings to {path}");
        return Ok(());
    }

    launch::launch(&settings, &engine::Interactive).await
}
