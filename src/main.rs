use anyhow::Result;
use clap::Parser;
use memelord::app::App;
use memelord::models::{Config, Stage};
use memelord::view;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "memelord")]
#[command(about = "Turn a topic into an AI-generated meme")]
struct CliArgs {
    /// Topic to make a meme about, e.g. "Tried to fix a bug, created 10 more"
    #[arg(value_name = "TOPIC")]
    topic: String,

    /// Directory to save the generated image into.
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memelord=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app = App::from_config(&config, reqwest::Client::new());

    // Print progress copy as the pipeline moves through its stages.
    let mut rx = app.subscribe();
    let progress = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            match snapshot.stage {
                Stage::GeneratingText | Stage::GeneratingImage => {
                    println!("{}", view::render(&snapshot));
                }
                _ => break,
            }
        }
    });

    app.submit(&args.topic).await;
    progress.abort();

    let snapshot = app.snapshot();
    println!("{}", view::render(&snapshot));

    match snapshot.stage {
        Stage::Complete => {
            if let Some(dir) = args.save_dir {
                let meme = snapshot.meme.as_ref().expect("Complete stage carries a meme");
                let path = meme.save_image(&dir)?;
                info!("Saved image to {}", path.display());
            }
            Ok(())
        }
        Stage::Error => std::process::exit(1),
        // Empty topic: nothing was generated and nothing failed.
        _ => Ok(()),
    }
}
