use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use geoquiz::{Config, Interaction, Language, Overrides, Quiz, logging};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// GeoJSON feature collection with the regions
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Language for region names and interface text
    #[arg(short, long, value_enum)]
    language: Option<Language>,

    /// Whether the map can be zoomed
    #[arg(short, long, value_enum)]
    interaction: Option<Interaction>,

    /// How long a wrong answer stays highlighted, in milliseconds
    #[arg(long)]
    feedback_ms: Option<u64>,

    /// Seed for reproducible prompts
    #[arg(long)]
    seed: Option<u64>,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let base = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        Ok(base.with_overrides(Overrides {
            data: self.data,
            language: self.language,
            interaction: self.interaction,
            feedback_ms: self.feedback_ms,
            seed: self.seed,
            log_file: self.log_file,
        }))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Args::parse().into_config()?;
    config.validate()?;

    if let Some(path) = &config.log_file {
        logging::init(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
    }

    Quiz::new(config).run().await.context("error running quiz")
}
