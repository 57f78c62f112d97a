//! Headless Lost Hiker client.
//!
//! Loads content, resumes (or starts) the run in the configured slot, plays
//! one day of exploration and optional conversation, then saves.
mod app;
mod logging;

use anyhow::Result;
use clap::Parser;
use hiker_runtime::RuntimeConfig;

use app::HeadlessDay;

/// Lost Hiker: explore the forest for one day and save.
#[derive(Parser, Debug)]
#[command(name = "lost-hiker")]
#[command(about = "Headless Lost Hiker client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Exploration steps to take before ending the day
    #[arg(long, default_value_t = 6)]
    pub steps: u32,

    /// Forest depth to explore at
    #[arg(long, default_value_t = 0)]
    pub depth: u32,

    /// NPC to talk to after exploring
    #[arg(long, value_name = "NPC")]
    pub talk: Option<String>,

    /// Ignore any existing save and start a new run
    #[arg(long)]
    pub new: bool,

    /// Player name for a new run
    #[arg(long, default_value = "Hiker")]
    pub name: String,

    /// Player race for a new run
    #[arg(long, default_value = "human")]
    pub race: String,

    /// Only log to the session file
    #[arg(long)]
    pub quiet: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = RuntimeConfig::from_env();

    let _guard = logging::setup(config.session_id.as_deref(), !cli.quiet)?;

    HeadlessDay::new(config, cli).run()
}
