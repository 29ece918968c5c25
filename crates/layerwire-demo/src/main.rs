//! layerwire-demo - Entry point
//!
//! Builds the demo layer stack through the container and runs one
//! login → request → logout round, printing the controller's responses.

use clap::Parser;
use layerwire::{ConfigLoader, init_logging};
use layerwire_demo::{Controller, build_container};

/// Command line interface for the layerwire demo
#[derive(Parser, Debug)]
#[command(name = "layerwire-demo")]
#[command(about = "Layered dependency-injection demo")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// User on whose behalf requests are made
    #[arg(short, long, default_value = "invalid@example.com")]
    pub user: String,

    /// Request payload
    #[arg(short, long, default_value = "ping")]
    pub payload: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    let container = build_container(&config)?;
    let controller = container.get::<Controller>()?;
    let users = controller.users.get()?;

    // Before login the controller denies the request
    println!("{}", controller.process_request(&cli.payload, &cli.user)?);

    users.login(&cli.user);
    println!("{}", controller.process_request(&cli.payload, &cli.user)?);
    users.logout(&cli.user);

    Ok(())
}
