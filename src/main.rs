use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod api;
mod config;
mod error;
mod generate;
mod input;
mod output;
mod render;
mod request;
mod service;
mod session;
mod shell;
mod telemetry;

use config::ClientConfig;
use output::config::{OutputConfig, OutputFormat};
use output::Emitter;

#[derive(Parser)]
#[command(name = "cma", about = "Content marketing assistant client")]
struct Cli {
    /// Generation service base URL (overrides CMA_BASE_URL)
    #[arg(global = true, long)]
    base_url: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Generate(generate::GenerateCmd),
    Questions(service::QuestionsCmd),
    Health(service::HealthCmd),
    Shell(shell::ShellCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let out_cfg = OutputConfig::from_env().with_json_flag(cli.json);
    telemetry::config::set_json_mode(out_cfg.format == OutputFormat::Json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and CMA_LOG_FORMAT
    telemetry::config::init_tracing();

    let cfg = ClientConfig::from_env().with_base_url(cli.base_url);
    let out = Emitter::new(out_cfg);

    match cli.command {
        Commands::Generate(args) => generate::run(&cfg, &out, args).await?,
        Commands::Questions(args) => service::questions(&cfg, &out, args).await?,
        Commands::Health(args) => service::health(&cfg, &out, args).await?,
        Commands::Shell(args) => shell::run(&cfg, &out, args).await?,
    }

    Ok(())
}
