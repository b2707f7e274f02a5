//! skills-build - Skills catalog builder
//!
//! Fetches skill descriptors from the configured GitHub repositories and
//! writes the catalog file consumed by `skillsctl` and the web frontend.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use clap::Parser;
use skills_build::{Builder, BuilderConfig};
use skills_core::Config;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "skills-build", about = "Build the agent skills catalog", version)]
struct Cli {
    /// Output path for the catalog (overrides catalog_path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file path (overrides .skills/config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub token for the contents API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Contents API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Raw content base URL
    #[arg(long)]
    raw_base: Option<String>,

    /// Branch to read skills from
    #[arg(long)]
    branch: Option<String>,

    /// Exit non-zero if any source could not be listed
    #[arg(long)]
    strict: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    if let Some(raw_base) = cli.raw_base {
        config.raw_base = raw_base;
    }
    if let Some(branch) = cli.branch {
        config.branch = branch;
    }
    let output = cli.output.unwrap_or_else(|| config.catalog_path.clone());

    let builder = Builder::new(&BuilderConfig::from_config(&config, cli.token));

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(builder.build_catalog());

    if let Err(e) = result.catalog.write_to(&output) {
        error!("failed to write catalog: {}", e);
        std::process::exit(1);
    }
    info!(
        path = %output.display(),
        total = result.catalog.total_skills,
        "catalog written"
    );

    if cli.strict && !result.errors.is_empty() {
        for e in &result.errors {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}

/// Defaults, then the nearest `.skills/config`, then `--config`.
fn load_config(explicit: Option<&std::path::Path>) -> Result<Config, skills_core::ConfigError> {
    let cwd = std::env::current_dir()?;
    Config::discover(&cwd, explicit)
}
