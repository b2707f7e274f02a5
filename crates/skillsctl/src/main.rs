//! skillsctl - browse the agent skills catalog
//!
//! Reads the catalog written by `skills-build`, from disk or over HTTP.

mod client;
mod render;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use clap::{Parser, Subcommand};
use client::{CatalogLocation, Client, CtlError};
use skills_core::install::install_command;
use skills_core::query::{self, CatalogSummary, Facet, SkillFilter, ALL};
use skills_core::{Catalog, Category, Config, SkillRecord, PRIMARY_SOURCES};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Browse and search the agent skills catalog.
#[derive(Parser)]
#[command(name = "skillsctl")]
#[command(about = "Browse agent skills from open-source repositories")]
#[command(version)]
struct Cli {
    /// Catalog file path or http(s) URL
    #[arg(long, global = true, env = "SKILLS_CATALOG")]
    catalog: Option<String>,

    /// Config file path (overrides .skills/config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List skills, optionally filtered
    List {
        /// Platform to show, or "All"
        #[arg(long)]
        platform: Option<String>,

        /// Category label to show, or "All"
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive text matched against name, description, and category
        #[arg(long, default_value = "")]
        search: String,
    },

    /// List platforms present in the catalog
    Platforms,

    /// List categories present in the catalog
    Categories,

    /// Show a skill's description, install command, and content
    Show {
        /// Skill ID
        id: String,
    },

    /// List source repositories and catalog freshness
    Sources,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CtlError> {
    let cwd = std::env::current_dir()
        .map_err(|e| CtlError::InvalidArgument(format!("cannot read current directory: {e}")))?;
    let config = Config::discover(&cwd, cli.config.as_deref())?;
    let location = resolve_location(cli.catalog.as_deref(), &config);

    let client = Client::new(&config.user_agent);
    let catalog = client.load_catalog(&location).await?;

    match cli.command {
        Command::List {
            platform,
            category,
            search,
        } => run_list(&catalog, platform, category, search),
        Command::Platforms => {
            render::print_facets(&query::distinct_platforms(&catalog));
            Ok(())
        }
        Command::Categories => {
            render::print_facets(&query::distinct_categories(&catalog));
            Ok(())
        }
        Command::Show { id } => run_show(&client, &catalog, &id).await,
        Command::Sources => {
            let summary = CatalogSummary::new(&catalog, catalog.skills.len());
            render::print_sources(&catalog.sources, &summary);
            Ok(())
        }
    }
}

/// `--catalog`, then `catalog_url`, then `catalog_path`.
fn resolve_location(flag: Option<&str>, config: &Config) -> CatalogLocation {
    match (flag, &config.catalog_url) {
        (Some(value), _) => CatalogLocation::parse(value),
        (None, Some(url)) => CatalogLocation::Url(url.clone()),
        (None, None) => CatalogLocation::Path(config.catalog_path.clone()),
    }
}

fn run_list(
    catalog: &Catalog,
    platform: Option<String>,
    category: Option<String>,
    search: String,
) -> Result<(), CtlError> {
    let criteria = SkillFilter {
        platform: Facet::from(platform),
        category: parse_category(category)?,
        search,
    };
    let skills = query::filter(catalog, &criteria);
    let summary = CatalogSummary::new(catalog, skills.len());
    render::print_skill_list(&skills, &summary);
    Ok(())
}

/// Category facet from a label, accepting any case.
fn parse_category(value: Option<String>) -> Result<Facet, CtlError> {
    match value {
        None => Ok(Facet::All),
        Some(v) if v.eq_ignore_ascii_case(ALL) => Ok(Facet::All),
        Some(v) => {
            let category: Category = v.parse().map_err(CtlError::InvalidArgument)?;
            Ok(Facet::Only(category.as_str().to_string()))
        }
    }
}

async fn run_show(client: &Client, catalog: &Catalog, id: &str) -> Result<(), CtlError> {
    let details = skill_details(client, catalog, id).await?;
    render::print_skill_details(details.skill, &details.install, &details.body);
    Ok(())
}

/// Everything the detail view shows for one skill.
struct SkillDetails<'a> {
    skill: &'a SkillRecord,
    install: String,
    body: String,
}

async fn skill_details<'a>(
    client: &Client,
    catalog: &'a Catalog,
    id: &str,
) -> Result<SkillDetails<'a>, CtlError> {
    let skill = catalog
        .find(id)
        .ok_or_else(|| CtlError::SkillNotFound(id.to_string()))?;
    Ok(SkillDetails {
        skill,
        install: install_command(skill, &PRIMARY_SOURCES),
        body: client.resolve_skill_body(skill).await,
    })
}
