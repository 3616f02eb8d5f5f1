//! Command-line interface components.

use crate::address::translate_address;
use crate::catalog::{list_profile_files, load_catalog_with_config};
use crate::config::ProfileConfig;
use crate::models::{Catalog, Parameter};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "modbus-profiles")]
#[command(about = "Load Modbus controller register-map profiles and derive read descriptors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Profile directory (overrides MODBUS_PROFILES_DIR)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Maximum number of profile files read at once
    #[arg(long, global = true, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load all profiles and summarize the catalog
    Load {
        /// Show a progress bar while loading
        #[arg(long)]
        progress: bool,
    },
    /// List profile files in the directory
    List,
    /// Look up a parameter by tag, name or register number
    Lookup {
        controller: String,
        term: String,
    },
    /// Print the Modbus read descriptor for a parameter
    ReadConfig {
        controller: String,
        term: String,
        /// Modbus unit identifier
        #[arg(short, long)]
        unit_id: Option<u8>,
    },
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Environment configuration with command-line overrides applied
    pub fn resolve_config(&self, base: ProfileConfig) -> ProfileConfig {
        let mut config = base;
        if let Some(dir) = &self.dir {
            config.profiles_dir = dir.clone();
        }
        if let Some(n) = self.concurrency {
            config.max_concurrent_files = n;
        }
        if let Command::Load { progress: true } = self.command {
            config.show_progress = true;
        }
        config
    }
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("modbus_profiles={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Execute the selected command
pub async fn run(args: Args) -> Result<()> {
    let config = args.resolve_config(ProfileConfig::from_env());
    config.validate().context("Invalid configuration")?;
    debug!("Resolved configuration: {:?}", config);

    match &args.command {
        Command::Load { .. } => {
            let catalog = load(&config).await?;
            print_catalog(&catalog);
        }
        Command::List => {
            for name in list_profile_files(&config.profiles_dir) {
                println!("{}", name);
            }
        }
        Command::Lookup { controller, term } => {
            let catalog = load(&config).await?;
            let param = resolve(&catalog, controller, term)?;
            print_parameter(param);
        }
        Command::ReadConfig {
            controller,
            term,
            unit_id,
        } => {
            let catalog = load(&config).await?;
            let param = resolve(&catalog, controller, term)?;
            let descriptor =
                translate_address(param, unit_id.unwrap_or(config.default_unit_id));

            println!("{} {}", "name:".bright_cyan(), descriptor.name);
            println!("{} {}", "unit_id:".bright_cyan(), descriptor.unit_id);
            println!("{} {}", "fc:".bright_cyan(), descriptor.function_code);
            println!("{} {}", "address:".bright_cyan(), descriptor.address);
            println!("{} {}", "quantity:".bright_cyan(), descriptor.quantity);
            println!(
                "{} {} / {} / scale {} {} / {}",
                "metadata:".bright_cyan(),
                descriptor.metadata.param_name,
                descriptor.metadata.tag,
                descriptor.metadata.scale,
                descriptor.metadata.unit,
                descriptor.metadata.datatype
            );
        }
    }

    Ok(())
}

async fn load(config: &ProfileConfig) -> Result<Catalog> {
    load_catalog_with_config(config).await.with_context(|| {
        format!(
            "Failed to load profiles from {}",
            config.profiles_dir.display()
        )
    })
}

fn resolve<'a>(catalog: &'a Catalog, controller: &str, term: &str) -> Result<&'a Parameter> {
    let profile = catalog.get_profile(controller).with_context(|| {
        format!(
            "No profile for controller '{}' (loaded: {})",
            controller,
            catalog.controllers().join(", ")
        )
    })?;

    profile
        .find_parameter(term)
        .with_context(|| format!("No parameter '{}' in profile {}", term, controller))
}

fn print_catalog(catalog: &Catalog) {
    println!(
        "{} {}",
        "Profiles loaded:".bright_green().bold(),
        catalog.count().to_string().bright_white().bold()
    );

    for (controller, profile) in &catalog.profiles {
        println!(
            "  {} {} ({} parameters, {} setpoints, {} booleans)",
            controller.bright_cyan(),
            format!("[{}]", profile.file_name).bright_black(),
            profile.parameter_count(),
            profile.groups.setpoints.len(),
            profile.groups.booleans.len()
        );
    }

    if catalog.has_errors() {
        println!(
            "{} {}",
            "Files failed:".bright_red(),
            catalog.errors.len().to_string().bright_red().bold()
        );
        for error in &catalog.errors {
            println!("  {} {}", error.file_name.bright_yellow(), error.message);
        }
    }
}

fn print_parameter(param: &Parameter) {
    println!("{} {}", "param_name:".bright_cyan(), param.param_name);
    println!("{} {}", "description:".bright_cyan(), param.description);
    println!("{} {}", "register:".bright_cyan(), param.register);
    println!(
        "{} {} ({})",
        "fc:".bright_cyan(),
        param.function_code,
        param.register_type
    );
    println!("{} {}", "datatype:".bright_cyan(), param.datatype);
    println!("{} {}", "scale:".bright_cyan(), param.scale);
    println!("{} {}", "unit:".bright_cyan(), param.unit);
    println!("{} {}", "tag:".bright_cyan(), param.tag);
    println!("{} {}", "rw:".bright_cyan(), param.read_write);
}
