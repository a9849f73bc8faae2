//! Yggdrasil CLI
//!
//! Command-line tools for operating a Yggdrasil server.
//!
//! # Commands
//!
//! - `offline-uuid` - Derive offline-mode profile UUIDs
//! - `sign` - Normalize and sign a profile property
//! - `verify` - Check a property signature
//! - `metadata` - Render the API metadata document

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Yggdrasil server tools.
#[derive(Parser)]
#[command(name = "ygg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the offline-mode UUID of each profile name
    OfflineUuid {
        /// Profile names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Normalize and sign a profile property value
    Sign {
        /// Private key (PEM)
        #[arg(short, long)]
        key: PathBuf,

        /// Property name (textures, uploadableTextures)
        #[arg(short, long, default_value = "textures")]
        name: String,

        /// Parse the value as JSON instead of taking it verbatim
        #[arg(short, long)]
        json: bool,

        /// Property value
        value: String,
    },

    /// Verify a property signature
    Verify {
        /// Public key (PEM)
        #[arg(short, long)]
        key: PathBuf,

        /// Base64 signature
        #[arg(short, long)]
        signature: String,

        /// Encoded property value
        value: String,
    },

    /// Render the API metadata document
    Metadata {
        /// Private key (PEM)
        #[arg(short, long)]
        key: PathBuf,

        /// Server name
        #[arg(long)]
        server_name: Option<String>,

        /// Texture domain (repeatable)
        #[arg(long = "skin-domain")]
        skin_domains: Vec<String>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::OfflineUuid { names } => {
            commands::offline_uuid::run(&names);
        }
        Commands::Sign {
            key,
            name,
            json,
            value,
        } => {
            commands::sign::run(&key, &name, &value, json)?;
        }
        Commands::Verify {
            key,
            signature,
            value,
        } => {
            commands::verify::run(&key, &value, &signature)?;
        }
        Commands::Metadata {
            key,
            server_name,
            skin_domains,
        } => {
            commands::metadata::run(&key, server_name, skin_domains)?;
        }
        Commands::Version => {
            println!("Yggdrasil CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
