//! isle-rcon - command-line RCON client for The Isle.
//!
//! Connects, authenticates, runs one command and prints the result.
//! Commands that return records print them as JSON.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use isle_rcon::classes::is_known_class;
use isle_rcon::prelude::*;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::Config;

/// Administer a The Isle server over RCON
#[derive(Parser)]
#[command(name = "isle-rcon")]
#[command(version)]
#[command(about = "Run RCON commands against a The Isle server", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Server RCON address (host:port)
    #[arg(short, long, global = true)]
    address: Option<String>,

    /// RCON password
    #[arg(short, long, global = true, env = "ISLE_RCON_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List connected players (ids and names)
    Players,

    /// Show full records of every spawned player
    PlayerData,

    /// Show server settings
    Details,

    /// Announce a message to everyone
    Announce { message: String },

    /// Send an announcement to one player
    Dm { player_id: String, message: String },

    /// Kick a player
    Kick {
        player_id: String,
        /// Must not contain commas
        #[arg(default_value = "")]
        reason: String,
    },

    /// Remove all corpses from the map
    WipeCorpses,

    /// Save the world
    Save,

    /// Set the playable classes
    Playables {
        #[arg(required = true)]
        classes: Vec<String>,
    },

    /// Toggle the whitelist
    ToggleWhitelist,

    /// Add ids to the whitelist
    WhitelistAdd {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Remove ids from the whitelist
    WhitelistRemove {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Toggle global chat
    ToggleGlobalChat,

    /// Toggle human players
    ToggleHumans,

    /// Toggle AI spawning
    ToggleAi,

    /// Set the AI classes that may not spawn
    DisableAi { classes: Vec<AiClass> },

    /// Set the AI density
    AiDensity { density: f32 },

    /// Send a raw sub-command and print the reply
    Exec {
        /// Command code, decimal or 0x-prefixed hex
        #[arg(value_parser = parse_code)]
        code: u8,
        params: Vec<String>,
    },
}

fn parse_code(s: &str) -> Result<u8, std::num::ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging. RUST_LOG wins over the -v flag.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .merge(cli.address, cli.password);

    let address = config
        .address
        .context("no server address; pass --address or set it in the config file")?;
    let password = config
        .password
        .context("no password; pass --password or set ISLE_RCON_PASSWORD")?;

    let client = Client::connect_with(&address, config.transport)
        .await
        .with_context(|| format!("connecting to {address}"))?;
    client.auth(&password).await?;

    let result = run(&client, cli.command).await;
    client.close().await?;
    result
}

async fn run(client: &Client, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Players => print_json(&client.get_player_list().await?)?,
        Commands::PlayerData => print_json(&client.get_player_data().await?)?,
        Commands::Details => print_json(&client.get_server_details().await?)?,
        Commands::Announce { message } => client.announce(&message).await?,
        Commands::Dm { player_id, message } => {
            client.send_direct_message(&player_id, &message).await?;
        }
        Commands::Kick { player_id, reason } => client.kick_player(&player_id, &reason).await?,
        Commands::WipeCorpses => client.wipe_corpses().await?,
        Commands::Save => client.save().await?,
        Commands::Playables { classes } => {
            for class in classes.iter().filter(|c| !is_known_class(c)) {
                tracing::warn!(%class, "not a known playable class, sending anyway");
            }
            let classes: Vec<ClassName> = classes.into_iter().map(ClassName::from).collect();
            client.update_playables(&classes).await?;
        }
        Commands::ToggleWhitelist => print_state("whitelist", client.toggle_whitelist().await?),
        Commands::WhitelistAdd { ids } => {
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            client.add_whitelist_ids(&ids).await?;
        }
        Commands::WhitelistRemove { ids } => {
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            client.remove_whitelist_ids(&ids).await?;
        }
        Commands::ToggleGlobalChat => {
            print_state("global chat", client.toggle_global_chat().await?);
        }
        Commands::ToggleHumans => print_state("humans", client.toggle_humans().await?),
        Commands::ToggleAi => print_state("AI", client.toggle_ai().await?),
        Commands::DisableAi { classes } => client.disable_ai_classes(&classes).await?,
        Commands::AiDensity { density } => client.set_ai_density(density).await?,
        Commands::Exec { code, params } => {
            println!("{}", client.exec_command(code, &params).await?);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_state(feature: &str, enabled: bool) {
    println!("{feature} is now {}", if enabled { "on" } else { "off" });
}
