//! Telly CLI
//!
//! Command-line interface for Telly - TV show tracking.

use anyhow::Result;
use clap::{Parser, Subcommand};

use telly_core::{Config, HttpApi, Synchronizer};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "telly")]
#[command(about = "Telly - track the TV shows you watch")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tracked shows
    Show {
        #[command(subcommand)]
        command: ShowCommands,
    },
    /// Manage episodes
    Episode {
        #[command(subcommand)]
        command: EpisodeCommands,
    },
    /// Refresh catalog metadata for all tracked shows
    Refresh,
    /// Remove all tracked data
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show backend and cache status
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ShowCommands {
    /// Track a show by catalog id
    Add {
        /// Catalog id of the show
        catalog_id: String,
    },
    /// Track a show via an explicit catalog metadata fetch
    Import {
        /// Catalog id of the show
        catalog_id: String,
    },
    /// List tracked shows
    #[command(alias = "ls")]
    List {
        /// Include ignored shows
        #[arg(long)]
        ignored: bool,
    },
    /// Preview catalog metadata for a show
    Info {
        /// Catalog id of the show
        catalog_id: String,
    },
    /// Stop tracking a show
    #[command(alias = "rm")]
    Delete {
        /// Id of the tracked show
        show_id: String,
    },
    /// Toggle whether a show is ignored
    Ignore {
        /// Id of the tracked show
        show_id: String,
    },
}

#[derive(Subcommand)]
enum EpisodeCommands {
    /// List a show's episodes
    #[command(alias = "ls")]
    List {
        /// Id of the tracked show
        show_id: String,
        /// Only released, unwatched episodes
        #[arg(long)]
        unwatched: bool,
    },
    /// Toggle an episode's watched flag
    Watch {
        /// Id of the episode
        episode_id: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, token)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need a synchronizer
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(&output),
            Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, &output),
        };
    }

    let config = Config::load()?;
    let mut sync = Synchronizer::new(HttpApi::new(&config));

    match cli.command {
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Show { command } => handle_show_command(command, &mut sync, &output).await,
        Commands::Episode { command } => handle_episode_command(command, &mut sync, &output).await,
        Commands::Refresh => commands::refresh::run(&mut sync, &output).await,
        Commands::Clear { yes } => commands::admin::clear(&mut sync, yes, &output).await,
        Commands::Status => commands::status::show(&config, &mut sync, &output).await,
    }
}

async fn handle_show_command(
    command: ShowCommands,
    sync: &mut Synchronizer<HttpApi>,
    output: &Output,
) -> Result<()> {
    match command {
        ShowCommands::Add { catalog_id } => commands::show::add(sync, catalog_id, output).await,
        ShowCommands::Import { catalog_id } => {
            commands::show::import(sync, catalog_id, output).await
        }
        ShowCommands::List { ignored } => commands::show::list(sync, ignored, output).await,
        ShowCommands::Info { catalog_id } => commands::show::info(sync, catalog_id, output).await,
        ShowCommands::Delete { show_id } => commands::show::delete(sync, show_id, output).await,
        ShowCommands::Ignore { show_id } => commands::show::ignore(sync, show_id, output).await,
    }
}

async fn handle_episode_command(
    command: EpisodeCommands,
    sync: &mut Synchronizer<HttpApi>,
    output: &Output,
) -> Result<()> {
    match command {
        EpisodeCommands::List { show_id, unwatched } => {
            commands::episode::list(sync, show_id, unwatched, output).await
        }
        EpisodeCommands::Watch { episode_id } => {
            commands::episode::watch(sync, episode_id, output).await
        }
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    // Logs go to stderr so they never mix with command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
