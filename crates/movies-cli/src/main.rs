use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use commands::{add, config, fetch, list, show, transfer, AppContext};
use movies_core::TransferOptions;
use movies_sources::StoreKind;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;
mod progress;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nlicense GPL-3.0-or-later <https://gnu.org/licenses/gpl.html>",
    "\nThis is free software: you are free to change and redistribute it.",
    "\nThere is NO WARRANTY, to the extent permitted by law."
);

#[derive(Parser)]
#[command(name = "movies")]
#[command(about = "Add movies to a Notion database from their IMDb id, and copy them between Notion and SQLite")]
#[command(version, long_version = LONG_VERSION)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Notion integration token (else NOTION_AUTH, else the credentials file)
    #[arg(long, global = true, value_name = "TOKEN")]
    notion_token: Option<String>,

    /// Notion database id (else NOTION_DATABASE, else the credentials file)
    #[arg(long, global = true, value_name = "ID")]
    notion_database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a movie from its IMDb id
    #[command(long_about = "Fetch a movie from IMDb, attach your viewing data and add it to Notion (default) and/or a SQLite database. Giving a date, a rating or --cinema marks the movie as watched.")]
    Add {
        /// IMDb identifier of the movie (e.g. tt0111161)
        imdb_id: String,

        /// Your rating, 0 to 10
        #[arg(long)]
        rating: Option<i32>,

        #[arg(long, action = ArgAction::SetTrue)]
        watched: bool,

        /// Whether you have seen it at the theater
        #[arg(long, action = ArgAction::SetTrue)]
        cinema: bool,

        /// When you watched the movie, formatted YYYY-MM-DD
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Free-form comment
        #[arg(long)]
        comment: Option<String>,

        /// Add to Notion (the default when no store is given)
        #[arg(long, action = ArgAction::SetTrue)]
        notion: bool,

        /// Add to a SQLite database; without PATH the configured default file
        #[arg(long, value_name = "PATH")]
        sqlite: Option<Option<PathBuf>>,
    },
    /// Fetch the Notion database into a SQLite database
    Fetch {
        /// Path to the SQLite database (defaults to the configured file)
        path: Option<PathBuf>,
    },
    /// Copy every movie from one store to another
    #[command(long_about = "Copy every movie from one store to another. Stores are written 'notion' or 'sqlite:PATH' ('sqlite' alone is the configured default file).")]
    Transfer {
        /// Store to read from
        #[arg(long, value_name = "STORE")]
        from: StoreKind,

        /// Store to write to
        #[arg(long, value_name = "STORE")]
        to: StoreKind,

        /// Only insert movies whose IMDb id is not in the target yet
        #[arg(long, action = ArgAction::SetTrue)]
        skip_existing: bool,

        /// Show what would be inserted without writing anything
        #[arg(long, action = ArgAction::SetTrue)]
        dry_run: bool,
    },
    /// Show one movie
    Show {
        /// IMDb identifier of the movie
        imdb_id: String,

        /// Store to read from ('notion' or 'sqlite:PATH')
        #[arg(long, value_name = "STORE", default_value = "notion")]
        store: StoreKind,
    },
    /// List every movie of a store
    List {
        /// Store to read from ('notion' or 'sqlite:PATH')
        #[arg(long, value_name = "STORE", default_value = "notion")]
        store: StoreKind,
    },
    /// Show or change configuration and credentials
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the Notion token)
    Show {
        /// Show the Notion token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store Notion credentials in the credentials file
    #[command(long_about = "Store the Notion integration token and database id in the credentials file. Without options, prompts for both.")]
    Notion {
        /// Notion integration token
        #[arg(long)]
        token: Option<String>,

        /// Notion database id
        #[arg(long)]
        database_id: Option<String>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // A .env file next to the invocation may hold NOTION_AUTH / NOTION_DATABASE
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let output = output::Output::new(cli.output, cli.quiet);

    let result = run(cli, &output);
    if let Err(e) = &result {
        tracing::debug!("Command failed: {:?}", e);
        output.error(format!("{:#}", e));
        std::process::exit(1);
    }
    result
}

fn run(cli: Cli, output: &output::Output) -> color_eyre::Result<()> {
    let ctx = AppContext::load(cli.notion_token, cli.notion_database)?;

    match cli.command {
        Commands::Add {
            imdb_id,
            rating,
            watched,
            cinema,
            date,
            comment,
            notion,
            sqlite,
        } => add::run_add(
            add::AddArgs {
                imdb_id,
                rating,
                watched,
                cinema,
                date,
                comment,
                notion,
                sqlite,
            },
            &ctx,
            output,
        ),
        Commands::Fetch { path } => fetch::run_fetch(path, &ctx, output),
        Commands::Transfer {
            from,
            to,
            skip_existing,
            dry_run,
        } => transfer::run_transfer(
            from,
            to,
            TransferOptions {
                skip_existing,
                dry_run,
            },
            &ctx,
            output,
        ),
        Commands::Show { imdb_id, store } => show::run_show(&imdb_id, store, &ctx, output),
        Commands::List { store } => list::run_list(store, &ctx, output),
        Commands::Config { cmd } => {
            let action = match cmd {
                ConfigCommands::Show { full } => config::ConfigAction::Show { full },
                ConfigCommands::Notion { token, database_id } => {
                    config::ConfigAction::Notion { token, database_id }
                }
            };
            config::run_config(action, &ctx, output)
        }
    }
}
