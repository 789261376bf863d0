use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::data::DataCommands;
use cli::labels::LabelsCommands;
use cli::projects::ProjectsCommands;
use folio_cli::config::Config;
use folio_projects::LabelKind;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio CLI - portfolio catalog server and admin tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the catalog API server
    Serve {
        /// Override the PORT environment variable
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectsCommands),
    /// Manage categories
    #[command(subcommand)]
    Categories(LabelsCommands),
    /// Manage tags
    #[command(subcommand)]
    Tags(LabelsCommands),
    /// Export, import, and inspect the whole catalog
    #[command(flatten)]
    Data(DataCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Configuration error:".red().bold(), e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Serve { port } => {
            folio_cli::init_tracing("info");
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            folio_cli::run_server(config).await
        }
        command => {
            folio_cli::init_tracing("warn");
            run_admin_command(command, &config).await
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run_admin_command(command: Commands, config: &Config) -> anyhow::Result<()> {
    let state = folio_cli::open_state(config).await?;
    let manager = &state.manager;

    match command {
        Commands::Projects(command) => {
            cli::projects::handle_projects_command(manager, command).await
        }
        Commands::Categories(command) => {
            cli::labels::handle_labels_command(manager, LabelKind::Category, command).await
        }
        Commands::Tags(command) => {
            cli::labels::handle_labels_command(manager, LabelKind::Tag, command).await
        }
        Commands::Data(command) => cli::data::handle_data_command(manager, command).await,
        Commands::Serve { .. } => anyhow::bail!("serve is not an admin command"),
    }
}
