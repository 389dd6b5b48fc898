use anyhow::Result;
use chemviz_app::DashboardService;
use chemviz_client::{ConfigService, HttpEquipmentApi};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

mod commands;

#[derive(Parser)]
#[command(name = "chemviz")]
#[command(about = "Chemviz - Chemical Equipment Parameter Visualizer", long_about = None)]
struct Cli {
    /// Username to authenticate with before running the command
    #[arg(long, global = true)]
    username: Option<String>,

    /// Password for `--username`
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify credentials against the server
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the server-side session
    Logout,
    /// Show whether a server-side session exists
    Status,
    /// Upload an equipment CSV and show its analytics
    Upload {
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Show analytics for a dataset from history
    Analytics {
        /// Dataset id as listed by `history`
        dataset_id: String,
    },
    /// List prior uploads
    History,
    /// Delete a dataset
    Delete {
        /// Dataset id as listed by `history`
        dataset_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = ConfigService::new().get_config();
    tracing::debug!("Using API base URL {}", config.base_url());
    let api = Arc::new(HttpEquipmentApi::new(&config)?);
    let service = DashboardService::new(api);

    // The session cookie lives for this process only, so authenticated
    // commands log in up front when credentials are supplied.
    if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
        commands::auth::login(&service, username, password).await?;
    }

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&service, &username, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&service).await,
        Commands::Status => commands::auth::status(&service).await,
        Commands::Upload { file } => commands::datasets::upload(&service, &file).await?,
        Commands::Analytics { dataset_id } => {
            commands::datasets::analytics(&service, &dataset_id).await?
        }
        Commands::History => commands::datasets::history(&service).await?,
        Commands::Delete { dataset_id, yes } => {
            commands::datasets::delete(&service, &dataset_id, yes).await?
        }
    }

    Ok(())
}
