use std::fs;
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use porch::auth::generate_token;
use porch::config::ServerConfig;
use porch::server::{AppState, create_router};
use porch::store::{SqliteStore, Store};
use porch::types::{Pipeline, Role, Token};

fn new_token(description: String, role: Role, pipeline: Option<Pipeline>) -> Token {
    Token {
        id: Uuid::new_v4().to_string(),
        token: generate_token(),
        description,
        role,
        pipeline,
        date_issued: Utc::now(),
        date_revoked: None,
    }
}

#[cfg(unix)]
fn set_restrictive_permissions(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::warn!("Failed to set permissions on {}: {e}", path.display());
    }
}

#[derive(Parser)]
#[command(name = "porch")]
#[command(about = "Work allocation and tracking for portable pipelines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        /// Data directory for the database
        #[arg(long, default_value = "./data", global = true)]
        data_dir: String,

        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// Host to bind to (overrides porch.toml)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides porch.toml)
        #[arg(long, short)]
        port: Option<u16>,

        /// Data directory for the database and porch.toml
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Initialize the server (create database and first power user token)
    Init,

    /// Manage bearer tokens
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Issue a new token
    Create {
        /// Human-readable label for the token holder
        #[arg(long)]
        description: String,

        /// Scope the token to this pipeline (requires --pipeline-version)
        #[arg(long, requires = "pipeline_version")]
        pipeline: Option<String>,

        /// Version of the scoped pipeline
        #[arg(long, requires = "pipeline")]
        pipeline_version: Option<String>,

        /// Issue a regular_user token even without a pipeline
        #[arg(long)]
        regular: bool,
    },

    /// List issued tokens
    List,

    /// Revoke a token from the given date (default: today)
    Revoke {
        /// Token id
        id: String,

        /// Revocation date, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
    if !config.db_path().exists() {
        bail!("Server not initialized. Run 'porch admin init' first to create the database.");
    }
    Ok(SqliteStore::new(config.db_path())?)
}

fn run_init(config: &ServerConfig) -> anyhow::Result<()> {
    fs::create_dir_all(&config.data_dir)?;

    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;

    let token_file = config.admin_token_path();

    if store.has_power_user_token()? {
        bail!(
            "Server already initialized. Admin token exists at: {}",
            token_file.display()
        );
    }

    let token = new_token("Administrator".to_string(), Role::PowerUser, None);
    store.create_token(&token)?;
    fs::write(&token_file, &token.token)?;

    #[cfg(unix)]
    set_restrictive_permissions(&token_file);

    println!();
    println!("========================================");
    println!("Power user token (save this, it won't be shown again):");
    println!();
    println!("  {}", token.token);
    println!();
    println!("Token also written to: {}", token_file.display());
    println!("========================================");
    println!();

    Ok(())
}

fn run_token(config: &ServerConfig, command: TokenCommands) -> anyhow::Result<()> {
    let store = open_store(config)?;

    match command {
        TokenCommands::Create {
            description,
            pipeline,
            pipeline_version,
            regular,
        } => {
            let (role, pipeline) = match (pipeline, pipeline_version) {
                (Some(name), Some(version)) => {
                    let pipeline = store
                        .get_pipeline(&name, &version)?
                        .with_context(|| format!("Pipeline '{name}' version '{version}' not found"))?;
                    (Role::RegularUser, Some(pipeline))
                }
                _ if regular => (Role::RegularUser, None),
                _ => (Role::PowerUser, None),
            };

            let token = new_token(description, role, pipeline);
            store.create_token(&token)?;

            println!("id:    {}", token.id);
            println!("role:  {}", token.role);
            println!("token: {}", token.token);
        }
        TokenCommands::List => {
            for token in store.list_tokens()? {
                let scope = token
                    .pipeline
                    .as_ref()
                    .map(|p| format!("{} {}", p.name, p.version))
                    .unwrap_or_else(|| "-".to_string());
                let revoked = token
                    .date_revoked
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    token.id,
                    token.role,
                    scope,
                    token.date_issued.date_naive(),
                    revoked,
                    token.description
                );
            }
        }
        TokenCommands::Revoke { id, date } => {
            let token = store
                .get_token_by_id(&id)?
                .with_context(|| format!("Token '{id}' not found"))?;
            let date = date.unwrap_or_else(|| Utc::now().date_naive());

            if store.revoke_token(&token.id, date)? {
                info!("Token {} revoked from {}", token.id, date);
                println!("Token {} revoked from {date}", token.id);
            } else {
                let existing = token.date_revoked.map(|d| d.to_string()).unwrap_or_default();
                println!("Token {} was already revoked from {existing}", token.id);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("porch=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { data_dir, command } => {
            let config = ServerConfig::load(&data_dir)?;
            match command {
                AdminCommands::Init => run_init(&config)?,
                AdminCommands::Token { command } => run_token(&config, command)?,
            }
        }
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            let mut config = ServerConfig::load(&data_dir)?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let store = open_store(&config)?;
            store.initialize()?;
            if !store.has_power_user_token()? {
                bail!("Server not initialized. Run 'porch admin init' first to create a power user token.");
            }

            let state = Arc::new(AppState::new(Arc::new(store)));

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
