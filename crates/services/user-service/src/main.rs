//! User Service - HTTP server for user management.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use user_service_lib::config::{
    Config, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PORT, DEFAULT_DB_USER, DEFAULT_DIAG_ADDR,
    DEFAULT_LISTEN_PORT, DEFAULT_MAX_CONNECTIONS,
};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management microservice")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML config file; replaces the individual flags when given
    #[arg(long, global = true, env = "CONFIG_PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Database host
    #[arg(long, env = "DB_HOST", default_value = DEFAULT_DB_HOST)]
    db_host: String,
    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = DEFAULT_DB_PORT)]
    db_port: u16,
    /// Database user
    #[arg(long, env = "DB_USER", default_value = DEFAULT_DB_USER)]
    db_user: String,
    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    db_password: String,
    /// Database name
    #[arg(long, env = "DB_NAME", default_value = DEFAULT_DB_NAME)]
    db_name: String,
    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    db_max_connections: u32,
    /// HTTP API listen port
    #[arg(long, env = "LISTEN_PORT", default_value_t = DEFAULT_LISTEN_PORT)]
    listen_port: u16,
    /// Diagnostics listen address
    #[arg(long, env = "DIAG_ADDR", default_value = DEFAULT_DIAG_ADDR)]
    diag_addr: String,
}

impl From<ServeArgs> for Config {
    fn from(args: ServeArgs) -> Self {
        Config {
            db_host: args.db_host,
            db_port: args.db_port,
            db_user: args.db_user,
            db_password: args.db_password,
            db_name: args.db_name,
            db_max_connections: args.db_max_connections,
            listen_port: args.listen_port,
            diag_addr: args.diag_addr,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve(args) => {
            let config = match cli.config {
                Some(path) => Config::load(&path)?,
                None => Config::from(args),
            };
            user_service_lib::serve(config).await?;
        }
    }

    Ok(())
}
