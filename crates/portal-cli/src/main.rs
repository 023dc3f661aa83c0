mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use portal_access::{AccessPolicy, PortalConfig};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Page access control for the citizen services portal")]
#[command(version)]
struct Cli {
    /// Path to the portal config directory (default: ~/.portal)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// JWT signing secret, overriding `web.jwt_secret` from the config file.
    #[arg(long, global = true, env = "PORTAL_JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default portal.toml
    Init,

    /// Show current configuration
    Config,

    /// Check whether a role may open a page (exits non-zero when denied)
    Check {
        /// Role name (unknown roles are treated as guest)
        #[arg(long)]
        role: String,
        /// Explicit permission; repeat to grant several paths
        #[arg(long = "permission", short = 'p')]
        permissions: Vec<String>,
        /// Page path to check
        path: String,
    },

    /// List the pages a role may open
    Pages {
        #[arg(long)]
        role: String,
        #[arg(long = "permission", short = 'p')]
        permissions: Vec<String>,
        /// Group pages by category
        #[arg(long)]
        grouped: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate the page catalog and role defaults
    Validate,

    /// Mint a bearer token for local testing
    Token {
        /// Subject (external identity id)
        subject: String,
        #[arg(long)]
        role: Option<String>,
        #[arg(long = "permission", short = 'p')]
        permissions: Vec<String>,
        /// Lifetime in seconds
        #[arg(long, default_value_t = 86400)]
        ttl: u64,
    },

    /// Manage stored principal records
    Principal {
        #[command(subcommand)]
        action: commands::principal::PrincipalAction,
    },

    /// Run the HTTP access guard
    Serve {
        /// Override `web.listen_addr`
        #[arg(long)]
        listen: Option<String>,
    },
}

/// Load config (or defaults) and build the access policy from it.
pub fn load_policy(config: &PortalConfig) -> anyhow::Result<AccessPolicy> {
    Ok(AccessPolicy::from_settings(&config.access)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portal=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => PortalConfig::default_base_dir()?,
    };

    let config_path = PortalConfig::default_path(&base_dir);
    let mut config = PortalConfig::load_or_default(&config_path)?;
    if let Some(secret) = cli.jwt_secret.clone() {
        config.web.jwt_secret = secret;
    }

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Init => commands::init::run(&base_dir),
        Commands::Config => commands::config::run(&base_dir),
        Commands::Check {
            ref role,
            ref permissions,
            ref path,
        } => commands::check::run(&config, role, permissions, path),
        Commands::Pages {
            ref role,
            ref permissions,
            grouped,
            json,
        } => commands::pages::run(&config, role, permissions, grouped, json),
        Commands::Validate => commands::validate::run(&config, &config_path),
        Commands::Token {
            ref subject,
            ref role,
            ref permissions,
            ttl,
        } => commands::token::run(&config, subject, role.as_deref(), permissions, ttl),
        Commands::Principal { ref action } => rt.block_on(commands::principal::run(&config, action)),
        Commands::Serve { ref listen } => rt.block_on(commands::serve::run(config, listen.clone())),
    }
}
