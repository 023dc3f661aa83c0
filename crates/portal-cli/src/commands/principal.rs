use anyhow::Result;
use clap::Subcommand;

use portal_access::{PortalConfig, Role};
use portal_auth::{PrincipalStore, SqlitePrincipalStore};

#[derive(Subcommand)]
pub enum PrincipalAction {
    /// Create or replace a principal record
    Set {
        subject: String,
        #[arg(long)]
        role: String,
        #[arg(long = "permission", short = 'p')]
        permissions: Vec<String>,
    },
    /// Show one principal record
    Get { subject: String },
    /// List all principal records
    List,
    /// Delete a principal record
    Remove { subject: String },
}

pub async fn run(config: &PortalConfig, action: &PrincipalAction) -> Result<()> {
    let store = SqlitePrincipalStore::open(&config.web.db_path)?;
    store.migrate().await?;

    match action {
        PrincipalAction::Set {
            subject,
            role,
            permissions,
        } => {
            let role: Role = role.parse()?;
            let record = store.upsert(subject, role, permissions).await?;
            println!("Saved {} as {}", record.subject, record.role);
        }
        PrincipalAction::Get { subject } => match store.get(subject).await? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("No record for {subject}."),
        },
        PrincipalAction::List => {
            let records = store.list().await?;
            if records.is_empty() {
                println!("No principal records.");
            }
            for r in records {
                let perms = if r.permissions.is_empty() {
                    "(role default)".to_string()
                } else {
                    r.permissions.join(", ")
                };
                println!("  {:<24} {:<11} {perms}", r.subject, r.role.as_str());
            }
        }
        PrincipalAction::Remove { subject } => {
            store.delete(subject).await?;
            println!("Removed {subject}.");
        }
    }
    Ok(())
}
