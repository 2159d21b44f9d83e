//! Officer account commands. These act directly on the store, without a
//! session, so the first ADMIN can be bootstrapped.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use precinct_auth::{AuditWriter, PasswordHasher, PasswordValidator};
use precinct_core::error::AppError;
use precinct_core::types::pagination::PageRequest;
use precinct_database::Database;
use precinct_entity::audit::action;
use precinct_entity::officer::{NewOfficer, Officer, OfficerFilter, Rank};

use crate::output::{self, OutputFormat};

/// Actor recorded in the access log for CLI changes.
const CLI_ACTOR: &str = "cli";

/// Arguments for officer commands
#[derive(Debug, Args)]
pub struct OfficerArgs {
    /// Officer subcommand
    #[command(subcommand)]
    pub command: OfficerCommand,
}

/// Officer subcommands
#[derive(Debug, Subcommand)]
pub enum OfficerCommand {
    /// Create an officer (prompts for anything not given)
    Create {
        /// Badge id
        #[arg(long)]
        officer_id: Option<String>,
        /// Full name
        #[arg(long)]
        name: Option<String>,
        /// Rank label, e.g. "ADMIN" or "Chief Inspector"
        #[arg(long, default_value = "ADMIN")]
        rank: Rank,
        /// Designation, e.g. "CID" or "Traffic"
        #[arg(long)]
        designation: Option<String>,
        /// Email
        #[arg(long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(long)]
        password: Option<String>,
    },
    /// List officers
    List {
        /// Filter by rank label
        #[arg(short, long)]
        rank: Option<Rank>,
        /// Include disabled accounts
        #[arg(long)]
        all: bool,
    },
    /// Disable an officer account
    Disable {
        /// Badge id
        officer_id: String,
    },
    /// Re-enable an officer account
    Enable {
        /// Badge id
        officer_id: String,
    },
}

/// Officer display row for table output
#[derive(Debug, Serialize, Tabled)]
struct OfficerRow {
    officer_id: String,
    name: String,
    rank: String,
    designation: String,
    email: String,
    disabled: bool,
    created_at: String,
}

impl From<&Officer> for OfficerRow {
    fn from(o: &Officer) -> Self {
        Self {
            officer_id: o.officer_id.clone(),
            name: o.name.clone(),
            rank: o.rank.to_string(),
            designation: o.designation.clone().unwrap_or_default(),
            email: o.email.clone().unwrap_or_default(),
            disabled: o.disabled,
            created_at: o.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

fn prompt_text(prompt: &str) -> Result<String, AppError> {
    dialoguer::Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

/// Execute officer commands
pub async fn execute(
    args: &OfficerArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let db = super::connect(&config).await?;
    let audit = AuditWriter::new(db.audit.clone());

    match &args.command {
        OfficerCommand::Create {
            officer_id,
            name,
            rank,
            designation,
            email,
            password,
        } => {
            let officer_id = match officer_id {
                Some(id) => id.clone(),
                None => prompt_text("Badge id")?,
            };
            let name = match name {
                Some(n) => n.clone(),
                None => prompt_text("Full name")?,
            };

            if db.officers.find_by_id(&officer_id).await?.is_some() {
                return Err(AppError::conflict(format!(
                    "Officer '{officer_id}' already exists"
                )));
            }

            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            PasswordValidator::new(&config.auth)
                .validate(&password, &[officer_id.as_str(), name.as_str()])?;
            let password_hash = PasswordHasher::new().hash_password(&password)?;

            let officer = db
                .officers
                .insert(NewOfficer {
                    officer_id: officer_id.clone(),
                    name,
                    gender: None,
                    rank: *rank,
                    designation: designation.clone(),
                    email: email.clone(),
                    phone: None,
                    password_hash,
                })
                .await?;

            audit
                .record(
                    CLI_ACTOR,
                    action::OFFICER_CREATE,
                    &format!("Created officer {officer_id} ({rank}) from the command line"),
                    None,
                )
                .await;

            output::print_success(&format!("Officer '{}' created", officer.officer_id));
            output::print_kv("Rank", officer.rank.as_str());
            output::print_kv(
                "Dashboard",
                precinct_auth::role::classify_officer(&officer).as_str(),
            );
        }
        OfficerCommand::List { rank, all } => {
            let filter = OfficerFilter {
                rank: *rank,
                disabled: if *all { None } else { Some(false) },
                ..OfficerFilter::default()
            };

            let mut page = PageRequest::new(1, 100);
            let mut rows: Vec<OfficerRow> = Vec::new();
            loop {
                let result = db.officers.list(&filter, &page).await?;
                rows.extend(result.items.iter().map(OfficerRow::from));
                if !result.has_next {
                    break;
                }
                page.page += 1;
            }

            output::print_list(&rows, format, "No officers match.");
        }
        OfficerCommand::Disable { officer_id } => {
            set_disabled(&db, &audit, officer_id, true).await?;
            output::print_success(&format!("Officer '{officer_id}' disabled"));
        }
        OfficerCommand::Enable { officer_id } => {
            set_disabled(&db, &audit, officer_id, false).await?;
            output::print_success(&format!("Officer '{officer_id}' enabled"));
        }
    }

    Ok(())
}

async fn set_disabled(
    db: &Database,
    audit: &AuditWriter,
    officer_id: &str,
    disabled: bool,
) -> Result<(), AppError> {
    if db.officers.find_by_id(officer_id).await?.is_none() {
        return Err(AppError::not_found(format!("Officer '{officer_id}' not found")));
    }

    db.officers.set_disabled(officer_id, disabled).await?;

    let (tag, verb) = if disabled {
        (action::OFFICER_DISABLE, "Disabled")
    } else {
        (action::OFFICER_ENABLE, "Enabled")
    };
    audit
        .record(
            CLI_ACTOR,
            tag,
            &format!("{verb} officer {officer_id} from the command line"),
            None,
        )
        .await;

    Ok(())
}
