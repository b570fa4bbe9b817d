//! Medbill CLI - Doctor production, transfers and balances
//!
//! Simple CLI for interacting with the Medbill API.

mod api;
mod config;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Password};
use rust_decimal::Decimal;
use uuid::Uuid;

use medbill::{
    format_brl, DateRange, FinancialSummary, FinancialSummaryEngine, RecordFilter, SummaryQuery,
};

use api::{
    CreateDoctorRequest, CreateHospitalRequest, CreateProductionRequest, CreateTransferRequest,
    MedbillClient, UpdateDoctorRequest, UpdateHospitalRequest, UpdateProductionRequest,
    UpdateTransferRequest,
};
use config::Config;

#[derive(Parser)]
#[command(name = "medbill")]
#[command(about = "Medbill CLI - Doctor production, transfers and balances", long_about = None)]
#[command(version)]
struct Cli {
    /// Log HTTP traffic (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Show current configuration
    Config,

    /// Manage profiles (doctor shortcuts)
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Doctor registry
    Doctor {
        #[command(subcommand)]
        action: DoctorAction,
    },

    /// Hospital registry
    Hospital {
        #[command(subcommand)]
        action: HospitalAction,
    },

    /// Production records
    Production {
        #[command(subcommand)]
        action: LedgerAction,
    },

    /// Transfer records
    Transfer {
        #[command(subcommand)]
        action: LedgerAction,
    },

    /// Financial summary of a doctor
    Summary {
        /// Profile to use
        #[arg(short, long)]
        profile: Option<String>,
        /// Doctor ID (overrides profile)
        #[arg(short, long)]
        doctor: Option<Uuid>,
        /// First day included (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day included (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Compute from fetched records instead of asking the server
        #[arg(long)]
        local: bool,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Add a new profile
    Add {
        /// Profile name (e.g., "ana")
        name: String,
        /// Doctor ID
        #[arg(long)]
        doctor_id: Uuid,
        /// Display name (optional)
        #[arg(long)]
        display_name: Option<String>,
    },
    /// List all profiles
    List,
    /// Set default profile
    Set {
        /// Profile name to set as default
        name: String,
    },
    /// Remove a profile
    Remove {
        /// Profile name to remove
        name: String,
    },
}

#[derive(Subcommand)]
enum DoctorAction {
    /// List all doctors
    List,
    /// Register a doctor
    Add {
        #[arg(long)]
        name: String,
        /// License code (CRM)
        #[arg(long)]
        crm: String,
        #[arg(long)]
        specialty: String,
    },
    /// Change a doctor's fields
    Update {
        /// Doctor ID
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        /// License code (CRM)
        #[arg(long)]
        crm: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Delete a doctor with all of its productions and transfers
    Remove {
        /// Doctor ID
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum HospitalAction {
    /// List all hospitals
    List,
    /// Register a hospital
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
    },
    /// Change a hospital's fields
    Update {
        /// Hospital ID
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
    },
    /// Delete a hospital with all of its productions and transfers
    Remove {
        /// Hospital ID
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct LedgerFilterArgs {
    /// Doctor ID or profile name
    #[arg(short, long)]
    doctor: Option<String>,
    /// Hospital ID
    #[arg(long)]
    hospital: Option<Uuid>,
    /// First day included (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day included (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum LedgerAction {
    /// List records, newest first
    List {
        #[command(flatten)]
        filter: LedgerFilterArgs,
    },
    /// Record a new amount
    Add {
        /// Doctor ID or profile name (defaults to the default profile)
        #[arg(short, long)]
        doctor: Option<String>,
        /// Hospital ID
        #[arg(long)]
        hospital: Uuid,
        /// Amount, at most two decimal places
        #[arg(short, long)]
        amount: Decimal,
        /// Date of the record (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Change a record's fields
    Update {
        /// Record ID
        id: Uuid,
        /// Doctor ID or profile name
        #[arg(short, long)]
        doctor: Option<String>,
        /// Hospital ID
        #[arg(long)]
        hospital: Option<Uuid>,
        /// Amount, at most two decimal places
        #[arg(short, long)]
        amount: Option<Decimal>,
        /// Date of the record (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a record
    Remove {
        /// Record ID
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Clone, Copy)]
enum LedgerKind {
    Production,
    Transfer,
}

impl LedgerKind {
    fn label(self) -> &'static str {
        match self {
            Self::Production => "Production",
            Self::Transfer => "Transfer",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Config => cmd_config(),
        Commands::Profile { action } => cmd_profile(action).await,
        Commands::Doctor { action } => cmd_doctor(action).await,
        Commands::Hospital { action } => cmd_hospital(action).await,
        Commands::Production { action } => cmd_ledger(LedgerKind::Production, action).await,
        Commands::Transfer { action } => cmd_ledger(LedgerKind::Transfer, action).await,
        Commands::Summary {
            profile,
            doctor,
            from,
            to,
            local,
        } => cmd_summary(profile, doctor, DateRange::new(from, to), local).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "medbill=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================
// Helpers
// ============================================

fn client(config: &Config) -> Result<MedbillClient> {
    let api_key = config
        .api_key
        .as_deref()
        .context("Not logged in. Run 'medbill login' first.")?;
    Ok(MedbillClient::new(&config.base_url, Some(api_key)))
}

/// Doctor from an explicit ID, a profile name, or the default profile
fn resolve_doctor(config: &Config, doctor: Option<&str>) -> Result<Uuid> {
    match doctor {
        Some(value) => match value.parse::<Uuid>() {
            Ok(id) => Ok(id),
            Err(_) => config
                .get_doctor_id(Some(value))
                .with_context(|| format!("'{}' is neither a doctor ID nor a profile", value)),
        },
        None => config
            .get_doctor_id(None)
            .context("No doctor specified and no default profile set. Use -d <doctor> or set a default."),
    }
}

/// Ask before deleting unless `--yes` was given
fn confirm_removal(what: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(format!("Delete {}?", what))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn describe_period(period: &DateRange) -> String {
    match (period.start, period.end) {
        (None, None) => "all time".to_string(),
        (Some(start), None) => format!("from {}", start),
        (None, Some(end)) => format!("until {}", end),
        (Some(start), Some(end)) => format!("{} to {}", start, end),
    }
}

fn render_summary(summary: &FinancialSummary) -> Vec<String> {
    vec![
        format!("  Produced:    {}", format_brl(summary.total_produced)),
        format!("  Transferred: {}", format_brl(summary.total_transferred)),
        format!("  Balance:     {}", format_brl(summary.balance)),
    ]
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    // Test connection and key
    let client = MedbillClient::new(&config.base_url, Some(&api_key));
    print!("Testing connection... ");

    if !client.health().await.unwrap_or(false) {
        println!("{}", "Failed".red());
        bail!("Could not reach Medbill API at {}", config.base_url);
    }

    match client.profile().await {
        Ok(profile) => {
            println!("{} (signed in as {})", "OK".green(), profile.username.cyan());
            if !profile.authentication_enabled {
                println!(
                    "{}",
                    "Warning: the server does not enforce API keys".yellow()
                );
            }
        }
        Err(e) => {
            println!("{}", "Failed".red());
            bail!("Could not connect to Medbill API. Check your API key. ({})", e);
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    if config.profiles.is_empty() {
        println!("\n{}", "Tip: Set up a profile to avoid typing doctor IDs:".yellow());
        println!("  medbill doctor list");
        println!("  medbill profile add ana --doctor-id <DOCTOR_ID>");
        println!("  medbill profile set ana");
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  API Key: {}",
        if config.api_key.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );
    println!(
        "  Default Profile: {}",
        config.default_profile.as_deref().unwrap_or("None").cyan()
    );
    println!("  Profiles: {}", config.profiles.len());

    Ok(())
}

async fn cmd_profile(action: ProfileAction) -> Result<()> {
    // Environment overrides must not end up in the saved file
    let mut config = Config::load_file()?;
    let effective = Config::load()?;

    match action {
        ProfileAction::Add {
            name,
            doctor_id,
            display_name,
        } => {
            // Verify the doctor exists if we have an API key
            if let Some(api_key) = &effective.api_key {
                let client = MedbillClient::new(&effective.base_url, Some(api_key));
                let doctor = client
                    .get_doctor(doctor_id)
                    .await
                    .context("Could not verify doctor")?;
                let display = display_name.unwrap_or(doctor.name);
                config.add_profile(name.clone(), doctor_id, Some(display.clone()));
                config.save()?;
                println!("{} Profile '{}' added ({})", "✓".green(), name, display);
            } else {
                config.add_profile(name.clone(), doctor_id, display_name);
                config.save()?;
                println!(
                    "{} Profile '{}' added (unverified - no API key)",
                    "✓".yellow(),
                    name
                );
            }
        }

        ProfileAction::List => {
            if config.profiles.is_empty() {
                println!("No profiles configured.");
                println!("\n{}", "Add one with:".dimmed());
                println!("  medbill profile add <name> --doctor-id <DOCTOR_ID>");
                return Ok(());
            }

            println!("{}", "Profiles:".bold());
            for (name, profile) in &config.profiles {
                let is_default = config.default_profile.as_ref() == Some(name);
                let default_marker = if is_default {
                    " (default)".green().to_string()
                } else {
                    String::new()
                };
                let display_name = profile.name.as_deref().unwrap_or("-");

                println!(
                    "  {} {} ({}){}",
                    name.cyan(),
                    display_name.dimmed(),
                    short_id(profile.doctor_id),
                    default_marker
                );
            }
        }

        ProfileAction::Set { name } => {
            if config.set_default_profile(name.clone()) {
                config.save()?;
                println!("{} Default profile set to '{}'", "✓".green(), name);
            } else {
                bail!("Profile '{}' not found", name);
            }
        }

        ProfileAction::Remove { name } => {
            if config.remove_profile(&name) {
                config.save()?;
                println!("{} Profile '{}' removed", "✓".green(), name);
            } else {
                bail!("Profile '{}' not found", name);
            }
        }
    }

    Ok(())
}

async fn cmd_doctor(action: DoctorAction) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config)?;

    match action {
        DoctorAction::List => {
            let doctors = client.list_doctors().await?;

            if doctors.is_empty() {
                println!("No doctors found.");
                return Ok(());
            }

            println!("{}", "Doctors:".bold());
            for doctor in doctors {
                println!(
                    "  {} {} [{}] {}",
                    doctor.id.to_string().dimmed(),
                    doctor.name.cyan().bold(),
                    doctor.crm,
                    doctor.specialty.dimmed()
                );
            }

            println!("\n{}", "Add a profile shortcut:".dimmed());
            println!("  medbill profile add <name> --doctor-id <ID>");
        }

        DoctorAction::Add {
            name,
            crm,
            specialty,
        } => {
            let doctor = client
                .create_doctor(&CreateDoctorRequest {
                    name,
                    crm,
                    specialty,
                })
                .await?;
            println!(
                "{} Doctor {} registered ({})",
                "✓".green(),
                doctor.name.cyan(),
                doctor.id
            );
        }

        DoctorAction::Update {
            id,
            name,
            crm,
            specialty,
        } => {
            let request = UpdateDoctorRequest {
                name,
                crm,
                specialty,
            };
            if request.name.is_none() && request.crm.is_none() && request.specialty.is_none() {
                bail!("Nothing to update. Pass --name, --crm or --specialty.");
            }
            let doctor = client.update_doctor(id, &request).await?;
            println!(
                "{} Doctor {} updated [{}] {}",
                "✓".green(),
                doctor.name.cyan(),
                doctor.crm,
                doctor.specialty.dimmed()
            );
        }

        DoctorAction::Remove { id, yes } => {
            let doctor = client.get_doctor(id).await?;
            let what = format!("doctor {} and all of its records", doctor.name);
            if !confirm_removal(&what, yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            client.delete_doctor(id).await?;
            println!("{} Doctor {} deleted", "✓".green(), doctor.name.cyan());
        }
    }

    Ok(())
}

async fn cmd_hospital(action: HospitalAction) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config)?;

    match action {
        HospitalAction::List => {
            let hospitals = client.list_hospitals().await?;

            if hospitals.is_empty() {
                println!("No hospitals found.");
                return Ok(());
            }

            println!("{}", "Hospitals:".bold());
            for hospital in hospitals {
                println!(
                    "  {} {} [{}]",
                    hospital.id.to_string().dimmed(),
                    hospital.name.cyan().bold(),
                    hospital.code
                );
            }
        }

        HospitalAction::Add { name, code } => {
            let hospital = client
                .create_hospital(&CreateHospitalRequest { name, code })
                .await?;
            println!(
                "{} Hospital {} registered ({})",
                "✓".green(),
                hospital.name.cyan(),
                hospital.id
            );
        }

        HospitalAction::Update { id, name, code } => {
            if name.is_none() && code.is_none() {
                bail!("Nothing to update. Pass --name or --code.");
            }
            let hospital = client
                .update_hospital(id, &UpdateHospitalRequest { name, code })
                .await?;
            println!(
                "{} Hospital {} updated [{}]",
                "✓".green(),
                hospital.name.cyan(),
                hospital.code
            );
        }

        HospitalAction::Remove { id, yes } => {
            if !confirm_removal(&format!("hospital {} and all of its records", id), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            client.delete_hospital(id).await?;
            println!("{} Hospital {} deleted", "✓".green(), id);
        }
    }

    Ok(())
}

async fn cmd_ledger(kind: LedgerKind, action: LedgerAction) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config)?;

    match action {
        LedgerAction::List { filter } => {
            let record_filter = RecordFilter {
                doctor: filter
                    .doctor
                    .as_deref()
                    .map(|d| resolve_doctor(&config, Some(d)))
                    .transpose()?,
                hospital: filter.hospital,
                period: DateRange::new(filter.from, filter.to),
            };

            // (date, amount, doctor, hospital)
            let rows: Vec<(NaiveDate, Decimal, Uuid, Uuid)> = match kind {
                LedgerKind::Production => client
                    .list_productions(&record_filter)
                    .await?
                    .into_iter()
                    .map(|p| (p.production_date, p.amount, p.doctor, p.hospital))
                    .collect(),
                LedgerKind::Transfer => client
                    .list_transfers(&record_filter)
                    .await?
                    .into_iter()
                    .map(|t| (t.transfer_date, t.amount, t.doctor, t.hospital))
                    .collect(),
            };

            if rows.is_empty() {
                println!("No {} records found.", kind.label().to_lowercase());
                return Ok(());
            }

            println!("{}", format!("{}s:", kind.label()).bold());
            for (date, amount, doctor, hospital) in &rows {
                println!(
                    "  {} {:>16}  doctor {} hospital {}",
                    date,
                    format_brl(*amount),
                    short_id(*doctor).dimmed(),
                    short_id(*hospital).dimmed()
                );
            }
            let total: Decimal = rows.iter().map(|(_, amount, _, _)| *amount).sum();
            println!("  {} {}", "Total:".bold(), format_brl(total).green());
        }

        LedgerAction::Add {
            doctor,
            hospital,
            amount,
            date,
        } => {
            let doctor = resolve_doctor(&config, doctor.as_deref())?;
            let id = match kind {
                LedgerKind::Production => {
                    client
                        .create_production(&CreateProductionRequest {
                            doctor,
                            hospital,
                            amount,
                            production_date: date,
                        })
                        .await?
                        .id
                }
                LedgerKind::Transfer => {
                    client
                        .create_transfer(&CreateTransferRequest {
                            doctor,
                            hospital,
                            amount,
                            transfer_date: date,
                        })
                        .await?
                        .id
                }
            };
            println!(
                "{} {} of {} recorded on {} ({})",
                "✓".green(),
                kind.label(),
                format_brl(amount).cyan(),
                date,
                id
            );
        }

        LedgerAction::Update {
            id,
            doctor,
            hospital,
            amount,
            date,
        } => {
            if doctor.is_none() && hospital.is_none() && amount.is_none() && date.is_none() {
                bail!("Nothing to update. Pass --doctor, --hospital, --amount or --date.");
            }
            let doctor = doctor
                .as_deref()
                .map(|d| resolve_doctor(&config, Some(d)))
                .transpose()?;

            let (amount, date) = match kind {
                LedgerKind::Production => {
                    let production = client
                        .update_production(
                            id,
                            &UpdateProductionRequest {
                                doctor,
                                hospital,
                                amount,
                                production_date: date,
                            },
                        )
                        .await?;
                    (production.amount, production.production_date)
                }
                LedgerKind::Transfer => {
                    let transfer = client
                        .update_transfer(
                            id,
                            &UpdateTransferRequest {
                                doctor,
                                hospital,
                                amount,
                                transfer_date: date,
                            },
                        )
                        .await?;
                    (transfer.amount, transfer.transfer_date)
                }
            };
            println!(
                "{} {} {} updated: {} on {}",
                "✓".green(),
                kind.label(),
                short_id(id),
                format_brl(amount).cyan(),
                date
            );
        }

        LedgerAction::Remove { id, yes } => {
            let what = format!("{} {}", kind.label().to_lowercase(), id);
            if !confirm_removal(&what, yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            match kind {
                LedgerKind::Production => client.delete_production(id).await?,
                LedgerKind::Transfer => client.delete_transfer(id).await?,
            }
            println!("{} {} {} deleted", "✓".green(), kind.label(), short_id(id));
        }
    }

    Ok(())
}

async fn cmd_summary(
    profile: Option<String>,
    doctor: Option<Uuid>,
    period: DateRange,
    local: bool,
) -> Result<()> {
    let config = Config::load()?;

    let doctor_id = match doctor {
        Some(id) => id,
        None => config
            .get_doctor_id(profile.as_deref())
            .context("No profile specified and no default profile set. Use -p <profile>, -d <doctor> or set a default.")?,
    };

    let client = client(&config)?;
    let doctor = client.get_doctor(doctor_id).await?;

    let summary = if local {
        let engine = FinancialSummaryEngine::new(Arc::new(client));
        engine
            .summarize(&SummaryQuery::new(doctor_id, period))
            .await?
            .rounded()
    } else {
        client.financial_summary(doctor_id, &period).await?
    };

    println!(
        "{} {} [{}] - {}{}",
        "Financial summary for".bold(),
        doctor.name.cyan(),
        doctor.crm,
        describe_period(&period),
        if local { " (computed locally)".dimmed().to_string() } else { String::new() }
    );
    for line in render_summary(&summary) {
        println!("{}", line);
    }
    if summary.balance.is_sign_negative() && !summary.balance.is_zero() {
        println!("  {}", "Transfers exceed production for this period".yellow());
    }

    Ok(())
}
