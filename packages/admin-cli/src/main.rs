//! Vaccination drive admin console.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;
mod config;
mod context;
mod notifier;

use crate::config::Config;
use crate::context::AppContext;

#[derive(Parser)]
#[command(name = "vaxadmin")]
#[command(about = "Admin console for the vaccination drive backend")]
#[command(version)]
struct Cli {
    /// Run in quiet mode (only errors and results)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Backend base URL (overrides VAXADMIN_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new admin account (email OTP verification)
    Register,

    /// Log in and check the credentials
    Login,

    /// Change the logged-in account's email (email OTP verification)
    UpdateEmail,

    /// Look up an account by email
    Account {
        email: String,
    },

    /// Show the logged-in user's profile
    Profile,

    /// Show a user's next vaccination date
    VaccinationDate {
        user_id: i64,
    },

    /// Doctor management
    #[command(subcommand)]
    Doctors(cmd::doctors::DoctorsCommand),

    /// Vaccination center management
    #[command(subcommand)]
    Centers(cmd::centers::CentersCommand),

    /// Vaccine catalog
    #[command(subcommand)]
    Vaccines(cmd::vaccines::VaccinesCommand),

    /// Record administered doses
    #[command(subcommand)]
    Doses(cmd::doses::DosesCommand),

    /// Vaccinee management
    #[command(subcommand)]
    Users(cmd::users::UsersCommand),

    /// Appointment booking
    #[command(subcommand)]
    Appointments(cmd::appointments::AppointmentsCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vax_client=debug,vax_flows=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()
        .context("Failed to load configuration")?
        .with_api_url(cli.api_url);
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let ctx = AppContext::new(cli.quiet, config)?;

    match cli.command {
        Commands::Register => cmd::auth::register(&ctx).await,
        Commands::Login => cmd::auth::login(&ctx).await,
        Commands::UpdateEmail => cmd::auth::update_email(&ctx).await,
        Commands::Account { email } => cmd::auth::account(&ctx, &email).await,
        Commands::Profile => cmd::users::profile(&ctx).await,
        Commands::VaccinationDate { user_id } => cmd::users::vaccination_date(&ctx, user_id).await,
        Commands::Doctors(cmd) => cmd::doctors::run(&ctx, cmd).await,
        Commands::Centers(cmd) => cmd::centers::run(&ctx, cmd).await,
        Commands::Vaccines(cmd) => cmd::vaccines::run(&ctx, cmd).await,
        Commands::Doses(cmd) => cmd::doses::run(&ctx, cmd).await,
        Commands::Users(cmd) => cmd::users::run(&ctx, cmd).await,
        Commands::Appointments(cmd) => cmd::appointments::run(&ctx, cmd).await,
    }
}
