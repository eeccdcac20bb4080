//! Appointment commands

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use vax_client::ApiClient;
use vax_flows::booking::{BOOKED, BOOKING_FAILED};
use vax_flows::{BookingForm, Notifier, VaccineFilter, TIME_SLOTS};

use crate::cmd::parse_date_arg;
use crate::context::{select, text, AppContext};

#[derive(Subcommand)]
pub enum AppointmentsCommand {
    /// Book a vaccination appointment
    ///
    /// Anything not given on the command line is asked for interactively,
    /// unless --quiet is set.
    Book {
        #[arg(long = "user", value_name = "USER_ID")]
        user_id: Option<i64>,

        #[arg(long = "doctor", value_name = "DOCTOR_ID")]
        doctor_id: Option<i64>,

        #[arg(long = "vaccine", value_name = "VACCINE_ID")]
        vaccine_id: Option<i64>,

        /// YYYY-MM-DD
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        /// HH:MM or HH:MM:SS
        #[arg(long)]
        time: Option<String>,
    },
}

pub async fn run(ctx: &AppContext, cmd: AppointmentsCommand) -> Result<()> {
    ctx.sign_in_if_configured().await?;

    match cmd {
        AppointmentsCommand::Book {
            user_id,
            doctor_id,
            vaccine_id,
            date,
            time,
        } => {
            let form = BookingForm {
                user_id,
                doctor_id,
                vaccine_id,
                date,
                time: time.unwrap_or_default(),
            };
            book(ctx, form).await
        }
    }
}

async fn book(ctx: &AppContext, mut form: BookingForm) -> Result<()> {
    ctx.print_header("Book appointment");
    let mut filter = VaccineFilter::new(ctx.client.clone());

    if form.doctor_id.is_none() && !ctx.quiet {
        form.doctor_id = pick_doctor(&ctx.client).await?;
    }
    filter.select_doctor(form.doctor_id).await;

    match form.vaccine_id {
        Some(id) => filter.select_vaccine(Some(id))?,
        None if !ctx.quiet && form.doctor_id.is_some() => {
            if filter.vaccines().is_empty() {
                anyhow::bail!(filter.placeholder());
            }
            let names = filter
                .vaccines()
                .iter()
                .map(|v| v.vaccine_name.clone())
                .collect();
            let choice = select(filter.placeholder(), names).await?;
            let id = filter.vaccines()[choice].id;
            filter.select_vaccine(Some(id))?;
        }
        None => {}
    }
    form = form.with_selection(&filter);

    if !ctx.quiet {
        if form.user_id.is_none() {
            form.user_id = pick_user(&ctx.client).await?;
        }
        if form.date.is_none() {
            let raw = text("Date (YYYY-MM-DD)").await?;
            form.date = Some(parse_date_arg(&raw).map_err(anyhow::Error::msg)?);
        }
        if form.time.trim().is_empty() {
            let slots = TIME_SLOTS.iter().map(|s| s.to_string()).collect();
            let choice = select("Time", slots).await?;
            form.time = TIME_SLOTS[choice].to_string();
        }
    }

    let request = form.to_request()?;
    let notifier = ctx.notifier();
    match ctx.client.book_appointment(&request).await {
        Ok(message) => {
            notifier.success(message.as_deref().unwrap_or(BOOKED));
            Ok(())
        }
        Err(e) => {
            notifier.error(e.user_message().unwrap_or(BOOKING_FAILED));
            Err(e).context("Failed to book appointment")
        }
    }
}

async fn pick_doctor(client: &ApiClient) -> Result<Option<i64>> {
    let doctors = client.list_doctors().await.context("Failed to load doctors")?;
    if doctors.is_empty() {
        return Ok(None);
    }
    let labels = doctors
        .iter()
        .map(|d| format!("{} (#{})", d.name, d.doc_id))
        .collect();
    let choice = select("Select Doctor", labels).await?;
    Ok(Some(doctors[choice].doc_id))
}

async fn pick_user(client: &ApiClient) -> Result<Option<i64>> {
    let users = client.list_users().await.context("Failed to load users")?;
    if users.is_empty() {
        return Ok(None);
    }
    let labels = users
        .iter()
        .map(|u| format!("{} (#{})", u.name, u.user_id))
        .collect();
    let choice = select("Select User", labels).await?;
    Ok(Some(users[choice].user_id))
}
