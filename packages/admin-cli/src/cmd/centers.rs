//! Vaccination center commands

use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::Subcommand;
use vax_client::NewCenter;

use crate::cmd::{or_dash, parse_time_arg, print_outcome, print_row, print_table_header};
use crate::context::AppContext;

#[derive(Subcommand)]
pub enum CentersCommand {
    /// List all vaccination centers
    List,

    /// Add a vaccination center
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        address: String,

        /// Opening time, HH:MM
        #[arg(long, value_parser = parse_time_arg)]
        opens: NaiveTime,

        /// Closing time, HH:MM
        #[arg(long, value_parser = parse_time_arg)]
        closes: NaiveTime,

        /// Doses the center can give per day
        #[arg(long)]
        capacity: u32,
    },
}

pub async fn run(ctx: &AppContext, cmd: CentersCommand) -> Result<()> {
    ctx.sign_in_if_configured().await?;

    match cmd {
        CentersCommand::List => list(ctx).await,
        CentersCommand::Add {
            name,
            address,
            opens,
            closes,
            capacity,
        } => {
            if closes <= opens {
                anyhow::bail!("Closing time must be after opening time");
            }
            let center = NewCenter {
                centre_name: name,
                address,
                opening_time: opens,
                closing_time: closes,
                dose_capacity: capacity,
            };
            let message = ctx
                .client
                .add_center(&center)
                .await
                .context("Failed to add vaccination center")?;
            print_outcome(message, "Vaccination center added successfully");
            Ok(())
        }
    }
}

async fn list(ctx: &AppContext) -> Result<()> {
    let centers = ctx
        .client
        .list_centers()
        .await
        .context("Failed to load vaccination centers")?;

    if centers.is_empty() {
        ctx.print_warning("No vaccination centers found.");
        return Ok(());
    }

    print_table_header(&[
        ("ID", 6),
        ("NAME", 28),
        ("HOURS", 13),
        ("CAPACITY", 8),
        ("DOCTORS", 7),
        ("ADDRESS", 0),
    ]);
    for center in &centers {
        let id = or_dash(center.center_id);
        let hours = match (center.opening_time, center.closing_time) {
            (Some(open), Some(close)) => {
                format!("{}-{}", open.format("%H:%M"), close.format("%H:%M"))
            }
            _ => "-".to_string(),
        };
        let capacity = or_dash(center.dose_capacity);
        let doctors = center.doctor_count().to_string();
        let address = or_dash(center.address.as_deref());
        print_row(&[
            (id.as_str(), 6),
            (center.centre_name.as_str(), 28),
            (hours.as_str(), 13),
            (capacity.as_str(), 8),
            (doctors.as_str(), 7),
            (address.as_str(), 0),
        ]);
    }
    Ok(())
}
