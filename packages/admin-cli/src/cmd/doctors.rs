//! Doctor commands

use anyhow::{Context, Result};
use clap::Subcommand;
use vax_client::{DoctorCenterLink, Gender, NewDoctor};

use crate::cmd::{or_dash, print_outcome, print_row, print_table_header};
use crate::context::AppContext;

#[derive(Subcommand)]
pub enum DoctorsCommand {
    /// List all doctors
    List,

    /// Add a doctor
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: u32,

        /// MALE, FEMALE or OTHER
        #[arg(long)]
        gender: Gender,

        #[arg(long)]
        email: String,
    },

    /// Assign a doctor to a vaccination center
    LinkCenter {
        #[arg(long = "doctor", value_name = "DOCTOR_ID")]
        doctor_id: i64,

        #[arg(long = "center", value_name = "CENTER_ID")]
        center_id: i64,
    },
}

pub async fn run(ctx: &AppContext, cmd: DoctorsCommand) -> Result<()> {
    ctx.sign_in_if_configured().await?;

    match cmd {
        DoctorsCommand::List => list(ctx).await,
        DoctorsCommand::Add {
            name,
            age,
            gender,
            email,
        } => {
            let doctor = NewDoctor {
                name,
                age,
                gender,
                email_id: email,
            };
            let message = ctx
                .client
                .add_doctor(&doctor)
                .await
                .context("Failed to add doctor")?;
            print_outcome(message, "Doctor added successfully");
            Ok(())
        }
        DoctorsCommand::LinkCenter {
            doctor_id,
            center_id,
        } => {
            let message = ctx
                .client
                .link_doctor_to_center(DoctorCenterLink {
                    doc_id: doctor_id,
                    center_id,
                })
                .await
                .context("Failed to assign doctor to center")?;
            print_outcome(message, "Doctor assigned to center");
            Ok(())
        }
    }
}

async fn list(ctx: &AppContext) -> Result<()> {
    let doctors = ctx
        .client
        .list_doctors()
        .await
        .context("Failed to load doctors")?;

    if doctors.is_empty() {
        ctx.print_warning("No doctors found.");
        return Ok(());
    }

    print_table_header(&[("ID", 6), ("NAME", 24), ("AGE", 4), ("GENDER", 7), ("EMAIL", 0)]);
    for doctor in &doctors {
        let id = doctor.doc_id.to_string();
        let age = or_dash(doctor.age);
        let gender = or_dash(doctor.gender);
        let email = or_dash(doctor.email_id.as_deref());
        print_row(&[
            (id.as_str(), 6),
            (doctor.name.as_str(), 24),
            (age.as_str(), 4),
            (gender.as_str(), 7),
            (email.as_str(), 0),
        ]);
    }
    Ok(())
}
