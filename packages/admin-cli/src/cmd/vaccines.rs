//! Vaccine catalog commands

use anyhow::{Context, Result};
use clap::Subcommand;
use vax_client::{NewVaccine, Vaccine};

use crate::cmd::{or_dash, print_outcome, print_row, print_table_header};
use crate::context::AppContext;

#[derive(Subcommand)]
pub enum VaccinesCommand {
    /// List vaccines, optionally only those a doctor administers
    List {
        #[arg(long = "doctor", value_name = "DOCTOR_ID")]
        doctor_id: Option<i64>,
    },

    /// Show one vaccine
    Show { id: i64 },

    /// Add a vaccine to the catalog
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        manufacturer: String,

        #[arg(long, default_value_t = 1)]
        doses: u32,

        /// Eligible ages, e.g. 18-60
        #[arg(long)]
        age_range: String,

        #[arg(long, default_value = "Available")]
        status: String,
    },

    /// Let a doctor administer a vaccine
    LinkDoctor {
        #[arg(long = "vaccine", value_name = "VACCINE_ID")]
        vaccine_id: i64,

        #[arg(long = "doctor", value_name = "DOCTOR_ID")]
        doctor_id: i64,
    },
}

pub async fn run(ctx: &AppContext, cmd: VaccinesCommand) -> Result<()> {
    ctx.sign_in_if_configured().await?;

    match cmd {
        VaccinesCommand::List { doctor_id } => {
            let vaccines = match doctor_id {
                Some(id) => ctx
                    .client
                    .vaccines_for_doctor(id)
                    .await
                    .with_context(|| format!("Failed to load vaccines for doctor {}", id))?,
                None => ctx
                    .client
                    .list_vaccines()
                    .await
                    .context("Failed to load vaccines")?,
            };
            print_vaccines(ctx, &vaccines);
            Ok(())
        }
        VaccinesCommand::Show { id } => {
            let vaccine = ctx
                .client
                .get_vaccine(id)
                .await
                .with_context(|| format!("Failed to load vaccine {}", id))?;
            ctx.print_header(&vaccine.vaccine_name);
            println!("id:             {}", vaccine.id);
            println!("manufacturer:   {}", or_dash(vaccine.manufacturer.as_deref()));
            println!("doses required: {}", or_dash(vaccine.doses_required));
            println!("age range:      {}", or_dash(vaccine.age_range.as_deref()));
            println!("status:         {}", or_dash(vaccine.status.as_deref()));
            Ok(())
        }
        VaccinesCommand::Add {
            name,
            manufacturer,
            doses,
            age_range,
            status,
        } => {
            let vaccine = NewVaccine {
                vaccine_name: name,
                manufacturer,
                doses_required: doses,
                age_range,
                status,
            };
            let message = ctx
                .client
                .add_vaccine(&vaccine)
                .await
                .context("Failed to add vaccine")?;
            print_outcome(message, "Vaccine added successfully");
            Ok(())
        }
        VaccinesCommand::LinkDoctor {
            vaccine_id,
            doctor_id,
        } => {
            let message = ctx
                .client
                .link_vaccine_to_doctor(vaccine_id, doctor_id)
                .await
                .context("Failed to link vaccine to doctor")?;
            print_outcome(message, "Vaccine linked to doctor");
            Ok(())
        }
    }
}

fn print_vaccines(ctx: &AppContext, vaccines: &[Vaccine]) {
    if vaccines.is_empty() {
        ctx.print_warning("No vaccines found.");
        return;
    }

    print_table_header(&[
        ("ID", 6),
        ("NAME", 24),
        ("MANUFACTURER", 20),
        ("DOSES", 5),
        ("AGES", 8),
        ("STATUS", 0),
    ]);
    for vaccine in vaccines {
        let id = vaccine.id.to_string();
        let manufacturer = or_dash(vaccine.manufacturer.as_deref());
        let doses = or_dash(vaccine.doses_required);
        let ages = or_dash(vaccine.age_range.as_deref());
        let status = or_dash(vaccine.status.as_deref());
        print_row(&[
            (id.as_str(), 6),
            (vaccine.vaccine_name.as_str(), 24),
            (manufacturer.as_str(), 20),
            (doses.as_str(), 5),
            (ages.as_str(), 8),
            (status.as_str(), 0),
        ]);
    }
}
