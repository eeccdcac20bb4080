//! Dose commands

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::cmd::print_outcome;
use crate::context::AppContext;

#[derive(Subcommand)]
pub enum DosesCommand {
    /// Record a dose given to a user
    Give {
        /// Dose identifier printed on the vial or batch
        #[arg(long = "dose", value_name = "DOSE_ID")]
        dose_id: String,

        #[arg(long = "user", value_name = "USER_ID")]
        user_id: i64,
    },
}

pub async fn run(ctx: &AppContext, cmd: DosesCommand) -> Result<()> {
    ctx.sign_in_if_configured().await?;

    match cmd {
        DosesCommand::Give { dose_id, user_id } => {
            let dose_id = dose_id.trim();
            if dose_id.is_empty() {
                anyhow::bail!("Dose ID is required");
            }
            let message = ctx
                .client
                .give_dose(dose_id, user_id)
                .await
                .with_context(|| format!("Failed to record dose for user {}", user_id))?;
            print_outcome(message, "Dose recorded successfully");
            Ok(())
        }
    }
}
