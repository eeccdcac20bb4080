//! Account commands: register, login, email change, lookup.

use anyhow::{Context, Result};
use console::style;
use vax_flows::validation::mask_email;
use vax_flows::{EmailChangeFlow, FlowError, RegistrationFlow};

use crate::cmd::print_field_errors;
use crate::context::{confirm, secret, text, AppContext};

/// Typed at an OTP prompt to leave the verification step.
const BACK: &str = "b";

enum VerifyOutcome {
    Verified,
    WentBack,
}

/// Interactive registration: email + password, then the emailed code.
pub async fn register(ctx: &AppContext) -> Result<()> {
    ctx.print_header("Register admin account");

    let mut flow = RegistrationFlow::new(
        ctx.client.clone(),
        ctx.notifier(),
        ctx.config.flow_config(),
    );
    flow.open();

    loop {
        if !register_step(ctx, &mut flow).await? {
            return Ok(());
        }
        match verify_step(ctx, &mut flow).await? {
            VerifyOutcome::Verified => return Ok(()),
            VerifyOutcome::WentBack => ctx.print_info("Back to registration."),
        }
    }
}

/// Returns `false` when the user gives up.
async fn register_step<B, N>(ctx: &AppContext, flow: &mut RegistrationFlow<B, N>) -> Result<bool>
where
    B: vax_flows::AuthBackend,
    N: vax_flows::Notifier,
{
    loop {
        let email = text("Email").await?;
        let password = secret("Password (min 6 characters)").await?;
        flow.set_email(email);
        flow.set_password(password);

        match flow.submit_register().await {
            Ok(()) => return Ok(true),
            Err(e) if print_field_errors(ctx, &e) => continue,
            Err(FlowError::Rejected(_)) => {
                if !confirm("Try again?", true).await? {
                    return Ok(false);
                }
            }
            Err(e) => return Err(e).context("Registration failed"),
        }
    }
}

async fn verify_step<B, N>(
    ctx: &AppContext,
    flow: &mut RegistrationFlow<B, N>,
) -> Result<VerifyOutcome>
where
    B: vax_flows::AuthBackend,
    N: vax_flows::Notifier,
{
    if let Some(email) = flow.verification_email() {
        ctx.print_info(&format!("Enter the code sent to {}", mask_email(email)));
    }

    loop {
        let prompt = match flow.countdown_display() {
            Some(remaining) => format!("6-digit code ({} left, '{}' to go back)", remaining, BACK),
            None => format!("6-digit code (expired, '{}' to go back)", BACK),
        };
        let raw = text(&prompt).await?;
        if raw.trim().eq_ignore_ascii_case(BACK) {
            flow.go_back();
            return Ok(VerifyOutcome::WentBack);
        }

        flow.input_otp(&raw);
        match flow.submit_verify().await {
            Ok(()) => {
                ctx.print_success("Account verified. You can now log in.");
                return Ok(VerifyOutcome::Verified);
            }
            Err(e) if print_field_errors(ctx, &e) => {}
            Err(FlowError::Rejected(_)) => {
                if flow.countdown_display().is_none() {
                    ctx.print_warning("The code has expired. Go back to request a new one.");
                }
            }
            Err(e) => return Err(e).context("Verification failed"),
        }
    }
}

pub async fn login(ctx: &AppContext) -> Result<()> {
    ctx.print_header(&format!("Logging in to {}", ctx.client.base_url()));
    ctx.sign_in().await
}

/// Interactive email change for the logged-in account.
pub async fn update_email(ctx: &AppContext) -> Result<()> {
    ctx.print_header("Change account email");
    ctx.sign_in().await?;

    let mut flow = EmailChangeFlow::new(ctx.client.clone(), ctx.notifier());

    while !flow.is_completed() {
        if flow.pending_email().is_none() {
            flow.set_new_email(text("New email").await?);
            match flow.submit_request().await {
                Ok(_) => {}
                Err(e) if print_field_errors(ctx, &e) => continue,
                Err(FlowError::Rejected(_)) => {
                    if !confirm("Try again?", true).await? {
                        return Ok(());
                    }
                    continue;
                }
                Err(e) => return Err(e).context("Email change failed"),
            }
        }

        let raw = text(&format!("6-digit code ('{}' to use another address)", BACK)).await?;
        if raw.trim().eq_ignore_ascii_case(BACK) {
            flow.cancel();
            continue;
        }
        flow.input_otp(&raw);
        match flow.submit_confirmation().await {
            Ok(()) => {}
            Err(e) if print_field_errors(ctx, &e) => {}
            Err(FlowError::Rejected(_)) => {}
            Err(e) => return Err(e).context("Email change failed"),
        }
    }

    ctx.print_info("Your session has ended. Log in again with the new address.");
    Ok(())
}

/// `account <email>`
pub async fn account(ctx: &AppContext, email: &str) -> Result<()> {
    ctx.sign_in_if_configured().await?;
    let account = ctx
        .client
        .find_account(email)
        .await
        .with_context(|| format!("Failed to look up {}", email))?;

    let verified = if account.email_verified {
        style("verified").green()
    } else {
        style("unverified").yellow()
    };
    println!("{}  {}", account.email, verified);
    if let Some(role) = account.role {
        println!("role: {}", role);
    }
    Ok(())
}
