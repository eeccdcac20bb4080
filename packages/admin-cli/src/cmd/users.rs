//! User commands

use anyhow::{Context, Result};
use clap::Subcommand;
use vax_client::{Gender, NewUser, UserProfile};

use crate::cmd::{or_dash, print_outcome, print_row, print_table_header};
use crate::context::AppContext;

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List all users
    List,

    /// Complete the profile of a registered account
    Add {
        #[arg(long)]
        name: String,

        /// Email the account was registered with
        #[arg(long)]
        email: String,

        #[arg(long)]
        age: u32,

        /// MALE, FEMALE or OTHER
        #[arg(long)]
        gender: Gender,

        #[arg(long)]
        phone: String,
    },
}

pub async fn run(ctx: &AppContext, cmd: UsersCommand) -> Result<()> {
    ctx.sign_in_if_configured().await?;

    match cmd {
        UsersCommand::List => {
            let users = ctx
                .client
                .list_users()
                .await
                .context("Failed to load users")?;
            print_users(ctx, &users);
            Ok(())
        }
        UsersCommand::Add {
            name,
            email,
            age,
            gender,
            phone,
        } => {
            let user = NewUser {
                name,
                email,
                age,
                gender,
                contact_no: phone,
            };
            let message = ctx
                .client
                .add_user(&user)
                .await
                .context("Failed to add user")?;
            print_outcome(message, "User added successfully");
            Ok(())
        }
    }
}

/// `profile`: the logged-in account's user record.
pub async fn profile(ctx: &AppContext) -> Result<()> {
    ctx.sign_in().await?;
    let user = ctx
        .client
        .my_profile()
        .await
        .context("Failed to load profile")?;

    ctx.print_header(&user.name);
    println!("user id: {}", user.user_id);
    println!("email:   {}", or_dash(user.email_id.as_deref()));
    println!("mobile:  {}", or_dash(user.mobile_no.as_deref()));
    println!("age:     {}", or_dash(user.age));
    println!("gender:  {}", or_dash(user.gender));
    Ok(())
}

/// `vaccination-date <user-id>`
pub async fn vaccination_date(ctx: &AppContext, user_id: i64) -> Result<()> {
    ctx.sign_in_if_configured().await?;
    let date = ctx
        .client
        .vaccination_date(user_id)
        .await
        .with_context(|| format!("Failed to load vaccination date for user {}", user_id))?;

    match date {
        Some(date) => println!("{}", date),
        None => ctx.print_warning("No vaccination scheduled."),
    }
    Ok(())
}

fn print_users(ctx: &AppContext, users: &[UserProfile]) {
    if users.is_empty() {
        ctx.print_warning("No users found.");
        return;
    }

    print_table_header(&[
        ("ID", 6),
        ("NAME", 24),
        ("AGE", 4),
        ("GENDER", 7),
        ("MOBILE", 14),
        ("EMAIL", 0),
    ]);
    for user in users {
        let id = user.user_id.to_string();
        let age = or_dash(user.age);
        let gender = or_dash(user.gender);
        let mobile = or_dash(user.mobile_no.as_deref());
        let email = or_dash(user.email_id.as_deref());
        print_row(&[
            (id.as_str(), 6),
            (user.name.as_str(), 24),
            (age.as_str(), 4),
            (gender.as_str(), 7),
            (mobile.as_str(), 14),
            (email.as_str(), 0),
        ]);
    }
}
