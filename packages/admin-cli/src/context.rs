//! Application context with shared state and utilities

use anyhow::{Context, Result};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};
use tracing::info;
use vax_client::ApiClient;
use vax_flows::{login, LoginForm};

use crate::config::Config;
use crate::notifier::ConsoleNotifier;

/// Application context passed to all commands
pub struct AppContext {
    pub quiet: bool,
    pub config: Config,
    pub client: ApiClient,
}

impl AppContext {
    pub fn new(quiet: bool, config: Config) -> Result<Self> {
        let client = ApiClient::with_timeout(&config.api_url, config.request_timeout)
            .with_context(|| format!("Invalid API URL: {}", config.api_url))?;
        Ok(Self {
            quiet,
            config,
            client,
        })
    }

    pub fn notifier(&self) -> ConsoleNotifier {
        ConsoleNotifier::new(self.quiet)
    }

    /// Log in with configured credentials, prompting for whatever is missing.
    ///
    /// The session cookie lives in `self.client` for the rest of the process.
    pub async fn sign_in(&self) -> Result<()> {
        let email = match &self.config.admin_email {
            Some(email) => email.clone(),
            None => text("Admin email").await?,
        };
        let password = match &self.config.admin_password {
            Some(password) => password.clone(),
            None => secret("Password").await?,
        };

        login(&self.client, &self.notifier(), &LoginForm::new(email, password))
            .await
            .context("Login failed")?;
        info!(api_url = %self.client.base_url(), "Session opened");
        Ok(())
    }

    /// Log in only when credentials are configured.
    pub async fn sign_in_if_configured(&self) -> Result<()> {
        if self.config.admin_email.is_some() && self.config.admin_password.is_some() {
            self.sign_in().await?;
        }
        Ok(())
    }

    pub fn print_header(&self, msg: &str) {
        if !self.quiet {
            println!();
            println!("{}", style(msg).bold());
        }
    }

    pub fn print_success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).green());
        }
    }

    pub fn print_warning(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).yellow());
        }
    }

    pub fn print_info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).cyan());
        }
    }
}

// =============================================================================
// Prompts
// =============================================================================
//
// dialoguer blocks on the terminal, so every prompt runs on the blocking pool
// and the countdown task keeps ticking meanwhile.

async fn blocking<T, F>(prompt: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&ColorfulTheme) -> dialoguer::Result<T> + Send + 'static,
{
    let answer = tokio::task::spawn_blocking(move || prompt(&ColorfulTheme::default()))
        .await
        .context("Prompt task failed")??;
    Ok(answer)
}

/// Free-text input. Empty answers are not accepted.
pub async fn text(prompt: &str) -> Result<String> {
    let prompt = prompt.to_string();
    blocking(move |theme| {
        Input::<String>::with_theme(theme)
            .with_prompt(prompt)
            .interact_text()
    })
    .await
}

/// Free-text input that may be left empty.
pub async fn optional_text(prompt: &str) -> Result<Option<String>> {
    let prompt = prompt.to_string();
    let answer = blocking(move |theme| {
        Input::<String>::with_theme(theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    })
    .await?;
    Ok(Some(answer.trim().to_string()).filter(|a| !a.is_empty()))
}

pub async fn secret(prompt: &str) -> Result<String> {
    let prompt = prompt.to_string();
    blocking(move |theme| Password::with_theme(theme).with_prompt(prompt).interact()).await
}

pub async fn select(prompt: &str, items: Vec<String>) -> Result<usize> {
    let prompt = prompt.to_string();
    blocking(move |theme| {
        Select::with_theme(theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()
    })
    .await
}

pub async fn confirm(prompt: &str, default: bool) -> Result<bool> {
    let prompt = prompt.to_string();
    blocking(move |theme| {
        Confirm::with_theme(theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
    })
    .await
}
