//! Command implementations

pub mod appointments;
pub mod auth;
pub mod centers;
pub mod doctors;
pub mod doses;
pub mod users;
pub mod vaccines;

use chrono::{NaiveDate, NaiveTime};
use console::style;
use vax_client::parse_time_of_day;
use vax_flows::FlowError;

use crate::context::AppContext;

/// Print the backend's message for a write, or `fallback` when it sent none.
///
/// This is the command's result, so it prints in quiet mode too.
pub fn print_outcome(message: Option<String>, fallback: &str) {
    println!("{}", style(outcome_text(message.as_deref(), fallback)).green());
}

fn outcome_text<'a>(message: Option<&'a str>, fallback: &'a str) -> &'a str {
    message.map(str::trim).filter(|m| !m.is_empty()).unwrap_or(fallback)
}

/// Show per-field validation messages. Returns `false` for any other error.
pub fn print_field_errors(ctx: &AppContext, err: &FlowError) -> bool {
    match err {
        FlowError::Invalid(errors) => {
            for (_, message) in errors.iter() {
                ctx.print_warning(message);
            }
            true
        }
        _ => false,
    }
}

/// Print a table row with fixed-width columns.
pub fn print_row(columns: &[(&str, usize)]) {
    let line: Vec<String> = columns
        .iter()
        .map(|(value, width)| format!("{:<width$}", value, width = *width))
        .collect();
    println!("{}", line.join("  ").trim_end());
}

pub fn print_table_header(columns: &[(&str, usize)]) {
    let line: Vec<String> = columns
        .iter()
        .map(|(value, width)| format!("{:<width$}", value, width = *width))
        .collect();
    println!("{}", style(line.join("  ").trim_end()).bold());
}

/// clap parser for `HH:MM` / `HH:MM:SS` arguments.
pub fn parse_time_arg(raw: &str) -> Result<NaiveTime, String> {
    parse_time_of_day(raw).ok_or_else(|| format!("'{}' is not a time (expected HH:MM)", raw))
}

/// clap parser for `YYYY-MM-DD` arguments.
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a date (expected YYYY-MM-DD)", raw))
}

pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some(42)), "42");
        assert_eq!(or_dash(None::<String>), "-");
    }

    #[test]
    fn test_outcome_text_prefers_backend_message() {
        assert_eq!(outcome_text(Some("Dose recorded"), "fallback"), "Dose recorded");
        assert_eq!(outcome_text(Some("  "), "fallback"), "fallback");
        assert_eq!(outcome_text(None, "fallback"), "fallback");
    }

    #[test]
    fn test_argument_parsers() {
        assert_eq!(
            parse_time_arg("09:30"),
            Ok(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
        );
        assert!(parse_time_arg("half nine").is_err());
        assert_eq!(
            parse_date_arg("2026-11-02"),
            Ok(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap())
        );
        assert!(parse_date_arg("02/11/2026").is_err());
    }
}
