use console::style;
use tracing::debug;
use vax_flows::Notifier;

/// Prints flow notices to the terminal.
///
/// Errors are always shown; successes are suppressed in quiet mode.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        debug!(notice = message, "success");
        if !self.quiet {
            println!("{} {}", style("✓").green(), style(message).green());
        }
    }

    fn error(&self, message: &str) {
        debug!(notice = message, "error");
        eprintln!("{} {}", style("✗").red(), style(message).red());
    }
}
