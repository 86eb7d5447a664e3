//! Terminal UI utilities

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use veilpay_core::{Notifier, Route, Router};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print a section header
pub fn header(text: &str) {
    println!("\n{}", text.bold().underline());
}

/// Print a key-value pair
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Print a separator line
pub fn separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// Create a spinner progress indicator
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prompt for text input
pub fn input(prompt: &str) -> anyhow::Result<String> {
    use dialoguer::Input;
    Ok(Input::new().with_prompt(prompt).interact_text()?)
}

/// Prompt for text input, accepting an empty answer
pub fn input_allow_empty(prompt: &str) -> anyhow::Result<String> {
    use dialoguer::Input;
    Ok(Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Prompt to pick one item from a list
pub fn select(prompt: &str, items: &[String]) -> anyhow::Result<usize> {
    use dialoguer::Select;
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

/// Prompt to pick any number of items from a list
pub fn multi_select(prompt: &str, items: &[String]) -> anyhow::Result<Vec<usize>> {
    use dialoguer::MultiSelect;
    Ok(MultiSelect::new().with_prompt(prompt).items(items).interact()?)
}

/// Notifier that renders view notifications as terminal toasts.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn info(&self, message: &str) {
        info(message);
    }

    fn warning(&self, message: &str) {
        warning(message);
    }

    fn error(&self, message: &str) {
        error(message);
    }
}

/// Router that records the navigation target so the command loop can
/// render the requested page after the view settles.
#[derive(Clone, Default)]
pub struct TerminalRouter {
    target: Arc<Mutex<Option<Route>>>,
}

impl TerminalRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending navigation target, if any.
    pub fn take(&self) -> Option<Route> {
        self.target.lock().unwrap().take()
    }
}

impl Router for TerminalRouter {
    fn navigate(&self, route: Route) {
        *self.target.lock().unwrap() = Some(route);
    }
}
