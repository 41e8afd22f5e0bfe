//! Terminal rendering of session redirects and alerts.

use client::{Destination, Navigator};
use colored::Colorize;
use tracing::debug;

/// Turns redirects into a hint about which command to run next.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNavigator;

impl TerminalNavigator {
    fn hint(destination: Destination) -> &'static str {
        match destination {
            Destination::Home => "Browse listings with `automart cars list`.",
            Destination::Login => "Please sign in first with `automart login`.",
            Destination::MyListings => "See your listings with `automart cars mine`.",
        }
    }
}

impl Navigator for TerminalNavigator {
    fn redirect(&self, destination: Destination) {
        debug!(%destination, "redirect");
        eprintln!("{} {}", "→".cyan(), Self::hint(destination));
    }

    fn alert(&self, message: &str) {
        eprintln!("{} {}", "!".yellow().bold(), message.yellow());
    }
}
