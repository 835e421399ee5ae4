//! Presents a filter result: coordinates into the output panel, or an
//! error message through the notification surface.

use crate::error::UnresolvedNames;
use crate::filter::FilterResult;

/// Fixed phrase table for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrases {
    pub tribes_not_found: &'static str,
    pub players_not_found: &'static str,
}

impl Phrases {
    pub const EN: Phrases = Phrases {
        tribes_not_found: "Tribes not found:",
        players_not_found: "Players not found:",
    };
}

impl Default for Phrases {
    fn default() -> Self {
        Self::EN
    }
}

/// Somewhere to show an error message to the user.
pub trait Notifier {
    fn error_message(&self, message: &str);
}

/// The read-only output field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPanel {
    output: String,
}

impl ResultPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn clear(&mut self) {
        self.output.clear();
    }

    fn set(&mut self, text: String) {
        self.output = text;
    }
}

/// Builds the message listing unresolved names, e.g.
/// `Tribes not found: A, B | Players not found: C`.
pub fn unresolved_message(unresolved: &UnresolvedNames, phrases: &Phrases) -> String {
    let mut parts = Vec::with_capacity(2);
    if !unresolved.missing_tribes.is_empty() {
        parts.push(format!(
            "{} {}",
            phrases.tribes_not_found,
            unresolved.missing_tribes.join(", ")
        ));
    }
    if !unresolved.missing_players.is_empty() {
        parts.push(format!(
            "{} {}",
            phrases.players_not_found,
            unresolved.missing_players.join(", ")
        ));
    }
    parts.join(" | ")
}

/// Writes `result` into `panel`. Coordinates are joined with single spaces;
/// unresolved names clear the panel and go to `notifier`.
pub fn render_result(
    result: &FilterResult,
    phrases: &Phrases,
    panel: &mut ResultPanel,
    notifier: &dyn Notifier,
) {
    match result {
        Ok(coords) => panel.set(coords.join(" ")),
        Err(unresolved) => {
            panel.clear();
            notifier.error_message(&unresolved_message(unresolved, phrases));
        }
    }
}
