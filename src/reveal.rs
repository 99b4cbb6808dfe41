//! Reveal panel: one day's gift message, from request to dismissal.
//!
//! States: Loading -> Revealed | Failed. Dismissal drops the panel from the
//! app context, so there is no explicit Dismissed state on the struct; a
//! fresh panel (with a new generation number) is built on the next
//! activation.

use crate::gift::GiftError;

/// Shown when the service answers without any usable text. Blank output is a
/// degraded success, not a failure.
pub const NO_GIFT_FALLBACK: &str = "No gifts. Only coal for you naughty pal!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealState {
    /// Request in flight.
    Loading,
    /// Gift message received (or the fixed fallback for blank output).
    Revealed(String),
    /// Service call failed; holds the human-readable detail.
    Failed(String),
}

/// One open reveal panel.
#[derive(Debug, Clone)]
pub struct RevealPanel {
    day: u8,
    generation: u64,
    state: RevealState,
}

impl RevealPanel {
    pub fn new(day: u8, generation: u64) -> Self {
        Self {
            day,
            generation,
            state: RevealState::Loading,
        }
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Ties in-flight requests to this panel instance.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RevealState::Loading)
    }

    /// Apply the service outcome. Exactly one outcome is applied per panel;
    /// the generation guard in the app context enforces that.
    pub fn apply(&mut self, outcome: Result<String, GiftError>) {
        self.state = match outcome {
            Ok(message) => {
                let message = message.trim();
                if message.is_empty() {
                    RevealState::Revealed(NO_GIFT_FALLBACK.to_string())
                } else {
                    RevealState::Revealed(message.to_string())
                }
            }
            Err(err) => RevealState::Failed(err.to_string()),
        };
    }

    /// The panel body text for the current state.
    pub fn display_text(&self) -> String {
        match &self.state {
            RevealState::Loading => format!("Day {}: opening your gift...", self.day),
            RevealState::Revealed(message) => format!("Day {}: {}", self.day, message),
            RevealState::Failed(detail) => {
                format!("Day {}: Can't reach the gift service: {}", self.day, detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gift::GiftError;

    #[test]
    fn test_starts_loading() {
        let panel = RevealPanel::new(3, 1);
        assert!(panel.is_loading());
        assert!(panel.display_text().contains("Day 3"));
    }

    #[test]
    fn test_reveal_success() {
        let mut panel = RevealPanel::new(3, 1);
        panel.apply(Ok("Code ornament".to_string()));
        assert_eq!(
            panel.state(),
            &RevealState::Revealed("Code ornament".to_string())
        );
        assert_eq!(panel.display_text(), "Day 3: Code ornament");
    }

    #[test]
    fn test_reveal_trims_whitespace() {
        let mut panel = RevealPanel::new(7, 1);
        panel.apply(Ok("  A rubber duck\n".to_string()));
        assert_eq!(panel.display_text(), "Day 7: A rubber duck");
    }

    #[test]
    fn test_blank_output_uses_fallback() {
        let mut panel = RevealPanel::new(5, 1);
        panel.apply(Ok("   \n".to_string()));
        assert_eq!(panel.display_text(), format!("Day 5: {NO_GIFT_FALLBACK}"));
    }

    #[test]
    fn test_failure_shows_detail() {
        let mut panel = RevealPanel::new(4, 1);
        panel.apply(Err(GiftError::Service {
            status: 429,
            detail: "quota exceeded".to_string(),
        }));
        let text = panel.display_text();
        assert!(text.starts_with("Day 4: Can't reach the gift service:"));
        assert!(text.contains("quota exceeded"));
    }
}
