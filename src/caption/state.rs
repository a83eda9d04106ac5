use crate::transcript::tokens::{LINE_BREAK, ZERO_WIDTH_SPACER};

/// Observable phase of a [`CaptionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum CaptionPhase {
    /// No cue consumed yet; caption is empty.
    Idle,
    /// Words are appended to the current caption line.
    Accumulating,
    /// The last word ended a line; the next word starts a fresh caption.
    PendingReset,
}

/// On-screen caption text plus the line-reset flag.
///
/// This is a plain value: [`CaptionState::consume`] takes the state by value and returns the
/// successor, so one transition can be exercised without a frame loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptionState {
    caption: String,
    pending_reset: bool,
    started: bool,
}

impl CaptionState {
    /// Fresh state in [`CaptionPhase::Idle`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently on screen.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Whether the next consumed word replaces the caption.
    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    /// Current phase.
    pub fn phase(&self) -> CaptionPhase {
        if self.pending_reset {
            CaptionPhase::PendingReset
        } else if self.started {
            CaptionPhase::Accumulating
        } else {
            CaptionPhase::Idle
        }
    }

    /// Apply one token and return the successor state.
    ///
    /// 1. Replace (after a line break) or append `token + ' '`.
    /// 2. A zero-width spacer is removed together with the single trailing space.
    /// 3. A line break is removed from the visible text and arms the reset for the next word.
    pub fn consume(mut self, token: &str) -> Self {
        if self.pending_reset {
            self.caption.clear();
            self.pending_reset = false;
        }
        self.caption.push_str(token);
        self.caption.push(' ');
        self.started = true;

        let mut effective = std::borrow::Cow::Borrowed(token);
        if token.contains(ZERO_WIDTH_SPACER) {
            self.caption.retain(|c| c != ZERO_WIDTH_SPACER);
            if self.caption.ends_with(' ') {
                self.caption.pop();
            }
            effective = std::borrow::Cow::Owned(token.replace(ZERO_WIDTH_SPACER, ""));
        }

        if effective.contains(LINE_BREAK) {
            self.caption.retain(|c| c != LINE_BREAK);
            self.pending_reset = true;
        }

        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/state.rs"]
mod tests;
