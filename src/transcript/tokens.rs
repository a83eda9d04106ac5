/// Marker embedded in a token to end the current caption line.
pub const LINE_BREAK: char = '\n';

/// Marker used in lyric sources to swallow the space that would follow a token.
pub const ZERO_WIDTH_SPACER: char = '\u{200B}';

/// Ordered word tokens of a lyric transcript.
///
/// Tokens are produced by splitting on single spaces only. Runs of spaces therefore produce
/// empty tokens, and each one still needs its own cue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    tokens: Vec<String>,
}

impl Transcript {
    /// Tokenize raw lyric text.
    pub fn from_lyrics(text: &str) -> Self {
        Self {
            tokens: text.split(' ').map(str::to_owned).collect(),
        }
    }

    /// Build from already-split tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Borrow the tokens in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of tokens (and therefore of cues required).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Return `true` when there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens carrying a line-break marker.
    pub fn line_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.contains(LINE_BREAK))
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/tokens.rs"]
mod tests;
