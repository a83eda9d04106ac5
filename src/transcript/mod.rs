//! Lyric transcripts and their cue schedules.

/// Cue timestamp schedules.
pub mod cues;
/// Built-in lyric and timing defaults.
pub mod lyrics;
/// Transcript tokenization and marker characters.
pub mod tokens;
