//! Caption accumulation: the per-word state machine and the frame walk that drives it.

/// Caption state and its single-token transition.
pub mod state;
/// Frame-timed cue consumption.
pub mod timeline;
