//! Frame sinks.
//!
//! Sinks consume rasterized caption frames in output order.

/// Numbered PNG file sequences.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
