//! Batch bitmap → square PNG conversion.

/// Directory scan and resize loop.
pub mod batch;
