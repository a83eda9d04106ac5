//! captionreel turns a lyric transcript into a sparse sequence of glowing caption frames, and
//! batch-converts bitmap folders into fixed-size PNG sequences.
//!
//! The caption side is a small pipeline:
//!
//! - Tokenize a [`Transcript`] and pair it with a [`CueSchedule`]
//! - Walk simulated frames with a [`CaptionTimeline`], accumulating captions
//! - Rasterize each consumed cue with a [`CaptionRasterizer`] and stream it into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Caption accumulation and frame timing.
pub mod caption;
/// JSON run configuration.
pub mod config;
/// Frame sinks.
pub mod encode;
/// Caption rasterization and the render pipeline.
pub mod render;
/// Batch bitmap resizing.
pub mod resize;
/// Transcript tokens and cue timestamps.
pub mod transcript;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, OutputIndex, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::caption::state::{CaptionPhase, CaptionState};
pub use crate::caption::timeline::{CaptionFrame, CaptionTimeline, plan_captions};
pub use crate::config::{CaptionConfig, CueSource, ReelConfig};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::pipeline::{CaptionJob, RenderStats, RenderThreading, render_captions};
pub use crate::render::raster::{CaptionRasterizer, CaptionStyle, RasterSpec};
pub use crate::resize::batch::{ResizeFilter, ResizeOpts, ResizeReport, resize_directory};
pub use crate::transcript::cues::CueSchedule;
pub use crate::transcript::tokens::Transcript;
