use crate::caption::timeline::CaptionFrame;
use crate::foundation::core::{Canvas, Fps, OutputIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output size in pixels.
    pub canvas: Canvas,
    /// Simulated frame rate the captions were timed against.
    pub fps: Fps,
    /// Number of frames that will be pushed.
    pub frame_count: usize,
}

/// Sink contract for consuming rendered caption frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing [`OutputIndex`] order,
/// starting at 0 with no gaps.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame in output order.
    fn push_frame(&mut self, caption: &CaptionFrame, frame: &FrameRGBA) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(CaptionFrame, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(CaptionFrame, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, caption: &CaptionFrame, frame: &FrameRGBA) -> ReelResult<()> {
        let expected = OutputIndex(self.frames.len() as u64);
        if caption.output != expected {
            return Err(ReelError::rasterization(format!(
                "frame pushed out of order: got {:?}, expected {:?}",
                caption.output, expected
            )));
        }
        self.frames.push((caption.clone(), frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
