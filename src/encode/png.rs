use std::path::{Path, PathBuf};

use crate::caption::timeline::CaptionFrame;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// Default width of the zero-padded output counter.
pub const DEFAULT_INDEX_DIGITS: usize = 5;

/// Writes each frame as `<out_dir>/<output index>.png`.
#[derive(Debug, Clone)]
pub struct PngSequenceSink {
    out_dir: PathBuf,
    digits: usize,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `out_dir` with the default counter width.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self::with_digits(out_dir, DEFAULT_INDEX_DIGITS)
    }

    /// Sink writing into `out_dir` with `digits` of zero padding.
    pub fn with_digits(out_dir: impl Into<PathBuf>, digits: usize) -> Self {
        Self {
            out_dir: out_dir.into(),
            digits,
            written: Vec::new(),
        }
    }

    /// Output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Paths written so far, in output order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if self.digits == 0 {
            return Err(ReelError::validation("output index digits must be > 0"));
        }
        ensure_dir(&self.out_dir)?;
        self.written.clear();
        tracing::debug!(
            out_dir = %self.out_dir.display(),
            frames = cfg.frame_count,
            "png sequence started"
        );
        Ok(())
    }

    fn push_frame(&mut self, caption: &CaptionFrame, frame: &FrameRGBA) -> ReelResult<()> {
        let path = self
            .out_dir
            .join(caption.output.file_name(self.digits, "png"));
        frame.save_png(&path)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        tracing::debug!(written = self.written.len(), "png sequence finished");
        Ok(())
    }
}

/// Create `dir` and its parents if absent.
pub fn ensure_dir(dir: &Path) -> ReelResult<()> {
    use anyhow::Context as _;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
