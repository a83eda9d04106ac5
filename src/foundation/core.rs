use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Vec2};

/// Absolute 0-based index of a simulated video frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Sequential 0-based counter naming written output images.
///
/// Output indices advance only when an image is produced, so they diverge from [`FrameIndex`]
/// as soon as a frame passes without a due cue.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct OutputIndex(pub u64);

impl OutputIndex {
    /// Return the next index.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Zero-padded file name, e.g. `00042.png` for `digits = 5` and `ext = "png"`.
    pub fn file_name(self, digits: usize, ext: &str) -> String {
        format!("{:0width$}.{ext}", self.0, width = digits)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        let fps = Self { num, den };
        fps.validate()?;
        Ok(fps)
    }

    /// Check the invariants `num > 0` and `den > 0`.
    ///
    /// Deserialized values bypass [`Fps::new`], so configuration loading calls this explicitly.
    pub fn validate(self) -> ReelResult<()> {
        if self.den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if self.num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(())
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Simulated timestamp of a frame in seconds.
    ///
    /// Computed as `(frame * den) / num` so integral frame rates give the correctly rounded
    /// quotient, e.g. frame 3 at 10 fps is exactly the `f64` nearest to `0.3`.
    pub fn frame_time_secs(self, frame: FrameIndex) -> f64 {
        (frame.0 as f64 * f64::from(self.den)) / f64::from(self.num)
    }
}

/// Square or rectangular output dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Square canvas of `side × side` pixels.
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Reject empty canvases and sizes the CPU rasterizer cannot address.
    pub fn validate(self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(ReelError::validation("canvas width/height must fit in u16"));
        }
        Ok(())
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
