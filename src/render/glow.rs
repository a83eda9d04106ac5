//! Pixel kernels for the glow treatment. All buffers are premultiplied RGBA8, row-major.

use crate::foundation::error::{ReelError, ReelResult};

const Q16_ONE: u32 = 1 << 16;

/// Pixel rectangle `[x0, x1) × [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InkBounds {
    /// First covered column.
    pub x0: usize,
    /// One past the last covered column.
    pub x1: usize,
    /// First covered row.
    pub y0: usize,
    /// One past the last covered row.
    pub y1: usize,
}

impl InkBounds {
    fn grown(self, by: usize, width: usize, height: usize) -> Self {
        Self {
            x0: self.x0.saturating_sub(by),
            x1: (self.x1 + by).min(width),
            y0: self.y0.saturating_sub(by),
            y1: (self.y1 + by).min(height),
        }
    }
}

/// Smallest rectangle holding every pixel with non-zero alpha, or `None` for a blank layer.
pub fn ink_bounds(src: &[u8], width: usize) -> Option<InkBounds> {
    if width == 0 {
        return None;
    }
    let mut bounds: Option<InkBounds> = None;
    for (i, px) in src.chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let (x, y) = (i % width, i / width);
        let b = bounds.get_or_insert(InkBounds {
            x0: x,
            x1: x + 1,
            y0: y,
            y1: y + 1,
        });
        b.x0 = b.x0.min(x);
        b.x1 = b.x1.max(x + 1);
        b.y1 = y + 1;
    }
    bounds
}

#[derive(Clone, Copy)]
enum Axis {
    Rows,
    Columns,
}

/// Gaussian blur for caption layers.
///
/// The Q16 kernel is built once per style and the intermediate buffer is kept between frames.
/// Only the inked area of a layer, grown by the radius, is convolved: everything else stays
/// transparent, which is exactly what a clamp-to-edge blur of the whole canvas would give.
#[derive(Clone, Debug)]
pub struct GlowBlur {
    taps: Option<Vec<u32>>,
    scratch: Vec<u8>,
}

impl GlowBlur {
    /// Build the kernel. `radius == 0` makes [`GlowBlur::apply`] a copy.
    pub fn new(radius: u32, sigma: f32) -> ReelResult<Self> {
        let taps = if radius == 0 {
            None
        } else {
            Some(q16_gaussian_taps(radius, sigma)?)
        };
        Ok(Self {
            taps,
            scratch: Vec::new(),
        })
    }

    /// Kernel radius in pixels.
    pub fn radius(&self) -> usize {
        self.taps.as_ref().map_or(0, |t| t.len() / 2)
    }

    /// Blur a `width × height` layer into a fresh buffer.
    pub fn apply(&mut self, src: &[u8], width: u32, height: u32) -> ReelResult<Vec<u8>> {
        let (w, h) = (width as usize, height as usize);
        let len = w
            .checked_mul(h)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| ReelError::rasterization("glow layer size overflow"))?;
        if src.len() != len {
            return Err(ReelError::rasterization(format!(
                "glow layer holds {} bytes, expected {len} for {width}x{height}",
                src.len()
            )));
        }

        let Self { taps, scratch } = self;
        let Some(taps) = taps.as_deref() else {
            return Ok(src.to_vec());
        };
        let mut out = vec![0u8; len];
        let Some(ink) = ink_bounds(src, w) else {
            return Ok(out);
        };
        let reach = ink.grown(taps.len() / 2, w, h);

        scratch.clear();
        scratch.resize(len, 0);
        // Rows without ink stay zero after the row pass, so only inked rows are convolved.
        convolve(
            src,
            scratch,
            (w, h),
            taps,
            Axis::Rows,
            InkBounds {
                y0: ink.y0,
                y1: ink.y1,
                ..reach
            },
        );
        convolve(scratch, &mut out, (w, h), taps, Axis::Columns, reach);
        Ok(out)
    }
}

fn q16_gaussian_taps(radius: u32, sigma: f32) -> ReelResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ReelError::validation("glow sigma must be finite and > 0"));
    }
    let r = i64::from(radius);
    let two_var = 2.0 * f64::from(sigma).powi(2);
    let raw: Vec<f64> = (-r..=r)
        .map(|d| (-((d * d) as f64) / two_var).exp())
        .collect();
    let total: f64 = raw.iter().sum();

    let mut taps: Vec<u32> = raw
        .iter()
        .map(|w| (w / total * f64::from(Q16_ONE)).round() as u32)
        .collect();
    // The center tap absorbs rounding so the kernel sums to one.
    let assigned: u32 = taps.iter().sum();
    let center = radius as usize;
    taps[center] = (taps[center] + Q16_ONE).saturating_sub(assigned);
    Ok(taps)
}

/// One-dimensional convolution over `window`, sampling along `axis` with clamp-to-edge.
fn convolve(
    src: &[u8],
    dst: &mut [u8],
    (width, height): (usize, usize),
    taps: &[u32],
    axis: Axis,
    window: InkBounds,
) {
    let r = taps.len() / 2;
    let (span, stride) = match axis {
        Axis::Rows => (width, 4),
        Axis::Columns => (height, width * 4),
    };
    for y in window.y0..window.y1 {
        for x in window.x0..window.x1 {
            let at = match axis {
                Axis::Rows => x,
                Axis::Columns => y,
            };
            let here = (y * width + x) * 4;
            let line_start = here - at * stride;

            let mut acc = [0u64; 4];
            for (k, &weight) in taps.iter().enumerate() {
                let p = (at + k).saturating_sub(r).min(span - 1);
                let i = line_start + p * stride;
                for (a, &v) in acc.iter_mut().zip(&src[i..i + 4]) {
                    *a += u64::from(weight) * u64::from(v);
                }
            }
            for (d, a) in dst[here..here + 4].iter_mut().zip(acc) {
                *d = ((a + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8;
            }
        }
    }
}

/// Multiply straight-alpha color by `factor` in place, keeping alpha.
///
/// In premultiplied space this scales each color channel and clamps it to the pixel's alpha.
pub fn brighten_rgba8_premul(buf: &mut [u8], factor: f32) -> ReelResult<()> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(ReelError::validation(
            "brightness factor must be finite and >= 0",
        ));
    }
    if !buf.len().is_multiple_of(4) {
        return Err(ReelError::rasterization(
            "brighten_rgba8_premul expects rgba8 buffer",
        ));
    }
    if factor == 1.0 {
        return Ok(());
    }

    for px in buf.chunks_exact_mut(4) {
        let a = f32::from(px[3]);
        for c in &mut px[..3] {
            *c = (f32::from(*c) * factor).round().clamp(0.0, a) as u8;
        }
    }
    Ok(())
}

/// Lay `layer` over `dst` in place (premultiplied source-over).
pub fn premul_over_in_place(dst: &mut [u8], layer: &[u8]) -> ReelResult<()> {
    if dst.len() != layer.len() || !dst.len().is_multiple_of(4) {
        return Err(ReelError::rasterization(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
        match s[3] {
            0 => {}
            255 => d.copy_from_slice(s),
            sa => {
                let keep = 255 - u32::from(sa);
                for (dc, &sc) in d.iter_mut().zip(s) {
                    let under = (u32::from(*dc) * keep + 127) / 255;
                    *dc = (u32::from(sc) + under).min(255) as u8;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/glow.rs"]
mod tests;
