use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::{Affine, Canvas, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;
use crate::render::glow::{GlowBlur, brighten_rgba8_premul, premul_over_in_place};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};

/// Fixed look of a caption frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionStyle {
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Straight-alpha text fill color.
    pub fill_rgba: [u8; 4],
    /// Distance from the bottom canvas edge to the bottom of the text box.
    pub bottom_margin_px: f32,
    /// Gaussian blur radius of the glow pass; 0 disables blurring.
    pub glow_radius_px: u32,
    /// Gaussian sigma of the glow pass.
    pub glow_sigma: f32,
    /// Multiplier applied to the blurred glow colors.
    pub glow_brightness: f32,
    /// Optional straight-alpha background; transparent when unset.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size_px: 64.0,
            fill_rgba: [255, 244, 214, 255],
            bottom_margin_px: 96.0,
            glow_radius_px: 12,
            glow_sigma: 6.0,
            glow_brightness: 1.6,
            clear_rgba: None,
        }
    }
}

impl CaptionStyle {
    /// Reject values the rasterizer cannot honor.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ReelError::validation("font_size_px must be finite and > 0"));
        }
        if !self.bottom_margin_px.is_finite() || self.bottom_margin_px < 0.0 {
            return Err(ReelError::validation(
                "bottom_margin_px must be finite and >= 0",
            ));
        }
        if self.glow_radius_px > 0 && (!self.glow_sigma.is_finite() || self.glow_sigma <= 0.0) {
            return Err(ReelError::validation("glow_sigma must be finite and > 0"));
        }
        if !self.glow_brightness.is_finite() || self.glow_brightness < 0.0 {
            return Err(ReelError::validation(
                "glow_brightness must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Everything needed to build an equivalent [`CaptionRasterizer`] on another thread.
#[derive(Clone, Debug)]
pub struct RasterSpec {
    /// Raw font file bytes.
    pub font_bytes: Arc<Vec<u8>>,
    /// Output size.
    pub canvas: Canvas,
    /// Caption look.
    pub style: CaptionStyle,
}

impl RasterSpec {
    /// Construct a rasterizer with its own layout contexts.
    pub fn build(&self) -> ReelResult<CaptionRasterizer> {
        CaptionRasterizer::new(self.clone())
    }
}

/// Draws caption text with the two-pass glow treatment.
///
/// Pass order: crisp base layer, blurred and brightened copy composited first, then the crisp
/// layer again on top.
pub struct CaptionRasterizer {
    spec: RasterSpec,
    font: vello_cpu::peniko::FontData,
    text: TextLayoutEngine,
    glow: GlowBlur,
}

impl CaptionRasterizer {
    /// Validate `spec` and register its font.
    pub fn new(spec: RasterSpec) -> ReelResult<Self> {
        spec.canvas.validate()?;
        spec.style.validate()?;
        let text = TextLayoutEngine::new(&spec.font_bytes)?;
        let glow = GlowBlur::new(spec.style.glow_radius_px, spec.style.glow_sigma)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(spec.font_bytes.as_ref().clone()),
            0,
        );
        Ok(Self {
            spec,
            font,
            text,
            glow,
        })
    }

    /// Read a font file and build a rasterizer for it.
    pub fn from_font_path(path: &Path, canvas: Canvas, style: CaptionStyle) -> ReelResult<Self> {
        let font_bytes = read_font(path)?;
        Self::new(RasterSpec {
            font_bytes: Arc::new(font_bytes),
            canvas,
            style,
        })
    }

    /// Settings for constructing worker rasterizers.
    pub fn worker_spec(&self) -> RasterSpec {
        self.spec.clone()
    }

    /// Family name of the registered font.
    pub fn family_name(&self) -> &str {
        self.text.family_name()
    }

    /// Rasterize one caption into a premultiplied frame.
    pub fn render(&mut self, caption: &str) -> ReelResult<FrameRGBA> {
        let base = self.draw_base_layer(caption)?;

        let Canvas { width, height } = self.spec.canvas;
        let mut glow = self.glow.apply(&base, width, height)?;
        let style = &self.spec.style;
        brighten_rgba8_premul(&mut glow, style.glow_brightness)?;

        let mut data = match style.clear_rgba {
            Some(rgba) => premul_rgba8(rgba).repeat((width as usize) * (height as usize)),
            None => vec![0u8; self.spec.canvas.rgba8_len()],
        };
        premul_over_in_place(&mut data, &glow)?;
        premul_over_in_place(&mut data, &base)?;

        Ok(FrameRGBA {
            width,
            height,
            data,
            premultiplied: true,
        })
    }

    fn draw_base_layer(&mut self, caption: &str) -> ReelResult<Vec<u8>> {
        let Canvas { width, height } = self.spec.canvas;
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| ReelError::rasterization("canvas width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| ReelError::rasterization("canvas height exceeds u16"))?;

        let style = &self.spec.style;
        let layout = self.text.layout_line(
            caption,
            style.font_size_px,
            TextBrushRgba8::from(style.fill_rgba),
        )?;

        // Centered horizontally; text box bottom sits `bottom_margin_px` above the canvas edge.
        let x = (f64::from(width) - f64::from(layout.width())) / 2.0;
        let y = f64::from(height) - f64::from(style.bottom_margin_px) - f64::from(layout.height());

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        ctx.set_transform(affine_to_cpu(Affine::translate(Vec2::new(x, y))));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Positioned glyphs carry absolute pen positions within the layout.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }
}

/// Read font bytes, distinguishing a missing file from other IO failures.
pub fn read_font(path: &Path) -> ReelResult<Vec<u8>> {
    if !path.is_file() {
        return Err(ReelError::input_not_found(format!(
            "font file '{}'",
            path.display()
        )));
    }
    Ok(std::fs::read(path)?)
}

fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    let premul = |c: u8| -> u8 { ((u16::from(c) * a16 + 127) / 255) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
