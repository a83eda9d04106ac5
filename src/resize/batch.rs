use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::png::{DEFAULT_INDEX_DIGITS, ensure_dir};
use crate::foundation::core::{Canvas, OutputIndex};
use crate::foundation::error::{ReelError, ReelResult};

/// Resampling filter used when scaling bitmaps.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Nearest neighbor.
    Nearest,
    /// Linear (triangle) filter.
    Triangle,
    /// Cubic (Catmull-Rom) filter.
    #[default]
    CatmullRom,
    /// Gaussian filter.
    Gaussian,
    /// Lanczos with window 3.
    Lanczos3,
}

impl From<ResizeFilter> for image::imageops::FilterType {
    fn from(f: ResizeFilter) -> Self {
        match f {
            ResizeFilter::Nearest => Self::Nearest,
            ResizeFilter::Triangle => Self::Triangle,
            ResizeFilter::CatmullRom => Self::CatmullRom,
            ResizeFilter::Gaussian => Self::Gaussian,
            ResizeFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// Options for [`resize_directory`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeOpts {
    /// Directory scanned for inputs (not recursive).
    pub src_dir: PathBuf,
    /// Directory receiving numbered PNG files; created if absent.
    pub out_dir: PathBuf,
    /// File extension selecting inputs, matched case-insensitively.
    pub extension: String,
    /// Exact output size; aspect ratio is not preserved.
    pub size: Canvas,
    /// Zero padding of output file names.
    pub digits: usize,
    /// Resampling filter.
    pub filter: ResizeFilter,
}

impl Default for ResizeOpts {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("imgs"),
            out_dir: PathBuf::from("png_imgs"),
            extension: "bmp".to_string(),
            size: Canvas::square(400),
            digits: DEFAULT_INDEX_DIGITS,
            filter: ResizeFilter::default(),
        }
    }
}

impl ResizeOpts {
    /// Reject option values that cannot produce output.
    pub fn validate(&self) -> ReelResult<()> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(ReelError::validation("resize size must be > 0"));
        }
        if self.digits == 0 {
            return Err(ReelError::validation("output index digits must be > 0"));
        }
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(ReelError::validation("input extension must be non-empty"));
        }
        Ok(())
    }
}

/// Outcome of a [`resize_directory`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResizeReport {
    /// `(input, output)` pairs in output order.
    pub converted: Vec<(PathBuf, PathBuf)>,
}

/// List files in `dir` whose extension matches `extension`, sorted by file name.
///
/// Sorting makes the output numbering independent of directory enumeration order.
pub fn collect_inputs(dir: &Path, extension: &str) -> ReelResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ReelError::input_not_found(format!(
            "source directory '{}'",
            dir.display()
        )));
    }
    let wanted = extension.trim_start_matches('.');

    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(wanted));
        if matches {
            inputs.push(path);
        }
    }
    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(inputs)
}

/// Resize every matching bitmap in `opts.src_dir` into numbered PNG files.
///
/// Fails fast: the first unreadable input aborts the run.
#[tracing::instrument(skip(opts), fields(src = %opts.src_dir.display(), out = %opts.out_dir.display()))]
pub fn resize_directory(opts: &ResizeOpts) -> ReelResult<ResizeReport> {
    opts.validate()?;
    let inputs = collect_inputs(&opts.src_dir, &opts.extension)?;
    ensure_dir(&opts.out_dir)?;

    if inputs.is_empty() {
        tracing::warn!(extension = %opts.extension, "no input images found");
    }
    tracing::info!(
        count = inputs.len(),
        width = opts.size.width,
        height = opts.size.height,
        "resizing images"
    );

    let mut report = ResizeReport::default();
    let mut index = OutputIndex(0);
    for input in inputs {
        let out = opts.out_dir.join(index.file_name(opts.digits, "png"));
        resize_one(&input, &out, opts.size, opts.filter)?;
        tracing::debug!(input = %input.display(), output = %out.display(), "resized");
        report.converted.push((input, out));
        index = index.next();
    }
    Ok(report)
}

fn resize_one(input: &Path, output: &Path, size: Canvas, filter: ResizeFilter) -> ReelResult<()> {
    let img = image::open(input).with_context(|| format!("decode image '{}'", input.display()))?;
    let resized = img.resize_exact(size.width, size.height, filter.into());
    resized
        .save_with_format(output, image::ImageFormat::Png)
        .map_err(|e| match e {
            image::ImageError::IoError(io) => ReelError::Io(io),
            other => ReelError::rasterization(format!(
                "write png '{}': {other}",
                output.display()
            )),
        })
}

#[cfg(test)]
#[path = "../../tests/unit/resize/batch.rs"]
mod tests;
