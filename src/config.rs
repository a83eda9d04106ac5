//! JSON run configuration shared by the CLI subcommands.
//!
//! Every section is `#[serde(default)]`, so an empty object `{}` is a valid configuration that
//! reproduces the built-in lyric reel.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::encode::png::DEFAULT_INDEX_DIGITS;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::pipeline::CaptionJob;
use crate::render::raster::CaptionStyle;
use crate::resize::batch::ResizeOpts;
use crate::transcript::cues::CueSchedule;
use crate::transcript::lyrics::{
    DEFAULT_DURATION_SECS, DEFAULT_FIRST_CUE_SECS, DEFAULT_FPS, DEFAULT_LAST_CUE_SECS,
    DEFAULT_LYRICS,
};
use crate::transcript::tokens::Transcript;

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReelConfig {
    /// Subtitle frame renderer settings.
    pub captions: CaptionConfig,
    /// Batch resizer settings.
    pub resize: ResizeOpts,
}

impl ReelConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        if !path.is_file() {
            return Err(ReelError::input_not_found(format!(
                "config file '{}'",
                path.display()
            )));
        }
        let f = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    /// Parse and validate JSON from any reader.
    pub fn from_reader(r: impl Read) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ReelError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges of both sections.
    pub fn validate(&self) -> ReelResult<()> {
        self.captions.validate()?;
        self.resize.validate()
    }
}

/// Where cue timestamps come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum CueSource {
    /// Explicit timestamps in seconds.
    Literal {
        /// One timestamp per token.
        times: Vec<f64>,
    },
    /// Evenly spaced over the token count, both ends inclusive.
    Interpolated {
        /// First cue.
        start_secs: f64,
        /// Last cue.
        end_secs: f64,
    },
    /// Text file parsed with [`CueSchedule::parse_list`].
    ListFile {
        /// Path of the cue list.
        path: PathBuf,
    },
}

impl Default for CueSource {
    fn default() -> Self {
        Self::Interpolated {
            start_secs: DEFAULT_FIRST_CUE_SECS,
            end_secs: DEFAULT_LAST_CUE_SECS,
        }
    }
}

impl CueSource {
    /// Resolve into a schedule for a transcript of `token_count` tokens.
    pub fn resolve(&self, token_count: usize) -> ReelResult<CueSchedule> {
        match self {
            Self::Literal { times } => CueSchedule::new(times.clone()),
            Self::Interpolated {
                start_secs,
                end_secs,
            } => CueSchedule::interpolated(*start_secs, *end_secs, token_count),
            Self::ListFile { path } => CueSchedule::from_path(path),
        }
    }
}

/// Subtitle frame renderer settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionConfig {
    /// Simulated frame rate.
    pub fps: Fps,
    /// Track length; cues past it are rejected. `None` disables the check.
    pub duration_secs: Option<f64>,
    /// Output frame size.
    pub canvas: Canvas,
    /// Font file used to draw captions.
    pub font_path: PathBuf,
    /// Directory receiving numbered frames.
    pub out_dir: PathBuf,
    /// Zero padding of output file names.
    pub digits: usize,
    /// Transcript file; the built-in lyric is used when unset.
    pub lyrics_path: Option<PathBuf>,
    /// Cue timestamps.
    pub cues: CueSource,
    /// Caption look.
    pub style: CaptionStyle,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            fps: Fps {
                num: DEFAULT_FPS,
                den: 1,
            },
            duration_secs: Some(DEFAULT_DURATION_SECS),
            canvas: Canvas::square(1080),
            font_path: PathBuf::from("font.ttf"),
            out_dir: PathBuf::from("subtitle_frames"),
            digits: DEFAULT_INDEX_DIGITS,
            lyrics_path: None,
            cues: CueSource::default(),
            style: CaptionStyle::default(),
        }
    }
}

impl CaptionConfig {
    /// Check value ranges without touching the filesystem.
    pub fn validate(&self) -> ReelResult<()> {
        self.fps.validate()?;
        self.canvas.validate()?;
        self.style.validate()?;
        if self.digits == 0 {
            return Err(ReelError::validation("output index digits must be > 0"));
        }
        if let Some(d) = self.duration_secs
            && (!d.is_finite() || d < 0.0)
        {
            return Err(ReelError::validation(
                "duration_secs must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Tokenize the configured transcript.
    pub fn load_transcript(&self) -> ReelResult<Transcript> {
        match &self.lyrics_path {
            Some(path) => read_transcript(path),
            None => Ok(Transcript::from_lyrics(DEFAULT_LYRICS)),
        }
    }

    /// Resolve transcript and cues into a render job.
    pub fn to_job(&self) -> ReelResult<CaptionJob> {
        self.validate()?;
        let transcript = self.load_transcript()?;
        let cues = self.cues.resolve(transcript.len())?;
        Ok(CaptionJob {
            transcript,
            cues,
            fps: self.fps,
            duration_secs: self.duration_secs,
            canvas: self.canvas,
            style: self.style.clone(),
            font_path: self.font_path.clone(),
        })
    }
}

/// Read a transcript file.
///
/// CRLF line endings become `\n`, then one trailing newline (as left by editors) is dropped.
pub fn read_transcript(path: &Path) -> ReelResult<Transcript> {
    if !path.is_file() {
        return Err(ReelError::input_not_found(format!(
            "transcript file '{}'",
            path.display()
        )));
    }
    let text = std::fs::read_to_string(path)?.replace("\r\n", "\n");
    let text = text.strip_suffix('\n').unwrap_or(&text);
    Ok(Transcript::from_lyrics(text))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
