use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;

use crate::caption::timeline::{CaptionFrame, check_lockstep, plan_captions};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;
use crate::render::raster::{CaptionStyle, RasterSpec, read_font};
use crate::transcript::cues::CueSchedule;
use crate::transcript::tokens::Transcript;

/// Fully resolved inputs of one caption render.
#[derive(Clone, Debug)]
pub struct CaptionJob {
    /// Tokenized transcript.
    pub transcript: Transcript,
    /// One cue per token.
    pub cues: CueSchedule,
    /// Simulated frame rate.
    pub fps: Fps,
    /// Optional track length; every cue must fall inside it.
    pub duration_secs: Option<f64>,
    /// Output frame size.
    pub canvas: Canvas,
    /// Caption look.
    pub style: CaptionStyle,
    /// Font file used for every frame.
    pub font_path: PathBuf,
}

impl CaptionJob {
    /// Check everything that can be checked without touching the filesystem.
    ///
    /// Transcript/cue agreement is verified first so data faults surface before any font or
    /// output directory is touched.
    pub fn validate(&self) -> ReelResult<()> {
        check_lockstep(&self.transcript, &self.cues)?;
        if let (Some(duration), Some(last)) = (self.duration_secs, self.cues.last_secs())
            && last > duration
        {
            return Err(ReelError::data_integrity(format!(
                "last cue at {last}s lies beyond the {duration}s duration"
            )));
        }
        self.fps.validate()?;
        self.canvas.validate()?;
        self.style.validate()
    }
}

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame rendering.
pub struct RenderThreading {
    /// Enable parallel rasterization when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Cues consumed (equals frames pushed to the sink).
    pub cues_consumed: u64,
    /// Frames actually rasterized.
    pub frames_rasterized: u64,
    /// Frames reused because their caption already appeared earlier in the same chunk.
    pub frames_elided: u64,
    /// Simulated frames walked, including those without output.
    pub frames_simulated: u64,
    /// Largest delay between a cue's timestamp and the frame that consumed it.
    pub max_cue_lag_secs: f64,
}

/// Plan, rasterize and emit every caption frame of `job` into `sink`.
#[tracing::instrument(skip(job, sink), fields(tokens = job.transcript.len()))]
pub fn render_captions(
    job: &CaptionJob,
    sink: &mut dyn FrameSink,
    threading: &RenderThreading,
) -> ReelResult<RenderStats> {
    job.validate()?;
    let plan = plan_captions(&job.transcript, &job.cues, job.fps)?;

    let spec = RasterSpec {
        font_bytes: Arc::new(read_font(&job.font_path)?),
        canvas: job.canvas,
        style: job.style.clone(),
    };
    let mut rasterizer = spec.build()?;
    tracing::info!(
        font = %job.font_path.display(),
        family = rasterizer.family_name(),
        frames = plan.len(),
        lines = job.transcript.line_count(),
        "rendering captions"
    );

    let mut stats = RenderStats {
        cues_consumed: plan.len() as u64,
        frames_simulated: plan.last().map(|f| f.frame.0 + 1).unwrap_or(0),
        max_cue_lag_secs: plan
            .iter()
            .map(|f| f.time_secs - f.cue_secs)
            .fold(0.0, f64::max),
        ..RenderStats::default()
    };
    let frame_secs = 1.0 / job.fps.as_f64();
    if stats.max_cue_lag_secs > frame_secs {
        tracing::warn!(
            max_lag_secs = stats.max_cue_lag_secs,
            "cues are denser than the frame rate; some captions appear late"
        );
    }

    sink.begin(SinkConfig {
        canvas: job.canvas,
        fps: job.fps,
        frame_count: plan.len(),
    })?;

    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    for chunk in plan.chunks(chunk_size) {
        let unique = unique_captions(chunk);
        let rendered = match &pool {
            Some(pool) => render_unique_parallel(pool, &rasterizer.worker_spec(), &unique)?,
            None => unique
                .iter()
                .map(|caption| rasterizer.render(caption))
                .collect::<ReelResult<Vec<_>>>()?,
        };
        stats.frames_rasterized += rendered.len() as u64;
        stats.frames_elided += (chunk.len() - rendered.len()) as u64;

        let by_caption: HashMap<&str, &FrameRGBA> = unique
            .iter()
            .map(String::as_str)
            .zip(rendered.iter())
            .collect();
        for f in chunk {
            let image = by_caption.get(f.caption.as_str()).ok_or_else(|| {
                ReelError::rasterization("internal error: caption missing from rendered chunk")
            })?;
            sink.push_frame(f, image)?;
        }
    }

    sink.end()?;
    tracing::info!(
        rasterized = stats.frames_rasterized,
        elided = stats.frames_elided,
        "captions rendered"
    );
    Ok(stats)
}

/// Distinct captions of a chunk in first-seen order.
fn unique_captions(chunk: &[CaptionFrame]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    chunk
        .iter()
        .filter(|f| seen.insert(f.caption.as_str()))
        .map(|f| f.caption.clone())
        .collect()
}

fn render_unique_parallel(
    pool: &rayon::ThreadPool,
    spec: &RasterSpec,
    captions: &[String],
) -> ReelResult<Vec<FrameRGBA>> {
    pool.install(|| {
        captions
            .par_iter()
            .map_init(
                || spec.build(),
                |worker, caption| match worker {
                    Ok(r) => r.render(caption),
                    Err(e) => Err(ReelError::rasterization(format!(
                        "failed to build worker rasterizer: {e}"
                    ))),
                },
            )
            .collect()
    })
}

fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::rasterization(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
