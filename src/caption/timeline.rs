use crate::caption::state::CaptionState;
use crate::foundation::core::{Fps, FrameIndex, OutputIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::transcript::cues::CueSchedule;
use crate::transcript::tokens::Transcript;

/// One output image worth of caption text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptionFrame {
    /// Sequential output counter (file name).
    pub output: OutputIndex,
    /// Simulated frame the cue was consumed on.
    pub frame: FrameIndex,
    /// Simulated time of `frame` in seconds.
    pub time_secs: f64,
    /// Nominal timestamp of the consumed cue.
    pub cue_secs: f64,
    /// Caption text to rasterize.
    pub caption: String,
}

/// Reject transcripts and schedules that cannot be consumed in lockstep.
pub fn check_lockstep(transcript: &Transcript, cues: &CueSchedule) -> ReelResult<()> {
    if transcript.len() != cues.len() {
        return Err(ReelError::data_integrity(format!(
            "transcript has {} tokens but cue schedule has {} timestamps",
            transcript.len(),
            cues.len()
        )));
    }
    Ok(())
}

/// Frame-by-frame walk over a transcript and its cues.
///
/// Holds cursors into borrowed, immutable token and cue slices. Each [`CaptionTimeline::tick`]
/// consumes at most one due cue, so cues denser than the frame rate are deferred to following
/// frames instead of being merged. Stretches without a due cue are crossed in a single tick.
#[derive(Debug)]
pub struct CaptionTimeline<'a> {
    tokens: &'a [String],
    cues: &'a [f64],
    fps: Fps,
    cursor: usize,
    frame: FrameIndex,
    output: OutputIndex,
    state: CaptionState,
}

impl<'a> CaptionTimeline<'a> {
    /// Validate inputs and position the timeline at frame 0.
    pub fn new(transcript: &'a Transcript, cues: &'a CueSchedule, fps: Fps) -> ReelResult<Self> {
        fps.validate()?;
        check_lockstep(transcript, cues)?;
        if let Some(last) = cues.last_secs()
            && fps.frame_time_secs(FrameIndex(u64::MAX)) < last
        {
            return Err(ReelError::data_integrity(format!(
                "cue at {last}s lies beyond the last addressable frame"
            )));
        }
        Ok(Self {
            tokens: transcript.tokens(),
            cues: cues.times(),
            fps,
            cursor: 0,
            frame: FrameIndex(0),
            output: OutputIndex(0),
            state: CaptionState::new(),
        })
    }

    /// Return `true` once every cue has been consumed.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.cues.len()
    }

    /// Number of cues consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Next frame index [`CaptionTimeline::tick`] will examine.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Current caption state.
    pub fn state(&self) -> &CaptionState {
        &self.state
    }

    /// Examine the next simulated frame.
    ///
    /// Returns the produced caption when a cue was due on this frame, `None` when the frame
    /// passes without output or the timeline is finished. A frame without output moves the
    /// timeline straight to the first frame at or after the pending cue.
    pub fn tick(&mut self) -> Option<CaptionFrame> {
        if self.is_finished() {
            return None;
        }

        let frame = self.frame;
        self.frame = FrameIndex(frame.0.saturating_add(1));

        let t = self.fps.frame_time_secs(frame);
        let cue_secs = self.cues[self.cursor];
        if t < cue_secs {
            // Frames in between would produce nothing; resume at the first due one.
            self.frame = first_frame_at_or_after(self.fps, cue_secs).max(self.frame);
            return None;
        }

        let token = &self.tokens[self.cursor];
        self.cursor += 1;
        self.state = std::mem::take(&mut self.state).consume(token);

        let out = CaptionFrame {
            output: self.output,
            frame,
            time_secs: t,
            cue_secs,
            caption: self.state.caption().to_owned(),
        };
        self.output = self.output.next();
        Some(out)
    }
}

/// Smallest frame whose simulated time is `>= secs`.
///
/// Starts from `ceil(secs * num / den)` and corrects the float estimate against
/// [`Fps::frame_time_secs`], which is what [`CaptionTimeline::tick`] compares with.
fn first_frame_at_or_after(fps: Fps, secs: f64) -> FrameIndex {
    let estimate = (secs * f64::from(fps.num) / f64::from(fps.den)).ceil();
    let mut frame = if estimate <= 0.0 {
        0
    } else if estimate >= u64::MAX as f64 {
        u64::MAX
    } else {
        estimate as u64
    };
    while frame > 0 && fps.frame_time_secs(FrameIndex(frame - 1)) >= secs {
        frame -= 1;
    }
    while frame < u64::MAX && fps.frame_time_secs(FrameIndex(frame)) < secs {
        frame += 1;
    }
    FrameIndex(frame)
}

impl Iterator for CaptionTimeline<'_> {
    type Item = CaptionFrame;

    fn next(&mut self) -> Option<CaptionFrame> {
        while !self.is_finished() {
            if let Some(f) = self.tick() {
                return Some(f);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.cues.len() - self.cursor;
        (left, Some(left))
    }
}

impl ExactSizeIterator for CaptionTimeline<'_> {}

/// Compute every caption frame up front.
///
/// Fails with [`ReelError::DataIntegrity`] before producing anything when token and cue counts
/// differ.
#[tracing::instrument(skip(transcript, cues), fields(tokens = transcript.len()))]
pub fn plan_captions(
    transcript: &Transcript,
    cues: &CueSchedule,
    fps: Fps,
) -> ReelResult<Vec<CaptionFrame>> {
    let timeline = CaptionTimeline::new(transcript, cues, fps)?;
    let frames: Vec<CaptionFrame> = timeline.collect();
    if let Some(last) = frames.last() {
        tracing::debug!(
            frames = frames.len(),
            last_frame = last.frame.0,
            "caption plan computed"
        );
    }
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/caption/timeline.rs"]
mod tests;
