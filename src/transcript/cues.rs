use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Validated cue timestamps in seconds, one per transcript token.
///
/// Invariants: every entry is finite and `>= 0`, and the sequence is non-decreasing.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct CueSchedule {
    times: Vec<f64>,
}

impl CueSchedule {
    /// Validate a literal timestamp list.
    pub fn new(times: Vec<f64>) -> ReelResult<Self> {
        let mut prev = 0.0f64;
        for (i, &t) in times.iter().enumerate() {
            if !t.is_finite() {
                return Err(ReelError::data_integrity(format!(
                    "cue {i} is not a finite timestamp"
                )));
            }
            if t < 0.0 {
                return Err(ReelError::data_integrity(format!(
                    "cue {i} is negative ({t})"
                )));
            }
            if t < prev {
                return Err(ReelError::data_integrity(format!(
                    "cue {i} ({t}) is earlier than cue {} ({prev})",
                    i - 1
                )));
            }
            prev = t;
        }
        Ok(Self { times })
    }

    /// Evenly spaced cues from `start_secs` to `end_secs`, both inclusive.
    ///
    /// A single cue sits at `start_secs`; zero cues yield an empty schedule.
    pub fn interpolated(start_secs: f64, end_secs: f64, count: usize) -> ReelResult<Self> {
        if !start_secs.is_finite() || !end_secs.is_finite() {
            return Err(ReelError::data_integrity(
                "interpolation bounds must be finite",
            ));
        }
        if end_secs < start_secs {
            return Err(ReelError::data_integrity(format!(
                "interpolation end ({end_secs}) precedes start ({start_secs})"
            )));
        }

        let times = match count {
            0 => Vec::new(),
            1 => vec![start_secs],
            n => {
                let span = end_secs - start_secs;
                let steps = (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            end_secs
                        } else {
                            start_secs + span * (i as f64) / steps
                        }
                    })
                    .collect()
            }
        };
        Self::new(times)
    }

    /// Parse a textual timestamp list.
    ///
    /// Accepts an optional surrounding `[` `]`, with entries separated by commas and/or
    /// newlines. Every entry must be exactly one number: `"12.708 15.545"` is rejected rather
    /// than split, because it is what a dropped separator looks like.
    pub fn parse_list(text: &str) -> ReelResult<Self> {
        let body = text.trim();
        let body = body.strip_prefix('[').unwrap_or(body);
        let body = body.strip_suffix(']').unwrap_or(body);

        let mut times = Vec::new();
        for (line_no, line) in body.lines().enumerate() {
            for raw in line.split(',') {
                let entry = raw.trim();
                if entry.is_empty() {
                    continue;
                }
                if entry.split_whitespace().nth(1).is_some() {
                    return Err(ReelError::data_integrity(format!(
                        "cue entry '{entry}' on line {} holds more than one value (missing separator?)",
                        line_no + 1
                    )));
                }
                let t: f64 = entry.parse().map_err(|_| {
                    ReelError::data_integrity(format!(
                        "cue entry '{entry}' on line {} is not a number",
                        line_no + 1
                    ))
                })?;
                times.push(t);
            }
        }
        Self::new(times)
    }

    /// Read and parse a timestamp list file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ReelError::input_not_found(format!(
                "cue list '{}'",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse_list(&text)
    }

    /// Borrow the timestamps in order.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of cues.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Return `true` when there are no cues.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Timestamp of the last cue, if any.
    pub fn last_secs(&self) -> Option<f64> {
        self.times.last().copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/cues.rs"]
mod tests;
