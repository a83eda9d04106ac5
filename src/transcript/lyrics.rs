//! Built-in lyric transcript used when no transcript file is supplied.

/// Default transcript. Each `\n` ends a caption line; the space after it starts the next word.
pub const DEFAULT_LYRICS: &str = concat!(
    "Oh cube,\n",
    " rocky little cube.\n",
    " You tile my heart,\n",
    " cute little cube.\n",
    " Thetra, spiky hot thetra.\n",
    " As methane, you are my flame.\n",
    " My platonic friends I love.\n",
    " Only five I know thereof.\n",
    " My platonic friends, I’m most proud of.\n",
    " Oh, my platonic love.\n",
    " Oh Octa, you beautiful breeze.\n",
    " Your six corners shine like a diamond.\n",
    " Oh Ico, my infinite Ocean.\n",
    " 20 faces, a perfect dice for me.\n",
    " Oh Dodecahedron , my universe.\n",
    " Your thirty edges are golden to me.\n",
    " My platonic friends I love.\n",
    " Only five I know thereof.\n",
    " My platonic friends, I’m most proud of.\n",
    " Oh, my platonic love.\n",
    " My platonic friends I love.\n",
    " Only five I know thereof.\n",
    " My platonic friends, I’m most proud of.\n",
    " Oh, my platonic love.",
);

/// Length of the backing track in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 166.766;

/// Timestamp of the first sung word.
pub const DEFAULT_FIRST_CUE_SECS: f64 = 12.189;

/// Timestamp of the last sung word; cues in between are interpolated evenly.
pub const DEFAULT_LAST_CUE_SECS: f64 = 160.0;

/// Default simulated frame rate.
pub const DEFAULT_FPS: u32 = 60;
