use super::*;

fn fps10() -> Fps {
    Fps::new(10, 1).unwrap()
}

fn captions(frames: &[CaptionFrame]) -> Vec<&str> {
    frames.iter().map(|f| f.caption.as_str()).collect()
}

#[test]
fn line_break_resets_third_frame() {
    let t = Transcript::from_tokens(["hello", "world\n", "foo"]);
    let c = CueSchedule::new(vec![0.0, 0.1, 0.2]).unwrap();
    let frames = plan_captions(&t, &c, fps10()).unwrap();

    assert_eq!(captions(&frames), ["hello ", "hello world ", "foo "]);
    assert_eq!(
        frames.iter().map(|f| f.frame.0).collect::<Vec<_>>(),
        [0, 1, 2]
    );
}

#[test]
fn one_output_per_token_in_increasing_order() {
    let t = Transcript::from_lyrics("a b\n c d e\n f");
    let c = CueSchedule::interpolated(0.25, 3.0, t.len()).unwrap();
    let frames = plan_captions(&t, &c, fps10()).unwrap();

    assert_eq!(frames.len(), t.len());
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.output, OutputIndex(i as u64));
        assert!(f.time_secs >= f.cue_secs);
    }
    assert!(frames.windows(2).all(|w| w[0].frame < w[1].frame));
}

#[test]
fn sparse_cues_skip_frames_and_outputs_diverge_from_frames() {
    let t = Transcript::from_tokens(["x", "y"]);
    let c = CueSchedule::new(vec![0.5, 1.0]).unwrap();
    let frames = plan_captions(&t, &c, fps10()).unwrap();

    assert_eq!(frames[0].frame, FrameIndex(5));
    assert_eq!(frames[0].output, OutputIndex(0));
    assert_eq!(frames[1].frame, FrameIndex(10));
    assert_eq!(frames[1].output, OutputIndex(1));
}

#[test]
fn dense_cues_are_consumed_one_per_tick() {
    let t = Transcript::from_tokens(["a", "b", "c"]);
    let c = CueSchedule::new(vec![0.0, 0.0, 0.01]).unwrap();
    let mut tl = CaptionTimeline::new(&t, &c, fps10()).unwrap();

    let f0 = tl.tick().unwrap();
    assert_eq!((f0.frame, f0.caption.as_str()), (FrameIndex(0), "a "));
    assert_eq!(tl.consumed(), 1);

    let f1 = tl.tick().unwrap();
    assert_eq!((f1.frame, f1.caption.as_str()), (FrameIndex(1), "a b "));
    assert_eq!(tl.consumed(), 2);

    let f2 = tl.tick().unwrap();
    assert_eq!((f2.frame, f2.caption.as_str()), (FrameIndex(2), "a b c "));
    assert!(tl.is_finished());
    assert!(tl.tick().is_none());
}

#[test]
fn stops_right_after_last_cue() {
    let t = Transcript::from_tokens(["only"]);
    let c = CueSchedule::new(vec![0.3]).unwrap();
    let mut tl = CaptionTimeline::new(&t, &c, fps10()).unwrap();

    let produced: Vec<_> = tl.by_ref().collect();
    assert_eq!(produced.len(), 1);
    assert_eq!(tl.frame(), FrameIndex(4));
}

#[test]
fn mismatched_lengths_fail_before_any_frame() {
    let t = Transcript::from_tokens(["a", "b", "c", "d", "e"]);
    let c = CueSchedule::new(vec![0.0, 0.1, 0.2, 0.3]).unwrap();

    let err = CaptionTimeline::new(&t, &c, fps10()).unwrap_err();
    assert!(matches!(err, ReelError::DataIntegrity(_)));
    assert!(matches!(
        plan_captions(&t, &c, fps10()),
        Err(ReelError::DataIntegrity(_))
    ));
}

#[test]
fn replanning_is_deterministic() {
    let t = Transcript::from_lyrics(crate::transcript::lyrics::DEFAULT_LYRICS);
    let c = CueSchedule::interpolated(12.189, 160.0, t.len()).unwrap();
    let fps = Fps::new(60, 1).unwrap();

    let a = plan_captions(&t, &c, fps).unwrap();
    let b = plan_captions(&t, &c, fps).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), t.len());
    assert_eq!(a[1].caption, "Oh cube, ");
    assert_eq!(a[2].caption, "rocky ");
}

#[test]
fn empty_inputs_produce_no_frames() {
    let t = Transcript::from_tokens(Vec::<String>::new());
    let c = CueSchedule::new(Vec::new()).unwrap();
    assert!(plan_captions(&t, &c, fps10()).unwrap().is_empty());
}

#[test]
fn idle_stretch_is_skipped_in_one_tick() {
    let t = Transcript::from_tokens(["far"]);
    let c = CueSchedule::new(vec![1.0e12]).unwrap();
    let fps = Fps::new(60, 1).unwrap();
    let mut tl = CaptionTimeline::new(&t, &c, fps).unwrap();

    assert!(tl.tick().is_none());
    let due = tl.frame();
    assert!(fps.frame_time_secs(due) >= 1.0e12);
    assert!(fps.frame_time_secs(FrameIndex(due.0 - 1)) < 1.0e12);

    let f = tl.tick().unwrap();
    assert_eq!(f.frame, due);
    assert_eq!(f.caption, "far ");
    assert!(tl.is_finished());
}

#[test]
fn skipping_lands_on_the_exact_due_frame() {
    let t = Transcript::from_tokens(["a", "b", "c"]);
    let c = CueSchedule::new(vec![0.3, 0.30001, 2.0]).unwrap();
    let mut tl = CaptionTimeline::new(&t, &c, fps10()).unwrap();

    assert!(tl.tick().is_none());
    assert_eq!(tl.frame(), FrameIndex(3));
    let frames: Vec<_> = tl.collect();
    assert_eq!(
        frames.iter().map(|f| f.frame.0).collect::<Vec<_>>(),
        [3, 4, 20]
    );
}

#[test]
fn ntsc_rate_due_frames_match_a_linear_walk() {
    let fps = Fps::new(30000, 1001).unwrap();
    let t = Transcript::from_tokens(["a", "b", "c"]);
    let c = CueSchedule::new(vec![1.001, 2.5, 7.0]).unwrap();
    let frames = plan_captions(&t, &c, fps).unwrap();

    for (f, &cue) in frames.iter().zip(c.times()) {
        let linear = (0u64..)
            .find(|&i| fps.frame_time_secs(FrameIndex(i)) >= cue)
            .unwrap();
        assert_eq!(f.frame, FrameIndex(linear));
    }
}

#[test]
fn cue_past_the_frame_range_is_rejected() {
    let t = Transcript::from_tokens(["never"]);
    let c = CueSchedule::new(vec![1.0e300]).unwrap();
    let err = CaptionTimeline::new(&t, &c, fps10()).unwrap_err();
    assert!(matches!(err, ReelError::DataIntegrity(_)));
}
