use super::*;
use crate::foundation::core::FrameIndex;

fn caption(output: u64) -> CaptionFrame {
    CaptionFrame {
        output: OutputIndex(output),
        frame: FrameIndex(output * 3),
        time_secs: output as f64,
        cue_secs: output as f64,
        caption: format!("word{output} "),
    }
}

fn blank() -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0; 4],
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        canvas: Canvas::square(1),
        fps: Fps::new(10, 1).unwrap(),
        frame_count: 2,
    }
}

#[test]
fn in_memory_sink_records_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(&caption(0), &blank()).unwrap();
    sink.push_frame(&caption(1), &blank()).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config().unwrap().frame_count, 2);
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].0.caption, "word1 ");
    assert!(sink.is_ended());
}

#[test]
fn in_memory_sink_rejects_gaps() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    assert!(sink.push_frame(&caption(1), &blank()).is_err());
}
