use super::*;
use crate::encode::sink::InMemorySink;
use crate::scene::model::AnimationSpec;
use crate::scene::preset::RenderPreset;

fn def(preset: RenderPreset) -> CompositionDef {
    CompositionDef {
        id: "test",
        preset,
        canvas: Canvas {
            width: 20,
            height: 10,
        },
    }
}

fn scene(pairs: usize) -> SceneDescription {
    SceneDescription {
        top_images: vec![String::new(); pairs],
        bottom_images: vec![String::new(); pairs],
        audio: None,
        compare: Default::default(),
        overlay: Default::default(),
        animation: AnimationSpec {
            duration_ms: 1000.0,
            frame_rate: 10.0,
            ..AnimationSpec::default()
        },
    }
}

fn session(preset: RenderPreset, pairs: usize) -> RevealResult<RenderSession> {
    RenderSession::new(
        def(preset),
        scene(pairs),
        Arc::new(usvg::fontdb::Database::new()),
        Path::new("."),
    )
}

#[test]
fn session_derives_duration_from_pairs() {
    let s = session(RenderPreset::PortraitSequence, 2).unwrap();
    assert_eq!(s.total_frames(), 20);
    assert_eq!(s.duration_secs(), 2.0);
    assert_eq!(s.timeline().segment_count(), 2);
    assert_eq!(s.full_range().unwrap().len_frames(), 20);
}

#[test]
fn landscape_session_rejects_multiple_pairs() {
    let err = session(RenderPreset::LandscapeLoop, 2).unwrap_err();
    assert!(matches!(err, RevealError::InvalidPayload(_)));
    let s = session(RenderPreset::LandscapeLoop, 1).unwrap();
    assert_eq!(s.total_frames(), 30);
}

#[test]
fn render_frame_is_opaque_and_bounds_checked() {
    let s = session(RenderPreset::PortraitSequence, 1).unwrap();
    let f = s.render_frame(FrameIndex(3)).unwrap();
    assert_eq!((f.width, f.height), (20, 10));
    assert!(f.data.chunks_exact(4).all(|p| p[3] == 255));
    assert!(s.render_frame(FrameIndex(10)).is_err());
}

#[test]
fn render_range_pushes_frames_in_order_across_chunks() {
    let s = session(RenderPreset::PortraitSequence, 2).unwrap();
    let mut sink = InMemorySink::new();
    let opts = RenderOpts {
        chunk_size: 3,
        threads: Some(2),
    };
    let stats = s
        .render_range(
            s.full_range().unwrap(),
            s.sink_config(AudioInput::Silent),
            &mut sink,
            &opts,
        )
        .unwrap();

    assert_eq!(stats.frames, 20);
    assert_eq!(stats.chunks, 7);
    assert!(sink.ended());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, (0..20).collect::<Vec<_>>());

    let cfg = sink.config().unwrap();
    assert_eq!(cfg.fps, 10.0);
    assert_eq!(cfg.duration_secs, 2.0);
    assert_eq!(cfg.audio, AudioInput::Silent);
}

#[test]
fn parallel_frames_match_single_frame_render() {
    let s = session(RenderPreset::PortraitSequence, 1).unwrap();
    let mut sink = InMemorySink::new();
    let range = FrameRange::new(FrameIndex(2), FrameIndex(6)).unwrap();
    s.render_range(
        range,
        s.sink_config(AudioInput::Silent),
        &mut sink,
        &RenderOpts::default(),
    )
    .unwrap();
    for (idx, frame) in sink.frames() {
        assert_eq!(frame, &s.render_frame(*idx).unwrap());
    }
}

#[test]
fn bad_range_and_opts_are_rejected() {
    let s = session(RenderPreset::PortraitSequence, 1).unwrap();
    let mut sink = InMemorySink::new();
    let past_end = FrameRange::new(FrameIndex(0), FrameIndex(11)).unwrap();
    assert!(
        s.render_range(
            past_end,
            s.sink_config(AudioInput::Silent),
            &mut sink,
            &RenderOpts::default()
        )
        .is_err()
    );
    let zero_chunk = RenderOpts {
        chunk_size: 0,
        threads: None,
    };
    assert!(
        s.render_range(
            s.full_range().unwrap(),
            s.sink_config(AudioInput::Silent),
            &mut sink,
            &zero_chunk
        )
        .is_err()
    );
}
