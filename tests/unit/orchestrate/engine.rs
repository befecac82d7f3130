use super::*;
use crate::encode::ffmpeg::is_ffmpeg_on_path;
use crate::scene::model::AnimationSpec;
use crate::scene::preset::{LANDSCAPE_COMPOSITION_ID, PORTRAIT_COMPOSITION_ID};

fn bundle() -> RenderBundle {
    RenderBundle::with_fontdb(Arc::new(usvg::fontdb::Database::new()))
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
            frame_rate: 2.0,
            ..AnimationSpec::default()
        },
    }
}

#[test]
fn resolves_builtin_compositions() {
    let b = bundle();
    assert_eq!(b.compositions().len(), 2);
    assert_eq!(b.resolve(PORTRAIT_COMPOSITION_ID).unwrap().canvas.width, 1080);
    assert_eq!(b.resolve(LANDSCAPE_COMPOSITION_ID).unwrap().canvas.width, 1920);
    let err = b.resolve("nope").unwrap_err();
    assert!(matches!(err, RevealError::CompositionNotFound(ref id) if id == "nope"));
}

#[test]
fn session_applies_preset_rules() {
    let b = bundle();
    let s = b
        .session(PORTRAIT_COMPOSITION_ID, scene(3), Path::new("."))
        .unwrap();
    assert_eq!(s.total_frames(), 6);
    let err = b
        .session(LANDSCAPE_COMPOSITION_ID, scene(2), Path::new("."))
        .unwrap_err();
    assert!(matches!(err, RevealError::InvalidPayload(_)));
}

#[test]
fn render_media_writes_mp4_when_ffmpeg_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.mp4");
    let mut s = scene(1);
    s.audio = Some("missing-track.mp3".to_string());
    let stats = bundle()
        .render_media(
            PORTRAIT_COMPOSITION_ID,
            s,
            &out,
            dir.path(),
            &RenderOpts::default(),
        )
        .unwrap();
    assert_eq!(stats.frames, 2);
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn audio_is_materialized_next_to_the_output() {
    assert_eq!(
        work_dir_for(Path::new("/scratch/slider-render-1/out.mp4")),
        Path::new("/scratch/slider-render-1")
    );
    assert_eq!(work_dir_for(Path::new("out.mp4")), Path::new("."));
}

#[test]
fn undecodable_audio_falls_back_to_silence() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.mp4");
    let mut s = scene(1);
    s.audio = Some("data:audio/mpeg;base64,AAAA".to_string());
    let stats = bundle()
        .render_media(
            PORTRAIT_COMPOSITION_ID,
            s,
            &out,
            dir.path(),
            &RenderOpts::default(),
        )
        .unwrap();
    assert_eq!(stats.frames, 2);
    assert!(std::fs::metadata(&out).unwrap().len() > 0);

    let left: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(left, vec![std::ffi::OsString::from("out.mp4")]);
}
