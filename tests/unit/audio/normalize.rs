use super::*;
use std::sync::Mutex;

struct FakeFetcher {
    result: Result<FetchedAudio, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    fn ok(bytes: &[u8], content_type: Option<&str>) -> Self {
        Self {
            result: Ok(FetchedAudio {
                bytes: bytes.to_vec(),
                content_type: content_type.map(str::to_string),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            result: Err("connection refused".to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl AudioFetcher for FakeFetcher {
    fn fetch(&self, url: &str) -> RevealResult<FetchedAudio> {
        self.calls.lock().unwrap().push(url.to_string());
        self.result.clone().map_err(RevealError::audio_fetch)
    }
}

fn scene(audio: Option<&str>) -> SceneDescription {
    SceneDescription {
        top_images: vec!["t".to_string()],
        bottom_images: vec!["b".to_string()],
        audio: audio.map(str::to_string),
        compare: Default::default(),
        overlay: Default::default(),
        animation: Default::default(),
    }
}

#[test]
fn remote_audio_becomes_data_url() {
    let f = FakeFetcher::ok(b"abc", Some("audio/ogg; charset=binary"));
    let out = normalize_audio(scene(Some("https://cdn.test/a.ogg")), &f);
    assert_eq!(out.audio.as_deref(), Some("data:audio/ogg;base64,YWJj"));
    assert_eq!(f.calls(), vec!["https://cdn.test/a.ogg".to_string()]);
}

#[test]
fn missing_content_type_is_guessed_from_extension() {
    let f = FakeFetcher::ok(b"abc", None);
    let out = normalize_audio(scene(Some("http://x.test/song.WAV?sig=1")), &f);
    assert!(out.audio.unwrap().starts_with("data:audio/wav;base64,"));
}

#[test]
fn fetch_failure_drops_audio_and_keeps_the_rest() {
    let f = FakeFetcher::failing();
    let input = scene(Some("https://cdn.test/a.mp3"));
    let out = normalize_audio(input.clone(), &f);
    assert_eq!(out.audio, None);
    assert_eq!(out.top_images, input.top_images);
    assert_eq!(out.animation, input.animation);
}

#[test]
fn local_and_inline_audio_pass_through_without_fetching() {
    let f = FakeFetcher::failing();
    for src in ["music/track.mp3", "data:audio/mpeg;base64,AAAA"] {
        let out = normalize_audio(scene(Some(src)), &f);
        assert_eq!(out.audio.as_deref(), Some(src));
    }
    assert!(f.calls().is_empty());
}

#[test]
fn blank_and_blob_audio_are_dropped() {
    let f = FakeFetcher::failing();
    assert_eq!(normalize_audio(scene(Some("  ")), &f).audio, None);
    assert_eq!(
        normalize_audio(scene(Some("blob:http://localhost/123")), &f).audio,
        None
    );
    assert_eq!(normalize_audio(scene(None), &f).audio, None);
    assert!(f.calls().is_empty());
}

#[test]
fn guesses_common_types() {
    assert_eq!(guess_audio_type("a.m4a"), "audio/mp4");
    assert_eq!(guess_audio_type("a.flac#t=1"), "audio/flac");
    assert_eq!(guess_audio_type("noext"), "audio/mpeg");
}
