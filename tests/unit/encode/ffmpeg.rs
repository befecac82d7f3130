use super::*;

fn cfg(audio: AudioInput) -> SinkConfig {
    SinkConfig {
        width: 16,
        height: 8,
        fps: 30.0,
        duration_secs: 2.5,
        audio,
    }
}

fn strings(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Vec<&'a str> {
    args.windows(2)
        .filter(|w| w[0] == flag)
        .map(|w| w[1].as_str())
        .collect()
}

#[test]
fn silent_track_is_muxed_when_no_audio() {
    let opts = FfmpegSinkOpts::new("/tmp/out.mp4");
    let args = strings(&ffmpeg_args(&cfg(AudioInput::Silent), &opts));
    assert_eq!(args.first().map(String::as_str), Some("-y"));
    assert_eq!(value_after(&args, "-i"), vec!["pipe:0", SILENT_AUDIO_SOURCE]);
    assert_eq!(value_after(&args, "-f"), vec!["rawvideo", "lavfi"]);
    assert_eq!(value_after(&args, "-map"), vec!["0:v:0", "1:a:0"]);
    assert_eq!(value_after(&args, "-c:a"), vec!["aac"]);
    assert_eq!(value_after(&args, "-t"), vec!["2.500"]);
    assert_eq!(value_after(&args, "-s"), vec!["16x8"]);
    assert_eq!(value_after(&args, "-r"), vec!["30"]);
    assert_eq!(args.last().map(String::as_str), Some("/tmp/out.mp4"));
}

#[test]
fn audio_file_is_second_input() {
    let mut opts = FfmpegSinkOpts::new("out.mp4");
    opts.overwrite = false;
    let args = strings(&ffmpeg_args(
        &cfg(AudioInput::File(PathBuf::from("/tmp/track.mp3"))),
        &opts,
    ));
    assert_eq!(args.first().map(String::as_str), Some("-n"));
    assert_eq!(value_after(&args, "-i"), vec!["pipe:0", "/tmp/track.mp3"]);
    assert!(!args.iter().any(|a| a == "lavfi"));
    assert!(args.iter().any(|a| a == "+faststart"));
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(validate_sink_config(&cfg(AudioInput::Silent)).is_ok());

    let mut c = cfg(AudioInput::Silent);
    c.width = 15;
    assert!(validate_sink_config(&c).is_err());

    let mut c = cfg(AudioInput::Silent);
    c.fps = 0.0;
    assert!(validate_sink_config(&c).is_err());

    let mut c = cfg(AudioInput::Silent);
    c.duration_secs = f64::NAN;
    assert!(validate_sink_config(&c).is_err());

    let c = cfg(AudioInput::File(PathBuf::from("/definitely/missing.mp3")));
    assert!(validate_sink_config(&c).is_err());
}

#[test]
fn flatten_premul_over_black_produces_expected_rgb() {
    let src = vec![128u8, 0, 0, 128, 1, 2, 3, 255];
    let mut dst = vec![0u8; 8];
    flatten_premul_over_bg(&mut dst, &src, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255, 1, 2, 3, 255]);
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn encodes_mp4_when_ffmpeg_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/out.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    let mut c = cfg(AudioInput::Silent);
    c.duration_secs = 0.1;
    sink.begin(c).unwrap();
    let frame = FrameRGBA {
        width: 16,
        height: 8,
        data: [40u8, 80, 120, 255].repeat(16 * 8),
    };
    for i in 0..3 {
        sink.push_frame(FrameIndex(i), &frame).unwrap();
    }
    assert!(sink.push_frame(FrameIndex(1), &frame).is_err());
    sink.end().unwrap();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn garbage_bytes_have_no_audio_stream() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.mp3");
    std::fs::write(&path, b"<html>not audio</html>").unwrap();
    assert!(!has_audio_stream(&path));
    assert!(!has_audio_stream(&dir.path().join("missing.mp3")));
}
