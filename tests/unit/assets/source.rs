use super::*;

#[test]
fn classifies_each_source_kind() {
    assert!(matches!(
        classify("data:audio/mpeg;base64,AAAA"),
        SourceKind::DataUrl {
            mime: "audio/mpeg",
            base64: true,
            payload: "AAAA"
        }
    ));
    assert_eq!(
        classify("https://cdn.example/a.mp3"),
        SourceKind::Remote("https://cdn.example/a.mp3")
    );
    assert_eq!(classify("HTTP://x/y"), SourceKind::Remote("HTTP://x/y"));
    assert_eq!(classify("blob:http://x/1"), SourceKind::Blob("blob:http://x/1"));
    assert_eq!(
        classify("file:///tmp/a.png"),
        SourceKind::Local(PathBuf::from("/tmp/a.png"))
    );
    assert_eq!(
        classify("photos/a.png"),
        SourceKind::Local(PathBuf::from("photos/a.png"))
    );
}

#[test]
fn data_url_encode_decode() {
    let url = encode_data_url("audio/mpeg", b"\x00\x01abc");
    assert!(url.starts_with("data:audio/mpeg;base64,"));
    let (mime, bytes) = decode_data_url(&url).unwrap();
    assert_eq!(mime, "audio/mpeg");
    assert_eq!(bytes, b"\x00\x01abc");
}

#[test]
fn empty_content_type_defaults_to_octet_stream() {
    assert!(encode_data_url("  ", b"x").starts_with("data:application/octet-stream;base64,"));
}

#[test]
fn plain_data_url_payload_is_raw() {
    let (mime, bytes) = decode_data_url("data:text/plain,hello").unwrap();
    assert_eq!(mime, "text/plain");
    assert_eq!(bytes, b"hello");
}

#[test]
fn corrupt_base64_is_an_error() {
    assert!(decode_data_url("data:image/png;base64,@@@").is_err());
}

#[test]
fn local_sources_resolve_against_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.bin"), b"payload").unwrap();
    assert_eq!(load_source_bytes("a.bin", dir.path()).unwrap(), b"payload");
    assert!(load_source_bytes("missing.bin", dir.path()).is_err());
}

#[test]
fn blob_urls_are_rejected() {
    let err = load_source_bytes("blob:http://localhost/abc", Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("blob URL"));
}
