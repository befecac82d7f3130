use super::*;

#[test]
fn ok_line_serializes_with_status_tag() {
    let line = WorkerResponse::Ok {
        output_path: PathBuf::from("/tmp/x/out.mp4"),
    }
    .to_line()
    .unwrap();
    assert_eq!(line, r#"{"status":"ok","outputPath":"/tmp/x/out.mp4"}"#);

    let err = WorkerResponse::Error {
        message: "boom".to_string(),
    }
    .to_line()
    .unwrap();
    assert_eq!(err, r#"{"status":"error","message":"boom"}"#);
}

#[test]
fn last_non_empty_line_wins() {
    let stdout = "rendering...\n{\"status\":\"ok\",\"outputPath\":\"/a/b.mp4\"}\n\n  \n";
    assert_eq!(
        parse_worker_stdout(stdout).unwrap(),
        PathBuf::from("/a/b.mp4")
    );
}

#[test]
fn free_text_is_a_protocol_error() {
    let err = parse_worker_stdout("done\n").unwrap_err();
    assert!(matches!(err, RevealError::WorkerProtocol(_)));
    let err = parse_worker_stdout("").unwrap_err();
    assert!(matches!(err, RevealError::WorkerProtocol(_)));
}

#[test]
fn relative_path_is_a_protocol_error() {
    let err = parse_worker_stdout(r#"{"status":"ok","outputPath":"out.mp4"}"#).unwrap_err();
    assert!(matches!(err, RevealError::WorkerProtocol(_)));
}

#[test]
fn error_status_with_success_exit_is_a_protocol_error() {
    let err = parse_worker_stdout(r#"{"status":"error","message":"x"}"#).unwrap_err();
    match err {
        RevealError::WorkerProtocol(msg) => assert!(msg.contains('x')),
        other => panic!("unexpected {other:?}"),
    }
}
