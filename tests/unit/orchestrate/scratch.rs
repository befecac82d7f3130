use super::*;

fn scene() -> SceneDescription {
    SceneDescription {
        top_images: vec!["t.png".to_string()],
        bottom_images: vec!["b.png".to_string()],
        audio: None,
        compare: Default::default(),
        overlay: Default::default(),
        animation: Default::default(),
    }
}

#[test]
fn create_uses_prefix_under_root() {
    let root = tempfile::tempdir().unwrap();
    let s = ScratchDir::create(Some(root.path())).unwrap();
    assert!(s.path().starts_with(root.path()));
    let name = s.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with(SCRATCH_PREFIX), "{name}");
    assert!(s.path().is_dir());
}

#[test]
fn payload_round_trips_through_the_directory() {
    let s = ScratchDir::create(None).unwrap();
    let p = s.write_payload(&scene()).unwrap();
    assert_eq!(p, s.payload_path());
    let back = SceneDescription::from_path(&p).unwrap();
    assert_eq!(back, scene());
    assert_eq!(s.read_output(&p).unwrap(), std::fs::read(&p).unwrap());
}

#[test]
fn output_names_must_be_plain() {
    let s = ScratchDir::create(None).unwrap();
    assert_eq!(
        s.output_path("video.mp4").unwrap(),
        s.path().join("video.mp4")
    );
    for bad in ["../x.mp4", "a/b.mp4", "", "..", PAYLOAD_FILE] {
        assert!(s.output_path(bad).is_err(), "{bad}");
    }
}

#[test]
fn close_removes_tree_and_tolerates_missing_tree() {
    let root = tempfile::tempdir().unwrap();
    let s = ScratchDir::create(Some(root.path())).unwrap();
    std::fs::write(s.path().join("junk.bin"), b"x").unwrap();
    let path = s.path().to_path_buf();
    s.close().unwrap();
    assert!(!path.exists());

    let s = ScratchDir::create(Some(root.path())).unwrap();
    std::fs::remove_dir_all(s.path()).unwrap();
    s.close().unwrap();
}

#[test]
fn drop_removes_tree() {
    let root = tempfile::tempdir().unwrap();
    let path = {
        let s = ScratchDir::create(Some(root.path())).unwrap();
        std::fs::write(s.path().join("partial.mp4"), b"x").unwrap();
        s.path().to_path_buf()
    };
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}
