use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn chunks_cover_range_without_gaps() {
    let r = FrameRange::new(FrameIndex(0), FrameIndex(10)).unwrap();
    let chunks: Vec<_> = r.chunks(4).collect();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].start, FrameIndex(0));
    assert_eq!(chunks[2].end, FrameIndex(10));
    assert_eq!(chunks.iter().map(|c| c.len_frames()).sum::<u64>(), 10);
}

#[test]
fn hex_color_and_premul() {
    let c = Rgba8::from_rgb_hex(0x020617);
    assert_eq!((c.r, c.g, c.b, c.a), (0x02, 0x06, 0x17, 255));
    assert_eq!(c.premul(), [0x02, 0x06, 0x17, 255]);

    let half = Rgba8 {
        r: 200,
        g: 100,
        b: 0,
        a: 128,
    };
    assert_eq!(half.premul()[0], 100);
}

#[test]
fn lerp_hits_endpoints() {
    let a = Rgba8::from_rgb_hex(0x000000);
    let b = Rgba8::from_rgb_hex(0xffffff);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
}
