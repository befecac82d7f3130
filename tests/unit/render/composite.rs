use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 4,
        height: 2,
    }
}

#[test]
fn over_handles_opaque_transparent_and_partial() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [1, 2, 3, 255]), [1, 2, 3, 255]);
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
    // 50% premultiplied white over opaque black.
    assert_eq!(over([0, 0, 0, 255], [128, 128, 128, 128]), [128, 128, 128, 255]);
}

#[test]
fn span_rounds_and_clamps() {
    let c = canvas();
    let s = PixelSpan::from_rect(Rect::new(-3.0, 0.4, 2.6, 9.0), c);
    assert_eq!(
        s,
        PixelSpan {
            x0: 0,
            y0: 0,
            x1: 3,
            y1: 2
        }
    );
    assert!(PixelSpan::from_rect(Rect::new(2.0, 0.0, 2.2, 2.0), c).is_empty());
    assert_eq!(PixelSpan::full(c).x1, 4);
}

#[test]
fn fill_span_only_touches_span() {
    let c = canvas();
    let mut buf = vec![0u8; c.rgba_len()];
    let span = PixelSpan {
        x0: 1,
        y0: 0,
        x1: 2,
        y1: 2,
    };
    fill_span(&mut buf, c, span, [9, 9, 9, 255]).unwrap();
    assert_eq!(&buf[0..4], &[0, 0, 0, 0]);
    assert_eq!(&buf[4..8], &[9, 9, 9, 255]);
    assert_eq!(&buf[8..12], &[0, 0, 0, 0]);
    assert_eq!(&buf[20..24], &[9, 9, 9, 255]);
}

#[test]
fn blit_span_copies_opaque_source_inside_span() {
    let c = canvas();
    let mut dst = vec![0u8; c.rgba_len()];
    let src = [7u8, 8, 9, 255].repeat(8);
    let span = PixelSpan {
        x0: 2,
        y0: 1,
        x1: 4,
        y1: 2,
    };
    blit_span(&mut dst, &src, c, span).unwrap();
    assert_eq!(&dst[..24], &[0u8; 24]);
    assert_eq!(&dst[24..], &[7, 8, 9, 255, 7, 8, 9, 255]);
}

#[test]
fn size_mismatch_is_an_error() {
    let mut dst = vec![0u8; 4];
    let err = fill_span(&mut dst, canvas(), PixelSpan::full(canvas()), [0; 4]).unwrap_err();
    assert!(matches!(err, RevealError::Evaluation(_)));
    let err = blit_span(&mut vec![0u8; 32], &[0u8; 4], canvas(), PixelSpan::full(canvas()))
        .unwrap_err();
    assert!(matches!(err, RevealError::Evaluation(_)));
}
