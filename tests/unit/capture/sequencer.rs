use image::RgbaImage;

use super::*;
use crate::{
    capture::sources::LoopingFrames, foundation::clock::ManualClock, render::codec::decode_image,
};

fn grabber(clock: Arc<ManualClock>) -> FrameGrabber {
    FrameGrabber::new(clock)
}

#[test]
fn capture_encodes_frame_at_native_resolution() {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let g = grabber(clock.clone());
    let mut src = LoopingFrames::new(vec![RgbaImage::from_pixel(
        64,
        48,
        image::Rgba([250, 10, 10, 255]),
    )]);

    let photo = g.capture(Some(&mut src), None).unwrap();
    assert_eq!(photo.id, PhotoId(1_700_000_000_000));
    assert_eq!(photo.captured_at_ms, 1_700_000_000_000);
    assert_eq!((photo.image.width, photo.image.height), (64, 48));

    let decoded = decode_image(&photo.image.bytes).unwrap();
    assert_eq!(decoded.dimensions(), (64, 48));
    assert!(decoded.get_pixel(10, 10).0[0] > 230);
}

#[test]
fn ids_stay_unique_when_clock_does_not_move() {
    let clock = Arc::new(ManualClock::new(5));
    let g = grabber(clock);
    let mut src = LoopingFrames::new(vec![RgbaImage::from_pixel(
        2,
        2,
        image::Rgba([0, 0, 0, 255]),
    )]);
    let a = g.capture(Some(&mut src), None).unwrap();
    let b = g.capture(Some(&mut src), Some(a.id)).unwrap();
    assert!(b.id > a.id);
}

#[test]
fn missing_feed_or_frame_is_a_silent_no_op() {
    let g = grabber(Arc::new(ManualClock::new(0)));
    assert!(g.capture(None, None).is_none());

    let mut empty = LoopingFrames::new(vec![]);
    assert!(g.capture(Some(&mut empty), None).is_none());
}
