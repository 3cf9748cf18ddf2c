use std::sync::Mutex;

use image::RgbImage;

use super::*;
use crate::{
    foundation::core::{Canvas, Rect},
    model::photo::PhotoId,
    render::{codec::encode_jpeg, surface::RasterSurface},
};

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Fill(Rect, Paint),
    Draw(Rect, (u32, u32)),
}

struct RecordingSurface {
    canvas: Canvas,
    ops: Arc<Mutex<Vec<Op>>>,
}

impl RasterSurface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.lock().unwrap().push(Op::Fill(rect, paint.clone()));
    }

    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) {
        self.ops
            .lock()
            .unwrap()
            .push(Op::Draw(rect, image.dimensions()));
    }

    fn encode_jpeg(&self, _quality: u8) -> PhotoboothResult<EncodedImage> {
        Ok(EncodedImage::new(
            self.canvas.width,
            self.canvas.height,
            vec![0xFF, 0xD8],
        ))
    }
}

#[derive(Default)]
struct RecordingFactory {
    ops: Arc<Mutex<Vec<Op>>>,
}

impl SurfaceFactory for RecordingFactory {
    fn create(&self, canvas: Canvas) -> Option<Box<dyn RasterSurface>> {
        Some(Box::new(RecordingSurface {
            canvas,
            ops: Arc::clone(&self.ops),
        }))
    }
}

struct NoSurfaces;

impl SurfaceFactory for NoSurfaces {
    fn create(&self, _canvas: Canvas) -> Option<Box<dyn RasterSurface>> {
        None
    }
}

fn photo(id: i64, w: u32, h: u32) -> CapturedPhoto {
    let rgb = RgbImage::from_pixel(w, h, image::Rgb([10, 200, 10]));
    let bytes = encode_jpeg(&rgb, 90).unwrap();
    CapturedPhoto {
        id: PhotoId(id),
        image: EncodedImage::new(w, h, bytes),
        captured_at_ms: id,
    }
}

fn recording() -> (Compositor, Arc<Mutex<Vec<Op>>>) {
    let factory = RecordingFactory::default();
    let ops = Arc::clone(&factory.ops);
    let opts = CompositorOpts {
        decode_threads: Some(2),
        ..Default::default()
    };
    (Compositor::with_surfaces(opts, Arc::new(factory)).unwrap(), ops)
}

#[test]
fn empty_inputs_produce_nothing() {
    let (c, ops) = recording();
    let style = StyleParameters::default();
    assert!(
        c.generate_final_image(&[], Some(Template::Grid), BackgroundChoice::White, style)
            .is_none()
    );
    assert!(
        c.generate_final_image(&[photo(1, 4, 4)], None, BackgroundChoice::White, style)
            .is_none()
    );
    assert!(ops.lock().unwrap().is_empty());
}

#[test]
fn missing_surface_produces_nothing() {
    let c = Compositor::with_surfaces(CompositorOpts::default(), Arc::new(NoSurfaces)).unwrap();
    let out = c.generate_final_image(
        &[photo(1, 4, 4)],
        Some(Template::Single),
        BackgroundChoice::Black,
        StyleParameters::default(),
    );
    assert!(out.is_none());
}

#[test]
fn every_photo_is_drawn_in_slot_order_after_background() {
    let (c, ops) = recording();
    let photos = [photo(1, 4, 3), photo(2, 6, 3), photo(3, 8, 3), photo(4, 10, 3)];
    let out = c
        .generate_final_image(
            &photos,
            Some(Template::Grid),
            BackgroundChoice::Gray,
            StyleParameters::new(0, 5),
        )
        .unwrap();
    assert_eq!((out.width, out.height), (1600, 1600));

    let ops = ops.lock().unwrap();
    assert_eq!(
        ops[0],
        Op::Fill(Canvas::new(1600, 1600).bounds(), Paint::Solid(Rgba8::GRAY))
    );
    let draws: Vec<_> = ops
        .iter()
        .filter_map(|op| match op {
            Op::Draw(r, dims) => Some((*r, *dims)),
            Op::Fill(..) => None,
        })
        .collect();
    assert_eq!(draws.len(), 4);
    for (i, (rect, dims)) in draws.iter().enumerate() {
        assert_eq!(*rect, placement(Template::Grid, i, Canvas::new(1600, 1600), 5));
        assert_eq!(dims.0, 4 + 2 * i as u32);
    }
}

#[test]
fn border_is_drawn_under_each_photo() {
    let (c, ops) = recording();
    let photos = [photo(1, 4, 4)];
    c.generate_final_image(
        &photos,
        Some(Template::Single),
        BackgroundChoice::White,
        StyleParameters::new(3, 2),
    )
    .unwrap();

    let ops = ops.lock().unwrap();
    assert_eq!(ops.len(), 3);
    let Op::Fill(frame, Paint::Solid(color)) = &ops[1] else {
        panic!("expected border fill, got {:?}", ops[1]);
    };
    let Op::Draw(rect, _) = &ops[2] else {
        panic!("expected photo draw, got {:?}", ops[2]);
    };
    assert_eq!(*color, Rgba8::BLACK);
    assert_eq!(frame.width(), rect.width() + 12.0);
    assert_eq!(frame.height(), rect.height() + 12.0);
    assert_eq!(frame.x0, rect.x0 - 6.0);
    assert_eq!(frame.y0, rect.y0 - 6.0);
}

#[test]
fn undecodable_photo_is_skipped_but_others_draw() {
    let (c, ops) = recording();
    let mut broken = photo(2, 4, 4);
    broken.image = EncodedImage::new(4, 4, b"garbage".to_vec());
    let photos = [photo(1, 4, 4), broken, photo(3, 4, 4)];
    let out = c.generate_final_image(
        &photos,
        Some(Template::Strip),
        BackgroundChoice::White,
        StyleParameters::default(),
    );
    assert!(out.is_some());

    let ops = ops.lock().unwrap();
    let drawn: Vec<Rect> = ops
        .iter()
        .filter_map(|op| match op {
            Op::Draw(r, _) => Some(*r),
            Op::Fill(..) => None,
        })
        .collect();
    let canvas = Template::Strip.canvas();
    assert_eq!(
        drawn,
        vec![
            placement(Template::Strip, 0, canvas, 0),
            placement(Template::Strip, 2, canvas, 0)
        ]
    );
}

#[test]
fn cpu_composite_is_a_decodable_jpeg() {
    let c = Compositor::new(CompositorOpts::default()).unwrap();
    let out = c
        .generate_final_image(
            &[photo(1, 8, 8)],
            Some(Template::Single),
            BackgroundChoice::Pattern,
            StyleParameters::new(2, 10),
        )
        .unwrap();
    let img = decode_image(&out.bytes).unwrap();
    assert_eq!(img.dimensions(), (1600, 1600));
    let center = img.get_pixel(800, 800).0;
    assert!(center[1] > 150 && center[0] < 80);
}

#[test]
fn invalid_opts_are_rejected() {
    let bad_quality = CompositorOpts {
        jpeg_quality: 0,
        ..Default::default()
    };
    assert!(Compositor::new(bad_quality).is_err());
    let bad_threads = CompositorOpts {
        decode_threads: Some(0),
        ..Default::default()
    };
    assert!(Compositor::new(bad_threads).is_err());
}
