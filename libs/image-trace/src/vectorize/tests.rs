use super::*;
use crate::preprocess::{prepare, PreprocessParams};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn encode_png(image: RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn disc_mask(size: u32, radius: f64) -> BinaryMask {
    let c = size as f64 / 2.0;
    BinaryMask::from_fn(size, size, |x, y| {
        let dx = x as f64 + 0.5 - c;
        let dy = y as f64 + 0.5 - c;
        dx * dx + dy * dy <= radius * radius
    })
}

fn vectorizer(params: TraceParams) -> Vectorizer {
    Vectorizer::new(params).unwrap()
}

#[test]
fn test_default_params() {
    let params = TraceParams::default();
    assert_eq!(params.threshold, 128);
    assert_eq!(params.turd_size, 2);
    assert!(params.opt_curve);
    assert!(params.validate().is_ok());
}

#[test]
fn test_invalid_params_rejected() {
    let zero_threshold = TraceParams {
        threshold: 0,
        ..TraceParams::default()
    };
    assert!(matches!(
        Vectorizer::new(zero_threshold),
        Err(TraceError::InvalidParams { .. })
    ));

    let bad_tolerance = TraceParams {
        opt_tolerance: f64::NAN,
        ..TraceParams::default()
    };
    assert!(Vectorizer::new(bad_tolerance).is_err());
}

#[test]
fn test_params_deserialize_with_defaults() {
    let params: TraceParams = serde_json::from_str(r#"{"turdSize": 10}"#).unwrap();
    assert_eq!(params.turd_size, 10);
    assert_eq!(params.threshold, TraceParams::default().threshold);
}

#[test]
fn test_empty_mask_gives_no_paths() {
    let mask = BinaryMask::from_fn(10, 10, |_, _| false);
    let traced = vectorizer(TraceParams::default()).trace_mask(&mask);
    assert!(traced.is_empty());
    assert_eq!(traced.dimensions(), Some((10, 10)));
}

#[test]
fn test_speckles_are_dropped() {
    // 2-pixel speckle and a 3x3 block
    let mask = BinaryMask::from_fn(12, 12, |x, y| {
        (y == 1 && (x == 1 || x == 2)) || ((6..9).contains(&x) && (6..9).contains(&y))
    });
    let traced = vectorizer(TraceParams::default()).trace_mask(&mask);
    assert_eq!(traced.len(), 1);
    assert_eq!(traced.paths()[0].area(), 9);
}

#[test]
fn test_turd_size_zero_keeps_single_pixels() {
    let mask = BinaryMask::from_fn(5, 5, |x, y| x == 2 && y == 2);
    let params = TraceParams {
        turd_size: 0,
        ..TraceParams::default()
    };
    let traced = vectorizer(params).trace_mask(&mask);
    assert_eq!(traced.len(), 1);
}

#[test]
fn test_unoptimized_square_keeps_lattice_corners() {
    let mask = BinaryMask::from_fn(10, 10, |x, y| (2..8).contains(&x) && (3..7).contains(&y));
    let params = TraceParams {
        opt_curve: false,
        ..TraceParams::default()
    };
    let traced = vectorizer(params).trace_mask(&mask);
    let outline = &traced.paths()[0];
    assert_eq!(
        outline.points(),
        &[
            DVec2::new(2.0, 3.0),
            DVec2::new(8.0, 3.0),
            DVec2::new(8.0, 7.0),
            DVec2::new(2.0, 7.0),
        ]
    );
}

#[test]
fn test_optimized_disc_stays_near_circle() {
    let mask = disc_mask(64, 20.0);
    let traced = vectorizer(TraceParams::default()).trace_mask(&mask);
    assert_eq!(traced.len(), 1);

    let outline = &traced.paths()[0];
    assert!(outline.len() >= 8, "disc simplified to {} points", outline.len());
    for p in outline.points() {
        let r = (*p - DVec2::splat(32.0)).length();
        assert!((r - 20.0).abs() < 1.5, "point {p:?} at radius {r}");
    }
}

#[test]
fn test_optimization_reduces_point_count() {
    let mask = disc_mask(64, 20.0);
    let raw = vectorizer(TraceParams {
        opt_curve: false,
        ..TraceParams::default()
    })
    .trace_mask(&mask);
    let smooth = vectorizer(TraceParams::default()).trace_mask(&mask);
    assert!(smooth.paths()[0].len() < raw.paths()[0].len());
}

#[test]
fn test_ring_outlines_skip_holes() {
    let c = 20.0;
    let mask = BinaryMask::from_fn(40, 40, |x, y| {
        let d = ((x as f64 + 0.5 - c).powi(2) + (y as f64 + 0.5 - c).powi(2)).sqrt();
        (8.0..16.0).contains(&d)
    });
    let traced = vectorizer(TraceParams::default()).trace_mask(&mask);
    let kinds: Vec<PathKind> = traced.paths().iter().map(SubPath::kind).collect();
    assert_eq!(kinds, vec![PathKind::Outer, PathKind::Hole]);
    assert_eq!(traced.outlines().count(), 1);
}

#[test]
fn test_trace_is_deterministic() {
    let mask = disc_mask(48, 15.0);
    let v = vectorizer(TraceParams::default());
    assert_eq!(v.trace_mask(&mask), v.trace_mask(&mask));
}

#[test]
fn test_trace_bytes_uses_luminance() {
    let mut image = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
    for y in 5..15 {
        for x in 5..15 {
            image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    let traced = vectorizer(TraceParams::default())
        .trace_bytes(&encode_png(image))
        .unwrap();
    assert_eq!(traced.len(), 1);
    assert_eq!(traced.paths()[0].area(), 100);
    assert!(!traced.paths()[0].is_empty());
    assert_eq!(traced.dimensions(), Some((20, 20)));
}

#[test]
fn test_trace_bytes_rejects_garbage() {
    let result = vectorizer(TraceParams::default()).trace_bytes(b"garbage");
    assert!(matches!(result, Err(TraceError::Decode(_))));
}

#[test]
fn test_trace_input_from_prepared_mask() {
    let image = RgbaImage::from_fn(30, 30, |x, y| {
        if (10..20).contains(&x) && (10..20).contains(&y) {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let bytes = encode_png(image);
    let prepared = prepare(&bytes, &PreprocessParams::default());
    assert!(!prepared.is_degraded());

    let traced = vectorizer(TraceParams::default())
        .trace_input(&prepared)
        .unwrap();
    assert_eq!(traced.outlines().count(), 1);
    assert_eq!(traced.paths()[0].area(), 100);
}

#[test]
fn test_trace_input_degraded_truncated_png() {
    let mut image = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
    for y in 5..15 {
        for x in 5..15 {
            image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    let bytes = encode_png(image);
    let cut = &bytes[..bytes.len() - 12];
    let prepared = prepare(cut, &PreprocessParams::default());
    assert!(prepared.is_degraded());

    let traced = vectorizer(TraceParams::default())
        .trace_input(&prepared)
        .unwrap();
    assert_eq!(traced.outlines().count(), 1);
    assert_eq!(traced.paths()[0].area(), 100);
    assert_eq!(traced.dimensions(), Some((20, 20)));
}

#[test]
fn test_trace_input_degraded_garbage_fails() {
    let bytes = b"still not an image";
    let prepared = prepare(bytes, &PreprocessParams::default());
    assert!(vectorizer(TraceParams::default())
        .trace_input(&prepared)
        .is_err());
}
