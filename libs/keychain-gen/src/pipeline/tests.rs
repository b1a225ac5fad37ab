use super::*;
use approx::assert_relative_eq;
use image::{ImageFormat, Rgba, RgbaImage};
use solid_mesh::export::StlFormat;
use std::io::Cursor;

fn encode(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn white(size: u32) -> Vec<u8> {
    encode(&RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255])))
}

/// White image with a black square covering pixels `from..to` on both axes.
fn square(size: u32, from: u32, to: u32) -> Vec<u8> {
    let mut image = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]));
    for y in from..to {
        for x in from..to {
            image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    encode(&image)
}

#[test]
fn test_blank_image_yields_plate_only() {
    let model = Generator::default()
        .generate(&white(100), &GenerationOptions::new(3.0))
        .unwrap();

    assert_eq!(model.mesh.triangle_count(), 12);
    assert_eq!(model.report.base_triangles, 12);
    assert_eq!(model.report.decorations, 0);
    assert_eq!(model.report.image_size, [100, 100]);
    assert_eq!(model.report.plate_size, [50.0, 50.0]);
    assert!(model.report.notes.is_empty());

    let (min, max) = model.mesh.bounding_box();
    assert_relative_eq!(min.z, -1.5);
    assert_relative_eq!(max.z, 1.5);
}

#[test]
fn test_decoration_sits_on_plate() {
    let model = Generator::default()
        .generate(&square(100, 30, 70), &GenerationOptions::new(4.0))
        .unwrap();

    assert_eq!(model.report.decorations, 1);
    assert_eq!(
        model.mesh.triangle_count(),
        model.report.base_triangles + model.report.decoration_triangles
    );

    let (min, max) = model.mesh.bounding_box();
    assert_relative_eq!(min.z, -2.0);
    assert_relative_eq!(max.z, 4.0);
}

#[test]
fn test_landscape_plate_size() {
    let image = encode(&RgbaImage::from_pixel(200, 100, Rgba([255, 255, 255, 255])));
    let model = generate(&image, &GenerationOptions::new(2.0)).unwrap();

    assert_eq!(model.report.plate_size, [50.0, 25.0]);
    let (min, max) = model.mesh.bounding_box();
    assert_relative_eq!(max.x - min.x, 50.0);
    assert_relative_eq!(max.y - min.y, 25.0);
}

#[test]
fn test_hole_segments_setting() {
    let settings = GeneratorSettings {
        hole_segments: 12,
        ..Default::default()
    };
    let generator = Generator::new(settings).unwrap();
    let model = generator
        .generate(&white(100), &GenerationOptions::new(3.0).with_hole(50.0, 50.0))
        .unwrap();

    let stats = model.report.hole.unwrap();
    assert_eq!(stats.wall_triangles, 24);
    assert_eq!(stats.removed_vertices, 0);
    assert_eq!(model.mesh.triangle_count(), 12 + 24);
}

#[test]
fn test_binary_setting() {
    let settings = GeneratorSettings {
        stl_format: StlFormat::Binary,
        ..Default::default()
    };
    let model = Generator::new(settings)
        .unwrap()
        .generate(&white(64), &GenerationOptions::new(3.0))
        .unwrap();
    assert_eq!(model.stl.len(), 84 + 50 * 12);
}

#[test]
fn test_custom_solid_name() {
    let settings = GeneratorSettings {
        solid_name: "keychain".into(),
        ..Default::default()
    };
    let model = Generator::new(settings)
        .unwrap()
        .generate(&white(32), &GenerationOptions::new(3.0))
        .unwrap();
    let text = String::from_utf8(model.stl).unwrap();
    assert!(text.starts_with("solid keychain\n"));
    assert!(text.ends_with("endsolid keychain\n"));
}

#[test]
fn test_invalid_settings_rejected() {
    let settings = GeneratorSettings {
        decoration_depth_ratio: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        Generator::new(settings),
        Err(GenerateError::InvalidOptions { .. })
    ));
}

#[test]
fn test_options_validated_before_image() {
    let err = Generator::default()
        .generate(&[], &GenerationOptions::new(0.0))
        .unwrap_err();
    assert!(matches!(err, GenerateError::InvalidOptions { .. }));
}

#[test]
fn test_cancelled_before_start() {
    let cancel: CancelFlag = Arc::new(AtomicBool::new(true));
    let err = Generator::default()
        .generate_with_cancel(&white(16), &GenerationOptions::new(3.0), &cancel)
        .unwrap_err();
    assert!(matches!(err, GenerateError::Cancelled { stage: "preprocess" }));
}

#[test]
fn test_unset_cancel_flag_runs_to_completion() {
    let cancel: CancelFlag = Arc::new(AtomicBool::new(false));
    let model = Generator::default()
        .generate_with_cancel(&white(16), &GenerationOptions::new(3.0), &cancel)
        .unwrap();
    assert_eq!(model.mesh.triangle_count(), 12);
}

#[test]
fn test_truncated_image_is_traced_from_original_bytes() {
    let bytes = square(40, 10, 30);
    // Without the closing IEND chunk the preprocessor cannot decode the file.
    let cut = &bytes[..bytes.len() - 12];

    let model = Generator::default()
        .generate(cut, &GenerationOptions::new(3.0))
        .unwrap();

    assert!(matches!(
        model.report.notes.as_slice(),
        [GenerationNote::DegradedInput { .. }]
    ));
    assert_eq!(model.report.decorations, 1);
    assert_eq!(model.report.image_size, [40, 40]);
    assert_eq!(
        model.mesh.triangle_count(),
        model.report.base_triangles + model.report.decoration_triangles
    );
}

#[test]
fn test_failed_decoration_is_skipped_in_order() {
    let params = LinearExtrudeParams {
        height: 2.0,
        center: false,
    };
    let lift = DVec3::new(0.0, 0.0, 1.5);
    let mut right = Shape2D::rectangle(DVec2::new(4.0, 4.0), true);
    right.translate(DVec2::new(20.0, 0.0));
    let shapes = vec![
        Shape2D::rectangle(DVec2::new(10.0, 10.0), true),
        Shape2D::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
        ]),
        right,
    ];

    let (meshes, notes) = extrude_decorations(&shapes, &params, lift);

    assert_eq!(meshes.len(), 2);
    match notes.as_slice() {
        [GenerationNote::ShapeSkipped { shape, reason }] => {
            assert_eq!(shape, "outline 1");
            assert!(!reason.is_empty());
        }
        other => panic!("unexpected notes: {other:?}"),
    }

    let (min, max) = meshes[0].bounding_box();
    assert_relative_eq!(min.x, -5.0);
    assert_relative_eq!(max.x, 5.0);
    assert_relative_eq!(min.z, 1.5);
    assert_relative_eq!(max.z, 3.5);

    let (min, max) = meshes[1].bounding_box();
    assert_relative_eq!(min.x, 18.0);
    assert_relative_eq!(max.x, 22.0);
}

#[test]
fn test_source_size_fallback() {
    let paths = VectorPath::new(0, 0, Vec::new());
    let prepared = PreparedInput::Raw {
        bytes: b"raw",
        reason: "unsupported".into(),
    };
    assert_eq!(
        source_size(&paths, &prepared),
        (DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE)
    );

    let paths = VectorPath::new(30, 20, Vec::new());
    assert_eq!(source_size(&paths, &prepared), (30, 20));
}

#[test]
fn test_generator_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Generator>();
    assert_send_sync::<GeneratedModel>();
}
