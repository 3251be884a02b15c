//! P3 I/O regression test
//!
//! Reads the gradient fixture, writes it back in both body layouts and
//! checks that pixels and comments survive, then exercises the header
//! comment helpers the transform pipeline relies on.

use ppmwarp_io::{
    PixelLayout, WriteOptions, read_image, strip_geometry_comments, write_image,
};
use ppmwarp_test::{RegParams, load_test_image, test_data_path};

#[test]
fn pnmio_reg() {
    let mut rp = RegParams::new("pnmio");
    let dir = tempfile::tempdir().expect("create temp dir");

    // Test 1-2: fixture loads with its comment and expected size
    eprintln!("=== Test 1: read fixture ===");
    let ppm = read_image(test_data_path("gradient.ppm")).expect("read gradient.ppm");
    rp.compare_values(16.0, ppm.image.width() as f64, 0.0);
    rp.compare_values(12.0, ppm.image.height() as f64, 0.0);
    rp.compare_strings(b"# gradient fixture", ppm.comments[0].as_bytes());

    // Test 3-4: triplet and row-compact round trips
    for layout in [PixelLayout::Triplets, PixelLayout::Rows] {
        eprintln!("=== Test: {:?} round trip ===", layout);
        let path = dir.path().join(format!("gradient_{:?}.ppm", layout));
        write_image(&path, &ppm.comments, &ppm.image, &WriteOptions::with_layout(layout))
            .expect("write round trip");
        let back = read_image(&path).expect("read round trip");
        rp.compare_image(&ppm.image, &back.image);
        rp.compare_values(ppm.comments.len() as f64, back.comments.len() as f64, 0.0);
    }

    // Test 5: parent directories are created on request
    eprintln!("=== Test 5: nested output path ===");
    let nested = dir.path().join("a").join("b").join("out.ppm");
    let options = WriteOptions::default().create_dirs(true);
    write_image(&nested, &[], &ppm.image, &options).expect("write nested");
    rp.compare_values(1.0, if nested.exists() { 1.0 } else { 0.0 }, 0.0);

    // Test 6: stale geometry comments are stripped before rewriting
    eprintln!("=== Test 6: geometry comment stripping ===");
    let mut comments = ppm.comments.clone();
    comments.push("# skew_src_width 16".to_string());
    comments.push("# skew_bottom_x 4".to_string());
    let stripped = strip_geometry_comments(&comments);
    rp.compare_values(ppm.comments.len() as f64, stripped.len() as f64, 0.0);

    // Test 7: the harness loader agrees with the direct reader
    let loaded = load_test_image("gradient.ppm").expect("load fixture");
    rp.compare_image(&ppm.image, &loaded);

    assert!(rp.cleanup());
}

#[test]
fn pnmio_reg_missing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = read_image(dir.path().join("nope.ppm")).unwrap_err();
    assert!(matches!(err, ppmwarp_io::IoError::Io(_)));
}
