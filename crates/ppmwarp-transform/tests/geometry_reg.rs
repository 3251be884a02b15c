//! Geometry regression test
//!
//! Runs scale, shear and rotate on the gradient fixture and checks the
//! identity cases, output sizes and a few sampled pixel values.

use ppmwarp_core::Rgb;
use ppmwarp_test::{RegParams, load_test_image};
use ppmwarp_transform::{rotate, rotated_dimensions, scale, shear_horizontal, shear_vertical};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn geometry_reg() {
    init();
    let mut rp = RegParams::new("geometry");

    let pixs = load_test_image("gradient.ppm").expect("load gradient.ppm");
    let (w, h) = pixs.dimensions();
    eprintln!("Image size: {}x{}", w, h);

    // --- Test 1-3: neutral parameters are identities ---
    rp.compare_image(&pixs, &scale(&pixs, 1.0, 1.0));
    rp.compare_image(&pixs, &shear_horizontal(&pixs, 0.0));
    rp.compare_image(&pixs, &rotate(&pixs, 0.0));

    // --- Test 4-5: scale sizes ---
    let half = scale(&pixs, 0.5, 0.5);
    rp.compare_values(8.0, half.width() as f64, 0.0);
    rp.compare_values(6.0, half.height() as f64, 0.0);
    eprintln!("  scale 0.5: {}x{}", half.width(), half.height());

    // --- Test 6: doubling then halving keeps the constant blue channel ---
    let back = scale(&scale(&pixs, 2.0, 2.0), 0.5, 0.5);
    let blue_ok = back.iter_pixels().all(|p| p.b == 128);
    rp.compare_values(1.0, if blue_ok { 1.0 } else { 0.0 }, 0.0);

    // --- Test 7-8: shear growth ---
    let hs = shear_horizontal(&pixs, 5.5);
    rp.compare_values((w + 6) as f64, hs.width() as f64, 0.0);
    let vs = shear_vertical(&pixs, -2.0);
    rp.compare_values((h + 2) as f64, vs.height() as f64, 0.0);

    // --- Test 9: top-left pixel of a positive shear is untouched ---
    rp.compare_values(
        1.0,
        if hs.get_pixel(0, 0) == pixs.get_pixel(0, 0) { 1.0 } else { 0.0 },
        0.0,
    );

    // --- Test 10-11: rotation canvas ---
    let rot = rotate(&pixs, 45.0);
    let (rw, rh) = rotated_dimensions(w, h, 45.0);
    rp.compare_values(rw as f64, rot.width() as f64, 0.0);
    rp.compare_values(rh as f64, rot.height() as f64, 0.0);
    eprintln!("  rotate 45: {}x{}", rot.width(), rot.height());

    // --- Test 12: rotated corners are background ---
    let corner_white = rot.get_pixel(0, 0) == Some(Rgb::WHITE);
    rp.compare_values(1.0, if corner_white { 1.0 } else { 0.0 }, 0.0);

    // --- Test 13: rotation output lands in regout ---
    rp.write_image_and_check(&rot).expect("write rotated image");

    assert!(rp.cleanup());
}
