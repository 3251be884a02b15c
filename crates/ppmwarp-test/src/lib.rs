//! ppmwarp-test - Regression test framework for ppmwarp
//!
//! Regression tests run in one of three modes:
//!
//! - **Generate**: Write golden files from the current output
//! - **Compare**: Compare output with golden files (default)
//! - **Display**: Run without comparison
//!
//! # Usage
//!
//! ```ignore
//! use ppmwarp_test::RegParams;
//!
//! let mut rp = RegParams::new("rotate");
//! rp.compare_values(23.0, out.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Load a P3 fixture from the test data directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "gradient.ppm")
pub fn load_test_image(name: &str) -> TestResult<ppmwarp_core::Image> {
    let path = test_data_path(name);
    ppmwarp_io::read_image(&path)
        .map(|ppm| ppm.image)
        .map_err(|e| TestError::ImageLoad {
            path: path.clone(),
            message: e.to_string(),
        })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // ppmwarp-test lives at crates/ppmwarp-test
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
