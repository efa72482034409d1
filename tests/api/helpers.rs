//! tests/api/helpers.rs
use std::path::PathBuf;

pub fn test_data_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path
}

pub fn listings_csv() -> PathBuf {
    test_data_dir().join("listings.csv")
}

/// Fresh location that does not exist yet. Callers clean it up.
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir()
        .join("listing-aggregates-api")
        .join(uuid::Uuid::new_v4().to_string())
}

pub fn read_output(output_dir: &std::path::Path) -> String {
    std::fs::read_to_string(output_dir.join("part-r-00000")).expect("Failed to read job output")
}
