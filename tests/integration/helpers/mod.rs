//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Output of fixture 1.cast
pub const V1_OUTPUT: &str = "$ echo hi\r\nhi\r\n";
/// Output of fixture 2.cast, input and marker lines excluded
pub const V2_OUTPUT: &str = "$ ls\r\na.txt  b.txt\r\n";

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's raw bytes
pub fn load_fixture(name: &str) -> Vec<u8> {
    let path = fixtures_dir().join(name);
    fs::read(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Gzip-compress `data`
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("Failed to compress");
    encoder.finish().expect("Failed to finish gzip stream")
}
