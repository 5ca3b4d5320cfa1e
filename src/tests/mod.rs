mod test_assignments;
mod test_registry;
mod test_tensor;

use std::fs;
use std::path::{Path, PathBuf};

use crate::headers::HeaderIndex;

pub const HEADERS: [&str; 2] = ["Need: n1", "Need: n2"];
pub const ASSIGNMENTS: [&str; 2] = ["foo, bar: n1", "bar: n2"];

pub fn header_index(labels: &[&str]) -> HeaderIndex {
    HeaderIndex::new(labels.iter().map(|s| s.to_string()).collect())
}

/// Lay out `<dir>/headers.txt` and `<dir>/allneeds.txt` for a full run
pub fn write_inputs(dir: &Path, headers: &[&str], assignments: &[&str]) -> PathBuf {
    let mut header_text = headers.join("\n");
    header_text.push('\n');
    fs::write(dir.join("headers.txt"), header_text).unwrap();

    let allneeds = dir.join("allneeds.txt");
    fs::write(&allneeds, assignments.join("\n")).unwrap();
    allneeds
}
