//! # Header list: the entity axis shared by every slice
//!
//! Each line of `headers.txt` names one entity of the tensor. Needs come first
//! (`Need: <id>`), attributes follow (`Attr: <name>`). The line number is the
//! row/column index of the entity in every slice matrix, so the order must stay
//! stable for the whole run.
//!
//! Lookups go through a label -> index map built once on load. When a label
//! appears more than once the first occurrence wins, matching a linear
//! first-match scan.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::error::{PrepError, Result};

pub const HEADERS_FILE: &str = "headers.txt";
pub const NEED_PREFIX: &str = "Need: ";
pub const ATTR_PREFIX: &str = "Attr: ";

#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new(labels: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            positions.entry(label.clone()).or_insert(i);
        }
        Self { labels, positions }
    }

    /// Read one label per line from a UTF-8 file
    pub fn read(path: &Path) -> Result<Self> {
        info!("Read header input file: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| PrepError::io(path, e))?;
        let labels: Vec<String> = content.lines().map(str::to_owned).collect();
        debug!("Loaded {} header labels", labels.len());
        Ok(Self::new(labels))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Row index of `Need: <need_id>`
    pub fn need_position(&self, need_id: &str) -> Option<usize> {
        self.position(&need_label(need_id))
    }
}

pub fn need_label(need_id: &str) -> String {
    format!("{}{}", NEED_PREFIX, need_id)
}

pub fn attr_label(attribute: &str) -> String {
    format!("{}{}", ATTR_PREFIX, attribute)
}

/// Append one `Attr: <name>` line per attribute, keeping the existing content.
///
/// A missing trailing newline in the existing file is repaired first so the
/// first appended label never merges with the last existing one.
pub fn append_attributes<'a, I>(path: &Path, attributes: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    info!("Write categories to header input file: {}", path.display());
    let needs_newline = match fs::read(path) {
        Ok(bytes) => bytes.last().is_some_and(|&b| b != b'\n'),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(PrepError::io(path, e)),
    };

    let mut out = String::new();
    if needs_newline {
        out.push('\n');
    }
    let mut appended = 0;
    for attribute in attributes {
        out.push_str(&attr_label(attribute));
        out.push('\n');
        appended += 1;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| PrepError::io(path, e))?;
    file.write_all(out.as_bytes())
        .map_err(|e| PrepError::io(path, e))?;
    debug!("Appended {} attribute labels", appended);
    Ok(appended)
}
