//! Need-category assignment records: `<cat1>, <cat2>, ... : <need-id>`

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{PrepError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeedAssignment {
    /// 1-based line in the source file, kept for error reporting
    pub line: usize,
    pub need_id: String,
    pub categories: Vec<String>,
}

impl NeedAssignment {
    /// Parse one record. Returns `Ok(None)` for blank lines.
    ///
    /// The record is split on the first `:`; everything after it is the need id.
    /// Category tokens are trimmed and empty tokens are dropped.
    pub fn parse(line: usize, record: &str) -> Result<Option<Self>> {
        if record.trim().is_empty() {
            return Ok(None);
        }
        let (cats, need) = record
            .split_once(':')
            .ok_or_else(|| PrepError::MalformedRecord {
                line,
                content: record.to_owned(),
            })?;

        let mut categories = Vec::new();
        for token in cats.split(',') {
            let category = token.trim();
            if category.is_empty() {
                warn!("Skipping empty category at line {}", line);
                continue;
            }
            categories.push(category.to_owned());
        }

        Ok(Some(Self {
            line,
            need_id: need.trim().to_owned(),
            categories,
        }))
    }
}

pub fn parse_assignments(content: &str) -> Result<Vec<NeedAssignment>> {
    let mut records = Vec::new();
    for (i, record) in content.lines().enumerate() {
        if let Some(assignment) = NeedAssignment::parse(i + 1, record)? {
            records.push(assignment);
        }
    }
    Ok(records)
}

pub fn read_assignments(path: &Path) -> Result<Vec<NeedAssignment>> {
    info!("Read allneeds input file with categories: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| PrepError::io(path, e))?;
    let records = parse_assignments(&content)?;
    debug!("Parsed {} assignment records", records.len());
    Ok(records)
}
