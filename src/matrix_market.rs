//! Matrix Market output for slice matrices

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use sprs::CsMat;

use crate::error::{PrepError, Result};

/// Write `matrix` in Matrix Market coordinate format.
///
/// The file is written next to its destination and renamed into place, so a
/// failed write never leaves a truncated `.mtx` behind.
pub fn write_matrix(path: &Path, matrix: &CsMat<f64>) -> Result<()> {
    let staging = staging_path(path);
    info!(
        "Writing {}x{} matrix ({} non-zeros) to {}",
        matrix.rows(),
        matrix.cols(),
        matrix.nnz(),
        path.display()
    );

    if let Err(e) = sprs::io::write_matrix_market(&staging, matrix) {
        let _ = fs::remove_file(&staging);
        return Err(PrepError::io(&staging, e));
    }
    fs::rename(&staging, path).map_err(|e| PrepError::io(path, e))?;
    debug!("Renamed {} into place", staging.display());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
