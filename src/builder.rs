use std::path::{Path, PathBuf};

use crate::assignments::{read_assignments, NeedAssignment};
use crate::error::{PrepError, Result};
use crate::headers::{append_attributes, HeaderIndex, HEADERS_FILE};
use crate::matrix_market::write_matrix;
use crate::registry::CategoryRegistry;
use crate::slice::{BinarySlice, CategorySlice};

// Add logging
use log::{debug, info, trace};

pub const CATEGORY_FILE: &str = "category.mtx";

pub struct CategorySliceBuilder {
    // Upper bound on distinct categories; None grows without limit
    max_categories: Option<usize>,
}

impl Default for CategorySliceBuilder {
    fn default() -> Self {
        debug!("Creating CategorySliceBuilder with default parameters");
        Self {
            max_categories: None,
        }
    }
}

impl CategorySliceBuilder {
    pub fn new() -> Self {
        info!("Initializing new CategorySliceBuilder");
        Self::default()
    }

    /// Fail the build once more than `limit` distinct categories are seen
    pub fn with_max_categories(mut self, limit: usize) -> Self {
        info!("Setting category limit: {}", limit);
        self.max_categories = Some(limit);
        self
    }

    pub fn max_categories(&self) -> Option<usize> {
        self.max_categories
    }

    // -------------------- Build --------------------

    /// Build the need × category incidence slice.
    ///
    /// Rows are resolved through `Need: <id>` in `headers`; categories get
    /// columns after the last header in first-seen order. The matrix is
    /// `(H + C) × (H + C)`. Nothing is written here, so any error leaves the
    /// filesystem untouched.
    pub fn build(
        &self,
        headers: &HeaderIndex,
        assignments: &[NeedAssignment],
    ) -> Result<CategorySlice> {
        let n_headers = headers.len();
        info!(
            "Building category slice from {} records over {} headers",
            assignments.len(),
            n_headers
        );

        let mut categories = CategoryRegistry::new();
        let mut slice = BinarySlice::new();

        for record in assignments {
            let row = headers
                .need_position(&record.need_id)
                .ok_or_else(|| PrepError::UnknownNeed {
                    need: record.need_id.clone(),
                    line: record.line,
                })?;
            trace!(
                "Need '{}' -> row {} with {} categories",
                record.need_id,
                row,
                record.categories.len()
            );

            for category in &record.categories {
                if let Some(limit) = self.max_categories {
                    if categories.len() >= limit && !categories.contains(category) {
                        return Err(PrepError::CategoryCapacity { limit });
                    }
                }
                let (pos, added) = categories.get_or_insert(category);
                if added {
                    debug!("New category '{}' at column {}", category, n_headers + pos);
                }
                slice.mark(row, n_headers + pos);
            }
        }

        let size = n_headers + categories.len();
        let matrix = slice.to_csr(size);
        let category_slice = CategorySlice {
            matrix,
            n_headers,
            categories,
        };

        info!(
            "Category slice built: {}x{}, {} categories, {} nnz, {:.2}% sparse",
            size,
            size,
            category_slice.categories.len(),
            category_slice.nnz(),
            category_slice.sparsity() * 100.0
        );
        Ok(category_slice)
    }

    // -------------------- Run --------------------

    /// Read `<folder>/headers.txt` and `assignments_path`, write
    /// `<folder>/category.mtx` and append the discovered categories to the
    /// header file.
    pub fn run(&self, folder: &Path, assignments_path: &Path) -> Result<CategorySlice> {
        let headers_path = folder.join(HEADERS_FILE);
        let headers = HeaderIndex::read(&headers_path)?;
        let assignments = read_assignments(assignments_path)?;

        let slice = self.build(&headers, &assignments)?;

        write_matrix(&category_path(folder), &slice.matrix)?;
        append_attributes(&headers_path, slice.categories.iter())?;

        info!("Category slice completed successfully");
        Ok(slice)
    }
}

pub fn category_path(folder: &Path) -> PathBuf {
    folder.join(CATEGORY_FILE)
}
