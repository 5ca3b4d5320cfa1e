use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("need '{need}' (line {line}) not found in headers")]
    UnknownNeed { need: String, line: usize },

    #[error("malformed record at line {line}: '{content}'")]
    MalformedRecord { line: usize, content: String },

    #[error("unknown annotation kind '{kind}' at line {line}")]
    UnknownAnnotation { line: usize, kind: String },

    #[error("more than {limit} distinct categories found")]
    CategoryCapacity { limit: usize },
}

impl PrepError {
    /// Wrap an io error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PrepError>;
