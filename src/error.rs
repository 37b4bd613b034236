use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, CombineError>;

// Every variant here aborts the run. Unrecognized source files are not errors,
// they are skipped by the collector with a warning.
#[derive(Debug)]
pub enum CombineError {
    ReadDir { path: PathBuf, source: io::Error },
    ReadFile { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    /// A `features` key whose value is not an array.
    InvalidFeatures { path: PathBuf },
    Write { path: PathBuf, source: io::Error },
    Serialize { source: serde_json::Error },
}

impl fmt::Display for CombineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineError::ReadDir { path, source } => {
                write!(f, "cannot read source directory {}: {}", path.display(), source)
            }
            CombineError::ReadFile { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            CombineError::Parse { path, source } => {
                write!(f, "invalid JSON in {}: {}", path.display(), source)
            }
            CombineError::InvalidFeatures { path } => {
                write!(f, "`features` in {} is not an array", path.display())
            }
            CombineError::Write { path, source } => {
                write!(f, "cannot write {}: {}", path.display(), source)
            }
            CombineError::Serialize { source } => {
                write!(f, "cannot serialize feature collection: {}", source)
            }
        }
    }
}

impl Error for CombineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CombineError::ReadDir { source, .. }
            | CombineError::ReadFile { source, .. }
            | CombineError::Write { source, .. } => Some(source),
            CombineError::Parse { source, .. } | CombineError::Serialize { source } => Some(source),
            CombineError::InvalidFeatures { .. } => None,
        }
    }
}
