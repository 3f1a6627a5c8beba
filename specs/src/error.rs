use std::{error::Error, fmt, io, path::PathBuf};

/// The specs module's result type.
pub type Result<T> = std::result::Result<T, SpecErr>;

/// Failures while reading a network document.
#[derive(Debug)]
pub enum SpecErr {
    Io { path: PathBuf, source: io::Error },
    Json(serde_json::Error),
}

impl fmt::Display for SpecErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecErr::Io { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            SpecErr::Json(e) => write!(f, "invalid network document: {e}"),
        }
    }
}

impl Error for SpecErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SpecErr::Io { source, .. } => Some(source),
            SpecErr::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for SpecErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
