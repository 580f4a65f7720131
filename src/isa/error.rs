use std::fmt;
use std::io;

/// Represents any failure that can occur while loading spec resources or
/// assembling the ISA model.
#[derive(Debug)]
pub enum IsaError {
    /// A required spec resource could not be opened or read. Assembly stops
    /// immediately; there is no partially built model.
    Resource {
        name: &'static str,
        source: io::Error,
    },
    Io(io::Error),
    Generate(String),
}

impl From<io::Error> for IsaError {
    fn from(err: io::Error) -> Self {
        IsaError::Io(err)
    }
}

impl fmt::Display for IsaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsaError::Resource { name, source } => {
                write!(f, "failed to load spec resource '{name}': {source}")
            }
            IsaError::Io(err) => write!(f, "I/O error: {err}"),
            IsaError::Generate(msg) => write!(f, "generation error: {msg}"),
        }
    }
}

impl std::error::Error for IsaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IsaError::Resource { source, .. } => Some(source),
            IsaError::Io(err) => Some(err),
            IsaError::Generate(_) => None,
        }
    }
}
