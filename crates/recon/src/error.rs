use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// Sheet provider failure (unreadable folder, broken source).
    Source(String),
    /// Persistent store failure surfaced through a store trait.
    Store(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(msg) => write!(f, "sheet source error: {msg}"),
            Self::Store(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
