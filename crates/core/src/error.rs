use thiserror::Error;

/// Structural problems found while aggregating an input tree.
///
/// Every variant names the offending node by its slash-joined path from the
/// root, e.g. `Kickstarter/Games/Exploding Kittens`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedTreeError {
    #[error("leaf `{path}` has no value")]
    MissingValue { path: String },
    #[error("leaf `{path}` has no category")]
    MissingCategory { path: String },
    #[error("leaf `{path}` has a negative value ({value})")]
    NegativeValue { path: String, value: f64 },
    #[error("leaf `{path}` has a non-numeric value {raw:?}")]
    InvalidValue { path: String, raw: String },
    #[error("leaf `{path}` has a non-finite value")]
    NonFiniteValue { path: String },
    #[error("group `{path}` sums to a non-finite total")]
    NonFiniteTotal { path: String },
}

impl MalformedTreeError {
    pub fn path(&self) -> &str {
        match self {
            Self::MissingValue { path }
            | Self::MissingCategory { path }
            | Self::NegativeValue { path, .. }
            | Self::InvalidValue { path, .. }
            | Self::NonFiniteValue { path }
            | Self::NonFiniteTotal { path } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    MalformedTree(#[from] MalformedTreeError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
