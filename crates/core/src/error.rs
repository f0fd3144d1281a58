// Error types for the core crate

/// Errors raised while loading static knowledge or compiling the rule catalog
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An embedded data file is missing from the binary
    #[error("Knowledge asset not found: {0}")]
    MissingAsset(String),

    /// An embedded data file could not be parsed
    #[error("Failed to parse knowledge asset {name}: {source}")]
    InvalidAsset {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A validation rule pattern failed to compile
    #[error("Invalid pattern for rule {code}: {source}")]
    InvalidPattern {
        code: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown file type: {0} (expected jsp, html or dao)")]
    UnknownFileType(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
