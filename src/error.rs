use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading input files. The rendering pipeline itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid concepts JSON: {0}")]
    ConceptsJson(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    ConfigToml(#[from] toml::de::Error),
}
