use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while setting up the mock backend.
///
/// Request-time failures never surface as `MockError`: the loader degrades
/// to empty results and the typed collections report [`ApiFailure`]s.
///
/// [`ApiFailure`]: alum_core::responses::ApiFailure
#[derive(Debug, Error)]
pub enum MockError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed document {path}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("seed document must be a JSON object of collections, got {0}")]
    SeedShape(&'static str),

    #[error("failed to bind mock server on {addr}: {reason}")]
    Bind { addr: String, reason: String },
}
