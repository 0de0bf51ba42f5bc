use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepscopeError {
    #[error("Failed to read file {path:?}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse JSON in {path:?}: {source}")]
    ParseJson { path: PathBuf, source: serde_json::Error },

    #[error("Project manifest package.json not found at {path:?}")]
    ManifestMissing { path: PathBuf },

    #[error("Invalid manifest in {path:?}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("Failed to run `{command}`: {reason}")]
    Manager { command: String, reason: String },

    #[error("Failed to parse `{command}` output: {source}")]
    ManagerOutput { command: String, source: serde_json::Error },

    #[error("Failed to build HTTP client: {reason}")]
    HttpClient { reason: String },

    #[error("HTTP request to {url} failed: {reason}")]
    Http { url: String, reason: String },
}
