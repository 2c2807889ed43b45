use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// Only JSON objects can be merged into a path.
    #[error("Expected a JSON object at '{path}'")]
    NotAnObject { path: String },

    #[error("Invalid path: '{0}'")]
    InvalidPath(String),

    #[error("HTTP {status} writing '{path}': {message}")]
    Http {
        path: String,
        status: u16,
        message: String,
    },

    #[error("Network error writing '{path}': {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}
