use std::path::PathBuf;

/// Failures that stop a load run. Everything softer (unmatched fields,
/// odd dates, a missing JASC table) is absorbed as absent values.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The SDR export itself is missing; distinct from "parsed zero records".
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} environment variable must be set")]
    MissingEnv(&'static str),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx from the remote store.
    #[error("{table} upsert failed with status {status}: {body}")]
    Sink {
        table: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response body: {0}")]
    Json(#[from] serde_json::Error),
}
