use thiserror::Error;

/// Failures that stop the check from reaching a verdict
///
/// None of these say anything about whether the database exists, so every
/// variant is reported as UNKNOWN.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to connect to CouchDB at {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("invalid CouchDB endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("request to CouchDB at {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("CouchDB returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("invalid JSON returned by CouchDB: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("non-list returned by CouchDB for databases")]
    NonList,

    #[error("non-string database name returned by CouchDB: {0}")]
    NonStringName(String),

    #[error("TLS configuration error: {0}")]
    Tls(String),
}
