use crate::{
    check::DatabaseList,
    error::CheckError,
    tls::{TlsConfig, build_client_config},
};
use reqwest::{Client, StatusCode, Url, header::ACCEPT};
use serde_json::Value;
use std::{
    error::Error as _,
    fmt,
    future::Future,
    net::Ipv6Addr,
    time::{Duration, Instant},
};
use tracing::{debug, warn};

/// CouchDB's standard HTTP port
pub const DEFAULT_PORT: u16 = 5984;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Endpoint listing every database visible to the caller
pub const ALL_DBS_PATH: &str = "/_all_dbs";

/// Source of the database list
pub trait Catalog {
    /// Fetch every database name the server reports
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be fetched or decoded
    fn all_dbs(&self) -> impl Future<Output = Result<DatabaseList, CheckError>>;
}

/// HTTP basic auth credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

/// Where and how to reach CouchDB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
    pub tls: TlsConfig,
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            credentials: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            tls: TlsConfig::default(),
        }
    }

    /// Full URL of the `/_all_dbs` endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if host and port do not form a valid URL
    pub fn all_dbs_url(&self) -> Result<Url, CheckError> {
        let host = if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let raw = format!("{}://{host}:{}{ALL_DBS_PATH}", self.tls.scheme(), self.port);

        Url::parse(&raw).map_err(|e| CheckError::InvalidEndpoint {
            url: raw,
            reason: e.to_string(),
        })
    }
}

/// [`Catalog`] backed by CouchDB's HTTP API
///
/// Owns the HTTP client, so the connection is released when this is dropped.
#[derive(Debug)]
pub struct HttpCatalog {
    client: Client,
    url: Url,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl HttpCatalog {
    /// Build the HTTP client for `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid, the TLS material cannot
    /// be loaded or the client cannot be built
    pub async fn new(config: &ServerConfig) -> Result<Self, CheckError> {
        let url = config.all_dbs_url()?;

        let mut builder = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.timeout)
            .timeout(config.timeout);

        if let Some(tls) = build_client_config(&config.tls).await? {
            builder = builder.use_preconfigured_tls(tls);
        }

        let client = builder
            .build()
            .map_err(|e| CheckError::Tls(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url,
            credentials: config.credentials.clone(),
            timeout: config.timeout,
        })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<u8>, CheckError> {
        let mut request = self.client.get(self.url.clone()).header(ACCEPT, "application/json");
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.user, credentials.password.as_ref());
        }

        let start = Instant::now();
        let response = request.send().await.map_err(|e| self.request_error(e))?;
        let status = response.status();
        debug!(
            url = %self.url,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "received response"
        );

        if !status.is_success() {
            return Err(self.status_error(status));
        }

        let body = response.bytes().await.map_err(|e| self.request_error(e))?;
        Ok(body.to_vec())
    }

    fn request_error(&self, e: reqwest::Error) -> CheckError {
        if e.is_timeout() {
            CheckError::Timeout {
                url: self.url.to_string(),
                secs: self.timeout.as_secs(),
            }
        } else {
            CheckError::Transport {
                url: self.url.to_string(),
                // the URL is already part of the message
                reason: error_chain(&e.without_url()),
            }
        }
    }

    fn status_error(&self, status: StatusCode) -> CheckError {
        CheckError::HttpStatus {
            url: self.url.to_string(),
            status: status.as_u16(),
        }
    }
}

impl Catalog for HttpCatalog {
    async fn all_dbs(&self) -> Result<DatabaseList, CheckError> {
        // reqwest enforces the timeout too; this also bounds TLS setup and body reads
        let body = tokio::time::timeout(self.timeout, self.fetch())
            .await
            .map_err(|_| CheckError::Timeout {
                url: self.url.to_string(),
                secs: self.timeout.as_secs(),
            })??;

        decode_databases(&body).inspect_err(|e| warn!(error = %e, "unexpected response body"))
    }
}

/// Decode an `/_all_dbs` response body
///
/// # Errors
///
/// Returns an error if the body is not JSON, not a JSON array, or holds a
/// non-string element
pub fn decode_databases(body: &[u8]) -> Result<DatabaseList, CheckError> {
    let value: Value = serde_json::from_slice(body).map_err(CheckError::InvalidJson)?;

    let Value::Array(items) = &value else {
        return Err(CheckError::NonList);
    };

    if let Some(bad) = items.iter().find(|item| !item.is_string()) {
        return Err(CheckError::NonStringName(bad.to_string()));
    }

    serde_json::from_value(value).map_err(CheckError::InvalidJson)
}

/// Render an error with its sources, reqwest keeps the useful part there
fn error_chain(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
