//! TLS for the CouchDB HTTP endpoint
//!
//! - `config` - TLS configuration and modes
//! - `verifier` - certificate verifiers for `require` and `verify-ca`
//! - `client` - rustls client configuration handed to the HTTP client

pub mod client;
pub mod config;
pub mod verifier;

pub use client::{build_client_config, ensure_crypto_provider};
pub use config::{TlsConfig, TlsMode};
pub use verifier::{ChainOnlyVerifier, NoVerifier};
