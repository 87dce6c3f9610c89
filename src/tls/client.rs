use super::{ChainOnlyVerifier, NoVerifier, TlsConfig, TlsMode};
use crate::error::CheckError;
use rustls::{
    ClientConfig, RootCertStore,
    pki_types::{CertificateDer, PrivateKeyDer},
};
use rustls_pemfile::{certs, private_key};
use std::{
    io::Cursor,
    path::Path,
    sync::{Arc, OnceLock},
};
use tokio::fs;
use tracing::debug;

static CRYPTO_PROVIDER_INIT: OnceLock<()> = OnceLock::new();

/// Ensure the rustls ring crypto provider is installed
///
/// Safe to call multiple times. If another provider was installed first it is
/// left in place.
pub fn ensure_crypto_provider() {
    CRYPTO_PROVIDER_INIT.get_or_init(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }
    });
}

/// Build the rustls client configuration for `tls`
///
/// Returns `None` when TLS is disabled.
///
/// # Errors
///
/// Returns an error if a certificate or key file cannot be read or parsed
pub async fn build_client_config(tls: &TlsConfig) -> Result<Option<ClientConfig>, CheckError> {
    let builder = match tls.mode {
        TlsMode::Disable => return Ok(None),
        TlsMode::Require => {
            ensure_crypto_provider();
            ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
        }
        TlsMode::VerifyCA => {
            ensure_crypto_provider();
            let verifier = ChainOnlyVerifier::new(root_store(tls.ca.as_deref()).await?)
                .map_err(CheckError::Tls)?;
            ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(verifier))
        }
        TlsMode::VerifyFull => {
            ensure_crypto_provider();
            ClientConfig::builder().with_root_certificates(root_store(tls.ca.as_deref()).await?)
        }
    };

    let config = if let (Some(cert_path), Some(key_path)) = (&tls.cert, &tls.key) {
        let certs = load_cert_chain(cert_path).await?;
        let key = load_private_key(key_path).await?;
        builder
            .with_client_auth_cert(certs, key)
            .map_err(|e| CheckError::Tls(format!("invalid client certificate or key: {e}")))?
    } else {
        builder.with_no_client_auth()
    };

    Ok(Some(config))
}

async fn root_store(ca: Option<&Path>) -> Result<RootCertStore, CheckError> {
    let Some(path) = ca else {
        return Ok(webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect());
    };

    let mut store = RootCertStore::empty();
    for cert in load_cert_chain(path).await? {
        store.add(cert).map_err(|e| {
            CheckError::Tls(format!("invalid CA certificate in {}: {e}", path.display()))
        })?;
    }
    debug!(ca = %path.display(), roots = store.len(), "loaded CA bundle");

    Ok(store)
}

async fn load_cert_chain(path: &Path) -> Result<Vec<CertificateDer<'static>>, CheckError> {
    let data = fs::read(path).await.map_err(|e| {
        CheckError::Tls(format!("failed to read certificate {}: {e}", path.display()))
    })?;
    let mut reader = Cursor::new(data);
    let parsed = certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CheckError::Tls(format!("invalid certificate PEM: {e}")))?;

    if parsed.is_empty() {
        return Err(CheckError::Tls(format!(
            "no certificates found in {}",
            path.display()
        )));
    }

    Ok(parsed)
}

async fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, CheckError> {
    let data = fs::read(path).await.map_err(|e| {
        CheckError::Tls(format!("failed to read private key {}: {e}", path.display()))
    })?;

    let mut reader = Cursor::new(data);
    private_key(&mut reader)
        .map_err(|e| CheckError::Tls(format!("invalid private key PEM: {e}")))?
        .ok_or_else(|| CheckError::Tls(format!("no private key found in {}", path.display())))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::{io::Write, path::PathBuf};

    fn config(mode: TlsMode) -> TlsConfig {
        TlsConfig {
            mode,
            ..TlsConfig::default()
        }
    }

    fn pem_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_crypto_provider_init() {
        ensure_crypto_provider();
        ensure_crypto_provider();
    }

    #[tokio::test]
    async fn test_disable_has_no_client_config() {
        let built = build_client_config(&config(TlsMode::Disable)).await.unwrap();
        assert!(built.is_none());
    }

    #[tokio::test]
    async fn test_enabled_modes_build_with_bundled_roots() {
        for mode in [TlsMode::Require, TlsMode::VerifyCA, TlsMode::VerifyFull] {
            let built = build_client_config(&config(mode)).await.unwrap();
            assert!(built.is_some(), "{mode} should produce a client config");
        }
    }

    #[tokio::test]
    async fn test_missing_ca_file() {
        let tls = TlsConfig {
            mode: TlsMode::VerifyFull,
            ca: Some(PathBuf::from("/nonexistent/couchcheck/ca.crt")),
            ..TlsConfig::default()
        };
        let err = build_client_config(&tls).await.unwrap_err();
        assert!(matches!(err, CheckError::Tls(_)));
        assert!(err.to_string().contains("failed to read certificate"));
    }

    #[tokio::test]
    async fn test_ca_file_without_certificates() {
        let ca = pem_file("this is not a certificate\n");
        let tls = TlsConfig {
            mode: TlsMode::VerifyCA,
            ca: Some(ca.path().to_path_buf()),
            ..TlsConfig::default()
        };
        let err = build_client_config(&tls).await.unwrap_err();
        assert!(err.to_string().contains("no certificates found"));
    }

    #[tokio::test]
    async fn test_client_key_without_key() {
        let key = pem_file("");
        let err = load_private_key(key.path()).await.unwrap_err();
        assert!(err.to_string().contains("no private key found"));
    }

    #[tokio::test]
    async fn test_ca_is_ignored_when_disabled() {
        let tls = TlsConfig {
            mode: TlsMode::Disable,
            ca: Some(PathBuf::from("/nonexistent/couchcheck/ca.crt")),
            ..TlsConfig::default()
        };
        assert!(build_client_config(&tls).await.unwrap().is_none());
    }
}
