use std::{fmt, path::PathBuf, str::FromStr};

/// TLS configuration for the CouchDB HTTP endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfig {
    pub mode: TlsMode,
    /// PEM bundle replacing the bundled Mozilla roots
    pub ca: Option<PathBuf>,
    /// PEM client certificate chain, used together with `key`
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
}

impl TlsConfig {
    /// URL scheme to reach CouchDB with
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        if self.mode.is_enabled() {
            "https"
        } else {
            "http"
        }
    }
}

/// TLS mode, using the same names as libpq's `sslmode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Plain HTTP
    #[default]
    Disable,
    /// HTTPS, any certificate accepted
    Require,
    /// HTTPS, chain verified against the CA, hostname not checked
    VerifyCA,
    /// HTTPS, chain and hostname verified
    VerifyFull,
}

impl TlsMode {
    /// Check if TLS is enabled
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disable)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Require => "require",
            Self::VerifyCA => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }
}

impl FromStr for TlsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disable" => Ok(Self::Disable),
            "require" => Ok(Self::Require),
            "verify-ca" => Ok(Self::VerifyCA),
            "verify-full" => Ok(Self::VerifyFull),
            _ => Err(format!("Invalid TLS mode: {s}")),
        }
    }
}

impl fmt::Display for TlsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_tls_mode_from_str() {
        assert_eq!("disable".parse::<TlsMode>().unwrap(), TlsMode::Disable);
        assert_eq!("require".parse::<TlsMode>().unwrap(), TlsMode::Require);
        assert_eq!("verify-ca".parse::<TlsMode>().unwrap(), TlsMode::VerifyCA);
        assert_eq!(
            "verify-full".parse::<TlsMode>().unwrap(),
            TlsMode::VerifyFull
        );
    }

    #[test]
    fn test_tls_mode_case_insensitive() {
        assert_eq!("DISABLE".parse::<TlsMode>().unwrap(), TlsMode::Disable);
        assert_eq!("Verify-Full".parse::<TlsMode>().unwrap(), TlsMode::VerifyFull);
    }

    #[test]
    fn test_tls_mode_invalid() {
        for invalid in ["", "ssl", "verify", "verify-identity", "enabled"] {
            assert!(invalid.parse::<TlsMode>().is_err(), "{invalid:?}");
        }
        let err = "bogus".parse::<TlsMode>().unwrap_err();
        assert!(err.contains("bogus"));
    }

    #[test]
    fn test_tls_mode_display_round_trips() {
        for mode in [
            TlsMode::Disable,
            TlsMode::Require,
            TlsMode::VerifyCA,
            TlsMode::VerifyFull,
        ] {
            assert_eq!(mode.to_string().parse::<TlsMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_tls_mode_is_enabled() {
        assert!(!TlsMode::Disable.is_enabled());
        assert!(TlsMode::Require.is_enabled());
        assert!(TlsMode::VerifyCA.is_enabled());
        assert!(TlsMode::VerifyFull.is_enabled());
    }

    #[test]
    fn test_scheme_follows_mode() {
        let mut config = TlsConfig::default();
        assert_eq!(config.scheme(), "http");

        config.mode = TlsMode::Require;
        assert_eq!(config.scheme(), "https");

        config.mode = TlsMode::VerifyFull;
        assert_eq!(config.scheme(), "https");
    }
}
