use crate::{
    check::{DatabaseName, Mode},
    cli::actions::Action,
    couchdb::{Credentials, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, ServerConfig},
    tls::{TlsConfig, TlsMode},
};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use std::{path::PathBuf, time::Duration};

fn extract_tls_config(matches: &ArgMatches) -> Result<TlsConfig> {
    let mode = matches
        .get_one::<String>("tls-mode")
        .map(|m| m.parse::<TlsMode>().map_err(|e| anyhow!(e)))
        .transpose()?
        .unwrap_or_default();

    Ok(TlsConfig {
        mode,
        ca: matches.get_one::<String>("tls-ca").map(PathBuf::from),
        cert: matches.get_one::<String>("tls-cert").map(PathBuf::from),
        key: matches.get_one::<String>("tls-key").map(PathBuf::from),
    })
}

fn extract_mode(matches: &ArgMatches) -> Result<Mode> {
    if matches.get_flag("list") {
        return Ok(Mode::List);
    }

    let name = matches
        .get_one::<String>("database")
        .context("--database is required unless --list is given")?;

    Ok(Mode::Exists(DatabaseName::new(name)?))
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if the database name or endpoint is invalid, or a
/// required parameter is missing
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let mode = extract_mode(matches)?;

    let host = matches
        .get_one::<String>("host")
        .context("host is required")?
        .clone();

    let port = matches
        .get_one::<u16>("port")
        .copied()
        .unwrap_or(DEFAULT_PORT);

    let credentials = matches.get_one::<String>("user").map(|user| Credentials {
        user: user.clone(),
        password: matches.get_one::<String>("password").cloned(),
    });

    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let server = ServerConfig {
        host,
        port,
        credentials,
        timeout: Duration::from_secs(timeout),
        tls: extract_tls_config(matches)?,
    };

    // Reject hosts that cannot form a URL before any I/O
    server
        .all_dbs_url()
        .with_context(|| format!("Invalid host: {}", server.host))?;

    Ok(Action::Check { server, mode })
}
