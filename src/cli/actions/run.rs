use super::Action;
use crate::{
    check::{self, DatabaseList, Mode, Outcome},
    couchdb::{HttpCatalog, ServerConfig},
    status::{COMPONENT, CheckResult, Status},
};
use std::io::{self, Write};
use tracing::{error, info};

/// Execute the action's business logic and print the outcome
pub async fn execute(action: Action) -> Status {
    match action {
        Action::Check { server, mode } => {
            info!(
                host = %server.host,
                port = server.port,
                tls = %server.tls.mode,
                ?mode,
                "checking CouchDB"
            );

            let outcome = check_outcome(&server, &mode).await;

            if let Err(e) = write_outcome(&outcome, &mut io::stdout().lock()) {
                error!("failed to write to stdout: {e}");
            }

            status_of(&outcome)
        }
    }
}

/// Run the check against the server; the HTTP client is dropped on return
pub(super) async fn check_outcome(server: &ServerConfig, mode: &Mode) -> Outcome {
    match HttpCatalog::new(server).await {
        Ok(catalog) => check::run(&catalog, mode).await,
        Err(e) => Outcome::Verdict(CheckResult::unknown(e.to_string())),
    }
}

/// Status to exit with, a listing is informational and reports UNKNOWN
#[must_use]
pub fn status_of(outcome: &Outcome) -> Status {
    match outcome {
        Outcome::Listing(_) => Status::Unknown,
        Outcome::Verdict(result) => result.status,
    }
}

/// Print a listing or a single status line
///
/// # Errors
///
/// Returns an error if writing to `out` fails
pub fn write_outcome<W: Write>(outcome: &Outcome, out: &mut W) -> io::Result<()> {
    let written = match outcome {
        Outcome::Listing(databases) => write_listing(databases, out),
        Outcome::Verdict(result) => writeln!(out, "{result}"),
    };
    written?;
    out.flush()
}

fn write_listing<W: Write>(databases: &DatabaseList, out: &mut W) -> io::Result<()> {
    writeln!(out, "{COMPONENT} databases:\n")?;
    if databases.is_empty() {
        writeln!(out, "<none>")?;
    }
    for name in databases.iter() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
