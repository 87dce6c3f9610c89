//! Existence check core
//!
//! Everything here is free of I/O: [`evaluate`] turns the requested [`Mode`]
//! and the list of databases CouchDB returned into an [`Outcome`]. [`run`]
//! glues a [`Catalog`] in front of it.

use crate::{couchdb::Catalog, status::CheckResult};
use anyhow::{Result, bail};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};

/// Characters CouchDB accepts in a database name, besides `a-z` and `0-9`
const NAME_SYMBOLS: &str = "_$()+-/";

/// A database name restricted to `[a-z0-9_$()+\-/]+`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseName(String);

impl DatabaseName {
    /// Validate a user supplied database name
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or contains a character outside
    /// the allowed class
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            bail!("database name cannot be empty");
        }

        if let Some(bad) = name.chars().find(|c| !is_name_char(*c)) {
            bail!(
                "invalid database name '{name}': character '{bad}' is not allowed, \
                must be lowercase letters, digits or any of {NAME_SYMBOLS}"
            );
        }

        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[inline]
fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || NAME_SYMBOLS.contains(c)
}

/// Database names as returned by `/_all_dbs`, in server order
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DatabaseList(Vec<String>);

impl DatabaseList {
    #[must_use]
    pub const fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    #[must_use]
    pub fn contains(&self, name: &DatabaseName) -> bool {
        self.0.iter().any(|db| db == name.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DatabaseList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// What the caller asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print every database and report UNKNOWN
    List,
    /// Assert the named database exists
    Exists(DatabaseName),
}

/// Result of a run, consumed by the CLI shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listing(DatabaseList),
    Verdict(CheckResult),
}

/// Decide the outcome for `mode` given the databases CouchDB reported
#[must_use]
pub fn evaluate(mode: &Mode, databases: DatabaseList) -> Outcome {
    match mode {
        Mode::List => Outcome::Listing(databases),
        Mode::Exists(name) => {
            let msg = format!("database '{name}' ");
            if databases.contains(name) {
                Outcome::Verdict(CheckResult::ok(msg + "exists"))
            } else {
                Outcome::Verdict(CheckResult::critical(msg + "does not exist!"))
            }
        }
    }
}

/// Fetch the database list from `catalog` and evaluate it
///
/// Fetch and decode failures become an UNKNOWN verdict, in list mode too.
pub async fn run<C: Catalog>(catalog: &C, mode: &Mode) -> Outcome {
    match catalog.all_dbs().await {
        Ok(databases) => {
            debug!(count = databases.len(), "received database list");
            evaluate(mode, databases)
        }
        Err(e) => {
            warn!(error = %e, "could not obtain database list");
            Outcome::Verdict(CheckResult::unknown(e.to_string()))
        }
    }
}
