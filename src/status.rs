use std::fmt;

/// Name printed at the start of every status line
pub const COMPONENT: &str = "CouchDB";

/// Nagios-style service status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process exit codes for each status, plus the code used for usage errors
///
/// The defaults follow the Nagios plugin convention. `usage` is kept apart from
/// every health status so a scheduler can tell a broken invocation from a
/// failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCodes {
    pub ok: i32,
    pub warning: i32,
    pub critical: i32,
    pub unknown: i32,
    pub usage: i32,
}

impl Default for ExitCodes {
    fn default() -> Self {
        Self {
            ok: 0,
            warning: 1,
            critical: 2,
            unknown: 3,
            usage: 4,
        }
    }
}

impl ExitCodes {
    #[must_use]
    pub const fn code(&self, status: Status) -> i32 {
        match status {
            Status::Ok => self.ok,
            Status::Warning => self.warning,
            Status::Critical => self.critical,
            Status::Unknown => self.unknown,
        }
    }
}

/// Status plus the human readable message of a single check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub status: Status,
    pub message: String,
}

impl CheckResult {
    #[must_use]
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Status::Ok, message)
    }

    #[must_use]
    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(Status::Critical, message)
    }

    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Status::Unknown, message)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{COMPONENT} {} - {}", self.status, self.message)
    }
}
