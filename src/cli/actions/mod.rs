mod run;

pub use run::{status_of, write_outcome};

use crate::{check::Mode, couchdb::ServerConfig, status::Status};

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Check { server: ServerConfig, mode: Mode },
}

impl Action {
    /// Execute the action, print its outcome on stdout and return the status
    /// to exit with
    pub async fn execute(self) -> Status {
        run::execute(self).await
    }
}
