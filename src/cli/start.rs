use super::{actions::Action, commands, dispatch};
use crate::{status::ExitCodes, telemetry};
use std::ffi::OsString;

/// Main orchestrator - Pure orchestration with no business logic
///
/// Five-step data flow:
/// 1. Parse: Extract CLI arguments
/// 2. Extract Verbosity: Convert `-v` count to a log level
/// 3. Initialize Telemetry: Set up logging on stderr
/// 4. Dispatch: Convert `ArgMatches` into typed Action enum
/// 5. Execute: Run the check and print its outcome
///
/// Returns the process exit code. Usage errors are reported on stderr and
/// exit with `codes.usage` before any network I/O.
pub async fn start<I, T>(args: I, codes: &ExitCodes) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    // 1. Parse: Extract CLI arguments
    let matches = match commands::new().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            return if e.use_stderr() { codes.usage } else { 0 };
        }
    };

    // 2. Extract Verbosity
    let verbosity = matches.get_count("verbose");

    // 3. Initialize Telemetry
    telemetry::init(verbosity);

    // 4. Dispatch: Convert ArgMatches into typed Action enum
    let action: Action = match dispatch::dispatch(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("error: {e:#}");
            return codes.usage;
        }
    };

    // 5. Execute
    codes.code(action.execute().await)
}
