use couchcheck::{cli, status::ExitCodes};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = cli::start(std::env::args_os(), &ExitCodes::default()).await;
    process::exit(code);
}
