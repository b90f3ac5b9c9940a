use std::process::ExitCode;

use winfeed_core::init_logging;

mod app;
mod commands;
mod table;

fn main() -> ExitCode {
    let matches = app::build_cli().get_matches();

    // Logs stay quiet (errors only) unless -v is given.
    init_logging(!matches.get_flag("verbose"));

    // Command handlers print their own failure messages.
    match commands::run_command(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
