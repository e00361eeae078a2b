use std::process::ExitCode;

use notion_sync::CONFIG_ERROR_EXIT;
use notion_sync::cli::config::ConfigError;

fn main() -> ExitCode {
    if let Err(err) = notion_sync::run() {
        eprintln!("error: {err:#}");
        if err.downcast_ref::<ConfigError>().is_some() {
            return ExitCode::from(CONFIG_ERROR_EXIT);
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
