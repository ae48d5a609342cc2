//! release_packager - package tagged releases and publish them to S3.

use release_packager::cli;
use release_packager::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::new(false);
            output.error(&format!("Fatal error: {e}"));
            for suggestion in e.recovery_suggestions() {
                output.hint(&suggestion);
            }
            process::exit(1);
        }
    }
}
