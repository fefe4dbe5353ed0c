//! Binary entry point for the Docker tag pruner

use docker_tag_pruner::cli::{Args, Runner};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args().from_env();

    let runner = match Runner::new(args) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = runner.run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
