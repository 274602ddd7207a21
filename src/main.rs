mod config;

use clap::Parser;

use config::{resolve, Cli};

fn main() {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let options = resolve(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = unglow_core::run_batch(&options) {
        log::debug!("Batch aborted: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("Done converting black glow images to transparent!");
}
