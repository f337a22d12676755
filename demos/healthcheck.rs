//! Healthcheck example verifying the scheduler is reachable and NORMAL

use oozie_rust_sdk::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    // Base URL from the first argument, falling back to OOZIE_URL
    let client = match std::env::args().nth(1) {
        Some(url) => Client::new(url)?,
        None => Client::from_env()?,
    };

    match client.healthcheck().await {
        Ok(()) => println!("Oozie server is operational"),
        Err(e) => {
            eprintln!("Healthcheck failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
