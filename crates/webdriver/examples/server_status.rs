//! Server status example - query a remote end and list its sessions

use webdriver::{Client, ClientConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| webdriver::config::DEFAULT_URL.to_string());
    println!("Connecting to remote end at: {}", url);

    let client = Client::with_config(ClientConfig::new(url))?;

    let status = client.get_status()?;
    for (key, value) in status.iter() {
        println!("{}: {}", key, value);
    }

    // Listed sessions are observers: dropping them leaves them running
    let sessions = client.get_sessions()?;
    println!("{} running session(s)", sessions.len());
    for session in &sessions {
        println!("  {}", session.id());
    }

    Ok(())
}
