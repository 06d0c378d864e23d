//! Session lifecycle example - create a session, then end it

use std::time::Duration;
use webdriver::session::TimeoutKind;
use webdriver::{Capabilities, Client, ManualProxy};
use wire::{browser, LogLevel, LoggingPrefs, UnexpectedAlertBehaviour};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let client = Client::new(webdriver::config::DEFAULT_URL)?;

    let mut logging = LoggingPrefs::new();
    logging.set_driver(LogLevel::Info);

    let mut desired = Capabilities::new();
    desired
        .set_browser_name(browser::FIREFOX)
        .set_javascript_enabled(true)
        .set_unexpected_alert_behaviour(UnexpectedAlertBehaviour::Dismiss)
        .set_logging_prefs(logging);

    if let Ok(proxy) = std::env::var("HTTP_PROXY") {
        desired.set_proxy(ManualProxy::new().http(proxy).no_proxy_for("localhost"));
    }

    let session = match client.create_session(&desired, &Capabilities::new()) {
        Ok(session) => session,
        Err(e) => {
            // every boundary the failure crossed, innermost first
            for frame in e.frames() {
                eprintln!("  at {}", frame);
            }
            return Err(e.into());
        }
    };
    println!("Created session: {}", session.id());

    if let Some(caps) = session.capabilities() {
        println!(
            "Negotiated: {} {}",
            caps.browser_name()?.unwrap_or_default(),
            caps.version()?.unwrap_or_default()
        );
    }

    session.set_timeout(TimeoutKind::Implicit, Duration::from_secs(5))?;

    for log_type in session.log_types()? {
        println!("Log type available: {}", log_type);
    }

    // Explicit release reports failures; plain drop would only log them
    session.release()?;
    println!("Session ended");

    Ok(())
}
