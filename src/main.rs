use std::thread;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use webshell::{
    Result,
    browser::{BrowserBridge, BrowserCommand, ChannelBrowser},
    config::Config,
    ui,
};

const BROWSER_CHANNEL_CAPACITY: usize = 64;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    tracing::info!("Starting up...");

    let config = Config::load();
    if let Err(err) = config.validate() {
        tracing::error!("Invalid configuration: {}", err);
        return Err(err.into());
    }

    let policy = config.navigation_policy();
    if policy.is_allow_all() {
        tracing::warn!("No allowed hosts configured, every navigation is permitted.");
    }

    let (bridge, event_rx) = BrowserBridge::channel(BROWSER_CHANNEL_CAPACITY, policy);
    let (browser, mut command_rx) = ChannelBrowser::new(BROWSER_CHANNEL_CAPACITY);

    // Platform glue attaches the native surface here and reports back through `bridge`.
    tracing::info!("Starting browser host...");
    let host = thread::spawn(move || {
        while let Some(command) = command_rx.blocking_recv() {
            match command {
                BrowserCommand::Navigate(request) => {
                    if !bridge.should_start_load(&request.url) {
                        bridge.load_error(format!("Navigation to {} is not allowed", request.url));
                        continue;
                    }
                    tracing::info!(
                        "Host received navigation to {} (attempt {}, user agent {})",
                        request.url,
                        request.attempt,
                        request.settings.user_agent
                    );
                }
                BrowserCommand::Teardown => {
                    tracing::info!("Host released browser surface.");
                    break;
                }
            }
        }
    });

    tracing::info!("Initializing UI...");
    let app = ui::app::App::new(config, browser, event_rx);
    tracing::info!("UI initialized.");

    tracing::info!("Running app...");
    app.run()?;
    tracing::info!("App exited.");

    if host.join().is_err() {
        tracing::error!("Browser host thread panicked.");
    }

    Ok(())
}
