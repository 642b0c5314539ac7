use tokio::sync::mpsc;

use super::{BrowserError, BrowserSettings, EmbeddedBrowser};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: String,
    pub attempt: u64,
    pub settings: BrowserSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCommand {
    Navigate(NavigationRequest),
    Teardown,
}

/// Hands browser commands to platform glue over a channel.
#[derive(Debug, Clone)]
pub struct ChannelBrowser {
    command_tx: mpsc::Sender<BrowserCommand>,
}

impl ChannelBrowser {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<BrowserCommand>) {
        let (command_tx, command_rx) = mpsc::channel(capacity);
        (Self { command_tx }, command_rx)
    }

    fn send(&self, command: BrowserCommand) -> Result<(), BrowserError> {
        self.command_tx.try_send(command).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => BrowserError::HostBusy,
            mpsc::error::TrySendError::Closed(_) => BrowserError::HostDisconnected,
        })
    }
}

impl EmbeddedBrowser for ChannelBrowser {
    fn navigate(&self, request: NavigationRequest) -> Result<(), BrowserError> {
        tracing::info!("Navigating to {} (attempt {})", request.url, request.attempt);
        self.send(BrowserCommand::Navigate(request))
    }

    fn teardown(&self) -> Result<(), BrowserError> {
        tracing::debug!("Tearing down browser surface");
        self.send(BrowserCommand::Teardown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(attempt: u64) -> NavigationRequest {
        NavigationRequest {
            url: "https://skin-alyze.vercel.app/".to_owned(),
            attempt,
            settings: BrowserSettings::default(),
        }
    }

    #[test]
    fn commands_reach_the_host() {
        let (browser, mut rx) = ChannelBrowser::new(4);
        browser.navigate(request(0)).unwrap();
        browser.teardown().unwrap();

        assert_eq!(rx.try_recv().unwrap(), BrowserCommand::Navigate(request(0)));
        assert_eq!(rx.try_recv().unwrap(), BrowserCommand::Teardown);
    }

    #[test]
    fn full_and_closed_channels_are_reported() {
        let (browser, rx) = ChannelBrowser::new(1);
        browser.navigate(request(0)).unwrap();
        assert!(matches!(browser.navigate(request(1)), Err(BrowserError::HostBusy)));

        drop(rx);
        assert!(matches!(browser.teardown(), Err(BrowserError::HostDisconnected)));
    }
}
