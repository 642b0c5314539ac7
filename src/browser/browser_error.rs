#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser host is gone")]
    HostDisconnected,
    #[error("Browser host queue is full")]
    HostBusy,
}
