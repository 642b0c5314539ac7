mod bridge;
mod browser_error;
mod channel_browser;
mod navigation_policy;
mod settings;

pub use bridge::{BrowserBridge, EventReceiverRef};
pub use browser_error::BrowserError;
pub use channel_browser::{BrowserCommand, ChannelBrowser, NavigationRequest};
pub use navigation_policy::NavigationPolicy;
pub use settings::{BrowserSettings, MOBILE_USER_AGENT};

/// The embedded browser surface the shell drives. Platform glue owns the actual
/// native view; the shell only asks it to (re)load and to go away.
pub trait EmbeddedBrowser {
    /// Tears down any existing instance and loads `request.url` in a fresh one.
    fn navigate(&self, request: NavigationRequest) -> Result<(), BrowserError>;
    fn teardown(&self) -> Result<(), BrowserError>;
}
