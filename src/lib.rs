pub mod browser;
pub mod config;
pub mod lifecycle;
pub mod ui;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config error: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("UI window management error: {0}")]
    UiWindowMgmtError(#[from] iced_winit::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
