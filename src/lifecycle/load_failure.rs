#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadFailure {
    #[error("{0}")]
    Navigation(String),
    #[error("Server error: {status_code}")]
    Server { status_code: u16 },
    #[error("Content process terminated")]
    ProcessCrash,
}

impl LoadFailure {
    /// Crashes recover on their own, everything else waits for the user.
    pub fn retries_automatically(&self) -> bool {
        matches!(self, LoadFailure::ProcessCrash)
    }
}
