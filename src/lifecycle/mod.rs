mod controller;
mod event;
mod load_failure;
mod watchdog;

pub use controller::{LifecycleEffect, LoadLifecycleController, LoadPhase, LoadState};
pub use event::BrowserEvent;
pub use load_failure::LoadFailure;
pub use watchdog::{DEFAULT_WATCHDOG_DELAY, WatchdogTicket};

/// Progress above this fraction dismisses the loading overlay early.
pub const PROGRESS_DISMISS_THRESHOLD: f64 = 0.8;
