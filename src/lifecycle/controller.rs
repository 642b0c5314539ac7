use std::time::Duration;

use webshell_shared::DocumentMessage;

use super::{
    BrowserEvent, LoadFailure, PROGRESS_DISMISS_THRESHOLD,
    watchdog::{DEFAULT_WATCHDOG_DELAY, TicketIssuer, WatchdogTicket},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Splash,
    Content,
    ErrorOverlay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadState {
    pub phase: LoadPhase,
    pub is_loading: bool,
    pub error: Option<String>,
    pub load_attempt: u64,
    pub pending_timeout: Option<WatchdogTicket>,
}

impl LoadState {
    fn new() -> Self {
        Self {
            phase: LoadPhase::Splash,
            is_loading: false,
            error: None,
            load_attempt: 0,
            pending_timeout: None,
        }
    }

    /// An error is present exactly when the error overlay is shown.
    #[cfg(test)]
    pub fn is_consistent(&self) -> bool {
        self.error.is_some() == (self.phase == LoadPhase::ErrorOverlay)
    }
}

/// Work the host has to carry out after a handler ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEffect {
    ArmWatchdog { ticket: WatchdogTicket, delay: Duration },
    CancelWatchdog(WatchdogTicket),
    /// Build a fresh browser instance and navigate it to the target.
    Load { attempt: u64 },
}

#[derive(Debug)]
pub struct LoadLifecycleController {
    state: LoadState,
    tickets: TicketIssuer,
    watchdog_delay: Duration,
    ready_token: String,
}

impl LoadLifecycleController {
    pub fn new(ready_token: impl Into<String>, watchdog_delay: Duration) -> Self {
        Self {
            state: LoadState::new(),
            tickets: TicketIssuer::default(),
            watchdog_delay,
            ready_token: ready_token.into(),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn dispatch(&mut self, event: BrowserEvent) -> Vec<LifecycleEffect> {
        if self.state.phase == LoadPhase::Splash {
            tracing::warn!("Ignoring browser event during splash: {:?}", event);
            return Vec::new();
        }

        match event {
            BrowserEvent::LoadStart => self.on_load_start(),
            BrowserEvent::LoadProgress(fraction) => self.on_load_progress(fraction),
            BrowserEvent::LoadEnd => self.on_load_end(),
            BrowserEvent::LoadError(message) => self.on_load_error(LoadFailure::Navigation(message)),
            BrowserEvent::HttpError { status_code, url } => {
                if status_code < 400 {
                    tracing::warn!("Ignoring non-error HTTP status {} for {:?}", status_code, url);
                    return Vec::new();
                }
                tracing::debug!("HTTP error {} for {:?}", status_code, url);
                self.on_load_error(LoadFailure::Server { status_code })
            }
            BrowserEvent::ContentProcessCrash => self.on_content_process_crash(),
            BrowserEvent::Message(raw) => self.on_content_message(&raw),
        }
    }

    pub fn on_splash_complete(&mut self) -> Vec<LifecycleEffect> {
        if self.state.phase != LoadPhase::Splash {
            tracing::debug!("Splash already completed, ignoring.");
            return Vec::new();
        }

        tracing::info!("Splash complete, showing content.");
        self.state.phase = LoadPhase::Content;
        self.state.is_loading = true;
        self.state.error = None;

        let mut effects = vec![LifecycleEffect::Load { attempt: self.state.load_attempt }];
        self.arm_watchdog(&mut effects);
        effects
    }

    pub fn on_load_start(&mut self) -> Vec<LifecycleEffect> {
        tracing::debug!("Load started (attempt {}).", self.state.load_attempt);
        self.state.phase = LoadPhase::Content;
        self.state.is_loading = true;
        self.state.error = None;

        let mut effects = Vec::new();
        self.arm_watchdog(&mut effects);
        effects
    }

    pub fn on_load_progress(&mut self, fraction: f64) -> Vec<LifecycleEffect> {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };

        let mut effects = Vec::new();
        if self.state.is_loading && fraction > PROGRESS_DISMISS_THRESHOLD {
            tracing::debug!("Progress {:.2} past threshold, hiding loading overlay.", fraction);
            self.state.is_loading = false;
            self.disarm_watchdog(&mut effects);
        }
        effects
    }

    pub fn on_load_end(&mut self) -> Vec<LifecycleEffect> {
        tracing::debug!("Load finished.");
        self.state.is_loading = false;

        let mut effects = Vec::new();
        self.disarm_watchdog(&mut effects);
        effects
    }

    pub fn on_content_message(&mut self, raw: &str) -> Vec<LifecycleEffect> {
        match DocumentMessage::parse(raw, &self.ready_token) {
            DocumentMessage::PageReady => {
                tracing::debug!("Document reported ready.");
                self.on_load_end()
            }
            DocumentMessage::Log(message) => {
                tracing::info!("Document: {}", message);
                Vec::new()
            }
            DocumentMessage::Unknown(message) => {
                tracing::trace!("Unhandled document message: {}", message);
                Vec::new()
            }
        }
    }

    pub fn on_load_error(&mut self, failure: LoadFailure) -> Vec<LifecycleEffect> {
        tracing::error!("Load failed: {}", failure);
        self.state.phase = LoadPhase::ErrorOverlay;
        self.state.error = Some(failure.to_string());
        self.state.is_loading = false;

        let mut effects = Vec::new();
        self.disarm_watchdog(&mut effects);

        if failure.retries_automatically() {
            tracing::warn!("Reloading without waiting for the user.");
            effects.extend(self.retry());
        }
        effects
    }

    pub fn on_content_process_crash(&mut self) -> Vec<LifecycleEffect> {
        self.on_load_error(LoadFailure::ProcessCrash)
    }

    pub fn retry(&mut self) -> Vec<LifecycleEffect> {
        if self.state.phase == LoadPhase::Splash {
            tracing::warn!("Retry requested during splash, ignoring.");
            return Vec::new();
        }

        self.state.error = None;
        self.state.phase = LoadPhase::Content;
        self.state.is_loading = true;
        self.state.load_attempt += 1;
        tracing::info!("Retrying load (attempt {}).", self.state.load_attempt);

        let mut effects = vec![LifecycleEffect::Load { attempt: self.state.load_attempt }];
        self.arm_watchdog(&mut effects);
        effects
    }

    /// Called when a watchdog timer elapses. Stale tickets are ignored.
    pub fn on_watchdog_fired(&mut self, ticket: WatchdogTicket) {
        if self.state.pending_timeout != Some(ticket) {
            tracing::trace!("Stale watchdog ticket {} ignored.", ticket.id());
            return;
        }

        self.state.pending_timeout = None;
        if self.state.is_loading {
            tracing::warn!("No completion signal within {:?}, hiding loading overlay.", self.watchdog_delay);
            self.state.is_loading = false;
        }
    }

    /// Releases the pending watchdog when the screen goes away.
    pub fn teardown(&mut self) -> Vec<LifecycleEffect> {
        let mut effects = Vec::new();
        self.disarm_watchdog(&mut effects);
        effects
    }

    fn arm_watchdog(&mut self, effects: &mut Vec<LifecycleEffect>) {
        self.disarm_watchdog(effects);

        let ticket = self.tickets.issue();
        self.state.pending_timeout = Some(ticket);
        effects.push(LifecycleEffect::ArmWatchdog { ticket, delay: self.watchdog_delay });
    }

    fn disarm_watchdog(&mut self, effects: &mut Vec<LifecycleEffect>) {
        if let Some(ticket) = self.state.pending_timeout.take() {
            effects.push(LifecycleEffect::CancelWatchdog(ticket));
        }
    }
}

impl Default for LoadLifecycleController {
    fn default() -> Self {
        Self::new(webshell_shared::DEFAULT_READY_TOKEN, DEFAULT_WATCHDOG_DELAY)
    }
}
