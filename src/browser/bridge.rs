use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use tokio::sync::{Mutex, mpsc};

use super::NavigationPolicy;
use crate::lifecycle::BrowserEvent;

// A wrapper around an Arc of Mutex<mpsc::Receiver<BrowserEvent>>
#[derive(Clone)]
pub struct EventReceiverRef(pub Arc<Mutex<mpsc::Receiver<BrowserEvent>>>);

impl Hash for EventReceiverRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl PartialEq for EventReceiverRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for EventReceiverRef {}

/// Callback surface for the native browser. Every callback becomes a
/// [`BrowserEvent`] on the shell's event channel.
#[derive(Debug, Clone)]
pub struct BrowserBridge {
    event_tx: mpsc::Sender<BrowserEvent>,
    policy: NavigationPolicy,
}

impl BrowserBridge {
    pub fn channel(capacity: usize, policy: NavigationPolicy) -> (Self, EventReceiverRef) {
        let (event_tx, event_rx) = mpsc::channel(capacity);
        (Self { event_tx, policy }, EventReceiverRef(Arc::new(Mutex::new(event_rx))))
    }

    pub fn load_start(&self) {
        self.emit(BrowserEvent::LoadStart);
    }

    pub fn load_progress(&self, fraction: f64) {
        self.emit(BrowserEvent::LoadProgress(fraction));
    }

    pub fn load_end(&self) {
        self.emit(BrowserEvent::LoadEnd);
    }

    pub fn load_error(&self, description: impl Into<String>) {
        self.emit(BrowserEvent::LoadError(description.into()));
    }

    pub fn http_error(&self, status_code: u16, url: Option<String>) {
        self.emit(BrowserEvent::HttpError { status_code, url });
    }

    pub fn process_terminated(&self) {
        self.emit(BrowserEvent::ContentProcessCrash);
    }

    pub fn post_message(&self, data: impl Into<String>) {
        self.emit(BrowserEvent::Message(data.into()));
    }

    pub fn should_start_load(&self, url: &str) -> bool {
        self.policy.should_start_load(url)
    }

    fn emit(&self, event: BrowserEvent) {
        match self.event_tx.try_send(event) {
            Ok(_) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!("Browser event queue full, dropping {:?}", event);
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                tracing::debug!("Shell gone, dropping {:?}", event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn callbacks_arrive_in_order() {
        let (bridge, receiver) = BrowserBridge::channel(16, NavigationPolicy::allow_all());

        bridge.load_start();
        bridge.load_progress(0.4);
        bridge.http_error(502, Some("https://skin-alyze.vercel.app/".to_owned()));
        bridge.post_message("PAGE_READY");
        bridge.process_terminated();
        bridge.load_error("net::ERR_FAILED");
        bridge.load_end();

        let mut rx = receiver.0.lock().await;
        let mut received = Vec::new();
        while let Ok(event) = rx.try_recv() {
            received.push(event);
        }

        assert_eq!(
            received,
            vec![
                BrowserEvent::LoadStart,
                BrowserEvent::LoadProgress(0.4),
                BrowserEvent::HttpError {
                    status_code: 502,
                    url: Some("https://skin-alyze.vercel.app/".to_owned())
                },
                BrowserEvent::Message("PAGE_READY".to_owned()),
                BrowserEvent::ContentProcessCrash,
                BrowserEvent::LoadError("net::ERR_FAILED".to_owned()),
                BrowserEvent::LoadEnd,
            ]
        );
    }

    #[tokio::test]
    async fn full_queue_drops_instead_of_blocking() {
        let (bridge, receiver) = BrowserBridge::channel(1, NavigationPolicy::allow_all());
        bridge.load_start();
        bridge.load_end();

        let mut rx = receiver.0.lock().await;
        assert_eq!(rx.recv().await, Some(BrowserEvent::LoadStart));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn receiver_refs_compare_by_identity() {
        let (_bridge, receiver) = BrowserBridge::channel(1, NavigationPolicy::allow_all());
        let (_other, other) = BrowserBridge::channel(1, NavigationPolicy::allow_all());
        assert!(receiver == receiver.clone());
        assert!(receiver != other);
    }

    #[test]
    fn navigation_checks_use_the_policy() {
        let (bridge, _receiver) =
            BrowserBridge::channel(1, NavigationPolicy::with_allowed_hosts(["vercel.app"]));
        assert!(bridge.should_start_load("https://skin-alyze.vercel.app/"));
        assert!(!bridge.should_start_load("https://example.com/"));
    }
}
