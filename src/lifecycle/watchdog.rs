use std::time::Duration;

pub const DEFAULT_WATCHDOG_DELAY: Duration = Duration::from_secs(15);

/// Identifies one arming of the watchdog timer. A fired timer only acts when its
/// ticket is still the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchdogTicket(u64);

impl WatchdogTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub(crate) struct TicketIssuer {
    next: u64,
}

impl TicketIssuer {
    pub(crate) fn issue(&mut self) -> WatchdogTicket {
        let ticket = WatchdogTicket(self.next);
        self.next += 1;
        ticket
    }
}
