use std::time::Instant;

use crate::lifecycle::{BrowserEvent, WatchdogTicket};

#[derive(Debug, Clone)]
pub enum Message {
    SplashTick(Instant),
    SplashComplete,

    BrowserEvent(BrowserEvent),
    WatchdogFired(WatchdogTicket),
    Retry,

    CloseRequested(iced::window::Id),

    NoOp,
}
