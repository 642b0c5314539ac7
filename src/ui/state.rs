use iced::task;

use crate::{
    browser::{ChannelBrowser, EventReceiverRef},
    config::Config,
    lifecycle::{LoadLifecycleController, WatchdogTicket},
    ui::app::ActiveScreen,
};

pub struct AppContext {
    pub config: Config,

    pub browser: ChannelBrowser,
    pub event_rx: EventReceiverRef,

    pub lifecycle: LoadLifecycleController,
    pub watchdog: Option<(WatchdogTicket, task::Handle)>,
}

pub struct State {
    pub ctx: AppContext,
    pub active_screen: ActiveScreen,
}
