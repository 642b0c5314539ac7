use std::sync::Arc;

use futures::stream::unfold;
use iced::{Element, Program, Subscription, Task, executor, window};

use super::screens::{self, Screen};
use crate::{
    browser::{ChannelBrowser, EventReceiverRef},
    config::Config,
    lifecycle::LoadLifecycleController,
    ui::{
        effects::{handle_browser_event, run_effects, teardown},
        message::Message,
        state::{AppContext, State},
    },
};

#[derive(Debug, Clone)]
pub enum ActiveScreen {
    Splash(screens::splash::SplashScreen),
    Browser(screens::browser::BrowserScreen),
}

pub struct App {
    config: Config,
    browser: ChannelBrowser,
    event_rx: EventReceiverRef,
}

impl App {
    const APP_TITLE: &'static str = "webshell";

    pub fn new(config: Config, browser: ChannelBrowser, event_rx: EventReceiverRef) -> Self {
        Self { config, browser, event_rx }
    }

    pub fn run(self) -> crate::Result<()> {
        iced_winit::run(self)?;

        Ok(())
    }
}

fn browser_event_stream(
    receiver_ref: &EventReceiverRef,
) -> Box<dyn futures::Stream<Item = Message> + Send + Unpin> {
    let receiver = Arc::clone(&receiver_ref.0);
    Box::new(Box::pin(unfold(receiver, |receiver| async move {
        let mut lock = receiver.lock().await;
        if let Some(event) = lock.recv().await {
            drop(lock);
            Some((Message::BrowserEvent(event), receiver))
        } else {
            drop(lock);
            tracing::info!("Browser event channel closed.");
            None
        }
    })))
}

impl Program for App {
    type State = State;
    type Message = Message;
    type Theme = iced::Theme;
    type Renderer = iced::Renderer;
    type Executor = executor::Default;

    fn name() -> &'static str {
        Self::APP_TITLE
    }

    fn settings(&self) -> iced::Settings {
        iced::Settings::default()
    }

    fn window(&self) -> Option<window::Settings> {
        Some(window::Settings { visible: true, exit_on_close_request: false, ..Default::default() })
    }

    fn boot(&self) -> (Self::State, Task<Self::Message>) {
        let lifecycle = LoadLifecycleController::new(
            self.config.ready_token.clone(),
            self.config.watchdog_timeout(),
        );

        (
            State {
                active_screen: ActiveScreen::Splash(screens::splash::SplashScreen::new(
                    self.config.splash_duration(),
                )),
                ctx: AppContext {
                    config: self.config.clone(),
                    browser: self.browser.clone(),
                    event_rx: self.event_rx.clone(),
                    lifecycle,
                    watchdog: None,
                },
            },
            Task::none(),
        )
    }

    fn subscription(&self, state: &Self::State) -> Subscription<Message> {
        let screen_subscription = match &state.active_screen {
            ActiveScreen::Splash(screen) => screen.subscription(&state.ctx),
            ActiveScreen::Browser(screen) => screen.subscription(&state.ctx),
        };

        // Also read during splash; the controller drops those events.
        let browser_events =
            Subscription::run_with(state.ctx.event_rx.clone(), browser_event_stream);

        Subscription::batch(vec![
            screen_subscription,
            browser_events,
            window::close_requests().map(Message::CloseRequested),
        ])
    }

    fn update(&self, state: &mut Self::State, message: Self::Message) -> Task<Self::Message> {
        match message {
            Message::SplashComplete => {
                let effects = state.ctx.lifecycle.on_splash_complete();
                if let ActiveScreen::Splash(_) = state.active_screen {
                    state.active_screen =
                        ActiveScreen::Browser(screens::browser::BrowserScreen::new());
                }
                run_effects(&mut state.ctx, effects)
            }

            Message::BrowserEvent(event) => handle_browser_event(&mut state.ctx, event),

            Message::CloseRequested(id) => {
                tracing::info!("Window {:?} closing, tearing down.", id);
                teardown(&mut state.ctx).chain(iced::exit())
            }

            Message::NoOp => Task::none(),

            msg => match &mut state.active_screen {
                ActiveScreen::Splash(screen) => screen.update(&mut state.ctx, msg),
                ActiveScreen::Browser(screen) => screen.update(&mut state.ctx, msg),
            },
        }
    }

    fn view<'a>(
        &self,
        state: &'a Self::State,
        _window: window::Id,
    ) -> Element<'a, Self::Message, Self::Theme, Self::Renderer> {
        match &state.active_screen {
            ActiveScreen::Splash(screen) => screen.view(&state.ctx),
            ActiveScreen::Browser(screen) => screen.view(&state.ctx),
        }
    }
}
