use iced::{
    Element, Length, Subscription, Task,
    widget::{button, column, container, stack, text},
};

use super::Screen;
use crate::{
    lifecycle::LoadPhase,
    ui::{effects::run_effects, message::Message, state::AppContext},
};

const OVERLAY_BACKGROUND: iced::Color = iced::Color::WHITE;
const ERROR_TEXT_COLOR: iced::Color = iced::Color::from_rgb8(200, 0, 0);

/// Hosts the native surface and layers the loading and error overlays on top.
#[derive(Debug, Clone)]
pub struct BrowserScreen {}

impl BrowserScreen {
    pub fn new() -> Self {
        Self {}
    }

    fn overlay(color: iced::Color, content: Element<'_, Message>) -> Element<'_, Message> {
        container(content)
            .center(Length::Fill)
            .style(move |_| container::Style {
                background: Some(iced::Background::Color(color)),
                ..Default::default()
            })
            .into()
    }
}

impl Screen for BrowserScreen {
    fn subscription(&self, _ctx: &AppContext) -> Subscription<Message> {
        Subscription::none()
    }

    fn update(&mut self, ctx: &mut AppContext, message: Message) -> Task<Message> {
        let effects = match message {
            Message::Retry => ctx.lifecycle.retry(),
            Message::WatchdogFired(ticket) => {
                if ctx.watchdog.as_ref().is_some_and(|(pending, _)| *pending == ticket) {
                    ctx.watchdog = None;
                }
                ctx.lifecycle.on_watchdog_fired(ticket);
                Vec::new()
            }
            _ => Vec::new(),
        };

        run_effects(ctx, effects)
    }

    fn view<'a>(&'a self, ctx: &'a AppContext) -> Element<'a, Message> {
        let state = ctx.lifecycle.state();

        // The native surface is attached over this area by the platform host.
        let surface: Element<Message> = container(
            column![
                text(&ctx.config.target_url).size(16),
                text(format!("Session {}", state.load_attempt + 1)).size(12),
            ]
            .spacing(10)
            .align_x(iced::Alignment::Center),
        )
        .center(Length::Fill)
        .into();

        let mut layers = vec![surface];

        match state.phase {
            LoadPhase::ErrorOverlay => {
                let message = state.error.as_deref().unwrap_or("Something went wrong");
                layers.push(Self::overlay(
                    OVERLAY_BACKGROUND,
                    column![
                        text("Unable to load the page").size(24),
                        text(message).size(14).color(ERROR_TEXT_COLOR),
                        button("Retry").on_press(Message::Retry).padding(10),
                    ]
                    .spacing(20)
                    .align_x(iced::Alignment::Center)
                    .max_width(500)
                    .into(),
                ));
            }
            LoadPhase::Content if state.is_loading => {
                layers.push(Self::overlay(OVERLAY_BACKGROUND, text("Loading...").size(20).into()));
            }
            _ => {}
        }

        stack(layers).width(Length::Fill).height(Length::Fill).into()
    }
}
