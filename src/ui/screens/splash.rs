use std::time::{Duration, Instant};

use iced::{
    Element, Length, Subscription, Task,
    widget::{column, container, progress_bar, text},
};

use super::Screen;
use crate::ui::{message::Message, state::AppContext};

const BRAND_NAME: &str = "Skin-alyze";
const SPLASH_TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct SplashScreen {
    started_at: Instant,
    duration: Duration,
    progress: f32,
    completed: bool,
}

impl SplashScreen {
    pub fn new(duration: Duration) -> Self {
        Self { started_at: Instant::now(), duration, progress: 0.0, completed: false }
    }

    fn progress_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

impl Screen for SplashScreen {
    fn subscription(&self, _ctx: &AppContext) -> Subscription<Message> {
        if self.completed {
            Subscription::none()
        } else {
            iced::time::every(SPLASH_TICK).map(Message::SplashTick)
        }
    }

    fn update(&mut self, _ctx: &mut AppContext, message: Message) -> Task<Message> {
        match message {
            Message::SplashTick(now) => {
                self.progress = self.progress_at(now);
                if self.progress >= 1.0 && !self.completed {
                    self.completed = true;
                    return Task::done(Message::SplashComplete);
                }
                Task::none()
            }
            _ => Task::none(),
        }
    }

    fn view<'a>(&'a self, _ctx: &'a AppContext) -> Element<'a, Message> {
        let content = column![
            text(BRAND_NAME).size(36),
            text("Loading your experience").size(14),
            container(progress_bar(0.0..=1.0, self.progress)).width(Length::Fixed(240.0)),
        ]
        .spacing(20)
        .align_x(iced::Alignment::Center);

        container(content).center(Length::Fill).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_tracks_elapsed_time() {
        let splash = SplashScreen::new(Duration::from_secs(2));
        let start = splash.started_at;
        assert_eq!(splash.progress_at(start), 0.0);
        assert!((splash.progress_at(start + Duration::from_secs(1)) - 0.5).abs() < f32::EPSILON);
        assert_eq!(splash.progress_at(start + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let splash = SplashScreen::new(Duration::ZERO);
        assert_eq!(splash.progress_at(Instant::now()), 1.0);
    }
}
