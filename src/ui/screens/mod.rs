use iced::{Element, Subscription, Task};

use crate::ui::{message::Message, state::AppContext};

pub mod browser;
pub mod splash;

pub trait Screen {
    fn update(&mut self, ctx: &mut AppContext, message: Message) -> Task<Message>;
    fn view<'a>(&'a self, ctx: &'a AppContext) -> Element<'a, Message>;
    fn subscription(&self, ctx: &AppContext) -> Subscription<Message>;
}
