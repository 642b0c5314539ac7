use std::collections::VecDeque;

use iced::Task;

use crate::{
    browser::{EmbeddedBrowser, NavigationRequest},
    lifecycle::{BrowserEvent, LifecycleEffect, LoadFailure},
    ui::{message::Message, state::AppContext},
};

/// Carries out controller effects: timers become abortable tasks, loads go to
/// the browser host.
pub fn run_effects(ctx: &mut AppContext, effects: Vec<LifecycleEffect>) -> Task<Message> {
    let mut queue: VecDeque<LifecycleEffect> = effects.into();
    let mut tasks = vec![];

    while let Some(effect) = queue.pop_front() {
        match effect {
            LifecycleEffect::ArmWatchdog { ticket, delay } => {
                if let Some((previous, handle)) = ctx.watchdog.take() {
                    tracing::debug!("Replacing watchdog {} with {}", previous.id(), ticket.id());
                    handle.abort();
                }

                let (task, handle) = Task::future(async move {
                    tokio::time::sleep(delay).await;
                    ticket
                })
                .map(Message::WatchdogFired)
                .abortable();

                ctx.watchdog = Some((ticket, handle));
                tasks.push(task);
            }

            LifecycleEffect::CancelWatchdog(ticket) => match ctx.watchdog.take() {
                Some((pending, handle)) if pending == ticket => {
                    tracing::debug!("Aborting watchdog {}", ticket.id());
                    handle.abort();
                }
                other => ctx.watchdog = other,
            },

            LifecycleEffect::Load { attempt } => {
                let request = NavigationRequest {
                    url: ctx.config.target_url.clone(),
                    attempt,
                    settings: ctx.config.browser_settings(),
                };

                if let Err(err) = ctx.browser.navigate(request) {
                    let failure = LoadFailure::Navigation(format!("Browser unavailable: {}", err));
                    queue.extend(ctx.lifecycle.on_load_error(failure));
                }
            }
        }
    }

    Task::batch(tasks)
}

/// Feeds a browser event into the controller whatever screen is showing.
pub fn handle_browser_event(ctx: &mut AppContext, event: BrowserEvent) -> Task<Message> {
    let effects = ctx.lifecycle.dispatch(event);
    run_effects(ctx, effects)
}

/// Cancels the watchdog and releases the browser surface.
pub fn teardown(ctx: &mut AppContext) -> Task<Message> {
    let effects = ctx.lifecycle.teardown();
    let task = run_effects(ctx, effects);

    if let Err(err) = ctx.browser.teardown() {
        tracing::warn!("Failed to tear down browser: {}", err);
    }
    task
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        browser::{BrowserBridge, BrowserCommand, ChannelBrowser, NavigationPolicy},
        config::Config,
        lifecycle::{LoadLifecycleController, LoadPhase},
    };

    fn context() -> (AppContext, mpsc::Receiver<BrowserCommand>) {
        let config = Config::default();
        let (_bridge, event_rx) = BrowserBridge::channel(8, NavigationPolicy::allow_all());
        let (browser, command_rx) = ChannelBrowser::new(8);
        let lifecycle =
            LoadLifecycleController::new(config.ready_token.clone(), config.watchdog_timeout());

        (AppContext { config, browser, event_rx, lifecycle, watchdog: None }, command_rx)
    }

    fn pending_ticket(ctx: &AppContext) -> Option<crate::lifecycle::WatchdogTicket> {
        ctx.watchdog.as_ref().map(|(ticket, _)| *ticket)
    }

    #[test]
    fn splash_complete_navigates_and_arms_watchdog() {
        let (mut ctx, mut command_rx) = context();

        let effects = ctx.lifecycle.on_splash_complete();
        let _task = run_effects(&mut ctx, effects);

        match command_rx.try_recv().unwrap() {
            BrowserCommand::Navigate(request) => {
                assert_eq!(request.url, ctx.config.target_url);
                assert_eq!(request.attempt, 0);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(pending_ticket(&ctx).is_some());
        assert_eq!(pending_ticket(&ctx), ctx.lifecycle.state().pending_timeout);
    }

    #[test]
    fn rearming_replaces_and_aborts_previous_watchdog() {
        let (mut ctx, _command_rx) = context();
        let effects = ctx.lifecycle.on_splash_complete();
        let _first_task = run_effects(&mut ctx, effects);
        let (first, first_handle) = ctx.watchdog.clone().unwrap();

        let _second_task = handle_browser_event(&mut ctx, BrowserEvent::LoadStart);

        let second = pending_ticket(&ctx).unwrap();
        assert_ne!(first, second);
        assert_eq!(Some(second), ctx.lifecycle.state().pending_timeout);
        assert!(first_handle.is_aborted());
    }

    #[test]
    fn cancel_for_stale_ticket_keeps_pending_watchdog() {
        let (mut ctx, _command_rx) = context();
        let effects = ctx.lifecycle.on_splash_complete();
        let _task = run_effects(&mut ctx, effects);
        let stale = pending_ticket(&ctx).unwrap();
        let _task = handle_browser_event(&mut ctx, BrowserEvent::LoadStart);
        let current = pending_ticket(&ctx).unwrap();

        let _task = run_effects(&mut ctx, vec![LifecycleEffect::CancelWatchdog(stale)]);
        assert_eq!(pending_ticket(&ctx), Some(current));

        let _task = run_effects(&mut ctx, vec![LifecycleEffect::CancelWatchdog(current)]);
        assert!(ctx.watchdog.is_none());
    }

    #[test]
    fn unavailable_browser_shows_error_and_releases_watchdog() {
        let (mut ctx, command_rx) = context();
        drop(command_rx);

        let effects = ctx.lifecycle.on_splash_complete();
        let _task = run_effects(&mut ctx, effects);

        let state = ctx.lifecycle.state();
        assert_eq!(state.phase, LoadPhase::ErrorOverlay);
        assert!(state.error.as_deref().is_some_and(|e| e.starts_with("Browser unavailable")));
        assert_eq!(state.pending_timeout, None);
        assert!(ctx.watchdog.is_none());
    }

    #[test]
    fn events_during_splash_are_dropped() {
        let (mut ctx, mut command_rx) = context();

        let _task = handle_browser_event(&mut ctx, BrowserEvent::LoadError("offline".to_owned()));
        let _task = handle_browser_event(&mut ctx, BrowserEvent::LoadStart);

        assert_eq!(ctx.lifecycle.state().phase, LoadPhase::Splash);
        assert_eq!(ctx.lifecycle.state().error, None);
        assert!(ctx.watchdog.is_none());
        assert!(command_rx.try_recv().is_err());
    }

    #[test]
    fn teardown_aborts_watchdog_and_releases_surface() {
        let (mut ctx, mut command_rx) = context();
        let effects = ctx.lifecycle.on_splash_complete();
        let _task = run_effects(&mut ctx, effects);
        let (_, handle) = ctx.watchdog.clone().unwrap();
        assert!(matches!(command_rx.try_recv(), Ok(BrowserCommand::Navigate(_))));

        let _task = teardown(&mut ctx);

        assert!(ctx.watchdog.is_none());
        assert!(handle.is_aborted());
        assert_eq!(ctx.lifecycle.state().pending_timeout, None);
        assert_eq!(command_rx.try_recv().unwrap(), BrowserCommand::Teardown);
    }
}
