//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the Elm runtime boundary. The reducer stays pure and produces
//! effects; this module performs them.
//!
//! Events come from three places each iteration:
//! - the session channel fed by the `Subscription`
//! - the inbox, where effect handlers report their results
//! - the terminal

mod handlers;
mod inbox;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use livepage_core::core::interrupt::{self, InterruptedError};
use livepage_core::preview::IsolatedSurface;
use livepage_core::session::{MessageStream, SessionEvent, Subscription};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, SessionStatus};
use crate::terminal::{self, TerminalGuard};
use crate::{render, update};

/// Poll interval while the session is streaming (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval once the session has ended.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
pub struct TuiRuntime {
    terminal: TerminalGuard,
    pub state: AppState,
    surface: Arc<dyn IsolatedSurface>,
    /// Runtime used to run blocking effect handlers.
    handle: Handle,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    session_rx: mpsc::UnboundedReceiver<SessionEvent>,
    subscription: Subscription,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Subscribes to `stream` and takes over the terminal.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(
        source: impl Into<String>,
        stream: MessageStream,
        surface: Arc<dyn IsolatedSurface>,
    ) -> Result<Self> {
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });
        interrupt::reset();

        let terminal = TerminalGuard::enter().context("Failed to setup terminal")?;

        let (session_tx, session_rx) = mpsc::unbounded_channel();
        let subscription = Subscription::spawn(stream, session_tx);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state: AppState::new(source),
            surface,
            handle: Handle::current(),
            inbox_tx,
            inbox_rx,
            session_rx,
            subscription,
            last_tick: Instant::now(),
        })
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns `InterruptedError` when stopped by a signal, or an error if
    /// drawing or reading terminal input fails.
    pub fn run(&mut self) -> Result<()> {
        let result = self.event_loop();
        self.subscription.unsubscribe();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.state.should_quit {
            if interrupt::is_interrupted() {
                return Err(InterruptedError.into());
            }

            let mut events = self.collect_events()?;

            // Layout updates must land before anything that scrolls.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if self.state.dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                self.state.dirty = false;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.session == SessionStatus::Streaming {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.session_rx.try_recv() {
            events.push(UiEvent::Session(ev));
        }
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block for input only when there is nothing else to process.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };
        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::RenderIsolated { seq, html } => {
                self.spawn_blocking_effect(move |surface| {
                    Some(handlers::render_preview(surface, seq, &html))
                });
            }
            UiEffect::ReopenPreview { handle } => {
                self.spawn_blocking_effect(move |surface| {
                    handlers::reopen_preview(surface, &handle)
                });
            }
        }
    }

    /// Runs a surface handler on the blocking pool and forwards its event to
    /// the inbox.
    fn spawn_blocking_effect<F>(&self, f: F)
    where
        F: FnOnce(&dyn IsolatedSurface) -> Option<UiEvent> + Send + 'static,
    {
        let surface = Arc::clone(&self.surface);
        let tx = self.inbox_tx.clone();
        self.handle.spawn_blocking(move || {
            if let Some(event) = f(surface.as_ref()) {
                let _ = tx.send(event);
            }
        });
    }
}
