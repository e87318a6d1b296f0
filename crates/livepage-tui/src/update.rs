//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use livepage_core::core::display::Transition;
use livepage_core::preview::PreviewHandle;
use livepage_core::session::SessionEvent;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::preview::PreviewStatus;
use crate::features::transcript::{TranscriptView, text_width};
use crate::render;
use crate::state::{AppState, SessionStatus};

/// Rows scrolled per mouse wheel notch.
const MOUSE_SCROLL_ROWS: usize = 3;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::Session(event) => handle_session_event(app, event),
        UiEvent::PreviewRendered { seq, result } => {
            handle_preview_rendered(app, seq, result);
            vec![]
        }
        UiEvent::PreviewReopenFailed(err) => {
            app.notice = Some(format!("Could not open preview: {err}"));
            app.dirty = true;
            vec![]
        }
    }
}

fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    let pane = render::transcript_pane(Rect::new(0, 0, width, height));
    let viewport_width = text_width(pane.width);
    let viewport_height = pane.height as usize;
    if viewport_width == app.view.viewport_width && viewport_height == app.view.viewport_height {
        return;
    }
    app.view
        .set_viewport(app.display.transcript(), viewport_width, viewport_height);
    app.dirty = true;
}

fn handle_session_event(app: &mut AppState, event: SessionEvent) -> Vec<UiEffect> {
    match event {
        SessionEvent::Message(raw) => match app.display.handle(&raw) {
            Some(transition) => apply_transition(app, transition),
            None => vec![],
        },
        SessionEvent::Closed { error } => {
            app.session = match error {
                Some(err) => SessionStatus::Failed(err),
                None => SessionStatus::Closed,
            };
            app.dirty = true;
            vec![]
        }
    }
}

fn apply_transition(app: &mut AppState, transition: Transition) -> Vec<UiEffect> {
    app.dirty = true;
    if transition.transcript_changed {
        app.view.on_transcript_changed(app.display.transcript());
    }
    if transition.mode_changed && app.display.is_live() {
        // Results of a render still in flight belong to a discarded surface.
        app.render_seq += 1;
        app.preview = PreviewStatus::Idle;
    }

    let Some(html) = transition.rendered else {
        return vec![];
    };
    app.render_seq += 1;
    app.preview = PreviewStatus::Pending;
    vec![UiEffect::RenderIsolated {
        seq: app.render_seq,
        html,
    }]
}

fn handle_preview_rendered(app: &mut AppState, seq: u64, result: Result<PreviewHandle, String>) {
    if seq != app.render_seq {
        tracing::debug!(seq, current = app.render_seq, "dropping stale preview result");
        return;
    }
    app.preview = match result {
        Ok(handle) => PreviewStatus::Ready(handle),
        Err(err) => PreviewStatus::Failed(err),
    };
    app.dirty = true;
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => scroll(app, |view| view.scroll_up(MOUSE_SCROLL_ROWS)),
            MouseEventKind::ScrollDown => {
                scroll(app, |view| view.scroll_down(MOUSE_SCROLL_ROWS))
            }
            _ => vec![],
        },
        Event::Resize(_, _) => {
            app.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    if app.notice.take().is_some() {
        app.dirty = true;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') => {
            if app.display.clear() {
                app.view.on_transcript_changed(app.display.transcript());
                app.dirty = true;
            }
            vec![]
        }
        KeyCode::Char('o') if !app.display.is_live() => match app.preview_handle() {
            Some(handle) => vec![UiEffect::ReopenPreview {
                handle: handle.clone(),
            }],
            None => vec![],
        },
        KeyCode::Up | KeyCode::Char('k') => scroll(app, |view| view.scroll_up(1)),
        KeyCode::Down | KeyCode::Char('j') => scroll(app, |view| view.scroll_down(1)),
        KeyCode::PageUp => scroll(app, |view| view.scroll_up(view.page_rows())),
        KeyCode::PageDown => scroll(app, |view| view.scroll_down(view.page_rows())),
        KeyCode::Home | KeyCode::Char('g') => scroll(app, TranscriptView::scroll_to_top),
        KeyCode::End | KeyCode::Char('G') => scroll(app, TranscriptView::follow),
        _ => vec![],
    }
}

/// Applies a scroll action to the live transcript. Ignored while rendered.
fn scroll(app: &mut AppState, action: impl FnOnce(&mut TranscriptView)) -> Vec<UiEffect> {
    if app.display.is_live() {
        let before = app.view.scroll;
        action(&mut app.view);
        app.dirty |= app.view.scroll != before;
    }
    vec![]
}
