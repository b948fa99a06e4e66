//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! core reducer stays UI-agnostic.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (sign-in surface, streaming): draws every ~80ms for a
//!   smooth pulse and spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! ## Concurrency
//!
//! One logical UI thread. Sign-in flows, token revocation, and the stream
//! read loop run as tokio tasks and report back through an `mpsc` channel
//! of `Action`s, drained between frames. The reducer rejects overlapping
//! submissions, so at most one stream loop feeds the result buffer at a
//! time. There is no cancellation: a started stream runs to completion or
//! failure, and its terminal action is a no-op if the user signed out
//! meanwhile.

mod component;
mod components;
mod event;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Phase};
use crate::generation::{GenerationClient, GenerationRequest};
use crate::identity::{GoogleIdentity, IdentityProvider, Session, SignInNotice};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, ResultViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Theme;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
    pub result_view: ResultViewState,
    pub theme: Theme,
    // Animation state
    pub pulse_value: f32,
}

impl TuiState {
    pub fn for_app(app: &App) -> Self {
        Self {
            input_box: InputBox::new(app.config.example_input.clone()),
            result_view: ResultViewState::new(),
            theme: Theme::from_hex(&app.config.theme_color),
            pulse_value: 0.0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let identity: Arc<dyn IdentityProvider> = Arc::new(GoogleIdentity::new(
        config.google_client_id.clone(),
        None,
        config.access_token.clone(),
    ));
    let generation = Arc::new(GenerationClient::new(config.endpoint.clone()));

    let mut app = App::new(config);
    let mut tui = TuiState::for_app(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // One-tap analog: probe the ambient token before any interaction.
    // Failure here is quiet; the sign-in surface stays up.
    spawn_silent_sign_in(identity.clone(), tx.clone());

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Sync InputBox props with App state
        tui.input_box.disabled = app.is_busy();

        let animating = app.is_busy() || app.phase == Phase::Unauthenticated;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 2.0).sin() * 0.5 + 0.5;
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of state
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            match app.phase {
                Phase::Unauthenticated => match event {
                    TuiEvent::Submit => {
                        let effect = update(&mut app, Action::SignInRequested);
                        if effect == Effect::SpawnSignIn {
                            spawn_interactive_sign_in(identity.clone(), tx.clone());
                        }
                    }
                    TuiEvent::Escape => should_quit = true,
                    _ => {}
                },
                Phase::Idle | Phase::Streaming => {
                    if matches!(event, TuiEvent::SignOut) {
                        if let Effect::RevokeSession(session) = update(&mut app, Action::SignOut) {
                            spawn_revoke(identity.clone(), session);
                        }
                        tui.input_box.clear();
                        tui.result_view = ResultViewState::new();
                        continue;
                    }

                    // Scroll events go to the result view
                    if matches!(event, TuiEvent::ScrollUp | TuiEvent::ScrollDown) {
                        tui.result_view.handle_event(&event);
                        continue;
                    }

                    // InputBox handles everything else
                    if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                        // The reducer owns the busy gate; the box is only
                        // cleared once the submission is accepted.
                        if let Effect::SpawnRequest(prompt) = update(&mut app, Action::Submit(text))
                        {
                            tui.input_box.clear();
                            tui.result_view = ResultViewState::new();
                            spawn_request(generation.clone(), prompt, tx.clone());
                        }
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (sign-in outcomes, stream chunks)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::RevokeSession(session) => spawn_revoke(identity.clone(), session),
                Effect::SpawnRequest(prompt) => {
                    spawn_request(generation.clone(), prompt, tx.clone())
                }
                Effect::SpawnSignIn => spawn_interactive_sign_in(identity.clone(), tx.clone()),
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

fn spawn_silent_sign_in(identity: Arc<dyn IdentityProvider>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        match identity.silent_sign_in().await {
            Ok(session) => {
                if tx.send(Action::SignedIn(session)).is_err() {
                    warn!("Failed to send silent sign-in result: receiver dropped");
                }
            }
            // The silent path fails quietly; the user signs in interactively
            Err(e) => debug!("Silent sign-in unavailable: {e}"),
        }
    });
}

fn spawn_interactive_sign_in(identity: Arc<dyn IdentityProvider>, tx: mpsc::Sender<Action>) {
    info!("Spawning interactive sign-in ({})", identity.name());

    let (notice_tx, mut notice_rx) = tokio::sync::mpsc::channel::<SignInNotice>(4);

    // Forward mid-flow instructions (verification URL, user code) to the UI
    let tx_notices = tx.clone();
    tokio::spawn(async move {
        while let Some(notice) = notice_rx.recv().await {
            let action = Action::SignInPrompt {
                verification_url: notice.verification_url,
                user_code: notice.user_code,
            };
            if tx_notices.send(action).is_err() {
                return;
            }
        }
    });

    tokio::spawn(async move {
        let action = match identity.interactive_sign_in(notice_tx).await {
            Ok(session) => Action::SignedIn(session),
            Err(e) => Action::SignInFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send sign-in outcome: receiver dropped");
        }
    });
}

fn spawn_revoke(identity: Arc<dyn IdentityProvider>, session: Session) {
    tokio::spawn(async move {
        // Local sign-out already happened; provider-side failure is logged only
        if let Err(e) = identity.sign_out(session).await {
            warn!("Provider-side sign-out failed: {e}");
        }
    });
}

fn spawn_request(client: Arc<GenerationClient>, prompt: String, tx: mpsc::Sender<Action>) {
    info!("Spawning generation request");

    tokio::spawn(async move {
        // Async channel for streaming chunks
        let (chunk_tx, mut chunk_rx) = tokio::sync::mpsc::channel::<String>(100);

        let stream_handle = tokio::spawn(async move {
            let request = GenerationRequest::new(prompt);
            client.stream_generation(&request, chunk_tx).await
        });

        let mut forwarded_count = 0usize;
        let mut total_content_len = 0usize;

        while let Some(text) = chunk_rx.recv().await {
            forwarded_count += 1;
            total_content_len += text.len();
            debug!(
                "Forwarding Action::StreamChunk (len={}, total={})",
                text.len(),
                total_content_len
            );
            if tx.send(Action::StreamChunk(text)).is_err() {
                warn!("Failed to forward StreamChunk: receiver dropped");
                return;
            }
        }

        // Channel closed: the stream task has finished one way or the other,
        // so exactly one terminal action follows the last chunk.
        let outcome = match stream_handle.await {
            Ok(Ok(())) => Action::StreamDone,
            Ok(Err(e)) => Action::StreamFailed(e.to_string()),
            Err(e) => Action::StreamFailed(format!("stream task failed: {e}")),
        };
        info!(
            "Forwarding complete: {} chunks, {} content bytes",
            forwarded_count, total_content_len
        );
        if tx.send(outcome).is_err() {
            warn!("Failed to send stream outcome: receiver dropped");
        }
    });
}
