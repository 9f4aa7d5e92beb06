//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (turn resolving, calendar transition): draws every ~80ms.
//! - **Idle**: sleeps up to 400ms, only redraws on events or resize.
//!
//! ## Timers
//!
//! The calendar's 300ms transition is a spawned sleep task whose `AbortHandle`
//! is kept here. A superseding toggle or teardown aborts it, so a stale tick
//! can never mutate a discarded session.

mod component;
mod components;
mod event;
pub mod media;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::backend::auth::AuthWatcher;
use crate::backend::{
    ChatBackend, DataStore, HttpChatBackend, HttpDataStore, Identity, OfflineChatBackend,
    OfflineStore, ReadingSchedule, StaticIdentity, recommend,
};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::history;
use crate::core::overlay::{CALENDAR_TRANSITION_MS, EmbeddedPlayer};
use crate::core::state::App;
use crate::core::suggest::RandomReason;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputEvent, InputLine, MessageListState, chips};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input: InputLine,
    /// Live previews for video links in the latest bot reply. Registered in
    /// the overlay's media registry so `closeChat` can force-stop them.
    pub players: Vec<Arc<EmbeddedPlayer>>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input: InputLine::new(),
            players: Vec::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build the collaborators from a resolved config.
fn build_backends(config: &ResolvedConfig) -> (Arc<dyn ChatBackend>, Arc<dyn DataStore>) {
    if config.offline {
        info!("Running offline: canned failures, empty store");
        (Arc::new(OfflineChatBackend), Arc::new(OfflineStore))
    } else {
        (
            Arc::new(HttpChatBackend::new(config.chat_base_url.clone())),
            Arc::new(HttpDataStore::new(
                config.store_base_url.clone(),
                config.store_api_key.clone(),
            )),
        )
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let (chat, store) = build_backends(&config);
    let mut app = App::new(chat, store);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from timers and background tasks
    let (tx, rx) = mpsc::channel();

    // Resolve identity in the background. Session changes flow through the
    // watcher so the reducer hears about sign-in/sign-out the same way.
    let identity = StaticIdentity::new(config.child_id.clone());
    let tx_auth = tx.clone();
    tokio::spawn(async move {
        let mut watcher = AuthWatcher::new();
        watcher.on_auth_state_change(move |user| {
            if tx_auth.send(Action::AuthChanged(user.cloned())).is_err() {
                warn!("Failed to send auth state: receiver dropped");
            }
        });
        watcher.set_session(identity.current_user().await);
    });

    // Abort handles for the current turn and the calendar transition timer
    let mut turn_handles: Vec<AbortHandle> = Vec::new();
    let mut calendar_timer: Option<AbortHandle> = None;

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        let animating = app.is_loading || app.overlay.calendar_transitioning();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating, long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(400)
        };
        let first_event = poll_event_timeout(timeout);

        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = action_for_event(&tui_event, &app, &mut tui) {
                let effect = update(&mut app, action);
                if run_effect(
                    effect,
                    &app,
                    &mut tui,
                    &tx,
                    &mut calendar_timer,
                    &mut turn_handles,
                ) {
                    should_quit = true;
                }
            }
        }

        // Handle timer and background-task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let reply_arrived = matches!(action, Action::ReplyReceived(_));
            let effect = update(&mut app, action);
            if run_effect(
                effect,
                &app,
                &mut tui,
                &tx,
                &mut calendar_timer,
                &mut turn_handles,
            ) {
                should_quit = true;
            }
            if reply_arrived {
                mount_players(&mut app, &mut tui);
                tui.message_list.follow();
            }
        }

        // Players unmount when the panel closes; their registry entries with them.
        if !app.overlay.chat_open() && !tui.players.is_empty() {
            tui.players.clear();
            app.overlay.media.clear();
        }

        if should_quit {
            break;
        }
    }

    // Teardown: nothing may fire into a discarded session.
    if let Some(handle) = calendar_timer.take() {
        handle.abort();
    }
    for handle in turn_handles.drain(..) {
        handle.abort();
    }

    ratatui::restore();
    Ok(())
}

/// Translate a terminal event into a core action, routing text editing to the
/// input line and contextual keys by overlay state.
fn action_for_event(tui_event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match tui_event {
        TuiEvent::ForceQuit => Some(Action::Quit),

        // Esc peels overlays back to front, then the chat panel, then quits.
        TuiEvent::Escape => {
            if app.overlay.enlarged_image().is_some() {
                Some(Action::CloseImage)
            } else if app.overlay.calendar_visible() {
                Some(Action::ToggleCalendar)
            } else if app.overlay.chat_open() {
                Some(Action::CloseChat)
            } else {
                Some(Action::Quit)
            }
        }

        TuiEvent::ToggleChat => Some(Action::ToggleChat),
        TuiEvent::ToggleCalendar => Some(Action::ToggleCalendar),

        TuiEvent::PickChip(digit) => {
            chips::chip_for_digit(&app.suggestions, *digit).map(Action::GenreChosen)
        }

        TuiEvent::PreviewCover => {
            let last_bot = app
                .transcript
                .messages()
                .iter()
                .rev()
                .find(|m| m.from_bot)?;
            media::image_urls(&last_bot.content)
                .into_iter()
                .next()
                .map(Action::ShowImage)
        }

        TuiEvent::ReadAloud => {
            let index = app
                .transcript
                .messages()
                .iter()
                .rposition(|m| m.from_bot)?;
            Some(Action::ToggleReadAloud(index))
        }

        TuiEvent::PlayPreview => {
            if let Some(player) = tui.players.last() {
                player.play();
                debug!("preview playing: {}", player.source());
            }
            None
        }

        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(tui_event);
            None
        }

        TuiEvent::InputChar(_) | TuiEvent::Backspace | TuiEvent::Paste(_) | TuiEvent::Submit => {
            if !app.overlay.chat_open() {
                return None;
            }
            match tui.input.handle_event(tui_event)? {
                InputEvent::Submit(text) => Some(Action::Submit(text)),
                InputEvent::ContentChanged => None,
            }
        }

        TuiEvent::Resize => None,
    }
}

/// Execute an effect. Returns true when the loop should exit.
fn run_effect(
    effect: Effect,
    app: &App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
    calendar_timer: &mut Option<AbortHandle>,
    turn_handles: &mut Vec<AbortHandle>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::SpawnTurn {
            message,
            fetch_random,
        } => {
            *turn_handles = spawn_turn(app, message, fetch_random, tx.clone());
            tui.message_list.follow();
        }
        Effect::ScheduleCalendarTick { refresh } => {
            // Supersede: the old timer must never tick a replaced transition.
            if let Some(handle) = calendar_timer.take() {
                handle.abort();
            }
            *calendar_timer = Some(schedule_calendar_tick(tx.clone()));
            if refresh {
                spawn_schedule_fetch(app, tx.clone());
            }
        }
        Effect::SaveTurn => spawn_save_turn(app),
        Effect::FetchFavorites => spawn_favorites_fetch(app, tx.clone()),
    }
    false
}

/// Spawn the turn's background work: the bot reply, and the chip fetch when
/// the decision table asked for one.
fn spawn_turn(
    app: &App,
    message: String,
    fetch_random: Option<(usize, RandomReason)>,
    tx: mpsc::Sender<Action>,
) -> Vec<AbortHandle> {
    info!("Spawning turn (fetch_random: {:?})", fetch_random);
    let mut handles = Vec::new();

    let chat = app.chat.clone();
    let tx_reply = tx.clone();
    let reply_handle = tokio::spawn(async move {
        let action = match chat.reply(&message).await {
            Ok(text) => Action::ReplyReceived(text),
            Err(e) => Action::ReplyFailed(e.to_string()),
        };
        if tx_reply.send(action).is_err() {
            warn!("Failed to send reply action: receiver dropped");
        }
    });
    handles.push(reply_handle.abort_handle());

    if let Some((count, reason)) = fetch_random {
        let store = app.store.clone();
        let child = app.user_id().map(str::to_string);
        let excluded = app.favorite_genres.clone();
        let fetch_handle = tokio::spawn(async move {
            let result = match child {
                Some(child) => {
                    recommend::random_genres(store.as_ref(), &child, count, &excluded).await
                }
                // Nobody signed in: nothing to suggest, but not an error.
                None => Ok(Vec::new()),
            };
            let action = match result {
                Ok(genres) => Action::RandomGenresReady { genres, reason },
                Err(e) => Action::RandomGenresFailed(e.to_string()),
            };
            if tx.send(action).is_err() {
                warn!("Failed to send genre action: receiver dropped");
            }
        });
        handles.push(fetch_handle.abort_handle());
    }

    handles
}

/// One cancellable tick for the calendar's enter/exit transition.
fn schedule_calendar_tick(tx: mpsc::Sender<Action>) -> AbortHandle {
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(CALENDAR_TRANSITION_MS)).await;
        if tx.send(Action::CalendarTransitionDone).is_err() {
            warn!("Failed to send calendar tick: receiver dropped");
        }
    })
    .abort_handle()
}

fn spawn_schedule_fetch(app: &App, tx: mpsc::Sender<Action>) {
    let store = app.store.clone();
    let user = app.user_id().map(str::to_string);
    tokio::spawn(async move {
        let Some(user) = user else {
            let _ = tx.send(Action::SchedulesLoaded(Vec::new()));
            return;
        };
        let action = match store
            .select("reading_schedules", &[("user_id", &user), ("status", "pending")])
            .await
        {
            Ok(rows) => {
                let schedules: Vec<ReadingSchedule> = rows
                    .into_iter()
                    .filter_map(|row| serde_json::from_value(row).ok())
                    .collect();
                Action::SchedulesLoaded(schedules)
            }
            Err(e) => Action::SchedulesFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send schedules action: receiver dropped");
        }
    });
}

/// Persist the turn that just resolved. Best-effort: failures log and move on.
fn spawn_save_turn(app: &App) {
    let Some((user_message, bot_message)) = app.transcript.last_turn() else {
        return;
    };
    let store = app.store.clone();
    let session_id = app.session_id.clone();
    let user_id = app.user_id().map(str::to_string);
    let user_message = user_message.clone();
    let bot_message = bot_message.clone();
    tokio::spawn(async move {
        if let Err(e) = history::record_turn(
            store.as_ref(),
            &session_id,
            user_id.as_deref(),
            &user_message,
            &bot_message,
        )
        .await
        {
            warn!("Failed to save turn: {}", e);
        }
    });
}

fn spawn_favorites_fetch(app: &App, tx: mpsc::Sender<Action>) {
    let Some(child) = app.user_id().map(str::to_string) else {
        return;
    };
    let store = app.store.clone();
    tokio::spawn(async move {
        match recommend::favorite_genres(store.as_ref(), &child).await {
            Ok(genres) => {
                if tx.send(Action::FavoritesLoaded(genres)).is_err() {
                    warn!("Failed to send favorites: receiver dropped");
                }
            }
            Err(e) => warn!("Failed to load favorites: {}", e),
        }
    });
}

/// Replace the preview players with ones for the latest bot reply and
/// register them with the media coordinator.
fn mount_players(app: &mut App, tui: &mut TuiState) {
    let Some(last_bot) = app.transcript.messages().iter().rev().find(|m| m.from_bot) else {
        return;
    };
    let urls = media::video_urls(&last_bot.content);

    tui.players.clear();
    app.overlay.media.clear();
    for (index, url) in urls.into_iter().enumerate() {
        let player = Arc::new(EmbeddedPlayer::new(url));
        app.overlay.media.register(index, &player);
        tui.players.push(player);
    }
    if !tui.players.is_empty() {
        debug!("{} video preview(s) mounted", tui.players.len());
    }
}
