//! Modal and media coordination for one chat session.
//!
//! Four independent sub-states: the chat panel flag, the calendar overlay's
//! transition machine, the enlarged-cover viewer, and a registry of embedded
//! media players. They interact at exactly two points: closing the chat stops
//! all registered media and the read-aloud voice before the panel flag flips,
//! and a calendar toggle supersedes any in-flight transition.
//!
//! This module owns no timers. A toggle tells the caller a transition tick is
//! due in [`CALENDAR_TRANSITION_MS`]; the caller schedules it (cancelling any
//! previous one) and feeds the tick back through [`OverlayState::calendar_tick`].
//! A tick arriving for a settled phase is ignored, so a stale timer can never
//! corrupt the machine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use log::debug;

/// How long the calendar's enter/exit animation holds the transient phase.
pub const CALENDAR_TRANSITION_MS: u64 = 300;

/// Calendar overlay phases. `Opening` and `Closing` are transient and
/// auto-advance when the scheduled tick fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Capability to halt a playing piece of embedded media.
///
/// The coordinator never owns player lifecycle; it only needs a way to make
/// sure nothing keeps playing after the chat panel is gone.
pub trait MediaHandle: Send + Sync {
    fn stop(&self);
}

/// An embedded player without a direct control API. The only portable way to
/// halt it is to clear and restore its source, which resets playback.
pub struct EmbeddedPlayer {
    source: Mutex<String>,
    playing: AtomicBool,
}

impl EmbeddedPlayer {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Mutex::new(source.into()),
            playing: AtomicBool::new(false),
        }
    }

    pub fn play(&self) {
        self.playing.store(true, Ordering::SeqCst);
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    pub fn source(&self) -> String {
        self.source.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl MediaHandle for EmbeddedPlayer {
    fn stop(&self) {
        if let Ok(mut source) = self.source.lock() {
            // Clear-and-restore: reassigning the source halts playback.
            let kept = std::mem::take(&mut *source);
            *source = kept;
        }
        self.playing.store(false, Ordering::SeqCst);
    }
}

/// Index → weak player reference. Players register as they mount; entries for
/// unmounted players go stale and are skipped, never an error.
#[derive(Default)]
pub struct MediaRegistry {
    handles: HashMap<usize, Weak<dyn MediaHandle>>,
}

impl MediaRegistry {
    pub fn register<H: MediaHandle + 'static>(&mut self, index: usize, handle: &Arc<H>) {
        let arc: Arc<dyn MediaHandle> = handle.clone();
        let weak: Weak<dyn MediaHandle> = Arc::downgrade(&arc);
        self.handles.insert(index, weak);
    }

    /// Stop every live handle. Returns how many were actually stopped.
    pub fn stop_all(&self) -> usize {
        let mut stopped = 0;
        for handle in self.handles.values() {
            if let Some(live) = handle.upgrade() {
                live.stop();
                stopped += 1;
            }
        }
        stopped
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// All overlay state for one active session.
#[derive(Default)]
pub struct OverlayState {
    chat_open: bool,
    calendar: CalendarPhase,
    enlarged_image: Option<String>,
    pub media: MediaRegistry,
}

impl OverlayState {
    pub fn chat_open(&self) -> bool {
        self.chat_open
    }

    pub fn open_chat(&mut self) {
        self.chat_open = true;
    }

    /// Close the chat panel. Every registered media handle is stopped and the
    /// voice collaborator's stop callback runs *before* the open flag flips,
    /// so nothing keeps playing behind a hidden panel.
    pub fn close_chat<F: FnOnce()>(&mut self, stop_speech: F) {
        let stopped = self.media.stop_all();
        debug!("close_chat: stopped {stopped} media handle(s)");
        stop_speech();
        self.chat_open = false;
    }

    pub fn calendar_phase(&self) -> CalendarPhase {
        self.calendar
    }

    /// The overlay is rendered for every phase but `Closed`.
    pub fn calendar_visible(&self) -> bool {
        self.calendar != CalendarPhase::Closed
    }

    pub fn calendar_transitioning(&self) -> bool {
        matches!(self.calendar, CalendarPhase::Opening | CalendarPhase::Closing)
    }

    /// Toggle the calendar. A toggle during a transition supersedes it and
    /// reverses direction. The caller must cancel any outstanding tick timer
    /// and schedule a fresh one for [`CALENDAR_TRANSITION_MS`].
    pub fn toggle_calendar(&mut self) -> CalendarPhase {
        self.calendar = match self.calendar {
            CalendarPhase::Closed | CalendarPhase::Closing => CalendarPhase::Opening,
            CalendarPhase::Open | CalendarPhase::Opening => CalendarPhase::Closing,
        };
        self.calendar
    }

    /// Advance a transient phase. A tick in a settled phase is stale and ignored.
    pub fn calendar_tick(&mut self) {
        self.calendar = match self.calendar {
            CalendarPhase::Opening => CalendarPhase::Open,
            CalendarPhase::Closing => CalendarPhase::Closed,
            settled => settled,
        };
    }

    pub fn enlarged_image(&self) -> Option<&str> {
        self.enlarged_image.as_deref()
    }

    /// Show a cover full-screen; replaces any image already shown. No stacking.
    pub fn show_image(&mut self, url: impl Into<String>) {
        self.enlarged_image = Some(url.into());
    }

    pub fn close_image(&mut self) {
        self.enlarged_image = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingHandle {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl MediaHandle for RecordingHandle {
        fn stop(&self) {
            self.log.lock().unwrap().push(format!("media:{}", self.name));
        }
    }

    #[test]
    fn test_close_chat_stops_media_then_speech_then_hides() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut overlay = OverlayState::default();
        overlay.open_chat();

        let a = Arc::new(RecordingHandle { name: "a", log: log.clone() });
        let b = Arc::new(RecordingHandle { name: "b", log: log.clone() });
        overlay.media.register(0, &a);
        overlay.media.register(1, &b);

        let speech_log = log.clone();
        overlay.close_chat(move || speech_log.lock().unwrap().push("speech".to_string()));

        assert!(!overlay.chat_open());
        let events = log.lock().unwrap();
        assert_eq!(events.len(), 3);
        // Media first (any order), speech last before the flag flip.
        assert_eq!(events[2], "speech");
        assert!(events[..2].iter().all(|e| e.starts_with("media:")));
    }

    #[test]
    fn test_close_chat_with_no_handles() {
        let mut overlay = OverlayState::default();
        overlay.open_chat();
        let mut called = false;
        overlay.close_chat(|| called = true);
        assert!(called);
        assert!(!overlay.chat_open());
    }

    #[test]
    fn test_stale_handles_are_tolerated() {
        let mut registry = MediaRegistry::default();
        let live = Arc::new(EmbeddedPlayer::new("https://video/1"));
        live.play();
        registry.register(0, &live);
        {
            let gone = Arc::new(EmbeddedPlayer::new("https://video/2"));
            registry.register(1, &gone);
        } // dropped: entry 1 is now stale

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.stop_all(), 1);
        assert!(!live.is_playing());
    }

    #[test]
    fn test_embedded_player_stop_keeps_source() {
        let player = EmbeddedPlayer::new("https://video/42");
        player.play();
        player.stop();
        assert!(!player.is_playing());
        assert_eq!(player.source(), "https://video/42");
    }

    #[test]
    fn test_calendar_full_cycle() {
        let mut overlay = OverlayState::default();
        assert_eq!(overlay.calendar_phase(), CalendarPhase::Closed);
        assert!(!overlay.calendar_transitioning());

        overlay.toggle_calendar();
        assert_eq!(overlay.calendar_phase(), CalendarPhase::Opening);
        assert!(overlay.calendar_transitioning());
        overlay.calendar_tick();
        assert_eq!(overlay.calendar_phase(), CalendarPhase::Open);
        assert!(!overlay.calendar_transitioning());

        overlay.toggle_calendar();
        assert_eq!(overlay.calendar_phase(), CalendarPhase::Closing);
        assert!(overlay.calendar_transitioning());
        overlay.calendar_tick();
        assert_eq!(overlay.calendar_phase(), CalendarPhase::Closed);
        assert!(!overlay.calendar_transitioning());
    }

    #[test]
    fn test_toggle_supersedes_inflight_transition() {
        let mut overlay = OverlayState::default();
        overlay.toggle_calendar(); // Opening
        overlay.toggle_calendar(); // superseded → Closing
        assert_eq!(overlay.calendar_phase(), CalendarPhase::Closing);
        overlay.toggle_calendar(); // superseded again → Opening
        assert_eq!(overlay.calendar_phase(), CalendarPhase::Opening);
        overlay.calendar_tick();
        assert_eq!(overlay.calendar_phase(), CalendarPhase::Open);
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut overlay = OverlayState::default();
        overlay.calendar_tick();
        assert_eq!(overlay.calendar_phase(), CalendarPhase::Closed);
        overlay.toggle_calendar();
        overlay.calendar_tick();
        overlay.calendar_tick(); // second tick from a superseded timer
        assert_eq!(overlay.calendar_phase(), CalendarPhase::Open);
    }

    #[test]
    fn test_image_viewer_replaces_without_stacking() {
        let mut overlay = OverlayState::default();
        overlay.show_image("covers/one.png");
        overlay.show_image("covers/two.png");
        assert_eq!(overlay.enlarged_image(), Some("covers/two.png"));
        overlay.close_image();
        assert_eq!(overlay.enlarged_image(), None);
    }
}
