//! Read-aloud state for the chat.
//!
//! Tracks which message (by transcript index) is currently being spoken and
//! whether playback is paused. The actual voice synthesis lives in an external
//! collaborator; this state machine decides what it should be doing, and its
//! `stop_all` is the stop-speech callback handed to the modal coordinator on
//! chat close.

#[derive(Debug, Default)]
pub struct SpeechState {
    speaking: Option<usize>,
    paused: bool,
}

impl SpeechState {
    pub fn speaking(&self) -> Option<usize> {
        self.speaking
    }

    pub fn is_speaking(&self, message_index: usize) -> bool {
        self.speaking == Some(message_index)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Begin reading a message aloud, replacing any current readout.
    pub fn start(&mut self, message_index: usize) {
        self.speaking = Some(message_index);
        self.paused = false;
    }

    /// Toggle readout of a message: pause/resume when it is already the one
    /// being spoken, otherwise switch to it from the start.
    pub fn toggle(&mut self, message_index: usize) {
        if self.speaking == Some(message_index) {
            self.paused = !self.paused;
        } else {
            self.start(message_index);
        }
    }

    /// Stop everything. Safe to call when nothing is playing.
    pub fn stop_all(&mut self) {
        self.speaking = None;
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_message_pauses_and_resumes() {
        let mut speech = SpeechState::default();
        speech.toggle(2);
        assert!(speech.is_speaking(2));
        assert!(!speech.is_paused());
        speech.toggle(2);
        assert!(speech.is_paused());
        speech.toggle(2);
        assert!(!speech.is_paused());
    }

    #[test]
    fn test_toggle_other_message_switches() {
        let mut speech = SpeechState::default();
        speech.start(1);
        speech.toggle(1); // paused
        speech.toggle(3);
        assert!(speech.is_speaking(3));
        assert!(!speech.is_paused());
    }

    #[test]
    fn test_stop_all_clears_everything() {
        let mut speech = SpeechState::default();
        speech.start(0);
        speech.toggle(0);
        speech.stop_all();
        assert_eq!(speech.speaking(), None);
        assert!(!speech.is_paused());
        // Idempotent on idle state
        speech.stop_all();
        assert_eq!(speech.speaking(), None);
    }
}
