//! Genre suggestion presenter.
//!
//! Evaluates each user turn against a decision table (first match wins):
//!
//! 1. favorites exist and this is the turn's first suggestion opportunity →
//!    show the favorites section;
//! 2. the uncertainty threshold is reached or the user explicitly asked for
//!    different genres → show random chips (the heading depends on which);
//! 3. otherwise show nothing and reset the tracker.
//!
//! Random genres come from the suggestion source asynchronously, so the
//! evaluation only *requests* them; the reducer installs them when they
//! arrive. The rendered random list is always deduplicated against the
//! rendered favorites.

use crate::core::detect;
use crate::core::uncertainty::UncertaintyTracker;

/// Chip count for the implicit "maybe try something new" case.
pub const IMPLICIT_RANDOM_COUNT: usize = 3;
/// Chip count when the user explicitly asked for different genres.
pub const EXPLICIT_RANDOM_COUNT: usize = 5;

pub const FAVORITES_HEADING: &str = "Here are some topics you might like:";

/// Why random chips are being shown; selects the section heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomReason {
    /// The user asked for different genres outright.
    Explicit,
    /// Repeated uncertainty crossed the threshold.
    Threshold,
}

impl RandomReason {
    pub fn heading(self) -> &'static str {
        match self {
            RandomReason::Explicit => "Here are some different genres you might like:",
            RandomReason::Threshold => "Or maybe try something new?",
        }
    }
}

/// What the current assistant turn displays. Recomputed per turn, never persisted.
#[derive(Debug, Clone, Default)]
pub struct SuggestionState {
    pub show_favorites: bool,
    pub favorite_genres: Vec<String>,
    pub show_random: bool,
    pub random_genres: Vec<String>,
    pub random_reason: Option<RandomReason>,
}

impl SuggestionState {
    pub fn clear(&mut self) {
        *self = SuggestionState::default();
    }

    pub fn offer_favorites(&mut self, favorites: &[String]) {
        self.show_favorites = true;
        self.favorite_genres = dedup(favorites.iter().cloned(), &[]);
    }

    /// Install fetched random genres, dropping anything already rendered in
    /// the favorites section and any internal duplicates.
    pub fn offer_random(&mut self, genres: Vec<String>, reason: RandomReason) {
        let rendered_favorites = if self.show_favorites {
            self.favorite_genres.as_slice()
        } else {
            &[]
        };
        self.random_genres = dedup(genres.into_iter(), rendered_favorites);
        self.show_random = !self.random_genres.is_empty();
        self.random_reason = self.show_random.then_some(reason);
    }

    pub fn hide_random(&mut self) {
        self.show_random = false;
        self.random_genres.clear();
        self.random_reason = None;
    }
}

fn dedup(genres: impl Iterator<Item = String>, already_shown: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for genre in genres {
        let dup = already_shown
            .iter()
            .chain(out.iter())
            .any(|g| g.eq_ignore_ascii_case(&genre));
        if !dup {
            out.push(genre);
        }
    }
    out
}

/// Outcome of running one user message through the decision table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnDecision {
    pub show_favorites: bool,
    /// `Some` when random chips should be fetched from the suggestion source.
    pub fetch_random: Option<(usize, RandomReason)>,
    /// True when the message starts a new topic and suggestions reset.
    pub topic_changed: bool,
}

/// Evaluate a user message. Mutates the tracker per the table: uncertainty
/// increments it, a topic change resets it, an explicit different-genres
/// request leaves it untouched.
pub fn evaluate_turn(
    message: &str,
    tracker: &mut UncertaintyTracker,
    has_favorites: bool,
) -> TurnDecision {
    if detect::detects_new_genres_request(message) {
        return TurnDecision {
            show_favorites: false,
            fetch_random: Some((EXPLICIT_RANDOM_COUNT, RandomReason::Explicit)),
            topic_changed: false,
        };
    }

    if detect::detects_uncertainty(message) || detect::is_uncertainty_question(message) {
        tracker.increment();
        let fetch_random = tracker
            .should_show_random_suggestions()
            .then_some((IMPLICIT_RANDOM_COUNT, RandomReason::Threshold));
        return TurnDecision {
            show_favorites: has_favorites,
            fetch_random,
            topic_changed: false,
        };
    }

    tracker.reset();
    TurnDecision {
        show_favorites: false,
        fetch_random: None,
        topic_changed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_uncertainty_shows_favorites_only() {
        let mut tracker = UncertaintyTracker::new();
        let decision = evaluate_turn("I'm not sure what I want", &mut tracker, true);
        assert!(decision.show_favorites);
        assert_eq!(decision.fetch_random, None);
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn test_repeated_uncertainty_adds_random() {
        let mut tracker = UncertaintyTracker::new();
        evaluate_turn("no idea", &mut tracker, true);
        let decision = evaluate_turn("still not sure", &mut tracker, true);
        assert!(decision.show_favorites);
        assert_eq!(
            decision.fetch_random,
            Some((IMPLICIT_RANDOM_COUNT, RandomReason::Threshold))
        );
    }

    #[test]
    fn test_explicit_request_hides_favorites_and_skips_tracker() {
        let mut tracker = UncertaintyTracker::new();
        tracker.increment();
        let decision = evaluate_turn("show me different genres", &mut tracker, true);
        assert!(!decision.show_favorites);
        assert_eq!(
            decision.fetch_random,
            Some((EXPLICIT_RANDOM_COUNT, RandomReason::Explicit))
        );
        // Neither incremented nor reset.
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn test_topic_change_resets() {
        let mut tracker = UncertaintyTracker::new();
        tracker.increment();
        tracker.increment();
        let decision = evaluate_turn("dinosaur books please", &mut tracker, true);
        assert!(decision.topic_changed);
        assert!(!decision.show_favorites);
        assert_eq!(decision.fetch_random, None);
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn test_no_favorites_means_no_favorites_section() {
        let mut tracker = UncertaintyTracker::new();
        let decision = evaluate_turn("help me choose", &mut tracker, false);
        assert!(!decision.show_favorites);
    }

    #[test]
    fn test_canned_question_counts_as_uncertainty() {
        let mut tracker = UncertaintyTracker::new();
        let decision = evaluate_turn("What do you recommend?", &mut tracker, true);
        assert!(decision.show_favorites);
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn test_random_deduped_against_rendered_favorites() {
        let mut state = SuggestionState::default();
        state.offer_favorites(&["Fantasy".into(), "Space".into()]);
        state.offer_random(
            vec!["fantasy".into(), "Mystery".into(), "Mystery".into(), "Sports".into()],
            RandomReason::Threshold,
        );
        assert_eq!(state.random_genres, vec!["Mystery".to_string(), "Sports".to_string()]);
        // Nothing rendered in both sections.
        for g in &state.random_genres {
            assert!(!state.favorite_genres.iter().any(|f| f.eq_ignore_ascii_case(g)));
        }
    }

    #[test]
    fn test_all_duplicates_means_nothing_to_show() {
        let mut state = SuggestionState::default();
        state.offer_favorites(&["Fantasy".into()]);
        state.offer_random(vec!["FANTASY".into()], RandomReason::Explicit);
        assert!(!state.show_random);
        assert!(state.random_reason.is_none());
    }

    #[test]
    fn test_headings() {
        assert_eq!(
            RandomReason::Explicit.heading(),
            "Here are some different genres you might like:"
        );
        assert_eq!(RandomReason::Threshold.heading(), "Or maybe try something new?");
    }
}
