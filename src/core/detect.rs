//! Phrase-based intent detectors for the conversation.
//!
//! All detectors are case-insensitive substring matches over fixed phrase
//! lists. They are deliberately simple: the recommendation bot does the real
//! language work, these only decide when to offer genre chips.

/// Phrases indicating the user is unsure what to look for.
const UNCERTAINTY_PHRASES: &[&str] = &[
    "not sure",
    "don't know",
    "idk",
    "no idea",
    "help me choose",
    "what should i",
    "what can i",
    "what do you have",
    "suggestions",
    "recommend",
    "not certain",
    "confused",
    "undecided",
    "options",
    "alternatives",
    "choices",
];

/// Phrases for when the user specifically wants to see different genres.
const NEW_GENRES_REQUEST_PHRASES: &[&str] = &[
    "recommend other genres",
    "recommend different genres",
    "show me other genres",
    "show different genres",
    "other genres",
    "different genres",
    "more genres",
    "show me more genres",
    "something else",
    "anything else",
    "not these",
    "other options",
    "different options",
    "other topics",
    "different topics",
];

/// Phrases in bot replies that suggest the user could use recommendations.
const SUGGESTIVE_BOT_PHRASES: &[&str] = &[
    "not sure",
    "help you decide",
    "suggest",
    "recommendation",
    "maybe you would like",
    "what are you interested in",
    "choose from",
    "help you choose",
    "not certain",
    "need ideas",
    "would you like to see",
    "can help you find",
    "let me know what you",
    "happy to recommend",
    "are you looking for",
];

/// Predefined quick questions that count as uncertainty expressions.
const UNCERTAINTY_QUESTIONS: &[&str] = &[
    "I'm not sure what to look for",
    "Help me find something",
    "What do you recommend?",
    "I don't know what to read",
];

fn contains_any(message: &str, phrases: &[&str]) -> bool {
    let lowered = message.to_lowercase();
    phrases.iter().any(|phrase| lowered.contains(phrase))
}

/// Does this user message indicate uncertainty about what to look for?
pub fn detects_uncertainty(message: &str) -> bool {
    contains_any(message, UNCERTAINTY_PHRASES)
}

/// Is the user specifically asking for different/new genres?
pub fn detects_new_genres_request(message: &str) -> bool {
    contains_any(message, NEW_GENRES_REQUEST_PHRASES)
}

/// Does this bot reply suggest the user might want recommendations?
pub fn detects_bot_suggestion(message: &str) -> bool {
    contains_any(message, SUGGESTIVE_BOT_PHRASES)
}

/// Is this one of the predefined quick questions that expresses uncertainty?
/// Exact match, unlike the substring detectors.
pub fn is_uncertainty_question(question: &str) -> bool {
    UNCERTAINTY_QUESTIONS.contains(&question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncertainty_is_case_insensitive() {
        assert!(detects_uncertainty("I'm NOT SURE what I want"));
        assert!(detects_uncertainty("idk"));
        assert!(!detects_uncertainty("I want dinosaur books"));
    }

    #[test]
    fn test_new_genres_request() {
        assert!(detects_new_genres_request("can you show me other genres?"));
        assert!(detects_new_genres_request("Something else please"));
        assert!(!detects_new_genres_request("more dinosaurs please"));
    }

    #[test]
    fn test_uncertainty_and_new_genres_overlap() {
        // "suggestions" marks uncertainty but not a different-genres request;
        // the reducer checks the explicit request first.
        let msg = "any suggestions?";
        assert!(detects_uncertainty(msg));
        assert!(!detects_new_genres_request(msg));
    }

    #[test]
    fn test_bot_suggestion() {
        assert!(detects_bot_suggestion(
            "I can help you choose a book. What are you interested in?"
        ));
        assert!(!detects_bot_suggestion("Here is Charlotte's Web."));
    }

    #[test]
    fn test_uncertainty_question_exact_match() {
        assert!(is_uncertainty_question("What do you recommend?"));
        assert!(!is_uncertainty_question("what do you recommend?"));
        assert!(!is_uncertainty_question("What do you recommend"));
    }
}
