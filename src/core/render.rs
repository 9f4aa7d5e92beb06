//! Bot message markup → typed display nodes.
//!
//! The recommendation bot formats replies with a two-token markup language:
//! literal `<br>` sequences for line breaks and paired `**…**` spans for
//! emphasis. [`parse_markup`] lexes that into [`MessageNode`]s so any frontend
//! can render a reply without knowing the markup. It is a pure function with
//! no rendering dependencies.
//!
//! [`genre_mentions`] additionally finds known genre names inside plain text
//! so the UI can highlight them.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// One displayable unit of a bot message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageNode {
    LineBreak,
    Emphasis(String),
    Plain(String),
}

/// Alternating token pattern: a non-greedy emphasis span or a line break.
/// `.` does not cross newlines, so an emphasis pair never spans lines.
static MARKUP_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*|\n").expect("markup pattern is valid"));

/// Lex a bot message into display nodes.
///
/// Unmatched `**` stays literal plain text; empty tokens render as nothing
/// and are omitted. Same input always yields the same sequence.
pub fn parse_markup(input: &str) -> Vec<MessageNode> {
    let text = input.replace("<br>", "\n");

    let mut nodes = Vec::new();
    let mut cursor = 0;
    for token in MARKUP_TOKEN.find_iter(&text) {
        push_plain(&mut nodes, &text[cursor..token.start()]);
        nodes.push(classify(token.as_str()));
        cursor = token.end();
    }
    push_plain(&mut nodes, &text[cursor..]);
    nodes
}

fn push_plain(nodes: &mut Vec<MessageNode>, text: &str) {
    if !text.is_empty() {
        nodes.push(MessageNode::Plain(text.to_string()));
    }
}

fn classify(token: &str) -> MessageNode {
    if token == "\n" {
        MessageNode::LineBreak
    } else if token.starts_with("**") && token.ends_with("**") && token.len() >= 4 {
        MessageNode::Emphasis(token[2..token.len() - 2].to_string())
    } else {
        MessageNode::Plain(token.to_string())
    }
}

/// A whole-word occurrence of a known genre name inside a text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreMention {
    /// Byte range of the occurrence in the input text.
    pub range: Range<usize>,
    /// Canonical genre name as listed (the text itself may differ in case).
    pub genre: String,
}

/// Find whole-word, case-insensitive occurrences of known genres in `text`.
///
/// Mentions are ordered by position and never overlap; where two genre names
/// would match at the same position, the earlier match wins.
pub fn genre_mentions(text: &str, genres: &[String]) -> Vec<GenreMention> {
    if genres.is_empty() {
        return Vec::new();
    }

    let alternation = genres
        .iter()
        .map(|g| regex::escape(g))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = match RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    pattern
        .find_iter(text)
        .filter_map(|m| {
            let canonical = genres
                .iter()
                .find(|g| g.eq_ignore_ascii_case(m.as_str()))?;
            Some(GenreMention {
                range: m.range(),
                genre: canonical.clone(),
            })
        })
        .collect()
}
