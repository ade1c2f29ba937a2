//! Whitespace tokenization into byte spans of the original buffer.

use crate::lexicon;

/// A whitespace-delimited word, borrowed from the text it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    pub text: &'a str,
}

impl<'a> Word<'a> {
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// The word without leading or trailing punctuation.
    pub fn core(&self) -> &'a str {
        trim_punct(self.text)
    }
}

/// Split `text` into words, keeping their byte offsets.
pub fn words(text: &str) -> Vec<Word<'_>> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push(Word { start: s, end: i, text: &text[s..i] });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(Word { start: s, end: text.len(), text: &text[s..] });
    }
    out
}

/// Approximate token count: the number of whitespace-delimited words.
///
/// Used for both input validation and result accounting.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Strip punctuation and symbols from both ends, keeping inner apostrophes and dots.
pub fn trim_punct(word: &str) -> &str {
    word.trim_matches(|c: char| !is_word_char(c))
}

/// Lowercased word core used as the key for stopword lookups and frequency counts.
pub fn normalize(word: &str) -> String {
    trim_punct(word).to_lowercase()
}

/// True when `word` closes a sentence (`.`, `!`, `?`), ignoring known abbreviations.
pub fn ends_sentence(word: &str) -> bool {
    let stripped = word.trim_end_matches(|c: char| matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}'));
    match stripped.chars().last() {
        Some('!') | Some('?') => true,
        Some('.') => !lexicon::is_abbreviation(&stripped.to_lowercase()),
        _ => false,
    }
}

/// True when a word opens a sentence, given the text of the word before it.
pub fn is_sentence_start(previous: Option<&str>) -> bool {
    previous.map_or(true, ends_sentence)
}

pub fn has_leading_uppercase(core: &str) -> bool {
    core.chars().next().is_some_and(char::is_uppercase)
}

/// At least two letters, all of them uppercase (digits allowed: `GPT4`, `HTTP2`).
pub fn is_acronym(core: &str) -> bool {
    let mut letters = 0;
    for c in core.chars() {
        if c.is_alphabetic() {
            if !c.is_uppercase() {
                return false;
            }
            letters += 1;
        }
    }
    letters >= 2
}
