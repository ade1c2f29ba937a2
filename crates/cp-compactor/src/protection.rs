//! Protection masks: spans of the input that must survive compression verbatim.
//!
//! Region scans (code fences, brace blocks) run over the raw text. Token scans
//! (URLs, paths, identifiers, negations) run over the word list. Domain terms are
//! matched as literal substrings. The result is merged into sorted, disjoint spans.

use crate::lexicon;
use crate::tokenizer::{self, Word};
use regex::Regex;
use std::sync::LazyLock;

const FENCE: &str = "```";

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9+.\-]*://\S+").unwrap());
static RE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.~\-/\\]*/[\w.~\-]*\w\.[A-Za-z0-9]{1,8}$").unwrap());
static RE_CAMEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Ll}\p{Lu}").unwrap());
static RE_SNAKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]_[\p{L}\p{N}]").unwrap());

/// Why a span is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtectionKind {
    CodeBlock,
    Json,
    Url,
    Path,
    Identifier,
    DomainTerm,
    Negation,
}

/// A byte range `[start, end)` of the input that must be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub start: usize,
    pub end: usize,
    pub kind: ProtectionKind,
}

impl ProtectedSpan {
    pub fn new(start: usize, end: usize, kind: ProtectionKind) -> Self {
        Self { start, end, kind }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Detector prepared once per filter: the domain-term list is merged and sorted up front.
#[derive(Debug, Clone)]
pub struct ProtectionDetector {
    domain_terms: Vec<String>,
    masks: bool,
}

impl ProtectionDetector {
    pub fn new<'t, I>(domain_terms: I, enable_masks: bool) -> Self
    where
        I: IntoIterator<Item = &'t String>,
    {
        let mut terms: Vec<String> = lexicon::default_domain_terms()
            .iter()
            .map(|t| t.to_string())
            .chain(domain_terms.into_iter().cloned())
            .filter(|t| !t.trim().is_empty())
            .collect();
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terms.dedup();
        Self { domain_terms: terms, masks: enable_masks }
    }

    pub fn domain_terms(&self) -> &[String] {
        &self.domain_terms
    }

    pub fn masks_enabled(&self) -> bool {
        self.masks
    }

    /// Detect every protected span in `text`. `words` must be `tokenizer::words(text)`.
    pub fn detect(&self, text: &str, words: &[Word<'_>]) -> Vec<ProtectedSpan> {
        let mut spans = Vec::new();

        if self.masks {
            let fences = fenced_regions(text);
            spans.extend(brace_regions(text, &fences));
            spans.extend(fences);
        }

        spans.extend(self.domain_term_spans(text));

        for word in words {
            if let Some(kind) = self.classify_word(word) {
                spans.push(ProtectedSpan::new(word.start, word.end, kind));
            }
        }

        let merged = merge_spans(widen_to_words(spans, words));
        tracing::trace!(spans = merged.len(), masks = self.masks, "protection spans detected");
        merged
    }

    fn domain_term_spans(&self, text: &str) -> Vec<ProtectedSpan> {
        let mut out = Vec::new();
        for term in &self.domain_terms {
            for (pos, m) in text.match_indices(term.as_str()) {
                out.push(ProtectedSpan::new(pos, pos + m.len(), ProtectionKind::DomainTerm));
            }
        }
        out
    }

    fn classify_word(&self, word: &Word<'_>) -> Option<ProtectionKind> {
        let core = word.core();
        if !core.is_empty() && lexicon::is_negation(&core.to_lowercase()) {
            return Some(ProtectionKind::Negation);
        }
        if !self.masks {
            return None;
        }
        if is_url(word.text) {
            return Some(ProtectionKind::Url);
        }
        if is_path(word.text) {
            return Some(ProtectionKind::Path);
        }
        if is_identifier(core) {
            return Some(ProtectionKind::Identifier);
        }
        None
    }
}

pub fn is_url(token: &str) -> bool {
    RE_URL.is_match(token)
}

/// Contains a `/` and ends in something shaped like a file extension.
pub fn is_path(token: &str) -> bool {
    let trimmed = token
        .trim_start_matches(|c: char| matches!(c, '(' | '[' | '"' | '\'' | '<' | '`'))
        .trim_end_matches(|c: char| {
            matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')' | ']' | '"' | '\'' | '>' | '`')
        });
    trimmed.contains('/') && RE_PATH.is_match(trimmed)
}

/// camelCase / PascalCase with an inner case change, or snake_case.
pub fn is_identifier(core: &str) -> bool {
    RE_CAMEL.is_match(core) || RE_SNAKE.is_match(core)
}

/// Triple-backtick fenced regions, delimiters included. An unclosed fence runs to the end.
pub fn fenced_regions(text: &str) -> Vec<ProtectedSpan> {
    let mut regions = Vec::new();
    let mut open: Option<usize> = None;
    let mut cursor = 0;
    while let Some(found) = text[cursor..].find(FENCE) {
        let pos = cursor + found;
        cursor = pos + FENCE.len();
        match open.take() {
            None => open = Some(pos),
            Some(start) => regions.push(ProtectedSpan::new(start, cursor, ProtectionKind::CodeBlock)),
        }
    }
    if let Some(start) = open {
        regions.push(ProtectedSpan::new(start, text.len(), ProtectionKind::CodeBlock));
    }
    regions
}

/// Balanced `{...}` regions outside code fences. Stray braces are ignored.
///
/// Nested pairs are emitted too; `merge_spans` folds them into the outermost block.
pub fn brace_regions(text: &str, fences: &[ProtectedSpan]) -> Vec<ProtectedSpan> {
    let mut regions = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut fence_idx = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        while fence_idx < fences.len() && fences[fence_idx].end <= i {
            fence_idx += 1;
        }
        if let Some(f) = fences.get(fence_idx) {
            if f.start <= i {
                i = f.end;
                continue;
            }
        }
        match bytes[i] {
            b'{' => stack.push(i),
            b'}' => {
                if let Some(start) = stack.pop() {
                    regions.push(ProtectedSpan::new(start, i + 1, ProtectionKind::Json));
                }
            }
            _ => {}
        }
        i += 1;
    }
    regions
}

/// Stretch each span to the bounds of the words it overlaps, so two spans
/// sharing a word always meet in `merge_spans`.
pub fn widen_to_words(mut spans: Vec<ProtectedSpan>, words: &[Word<'_>]) -> Vec<ProtectedSpan> {
    for span in spans.iter_mut().filter(|s| !s.is_empty()) {
        let first = words.partition_point(|w| w.end <= span.start);
        if let Some(w) = words.get(first).filter(|w| w.overlaps(span.start, span.end)) {
            span.start = span.start.min(w.start);
        }
        let last = words.partition_point(|w| w.start < span.end);
        if let Some(w) = last.checked_sub(1).map(|i| &words[i]).filter(|w| w.overlaps(span.start, span.end)) {
            span.end = span.end.max(w.end);
        }
    }
    spans
}

/// Sort spans and fold overlapping or touching ones together. The earliest span's kind wins.
pub fn merge_spans(mut spans: Vec<ProtectedSpan>) -> Vec<ProtectedSpan> {
    spans.retain(|s| !s.is_empty());
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    let mut merged: Vec<ProtectedSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// For each word, the index of the first protected span it overlaps.
///
/// `spans` must be sorted and disjoint, as returned by `ProtectionDetector::detect`.
pub fn assign_spans(words: &[Word<'_>], spans: &[ProtectedSpan]) -> Vec<Option<usize>> {
    let mut out = Vec::with_capacity(words.len());
    let mut j = 0;
    for word in words {
        while j < spans.len() && spans[j].end <= word.start {
            j += 1;
        }
        let hit = spans
            .get(j)
            .filter(|s| word.overlaps(s.start, s.end))
            .map(|_| j);
        out.push(hit);
    }
    out
}

/// Convenience: words of `text` that fall inside any protected span.
pub fn protected_words<'a>(detector: &ProtectionDetector, text: &'a str) -> Vec<&'a str> {
    let words = tokenizer::words(text);
    let spans = detector.detect(text, &words);
    assign_spans(&words, &spans)
        .into_iter()
        .zip(&words)
        .filter_map(|(hit, w)| hit.map(|_| w.text))
        .collect()
}
