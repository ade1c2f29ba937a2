//! Budgeted selection of words and reconstruction of the output text.

use crate::scorer::Importance;
use crate::tokenizer::Word;

/// Number of words the ratio asks for: `round(total * ratio)`, at least one when `total > 0`.
pub fn target_count(total: usize, ratio: f64) -> usize {
    if total == 0 {
        return 0;
    }
    let ratio = if ratio.is_nan() { 1.0 } else { ratio.clamp(0.0, 1.0) };
    ((total as f64 * ratio).round() as usize).clamp(1, total)
}

/// Keep mask over `importances`.
///
/// Every `Protected` word is kept, even past the budget. The remaining
/// `target - protected` slots go to the highest scores, earlier words first on ties.
pub fn select(importances: &[Importance], ratio: f64) -> Vec<bool> {
    let total = importances.len();
    let mut keep: Vec<bool> = importances.iter().map(Importance::is_protected).collect();
    let protected = keep.iter().filter(|k| **k).count();
    let budget = target_count(total, ratio).saturating_sub(protected);
    if budget == 0 {
        return keep;
    }

    let mut ranked: Vec<usize> = (0..total).filter(|&i| !keep[i]).collect();
    ranked.sort_by(|&a, &b| importances[b].rank_cmp(&importances[a]).then(a.cmp(&b)));

    for &i in ranked.iter().take(budget) {
        keep[i] = true;
    }
    keep
}

/// Rebuild the text from kept words in original order.
///
/// Consecutive kept words that belong to the same protected span are emitted as
/// one verbatim slice of `text`, so code blocks and JSON keep their layout.
/// Every other unit is separated by a single space.
pub fn reconstruct(text: &str, words: &[Word<'_>], span_of: &[Option<usize>], keep: &[bool]) -> String {
    let mut units: Vec<(usize, usize)> = Vec::new();
    let mut last: Option<(usize, Option<usize>)> = None;

    for (i, word) in words.iter().enumerate() {
        if !keep[i] {
            continue;
        }
        let span = span_of[i];
        let joins = matches!(last, Some((prev, prev_span)) if prev + 1 == i && span.is_some() && prev_span == span);
        match units.last_mut() {
            Some(unit) if joins => unit.1 = word.end,
            _ => units.push((word.start, word.end)),
        }
        last = Some((i, span));
    }

    let capacity = units.iter().map(|(s, e)| e - s + 1).sum();
    let mut out = String::with_capacity(capacity);
    for (n, (start, end)) in units.into_iter().enumerate() {
        if n > 0 {
            out.push(' ');
        }
        out.push_str(&text[start..end]);
    }
    out
}
