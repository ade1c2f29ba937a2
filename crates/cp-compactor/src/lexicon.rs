//! Static word tables shared by the scorer, the protection detector and the quality metrics.
//!
//! Every table is built once on first use and never mutated afterwards.

use std::collections::HashSet;
use std::sync::LazyLock;

const STOPWORD_LIST: &[&str] = &[
    // English
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "may",
    "me", "might", "more", "most", "must", "my", "myself", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "same", "shall", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
    // Spanish
    "el", "la", "los", "las", "un", "una", "unos", "unas", "y", "o", "pero", "en", "de", "del",
    "al", "para", "por", "con", "sobre", "entre", "es", "son", "está", "están", "que", "como",
    "este", "esta", "ese", "esa", "su", "sus",
    // Portuguese
    "os", "as", "um", "uma", "e", "ou", "mas", "em", "do", "da", "dos", "das", "no", "na", "nos",
    "nas", "ao", "à", "com", "é", "são", "está", "estão", "seu", "sua",
    // French
    "le", "les", "une", "des", "et", "dans", "du", "au", "aux", "pour", "par", "avec", "sur",
    "est", "sont", "ce", "cette", "ces", "qui", "leur",
    // German
    "der", "das", "den", "dem", "ein", "eine", "einer", "eines", "einem", "einen", "und", "oder",
    "aber", "im", "auf", "für", "von", "zu", "mit", "bei", "ist", "sind",
    // Italian
    "il", "lo", "gli", "di", "della", "dei", "alla", "per", "è", "sono", "che",
];

const NEGATION_LIST: &[&str] = &[
    "not", "no", "nor", "never", "none", "nobody", "nothing", "neither", "nowhere", "without",
    "cannot", "can't", "won't", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't",
    "weren't", "hasn't", "haven't", "hadn't", "shouldn't", "wouldn't", "couldn't", "mustn't",
    "mightn't", "needn't", "shan't", "ain't",
    // Spanish / Portuguese / French / German / Italian
    "nunca", "jamás", "nada", "nadie", "não", "nem", "ne", "pas", "jamais", "rien", "nicht",
    "kein", "keine", "nie", "non", "mai",
];

const DEFAULT_DOMAIN_TERM_LIST: &[&str] = &["Vectorizer", "Synap", "UMICP", "HiveLLM"];

/// Lowercased tokens ending in a period that do not close a sentence.
const ABBREVIATION_LIST: &[&str] = &[
    "dr.", "mr.", "mrs.", "ms.", "prof.", "sr.", "jr.", "st.", "vs.", "etc.", "e.g.", "i.e.",
    "fig.", "eq.", "no.", "vol.", "approx.", "inc.", "ltd.",
];

pub static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORD_LIST.iter().copied().filter(|w| !NEGATION_LIST.contains(w)).collect());

pub static NEGATIONS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEGATION_LIST.iter().copied().collect());

pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ABBREVIATION_LIST.iter().copied().collect());

/// Built-in domain terms protected in addition to any configured ones.
pub fn default_domain_terms() -> &'static [&'static str] {
    DEFAULT_DOMAIN_TERM_LIST
}

/// `lower` must already be lowercased and stripped of surrounding punctuation.
pub fn is_stopword(lower: &str) -> bool {
    STOPWORDS.contains(lower)
}

/// Accepts a lowercased word core; typographic apostrophes are folded to `'`.
pub fn is_negation(lower: &str) -> bool {
    if lower.contains('\u{2019}') {
        let folded = lower.replace('\u{2019}', "'");
        return NEGATIONS.contains(folded.as_str()) || folded.ends_with("n't");
    }
    NEGATIONS.contains(lower) || lower.ends_with("n't")
}

pub fn is_abbreviation(lower: &str) -> bool {
    ABBREVIATIONS.contains(lower)
}
