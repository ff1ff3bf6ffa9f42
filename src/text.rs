use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovKind {
    Department,
    Barangay,
}

fn gov_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"DEPARTMENT OF |MUNICIPAL |LOCAL ").expect("static regex"))
}

/// Removes the generic office prefixes so "DEPARTMENT OF AGRICULTURE" and
/// "MUNICIPAL TREASURER'S OFFICE" compare by their distinctive part.
pub fn strip_gov_prefixes(name: &str) -> String {
    gov_prefix_regex().replace_all(name, "").into_owned()
}

pub fn format_gov_name(name: &str, kind: GovKind) -> String {
    match kind {
        GovKind::Department => strip_gov_prefixes(name).trim().to_string(),
        GovKind::Barangay => name
            .strip_prefix("BARANGAY ")
            .unwrap_or(name)
            .trim()
            .to_string(),
    }
}

pub fn to_title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '\'' {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Primary comparison key: accents dropped, case folded.
pub fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Tie-breaker key that still tells "n" from "ñ".
pub fn secondary_key(text: &str) -> String {
    text.nfc().flat_map(char::to_lowercase).collect()
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Char positions of the first case-insensitive occurrence of `query` in `text`.
pub fn match_positions(text: &str, query: &str) -> HashSet<usize> {
    let mut out = HashSet::new();
    let q_chars: Vec<char> = query.chars().collect();
    if q_chars.is_empty() {
        return out;
    }
    let text_chars: Vec<char> = text.chars().collect();
    if q_chars.len() > text_chars.len() {
        return out;
    }

    let chars_equal = |a: char, b: char| a == b || a.to_lowercase().eq(b.to_lowercase());

    for start in 0..=text_chars.len() - q_chars.len() {
        if q_chars
            .iter()
            .enumerate()
            .all(|(offset, q)| chars_equal(text_chars[start + offset], *q))
        {
            out.extend(start..start + q_chars.len());
            return out;
        }
    }
    out
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
