//! Heuristic display sanitiser for server-originated error text.
//!
//! Strips technical jargon before a message reaches the UI. This is a
//! best-effort transform for readability; it must never be relied on to
//! redact secrets. The behaviour is kept bug-for-bug compatible with the
//! legacy client, including the final lowercasing of everything after the
//! leading capital.

use std::sync::OnceLock;

use regex::{Captures, Regex};

static JARGON_RE: OnceLock<Regex> = OnceLock::new();
static NOISE_RE: OnceLock<Regex> = OnceLock::new();
static ISO_DATE_RE: OnceLock<Regex> = OnceLock::new();
static ALL_CAPS_RE: OnceLock<Regex> = OnceLock::new();

fn jargon_regex() -> &'static Regex {
    JARGON_RE.get_or_init(|| {
        Regex::new("(?i)SQL|Database|Server|Internal")
            .unwrap_or_else(|error| panic!("jargon regex failed to compile: {error}"))
    })
}

fn noise_regex() -> &'static Regex {
    NOISE_RE.get_or_init(|| {
        Regex::new("(?i)Exception|Error:")
            .unwrap_or_else(|error| panic!("noise regex failed to compile: {error}"))
    })
}

fn iso_date_regex() -> &'static Regex {
    ISO_DATE_RE.get_or_init(|| {
        Regex::new(r"\b\d{4}-\d{2}-\d{2}\b")
            .unwrap_or_else(|error| panic!("date regex failed to compile: {error}"))
    })
}

fn all_caps_regex() -> &'static Regex {
    ALL_CAPS_RE.get_or_init(|| {
        Regex::new(r"\b[A-Z]{2,}\b")
            .unwrap_or_else(|error| panic!("caps regex failed to compile: {error}"))
    })
}

/// Rewrite raw error text into something safe to show a user.
///
/// Applies, in order: jargon substitution (SQL/Database/Server/Internal →
/// "System"), removal of "Exception" and "Error:" tokens, removal of
/// ISO-date substrings, folding of ALL-CAPS tokens, a trim, then
/// capitalisation of the first character with the remainder lowercased and
/// a guaranteed trailing period.
///
/// # Examples
/// ```
/// use forecourt::domain::sanitize_message;
///
/// assert_eq!(
///     sanitize_message("Database connection FAILED"),
///     "System connection failed."
/// );
/// ```
pub fn sanitize_message(raw: &str) -> String {
    let substituted = jargon_regex().replace_all(raw, "System");
    let denoised = noise_regex().replace_all(&substituted, "");
    let dateless = iso_date_regex().replace_all(&denoised, "");
    let folded = all_caps_regex().replace_all(&dateless, |caps: &Captures<'_>| {
        caps.get(0).map_or_else(String::new, |m| fold_token(m.as_str()))
    });

    let trimmed = folded.trim();
    let mut chars = trimmed.chars();
    let formatted = match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    };

    if formatted.ends_with('.') {
        formatted
    } else {
        let mut out = formatted;
        out.push('.');
        out
    }
}

fn fold_token(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.push(first);
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}
