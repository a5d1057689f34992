//! Contact-field inference: best-effort extraction of email, phone, and name
//! from raw resume text.
//!
//! ## Why heuristics, not parsing?
//!
//! Resume layouts are unstructured and the extracted text layer loses most
//! positional cues, so a full contact parser would be both brittle and
//! overkill: the values only pre-fill fields the user can edit. Three cheap,
//! deterministic rules cover the common case — a header line with the
//! candidate's name, an email address, and a phone number somewhere near the
//! top — and anything they miss is simply typed in by hand.
//!
//! Inference is a pure function. The caller decides what to do with the
//! candidates; in particular, [`crate::intake::IntakeState`] applies each one
//! only to a field that is currently empty, so user input always wins.

use once_cell::sync::Lazy;
use regex::Regex;

/// Candidate contact fields derived from document text.
///
/// A `None` field means the corresponding rule found no match; it never means
/// "clear the field".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferredContact {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl InferredContact {
    /// True when no rule matched anything.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap());

// At least 10 characters of digits, spaces, parentheses, and hyphens, with an
// optional leading '+'. Loose on purpose: it has to match "+1 (555) 123-4567",
// "555-123-4567", and bare 10-digit runs alike.
static RE_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\(?[\d\s\-()]{10,}").unwrap());

/// Derive candidate contact fields from extracted document text.
///
/// - **Email**: first substring matching `[\w.-]+@[\w.-]+\.\w+`.
/// - **Phone**: first run of ≥ 10 phone characters, trimmed of surrounding
///   whitespace.
/// - **Full name**: the first two tokens of the text's first non-blank line,
///   but only when that line has at least two single-space-separated tokens
///   and every token is purely alphabetic. "John Smith — Senior Engineer"
///   and "Curriculum Vitae" both yield no candidate.
pub fn infer_contact(text: &str) -> InferredContact {
    InferredContact {
        full_name: infer_full_name(text),
        email: RE_EMAIL.find(text).map(|m| m.as_str().to_string()),
        phone: RE_PHONE
            .find(text)
            .map(|m| m.as_str().trim().to_string()),
    }
}

// Document headings that pass the "two alphabetic tokens" shape test but are
// never a person's name.
const HEADING_WORDS: &[&str] = &["curriculum", "vitae", "resume", "cv"];

fn infer_full_name(text: &str) -> Option<String> {
    let first_line = text.lines().find(|line| !line.trim().is_empty())?.trim();
    let words: Vec<&str> = first_line.split(' ').collect();
    if words.len() < 2 || !words.iter().all(|w| is_alphabetic_word(w)) {
        return None;
    }
    if words
        .iter()
        .any(|w| HEADING_WORDS.contains(&w.to_ascii_lowercase().as_str()))
    {
        return None;
    }
    Some(format!("{} {}", words[0], words[1]))
}

fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}
