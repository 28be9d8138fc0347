//! URL checks for submitted reel links.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubmitError;
use crate::model::Submission;

// Anchored at the start only: anything after a valid token (query, fragment) is accepted.
static REEL_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?instagram\.com/reel/[A-Za-z0-9_-]+/?")
        .expect("Failed to compile reel URL regex")
});

static POST_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?instagram\.com/p/[A-Za-z0-9_-]+/?")
        .expect("Failed to compile post URL regex")
});

/// True if `input` has the shape of an Instagram reel or post URL.
pub fn is_valid_url(input: &str) -> bool {
    [&*REEL_URL_REGEX, &*POST_URL_REGEX]
        .iter()
        .any(|re| re.is_match(input))
}

/// Trims the raw field value and classifies it.
pub fn validate(raw: &str) -> Result<Submission, SubmitError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(SubmitError::EmptyInput);
    }
    if !is_valid_url(url) {
        return Err(SubmitError::InvalidFormat);
    }
    Ok(Submission {
        url: url.to_string(),
    })
}
