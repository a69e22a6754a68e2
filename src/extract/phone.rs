//! US phone number extraction
//!
//! # Grammar
//!
//! ```text
//! phone    = [ prefix ] area sep exchange sep line
//! prefix   = [ "+" ] "1" sep
//! area     = "(" 3DIGIT ")" / 3DIGIT       ; first digit 2-9
//! exchange = 3DIGIT
//! line     = 4DIGIT
//! sep      = 0*3( SP / HTAB / "." / "-" )
//! ```
//!
//! A match must not touch another digit or word character on either side,
//! must not continue a `+CC` foreign country code, and must contain at least
//! one separator character (space, `.`, `-`, parentheses or `+`) so that bare
//! ten-digit identifiers are left alone. Every accepted number is rendered
//! as `+1-AAA-EEE-LLLL`. A rejected candidate does not hide a valid number
//! starting inside it: scanning resumes one character after its start.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?P<prefix>\+?1[\ \t.\-]{0,3})?
        (?:\((?P<area_paren>\d{3})\)|(?P<area>\d{3}))
        [\ \t.\-]{0,3}
        (?P<exchange>\d{3})
        [\ \t.\-]{0,3}
        (?P<line>\d{4})
        ",
    )
    .expect("valid phone pattern")
});

/// Characters that mark a candidate as a formatted phone number
const SEPARATORS: &[char] = &[' ', '\t', '.', '-', '(', ')', '+'];

/// Finds every US phone number in text, in canonical form, first occurrence order
pub fn find_phones(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut phones = Vec::new();
    let mut start = 0;

    while let Some(caps) = PHONE_RE.captures_at(text, start) {
        let Some(whole) = caps.get(0) else {
            break;
        };

        match accept(text, &caps) {
            Some(phone) => {
                if seen.insert(phone.clone()) {
                    phones.push(phone);
                }
                start = whole.end();
            }
            None => {
                let width = text[whole.start()..].chars().next().map_or(1, char::len_utf8);
                start = whole.start() + width;
            }
        }
    }

    phones
}

/// Normalizes a single phone number to `+1-AAA-EEE-LLLL`
///
/// Returns `None` if the input is not exactly one valid US number.
pub fn normalize_phone(input: &str) -> Option<String> {
    let input = input.trim();
    let caps = PHONE_RE.captures(input)?;
    let whole = caps.get(0)?;
    if whole.start() != 0 || whole.end() != input.len() {
        return None;
    }
    accept(input, &caps)
}

fn accept(text: &str, caps: &Captures<'_>) -> Option<String> {
    let whole = caps.get(0)?;
    let area = caps.name("area").or_else(|| caps.name("area_paren"))?.as_str();
    let exchange = caps.name("exchange")?.as_str();
    let line = caps.name("line")?.as_str();

    if area.starts_with('0') || area.starts_with('1') {
        return None;
    }

    if !whole.as_str().contains(SEPARATORS) {
        return None;
    }

    let before = &text[..whole.start()];
    let after = &text[whole.end()..];

    if before.chars().next_back().map_or(false, is_word_char) {
        return None;
    }
    if after.chars().next().map_or(false, is_word_char) {
        return None;
    }
    if caps.name("prefix").is_none() && continues_country_code(before) {
        return None;
    }

    Some(format!("+1-{}-{}-{}", area, exchange, line))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `before` ends with `+<1-3 digits>` and at most one separator
fn continues_country_code(before: &str) -> bool {
    let trimmed = before
        .strip_suffix(|c: char| c == ' ' || c == '.' || c == '-')
        .unwrap_or(before);
    let digits = trimmed.len() - trimmed.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 && trimmed.len() == before.len() {
        return before.ends_with('+');
    }
    (1..=3).contains(&digits) && trimmed[..trimmed.len() - digits].ends_with('+')
}
