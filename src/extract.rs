//! Turns scraped text and attribute values into row fields.
//!
//! Nothing here fails loudly: text that doesn't look the way we expect
//! produces an empty field (`""` or `None`).

use crate::config::TitleRewrite;
use chrono::NaiveDate;
use std::collections::HashMap;

const MONTHS: [&'static str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december"
];

/// Everything before the first newline.
#[inline]
pub fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}

/// `"CS101_Fall2024"` becomes `"CS 101"`.
///
/// Everything after the first `_` is dropped, then a space goes wherever a
/// digit follows a non-digit.
pub fn course_code(raw: &str) -> String {
    let base = raw.trim().split('_').next().unwrap_or("");
    let mut code = String::with_capacity(base.len() + 2);
    let mut prev_digit = None;

    for ch in base.chars() {
        let digit = ch.is_ascii_digit();
        if digit && prev_digit == Some(false) {
            code.push(' ');
        }
        code.push(ch);
        prev_digit = Some(digit);
    }

    code
}

/// Zero-based week of a module, from an `aria-label` like
/// `"Module 3 - Week 4"` (giving `Some(3)`).
pub fn week_number(aria_label: &str) -> Option<i32> {
    let numbers = labelled_numbers(aria_label, &["Module", "Week"]);
    let week: i32 = numbers.get("Week")?.parse().ok()?;

    Some(week - 1)
}

/// Finds every `<label> <digits>` in `text`. When a label occurs more than
/// once the last occurrence wins.
fn labelled_numbers<'a, 'b>(text: &'a str, labels: &[&'b str]) -> HashMap<&'b str, &'a str> {
    let mut numbers = HashMap::new();

    for &label in labels {
        let pattern = format!("{} ", label);
        for (idx, _) in text.match_indices(pattern.as_str()) {
            let rest = &text[idx + pattern.len()..];
            let len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if len > 0 {
                numbers.insert(label, &rest[..len]);
            }
        }
    }

    numbers
}

/// The topic of a module: the second piece of its `aria-label` when split on
/// `" - "` (any whitespace around the dash) or a newline.
pub fn topic(aria_label: &str) -> String {
    label_segments(aria_label).get(1).map(|s| s.to_string()).unwrap_or_default()
}

fn label_segments(label: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = label.char_indices().collect();
    let mut segments = vec![];
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (idx, ch) = chars[i];

        // whitespace, dash, whitespace
        if_chain! {
            if ch.is_whitespace();
            if let Some(&(_, '-')) = chars.get(i + 1);
            if let Some(&(last_idx, last)) = chars.get(i + 2);
            if last.is_whitespace();

        then {
            segments.push(&label[start..idx]);
            start = last_idx + last.len_utf8();
            i += 3;
            continue;
        }}

        if ch == '\n' {
            segments.push(&label[start..idx]);
            start = idx + 1;
        }

        i += 1;
    }

    segments.push(&label[start..]);
    segments
}

/// Best-effort due date from an item's details text.
///
/// Only the first line is looked at. When it has no 4-digit year, `year` is
/// assumed.
pub fn parse_due_date(details: &str, year: i32) -> Option<NaiveDate> {
    let mut raw = first_line(details.trim()).to_string();

    if !has_year(&raw) {
        raw.push_str(&format!(" {}", year));
    }

    parse_loose_date(&raw)
}

/// Whether `text` contains a standalone run of exactly four digits.
fn has_year(text: &str) -> bool {
    let bytes = text.as_bytes();
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }

            let bounded_left = start == 0 || !is_word(bytes[start - 1]);
            let bounded_right = i == bytes.len() || !is_word(bytes[i]);
            if i - start == 4 && bounded_left && bounded_right {
                return true;
            }
        } else {
            i += 1;
        }
    }

    false
}

/// Accepts `YYYY-MM-DD`, `M/D/YYYY`, `M/D` with a 4-digit year elsewhere in
/// the text, or a month name with a day next to it and a 4-digit year
/// somewhere in the text (`"Due: Oct 5 by 11:59pm 2024"`).
fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|t| t.trim_end_matches('.'))
        .filter(|t| !t.is_empty())
        .collect();

    let year: Option<i32> = tokens.iter()
        .find(|t| t.len() == 4 && all_digits(t))
        .and_then(|t| t.parse().ok());

    for token in &tokens {
        if let Some(date) = iso_date(token).or_else(|| numeric_date(token, year)) {
            return Some(date);
        }
    }

    let month_idx = tokens.iter().position(|t| month(t).is_some())?;
    let month = month(tokens[month_idx])?;

    let day = tokens.get(month_idx + 1)
        .and_then(|t| day(t))
        .or_else(|| month_idx.checked_sub(1).and_then(|i| day(tokens[i])))?;

    NaiveDate::from_ymd_opt(year?, month, day)
}

#[inline]
fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYY-MM-DD`, with exactly four year digits.
fn iso_date(token: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = token.split('-').collect();

    match parts.as_slice() {
        [y, m, d] if y.len() == 4 && m.len() <= 2 && d.len() <= 2
                     && parts.iter().all(|p| all_digits(p)) => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
        }
        _ => None
    }
}

/// `M/D/YYYY`, or `M/D` taking `year`. Two-digit years are rejected.
fn numeric_date(token: &str, year: Option<i32>) -> Option<NaiveDate> {
    let parts: Vec<&str> = token.split('/').collect();
    if !parts.iter().all(|p| all_digits(p)) {
        return None;
    }

    match parts.as_slice() {
        [m, d] if m.len() <= 2 && d.len() <= 2 => {
            NaiveDate::from_ymd_opt(year?, m.parse().ok()?, d.parse().ok()?)
        }
        [m, d, y] if m.len() <= 2 && d.len() <= 2 && y.len() == 4 => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
        }
        _ => None
    }
}

/// Month number for a month name or an abbreviation of at least 3 letters.
fn month(token: &str) -> Option<u32> {
    if token.len() < 3 || !token.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let token = token.to_ascii_lowercase();
    MONTHS.iter()
        .position(|m| m.starts_with(token.as_str()))
        .map(|i| i as u32 + 1)
}

/// Day of month, allowing an ordinal suffix (`5`, `5th`, `21st`).
fn day(token: &str) -> Option<u32> {
    let digits = token.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &token[digits.len()..];

    if digits.is_empty() || digits.len() > 2 {
        return None;
    }
    match suffix.to_ascii_lowercase().as_str() {
        "" | "st" | "nd" | "rd" | "th" => {},
        _ => return None
    }

    digits.parse().ok().filter(|d| (1..=31).contains(d))
}

/// First line of the title with each rewrite applied in order.
pub fn format_title(title: &str, rewrites: &[TitleRewrite]) -> String {
    let title = first_line(title.trim()).to_string();

    rewrites.iter().fold(title, |title, rewrite| rewrite.apply(&title))
}

/// Makes a link absolute. Links that already start with `http` are kept.
pub fn resolve_href(path: &str, base_url: &str) -> String {
    let path = path.trim();

    if path.starts_with("http") {
        path.into()
    } else if path.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), path)
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), path)
    }
}

/// Short label for a graded item in the schedule: the text before the first
/// `:`. Videos (`"Watch: ..."`) are left out.
pub fn schedule_item_label(title: &str) -> Option<String> {
    let title = first_line(title.trim());

    if title.contains("Watch:") {
        return None;
    }

    title.split(':').next().map(|s| s.to_string())
}
