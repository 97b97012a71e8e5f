//! Client-side form validation. Pure and synchronous.

use crate::error::ValidationError;
use crate::types::{FormField, RegistrationForm};
use regex::Regex;
use std::sync::LazyLock;

/// Validate a form snapshot.
///
/// Checks run in order: required fields, email shape, numeric fields.
pub fn validate(form: &RegistrationForm) -> Result<(), ValidationError> {
    if let Some(field) = FormField::ALL
        .into_iter()
        .find(|f| f.is_required() && form.get(*f).is_empty())
    {
        return Err(ValidationError::MissingRequiredField(field));
    }

    if !is_valid_email(&form.email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    if !form.experience_years.is_empty() && !is_numeric(&form.experience_years) {
        return Err(ValidationError::InvalidNumericField(
            FormField::ExperienceYears,
        ));
    }

    Ok(())
}

/// Whitespace as browsers define it for `\s` and `String.prototype.trim`.
///
/// Unlike Rust's `char::is_whitespace` this includes U+FEFF and excludes
/// U+0085.
const WHITESPACE: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    let part = format!("[^{}@]+", WHITESPACE);
    Regex::new(&format!("^{part}@{part}\\.{part}$")).expect("email pattern is valid")
});

fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' ' | '\u{A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Numeric in the sense of a browser's `Number(value)` not being `NaN`.
///
/// Blank input counts as zero. Accepts decimal and exponent forms,
/// unsigned `0x`/`0o`/`0b` integers and signed `Infinity`.
fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim_matches(is_whitespace);
    if trimmed.is_empty() {
        return true;
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let digits = trimmed
            .get(..2)
            .filter(|p| p.eq_ignore_ascii_case(prefix))
            .map(|_| &trimmed[2..]);
        if let Some(digits) = digits {
            return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
        }
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return true;
    }

    // f64's parser also takes "inf" and "nan", which browsers reject.
    unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && trimmed.parse::<f64>().is_ok()
}
