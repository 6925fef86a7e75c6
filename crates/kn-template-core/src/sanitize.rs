//! Sanitization of string values before substitution.
//!
//! This targets plain-text and Markdown output. It is not an HTML sanitizer:
//! it strips C0 control characters and DEL, the angle brackets `<` and `>`,
//! and every case-insensitive occurrence of `javascript:`. Nothing else is
//! touched.

const SCRIPT_SCHEME: &str = "javascript:";

/// Sanitize a single string value.
///
/// ```
/// use kn_template_core::sanitize::sanitize_value;
///
/// assert_eq!(sanitize_value("<a href=\"JavaScript:x()\">"), "a href=\"x()\"");
/// ```
pub fn sanitize_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if is_stripped_char(c) {
            continue;
        }
        out.push(c);
        if c == ':' {
            strip_trailing_scheme(&mut out);
        }
    }
    out
}

fn is_stripped_char(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}' | '<' | '>')
}

/// Drop `javascript:` (any case) if `out` now ends with it.
///
/// `out` never contains the scheme before the last push, so the only new
/// occurrence is a suffix. Checking after every `:` also catches occurrences
/// spliced together by an earlier removal, in one linear pass. The scheme is
/// ASCII, so truncating its length lands on a char boundary.
fn strip_trailing_scheme(out: &mut String) {
    let scheme = SCRIPT_SCHEME.as_bytes();
    let Some(start) = out.len().checked_sub(scheme.len()) else {
        return;
    };
    if out.as_bytes()[start..].eq_ignore_ascii_case(scheme) {
        out.truncate(start);
    }
}
