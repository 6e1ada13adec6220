//! Free-text field hardening before anything reaches a mail header or
//! body: trim, undo slash-escaping, escape HTML specials, and strip
//! header-injection sequences.
//!
//! HTML escaping skips already-encoded entities, so running a field
//! through [`sanitize_input`] twice yields the same output.

const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#039;"];

/// Sequences that would let a submission smuggle extra mail headers.
const HEADER_INJECTION_TOKENS: [&str; 7] =
    ["\r", "\n", "%0a", "%0d", "Content-Type:", "bcc:", "cc:"];

pub fn sanitize_input(input: &str) -> String {
    let trimmed = input.trim();
    let unescaped = strip_slashes(trimmed);
    let escaped = escape_html(&unescaped);
    strip_header_injection(&escaped)
}

/// Phone numbers pass a charset whitelist first, then the general
/// sanitizer.
pub fn sanitize_phone(input: &str) -> String {
    let whitelisted: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
        .collect();
    sanitize_input(&whitelisted)
}

fn strip_slashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while let Some(c) = input[i..].chars().next() {
        match c {
            '&' => {
                if ENTITIES.iter().any(|entity| input[i..].starts_with(entity)) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
        i += c.len_utf8();
    }
    out
}

fn strip_header_injection(input: &str) -> String {
    HEADER_INJECTION_TOKENS
        .iter()
        .fold(input.to_string(), |acc, token| acc.replace(token, ""))
}
