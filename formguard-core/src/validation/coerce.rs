//! Text-to-number coercion for raw field values
//!
//! Input elements hand back their value as text. The guard compares that
//! text against numeric bounds the way a browser script does with loose
//! comparison: the text is first converted with the `ToNumber` rules for
//! strings. Blank text becomes `0`, malformed text becomes NaN.

/// Convert field text to a number using `ToNumber` string semantics
///
/// - surrounding whitespace and line terminators are ignored
/// - empty or blank text is `0`
/// - `Infinity` with an optional sign is infinite
/// - `0x`, `0o` and `0b` prefixes select hex, octal and binary (unsigned)
/// - otherwise the text must be a complete decimal literal, or the result is NaN
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(is_js_whitespace);

    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(value) = parse_prefixed_integer(trimmed) {
        return value;
    }

    parse_decimal(trimmed).unwrap_or(f64::NAN)
}

/// Whitespace and line terminators stripped by `ToNumber`
///
/// Differs from [`char::is_whitespace`]: U+FEFF counts, U+0085 does not.
pub const fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Parse `0x`/`0o`/`0b` integers
///
/// Returns `None` when the text has no radix prefix, `Some(NaN)` when it
/// has one but the digits are missing or invalid.
fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }

    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut value = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(digit) => value = value * f64::from(radix) + f64::from(digit),
            None => return Some(f64::NAN),
        }
    }

    Some(value)
}

/// Parse a signed decimal literal or `Infinity`
///
/// The grammar is checked here; the value itself comes from `f64::from_str`,
/// which would otherwise also accept `inf`, `nan` and friends.
fn parse_decimal(s: &str) -> Option<f64> {
    let (negative, body) = match s.as_bytes()[0] {
        b'+' => (false, &s[1..]),
        b'-' => (true, &s[1..]),
        _ => (false, s),
    };

    if body == "Infinity" {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    if !is_decimal_literal(body.as_bytes()) {
        return None;
    }

    s.parse::<f64>().ok()
}

/// `(digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(bytes: &[u8]) -> bool {
    let mut i = 0;

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
