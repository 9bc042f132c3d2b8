//! Host-style numeric coercion

/// Coerce a record value to an integer the way the host does.
///
/// Leading whitespace is skipped, an optional sign and the leading run of
/// digits are read, and anything else ends the number. A single underscore
/// between two digits is skipped. Values with no
/// leading digits, and missing values, are 0.
pub fn to_integer(value: Option<&str>) -> i64 {
    let Some(text) = value else {
        return 0;
    };
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return 0;
    }

    let bytes = digits.as_bytes();
    let mut magnitude = 0i64;
    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'0'..=b'9' => {
                magnitude = magnitude
                    .saturating_mul(10)
                    .saturating_add(i64::from(byte - b'0'));
            }
            // a single underscore between digits is a separator
            b'_' if bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => {}
            _ => break,
        }
    }

    if negative {
        -magnitude
    } else {
        magnitude
    }
}
