//! Best-effort completion of truncated JSON.
//!
//! A streaming model emits syntactically broken JSON at almost every chunk
//! boundary. [`complete_partial_json`] repairs such a prefix just enough to
//! parse: open strings and containers are closed, while fragments that have
//! no meaningful completion (a half-written key, a dangling comma, a lone
//! minus sign) are cut back to the last position that still parses. The
//! repaired text is validated before being returned, so callers either get
//! a well-formed [`Value`] or `None`.

use serde_json::Value;

const LITERALS: [&str; 3] = ["true", "false", "null"];

/// What the scanner expects next, outside of strings and scalar tokens.
#[derive(Clone, Copy)]
enum Slot {
    /// The start of a value, or the closer of the enclosing array.
    Value,
    /// An object key, or the closing brace.
    Key,
    /// The colon following a key.
    Colon,
    /// A comma, the enclosing container's closer, or the end of input.
    AfterValue,
}

/// Completes a truncated JSON document and parses the result.
///
/// Returns `None` when the input holds nothing completable yet (empty or
/// all whitespace) or when the repaired text still fails to parse, which
/// is how malformed non-truncated input surfaces.
pub fn complete_partial_json(input: &str) -> Option<Value> {
    let bytes = input.as_bytes();
    let mut stack: Vec<u8> = Vec::new();
    let mut slot = Slot::Value;
    // Index just past the last point where cutting the input and closing
    // the open containers yields valid JSON.
    let mut good: Option<usize> = None;

    let mut in_string = false;
    let mut string_is_key = false;
    let mut escape = false;
    // Start of a backslash sequence still missing characters, counting the
    // four hex digits of a \u escape.
    let mut escape_start: Option<usize> = None;
    let mut unicode_left: u8 = 0;

    let mut num_start: Option<usize> = None;
    let mut lit_start: Option<usize> = None;

    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];

        if in_string {
            if escape {
                escape = false;
                if c == b'u' {
                    unicode_left = 4;
                } else {
                    escape_start = None;
                }
            } else if unicode_left > 0 {
                unicode_left -= 1;
                if unicode_left == 0 {
                    escape_start = None;
                }
            } else if c == b'\\' {
                escape = true;
                escape_start = Some(i);
            } else if c == b'"' {
                in_string = false;
                if string_is_key {
                    slot = Slot::Colon;
                } else {
                    slot = Slot::AfterValue;
                    good = Some(i + 1);
                }
            }
            i += 1;
            continue;
        }

        if num_start.is_some() {
            if matches!(c, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') {
                i += 1;
                continue;
            }
            num_start = None;
            slot = Slot::AfterValue;
            good = Some(i);
            // Fall through without advancing so the delimiter is handled.
            continue;
        }

        if let Some(start) = lit_start {
            if c.is_ascii_alphabetic() {
                i += 1;
                continue;
            }
            lit_start = None;
            if LITERALS.contains(&&input[start..i]) {
                good = Some(i);
            }
            slot = Slot::AfterValue;
            continue;
        }

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        match slot {
            Slot::Value => match c {
                b'{' => {
                    stack.push(b'}');
                    slot = Slot::Key;
                    good = Some(i + 1);
                }
                b'[' => {
                    stack.push(b']');
                    slot = Slot::Value;
                    good = Some(i + 1);
                }
                b'"' => {
                    in_string = true;
                    string_is_key = false;
                }
                b'0'..=b'9' | b'-' => num_start = Some(i),
                b't' | b'f' | b'n' => lit_start = Some(i),
                b'}' | b']' => {
                    stack.pop();
                    slot = Slot::AfterValue;
                    good = Some(i + 1);
                }
                // Anything else is malformed; the kept text fails the
                // validation below.
                _ => {}
            },
            Slot::Key => match c {
                b'"' => {
                    in_string = true;
                    string_is_key = true;
                }
                b'}' => {
                    stack.pop();
                    slot = Slot::AfterValue;
                    good = Some(i + 1);
                }
                _ => {}
            },
            Slot::Colon => {
                if c == b':' {
                    slot = Slot::Value;
                }
            }
            Slot::AfterValue => match c {
                b',' => {
                    slot = if stack.last() == Some(&b'}') {
                        Slot::Key
                    } else {
                        Slot::Value
                    };
                }
                b'}' | b']' => {
                    stack.pop();
                    good = Some(i + 1);
                }
                _ => {}
            },
        }
        i += 1;
    }

    let (cut, close_quote) = if in_string {
        if string_is_key {
            // A half-written key has no usable completion; drop the member.
            (good?, false)
        } else {
            // Keep the partial string value, minus any dangling escape.
            (escape_start.unwrap_or(input.len()), true)
        }
    } else if let Some(start) = num_start {
        let trimmed = input[start..].trim_end_matches(['.', 'e', 'E', '+', '-']);
        if trimmed.is_empty() {
            (good?, false)
        } else {
            (start + trimmed.len(), false)
        }
    } else if let Some(start) = lit_start {
        let token = &input[start..];
        if LITERALS.contains(&token) {
            (input.len(), false)
        } else if LITERALS.iter().any(|lit| lit.starts_with(token)) {
            (good?, false)
        } else {
            // Not a truncation, just invalid; keep it and let the
            // validation reject it.
            (input.len(), false)
        }
    } else {
        (good?, false)
    };

    let mut repaired = String::with_capacity(cut + stack.len() + 1);
    repaired.push_str(&input[..cut]);
    if close_quote {
        repaired.push('"');
    }
    while let Some(closer) = stack.pop() {
        repaired.push(closer as char);
    }
    serde_json::from_str(&repaired).ok()
}
