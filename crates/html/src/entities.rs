use memchr::memchr;

/// Named references the loader understands. Everything else passes through verbatim.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("hellip", '\u{2026}'),
    ("mdash", '\u{2014}'),
    ("ndash", '\u{2013}'),
];

const MAX_NAME_LEN: usize = 6;
const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode a small, explicitly limited subset of HTML character references.
///
/// Contract:
/// - Named references from `NAMED_ENTITIES`, semicolon-terminated.
/// - Numeric references only when well-formed and semicolon-terminated: `&#123;` and
///   `&#x1F4A9;`. Only valid Unicode scalar values decode.
/// - Anything else (unknown names, missing semicolons, overlong digit runs) is copied
///   through unchanged, so decoding is idempotent on its own output for those inputs.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return s.to_string();
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;
    while i < bytes.len() {
        if bytes[i] != b'&' {
            let next = memchr(b'&', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
            out.push_str(&s[i..next]);
            i = next;
            continue;
        }
        match decode_reference(s, i) {
            Some((ch, consumed)) => {
                out.push(ch);
                i += consumed;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
    }
    out
}

/// Decode the reference starting at the `&` at `start`; returns the char and the byte
/// length consumed (including `&` and `;`).
fn decode_reference(s: &str, start: usize) -> Option<(char, usize)> {
    let rest = &s.as_bytes()[start + 1..];
    if let Some(numeric) = rest.strip_prefix(b"#") {
        let (digits, radix, prefix_len, max_digits) = match numeric.first() {
            Some(b'x' | b'X') => (&numeric[1..], 16, 3, MAX_HEX_DIGITS),
            _ => (numeric, 10, 2, MAX_DEC_DIGITS),
        };
        let end = scan_digits(digits, radix, max_digits)?;
        let text = std::str::from_utf8(&digits[..end]).ok()?;
        let ch = u32::from_str_radix(text, radix).ok().and_then(char::from_u32)?;
        return Some((ch, prefix_len + end + 1));
    }

    let semi = memchr(b';', &rest[..rest.len().min(MAX_NAME_LEN + 1)])?;
    let name = &rest[..semi];
    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| entity.as_bytes() == name)
        .map(|(_, ch)| (*ch, semi + 2))
}

/// Index of the terminating `;` after a non-empty, bounded run of digits.
fn scan_digits(bytes: &[u8], radix: u32, max_digits: usize) -> Option<usize> {
    let end = bytes
        .iter()
        .take(max_digits + 1)
        .position(|b| !(*b as char).is_digit(radix))?;
    (end > 0 && end <= max_digits && bytes[end] == b';').then_some(end)
}
