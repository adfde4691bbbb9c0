//! Forgiving HTML tokenizer for loading highlight targets.
//!
//! Supported tag-name characters (ASCII only): `[A-Za-z0-9:_-]`.
//! Attribute names use the same ASCII character class.
//!
//! Known limitations:
//! - Not an HTML5 state machine; there is no parse-error recovery beyond skipping bytes.
//! - Rawtext close-tag scanning accepts only ASCII whitespace before `>` (see
//!   `find_rawtext_close_tag`).
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;
use std::sync::Arc;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

// it only attempts matches starting at ASCII <
// < cannot appear in UTF-8 continuation bytes
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let hay_bytes = haystack.as_bytes();
    let len = hay_bytes.len();
    let n = close_tag.len();
    debug_assert!(close_tag.starts_with(b"</"));
    let mut i = 0;
    while i + n <= len {
        let rel = memchr(b'<', &hay_bytes[i..])?;
        i += rel;
        if i + n > len {
            return None;
        }
        if starts_with_ignore_ascii_case_at(hay_bytes, i, close_tag) {
            let mut k = i + n;
            while k < len && hay_bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && hay_bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn lowercase_name(raw: &str) -> Arc<str> {
    Arc::from(raw.to_ascii_lowercase())
}

/// Tokenize `input` into start/end tags, text, comments and doctypes.
///
/// Text and attribute values are entity-decoded; script and style bodies are kept raw.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    // Slice endpoints are only ever cut at ASCII structural bytes, so they stay on
    // UTF-8 char boundaries.
    while i < len {
        if bytes[i] != b'<' {
            let start = i;
            i = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            let decoded = decode_entities(&input[start..i]);
            if !decoded.is_empty() {
                out.push(Token::Text(decoded));
            }
            continue;
        }

        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            match input[body_start..].find(HTML_COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                    i = body_start + end + HTML_COMMENT_END.len();
                    continue;
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    break;
                }
            }
        }

        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let rest = &input[i + 2..];
            let Some(end) = rest.find('>') else {
                break;
            };
            let doctype = rest[..end].trim();
            // Store only the payload after the keyword.
            let payload = doctype
                .get("doctype".len()..)
                .map(str::trim)
                .unwrap_or_default();
            out.push(Token::Doctype(payload.to_string()));
            i += 2 + end + 1;
            continue;
        }

        // end tag
        if i + 1 < len && bytes[i + 1] == b'/' {
            let start = i + 2;
            let mut j = start;
            while j < len && is_name_char(bytes[j]) {
                j += 1;
            }
            let name = &input[start..j];
            while j < len && bytes[j] != b'>' {
                j += 1;
            }
            if j < len {
                j += 1;
            }
            if !name.is_empty() {
                out.push(Token::EndTag(lowercase_name(name)));
            }
            i = j;
            continue;
        }

        // start tag
        let start = i + 1;
        let mut j = start;
        while j < len && is_name_char(bytes[j]) {
            j += 1;
        }
        if j == start {
            // A bare '<' is text.
            out.push(Token::Text("<".to_string()));
            i += 1;
            continue;
        }
        let name = lowercase_name(&input[start..j]);
        let (attributes, mut self_closing, k) = scan_attributes(input, j);
        if is_void_element(&name) {
            self_closing = true;
        }
        let is_rawtext = !self_closing && (&*name == "script" || &*name == "style");
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });

        if is_rawtext {
            let close_tag = if &*name == "script" {
                SCRIPT_CLOSE_TAG
            } else {
                STYLE_CLOSE_TAG
            };
            match find_rawtext_close_tag(&input[k..], close_tag) {
                Some((rel_start, rel_end)) => {
                    let raw = &input[k..k + rel_start];
                    if !raw.is_empty() {
                        out.push(Token::Text(raw.to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i = k + rel_end;
                }
                None => {
                    // Missing close tag: the remainder is rawtext.
                    let raw = &input[k..];
                    if !raw.is_empty() {
                        out.push(Token::Text(raw.to_string()));
                    }
                    out.push(Token::EndTag(name));
                    break;
                }
            }
            continue;
        }
        i = k;
    }
    out
}

type Attributes = Vec<(Arc<str>, Option<String>)>;

/// Scan attributes starting right after a tag name. Returns the attributes, whether the
/// tag was written self-closing, and the byte offset just past the closing `>`.
fn scan_attributes(input: &str, mut k: usize) -> (Attributes, bool, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attributes: Attributes = Vec::new();
    let mut self_closing = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if k + 1 < len && bytes[k + 1] == b'>' {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }
        let name_start = k;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        if name_start == k {
            k += 1;
            continue;
        }
        let attribute_name = lowercase_name(&input[name_start..k]);

        skip_whitespace(&mut k);
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let vstart = k;
                k = memchr(quote, &bytes[k..]).map_or(len, |rel| k + rel);
                let raw = &input[vstart..k];
                if k < len {
                    k += 1;
                }
                Some(decode_entities(raw))
            } else {
                let vstart = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                Some(decode_entities(&input[vstart..k]))
            }
        } else {
            None
        };
        // First occurrence wins, as in HTML.
        if !attributes.iter().any(|(existing, _)| *existing == attribute_name) {
            attributes.push((attribute_name, value));
        }
    }
    (attributes, self_closing, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_tag_name(token: &Token) -> Option<&str> {
        match token {
            Token::StartTag { name, .. } => Some(name),
            _ => None,
        }
    }

    #[test]
    fn tokenize_preserves_utf8_text_nodes() {
        let tokens = tokenize("<p>120×32</p>");
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "120×32")),
            "expected UTF-8 text token, got: {tokens:?}"
        );
    }

    #[test]
    fn tokenize_handles_mixed_case_doctype() {
        let tokens = tokenize("<!DoCtYpE html>");
        assert_eq!(tokens, vec![Token::Doctype("html".to_string())]);
    }

    #[test]
    fn tokenize_lowercases_tag_and_attribute_names() {
        let tokens = tokenize(r#"<DIV Class="Results">x</DIV>"#);
        match &tokens[0] {
            Token::StartTag {
                name, attributes, ..
            } => {
                assert_eq!(&**name, "div");
                assert_eq!(&*attributes[0].0, "class");
                assert_eq!(attributes[0].1.as_deref(), Some("Results"));
            }
            other => panic!("expected start tag, got {other:?}"),
        }
        assert_eq!(tokens[2], Token::EndTag(Arc::from("div")));
    }

    #[test]
    fn tokenize_decodes_entities_in_text_and_attributes() {
        let tokens = tokenize(r#"<a title="x &amp; y">1 &lt; 2</a>"#);
        assert!(matches!(
            &tokens[0],
            Token::StartTag { attributes, .. } if attributes[0].1.as_deref() == Some("x & y")
        ));
        assert_eq!(tokens[1], Token::Text("1 < 2".to_string()));
    }

    #[test]
    fn tokenize_finds_script_end_tag_case_insensitive() {
        let tokens = tokenize("<script>let x = 1 < 2;</ScRiPt>");
        assert_eq!(start_tag_name(&tokens[0]), Some("script"));
        assert_eq!(tokens[1], Token::Text("let x = 1 < 2;".to_string()));
        assert_eq!(tokens[2], Token::EndTag(Arc::from("script")));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn rawtext_close_tag_does_not_accept_near_matches() {
        let tokens = tokenize("<style>ok</stylex >no</style >");
        assert_eq!(tokens[1], Token::Text("ok</stylex >no".to_string()));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn void_elements_are_self_closing() {
        let tokens = tokenize("a<br>b<img src=x.png>");
        assert!(matches!(
            &tokens[1],
            Token::StartTag { self_closing: true, .. }
        ));
        assert!(matches!(
            &tokens[3],
            Token::StartTag { self_closing: true, attributes, .. }
                if attributes[0].1.as_deref() == Some("x.png")
        ));
    }

    #[test]
    fn stray_less_than_is_text() {
        let tokens = tokenize("1 < 2");
        let text: String = tokens
            .iter()
            .map(|t| match t {
                Token::Text(s) => s.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(text, "1 < 2");
    }

    #[test]
    fn unterminated_comment_runs_to_end() {
        let tokens = tokenize("a<!-- open");
        assert_eq!(tokens[1], Token::Comment(" open".to_string()));
    }

    #[test]
    fn duplicate_attributes_keep_first() {
        let tokens = tokenize(r#"<p class="a" class="b">"#);
        assert!(matches!(
            &tokens[0],
            Token::StartTag { attributes, .. }
                if attributes.len() == 1 && attributes[0].1.as_deref() == Some("a")
        ));
    }
}
