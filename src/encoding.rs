//! Percent-escaping utilities shared by part name and pack URI handling
//!
//! Part names must arrive in canonical escaped form: escapes that denote
//! unreserved characters are not allowed, escapes for reserved characters
//! must stay escaped, and characters illegal in a URI path must be escaped.
//! [`canonical_escape`] re-derives that unique form so callers can compare
//! it against the original input.

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Unreserved characters per RFC 3986 §2.3; escaping these is never canonical.
pub(crate) fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

// Characters that may appear literally in a path component. Reserved and
// structural delimiters pass through unchanged so that their escaped and
// unescaped forms stay distinguishable.
fn is_path_literal(b: u8) -> bool {
    is_unreserved(b)
        || matches!(
            b,
            b'/' | b'?'
                | b'#'
                | b'['
                | b']'
                | b'@'
                | b':'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
        )
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn push_escaped(out: &mut String, b: u8) {
    out.push('%');
    out.push(HEX_UPPER[(b >> 4) as usize] as char);
    out.push(HEX_UPPER[(b & 0x0f) as usize] as char);
}

/// Re-derive the canonical escaped form of a URI path string.
///
/// Safe-unescapes percent-triplets that denote unreserved characters, keeps
/// reserved escapes intact (re-emitted with upper-case hex), and escapes
/// every byte that cannot appear literally in a path, including all
/// non-ASCII bytes. A malformed escape (`%` not followed by two hex digits)
/// has its `%` escaped, which guarantees the result differs from the input.
pub(crate) fn canonical_escape(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                let decoded = (hi << 4) | lo;
                if is_unreserved(decoded) {
                    out.push(decoded as char);
                } else {
                    push_escaped(&mut out, decoded);
                }
                i += 3;
                continue;
            }
            push_escaped(&mut out, b'%');
            i += 1;
            continue;
        }
        if b.is_ascii() && is_path_literal(b) {
            out.push(b as char);
        } else {
            push_escaped(&mut out, b);
        }
        i += 1;
    }
    out
}

/// Collapse `.` and `..` segments per RFC 3986 §5.2.4.
///
/// This is what resolving the path against any fixed base and re-extracting
/// it would produce, without needing an actual base.
pub(crate) fn remove_dot_segments(path: &str) -> String {
    let mut output = String::with_capacity(path.len());
    let mut input: &str = path;
    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            output.truncate(output.rfind('/').unwrap_or(0));
        } else if input == "/.." {
            input = "/";
            output.truncate(output.rfind('/').unwrap_or(0));
        } else if input == "." || input == ".." {
            input = "";
        } else {
            // Move the first segment, with its leading slash if any, to output.
            let start = usize::from(input.starts_with('/'));
            let end = match input[start..].find('/') {
                Some(pos) => start + pos,
                None => input.len(),
            };
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_escape_passes_through_plain_paths() {
        assert_eq!(canonical_escape("/word/document.xml"), "/word/document.xml");
        assert_eq!(canonical_escape("/a,b;c=d"), "/a,b;c=d");
    }

    #[test]
    fn test_canonical_escape_unescapes_unreserved() {
        // %41 = 'A', %7E = '~': both unreserved, so escaping them is not canonical
        assert_eq!(canonical_escape("/doc%41.xml"), "/docA.xml");
        assert_eq!(canonical_escape("/%7Ehome"), "/~home");
    }

    #[test]
    fn test_canonical_escape_keeps_reserved_escapes() {
        assert_eq!(canonical_escape("/a%2Fb"), "/a%2Fb");
        assert_eq!(canonical_escape("/a%20b"), "/a%20b");
    }

    #[test]
    fn test_canonical_escape_uppercases_escape_hex() {
        assert_eq!(canonical_escape("/a%2fb"), "/a%2Fb");
    }

    #[test]
    fn test_canonical_escape_escapes_illegal_characters() {
        assert_eq!(canonical_escape("/a b"), "/a%20b");
        assert_eq!(canonical_escape("/a\"b"), "/a%22b");
        // Non-ASCII is escaped byte-by-byte as UTF-8
        assert_eq!(canonical_escape("/Æ"), "/%C3%86");
    }

    #[test]
    fn test_canonical_escape_handles_malformed_escape() {
        assert_eq!(canonical_escape("/a%2"), "/a%252");
        assert_eq!(canonical_escape("/a%zz"), "/a%25zz");
    }

    #[test]
    fn test_canonical_escape_keeps_delimiters_literal() {
        // '#' and '?' stay literal so later grammar checks can see them
        assert_eq!(canonical_escape("/a#b"), "/a#b");
        assert_eq!(canonical_escape("/a?b"), "/a?b");
    }

    #[test]
    fn test_remove_dot_segments() {
        assert_eq!(remove_dot_segments("/a/b/c"), "/a/b/c");
        assert_eq!(remove_dot_segments("/a/../b"), "/b");
        assert_eq!(remove_dot_segments("/a/./b"), "/a/b");
        assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
        assert_eq!(remove_dot_segments("/.."), "/");
        assert_eq!(remove_dot_segments("/."), "/");
        assert_eq!(remove_dot_segments("/a/../../b"), "/b");
    }

    #[test]
    fn test_remove_dot_segments_preserves_empty_segments() {
        assert_eq!(remove_dot_segments("/a//b"), "/a//b");
    }
}
