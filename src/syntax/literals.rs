//! Quoted literal handling for option values and virtual symbols.

/// Strip the surrounding quote characters of a raw literal.
///
/// Both `"..."` and `'...'` are accepted; the closing quote must match the
/// opening one. Returns `None` when `raw` is not a quoted literal.
pub fn unquote(raw: &str) -> Option<&str> {
    let quote = raw.chars().next().filter(|&c| matches!(c, '"' | '\''))?;
    raw.strip_prefix(quote)?.strip_suffix(quote)
}

/// Resolve backslash escapes in literal content.
///
/// Recognizes `\\`, `\'`, `\"`, `\0`, `\a`, `\b`, `\f`, `\n`, `\r`, `\t`,
/// `\v` and `\uXXXX`. Unknown escapes and truncated `\u` sequences are kept
/// verbatim.
pub fn unescape(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('0') => out.push('\0'),
            Some('a') => out.push('\u{07}'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\u{0B}'),
            Some('u') => {
                let hex: String = (0..4).map_while(|_| chars.next_if(char::is_ascii_hexdigit)).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => out.push(decoded),
                    _ => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
