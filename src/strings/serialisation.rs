/// Written at the top of every generated table, followed by a blank line.
pub const GENERATED_HEADER: &str = "/* Generated from Localizable.xcstrings */";

/// Escapes a value for use between double quotes in a `.strings` file.
///
/// Backslashes are escaped first so the ones added for quotes and newlines are left alone.
pub fn escape_string_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Inverse of [`escape_string_value`]. Unknown escape sequences are kept as written.
pub fn unescape_string_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

pub(crate) fn format_line(key: &str, value: &str) -> String {
    format!(
        "\"{}\" = \"{}\";",
        escape_string_value(key),
        escape_string_value(value)
    )
}

/// Splits a leading quoted string off `s`, returning its raw (still escaped) contents and
/// whatever follows the closing quote.
fn take_quoted(s: &str) -> Option<(&str, &str)> {
    let body = s.strip_prefix('"')?;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some((&body[..i], &body[i + 1..])),
            _ => (),
        }
    }

    None
}

/// Parses a single `"key" = "value";` line.
pub(crate) fn parse_line(line: &str) -> Option<(String, String)> {
    let (key, rest) = take_quoted(line.trim())?;
    let rest = rest.trim_start().strip_prefix('=')?;
    let (value, rest) = take_quoted(rest.trim_start())?;

    if rest.trim() != ";" {
        return None;
    }

    Some((unescape_string_value(key), unescape_string_value(value)))
}
