/// Decode the small, explicit set of character references a navigation fragment uses.
///
/// Contract:
/// - Named references from `NAMED` (markup escapes plus the Latin-1 letters common in
///   Spanish menu labels), semicolon-terminated only.
/// - Numeric references `&#233;` / `&#xE9;` when well-formed, semicolon-terminated and a valid
///   Unicode scalar value.
/// - Anything else, including unknown names, passes through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        match decode_one(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("copy", '©'),
    ("aacute", 'á'),
    ("eacute", 'é'),
    ("iacute", 'í'),
    ("oacute", 'ó'),
    ("uacute", 'ú'),
    ("ntilde", 'ñ'),
    ("Aacute", 'Á'),
    ("Eacute", 'É'),
    ("Iacute", 'Í'),
    ("Oacute", 'Ó'),
    ("Uacute", 'Ú'),
    ("Ntilde", 'Ñ'),
    ("uuml", 'ü'),
    ("iquest", '¿'),
    ("iexcl", '¡'),
];

// 0x10FFFF needs 6 hex digits, 1114111 needs 7 decimal digits.
const MAX_HEX_DIGITS: usize = 6;
const MAX_DEC_DIGITS: usize = 7;

/// `input` starts with `&`. Returns the decoded char and the byte length consumed.
fn decode_one(input: &str) -> Option<(char, usize)> {
    let body = &input[1..];
    let semi = body.find(';')?;
    let name = &body[..semi];
    let consumed = semi + 2;

    if let Some(num) = name.strip_prefix('#') {
        let (digits, radix, max) = match num.strip_prefix(&['x', 'X'][..]) {
            Some(hex) => (hex, 16, MAX_HEX_DIGITS),
            None => (num, 10, MAX_DEC_DIGITS),
        };
        if digits.is_empty() || digits.len() > max {
            return None;
        }
        let ch = u32::from_str_radix(digits, radix).ok().and_then(char::from_u32)?;
        return Some((ch, consumed));
    }

    NAMED
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, ch)| (*ch, consumed))
}

pub(crate) fn escape_text(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

pub(crate) fn escape_attr(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}
