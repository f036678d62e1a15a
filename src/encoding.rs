use unicode_normalization::UnicodeNormalization;

pub type PushAllow = fn(&mut String, &str);

pub fn push_allow_unreserved(dst: &mut String, src: &str) {
    src.chars().for_each(|c| push_char(is_unreserved, dst, c));
}

/// Reserved expansion also keeps well-formed `%XX` triplets of the source.
pub fn push_allow_unreserved_reserved(dst: &mut String, src: &str) {
    pct_encode(is_unreserved_reserved, dst, src);
}

pub const fn is_alpha(c: char) -> bool {
    matches!(c, '\x41'..='\x5A' | '\x61'..='\x7A')
}

pub const fn is_digit(c: char) -> bool {
    matches!(c, '\x30'..='\x39')
}

pub const fn is_hexdig(c: char) -> bool {
    is_digit(c) || matches!(c, 'A'..='F' | 'a'..='f')
}

pub const fn is_unreserved(c: char) -> bool {
    is_alpha(c) || is_digit(c) || matches!(c, '-' | '.' | '_' | '~')
}

pub const fn is_reserved(c: char) -> bool {
    is_gen_delims(c) || is_sub_delims(c)
}

pub const fn is_gen_delims(c: char) -> bool {
    matches!(c, ':' | '/' | '?' | '#' | '[' | ']' | '@')
}

pub const fn is_sub_delims(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

pub const fn is_unreserved_reserved(c: char) -> bool {
    is_reserved(c) || is_unreserved(c)
}

/// Unicode compatibility normalization (NFKC) of a value component.
pub fn normalize_compat(src: &str) -> String {
    src.nfkc().collect()
}

/// Decodes every well-formed `%XX` triplet; everything else passes through.
///
/// Decoded bytes that do not form valid UTF-8 are replaced with U+FFFD.
pub fn pct_decode(src: &str) -> String {
    let bytes = src.as_bytes();
    if !bytes.contains(&b'%') {
        return src.to_string();
    }
    let mut buf = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1), bytes.get(i + 2)) {
            (b'%', Some(&hi), Some(&lo)) => match (hex_value(hi), hex_value(lo)) {
                (Some(hi), Some(lo)) => {
                    buf.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    buf.push(b'%');
                    i += 1;
                }
            },
            (b, _, _) => {
                buf.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Length in bytes of the `%XX` triplet at the start of `src`, if there is one.
pub fn pct_triplet_len(src: &[u8]) -> Option<usize> {
    pct_triplet_byte(src).map(|_| 3)
}

/// The byte encoded by the `%XX` triplet at the start of `src`.
pub fn pct_triplet_byte(src: &[u8]) -> Option<u8> {
    match src {
        [b'%', hi, lo, ..] => Some(hex_value(*hi)? << 4 | hex_value(*lo)?),
        _ => None,
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

type IsAllowed = fn(char) -> bool;

enum PctEncodeState {
    S0,
    S1,
    S2(char),
}

impl PctEncodeState {
    fn transition(self, is_allowed: IsAllowed, dst: &mut String, c: char) -> Self {
        match self {
            PctEncodeState::S1 if is_hexdig(c) => PctEncodeState::S2(c),
            PctEncodeState::S2(b) if is_hexdig(c) => {
                dst.push('%');
                dst.push(b);
                dst.push(c);
                PctEncodeState::S0
            }
            _ => {
                self.push_incomplete(is_allowed, dst);
                if '%' == c {
                    PctEncodeState::S1
                } else {
                    push_char(is_allowed, dst, c);
                    PctEncodeState::S0
                }
            }
        }
    }

    fn push_incomplete(&self, is_allowed: IsAllowed, dst: &mut String) {
        match self {
            PctEncodeState::S0 => {}
            PctEncodeState::S1 => {
                dst.push_str("%25");
            }
            PctEncodeState::S2(c) => {
                dst.push_str("%25");
                push_char(is_allowed, dst, *c);
            }
        }
    }
}

fn pct_encode(is_allowed: IsAllowed, dst: &mut String, src: &str) {
    let mut state = PctEncodeState::S0;
    for c in src.chars() {
        state = state.transition(is_allowed, dst, c);
    }
    state.push_incomplete(is_allowed, dst);
}

fn push_char(is_allowed: IsAllowed, dst: &mut String, c: char) {
    if is_allowed(c) {
        dst.push(c);
    } else {
        push_hex_char(dst, c);
    }
}

fn push_hex_char(dst: &mut String, c: char) {
    let mut buf = [0; 4];
    let s = c.encode_utf8(&mut buf);
    s.as_bytes().iter().for_each(|b| push_hex_u8(dst, *b));
}

const HEX_DIGITS: &[u8] = b"0123456789ABCDEF";

fn push_hex_u8(dst: &mut String, b: u8) {
    let hi = char::from(HEX_DIGITS[usize::from(b >> 4)]);
    let lo = char::from(HEX_DIGITS[usize::from(b & 0xF)]);
    dst.push('%');
    dst.push(hi);
    dst.push(lo);
}
