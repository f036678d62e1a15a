use std::mem;

use log::trace;

use crate::encoding::{is_alpha, is_digit, pct_triplet_len};
use crate::error::{Error, ParseErrorKind};
use crate::item::{Expression, Item, Modifier, Varspec};
use crate::operator::Operator;

/// RFC 6570 `max-length` is at most four digits.
const MAX_LENGTH_DIGITS: usize = 4;

#[derive(Clone, Copy, Debug)]
enum LexState {
    Plain,
    Expression,
    Varspec(Operator),
}

pub fn parse_template(template: &str) -> Result<Vec<Item>, Error> {
    let mut items = Vec::new();
    let mut variable_list = Vec::new();
    let mut state = LexState::Plain;
    let mut pos = 0;
    loop {
        let rest = &template[pos..];
        match state {
            LexState::Plain => match rest.find('{') {
                None => {
                    if !rest.is_empty() {
                        items.push(parse_literal(rest));
                    }
                    break;
                }
                Some(i) => {
                    if i > 0 {
                        items.push(parse_literal(&rest[..i]));
                    }
                    pos += i + 1;
                    state = LexState::Expression;
                }
            },
            LexState::Expression => {
                let operator = match rest.chars().next() {
                    None => return Err(parse_error(pos, ParseErrorKind::UnterminatedExpression)),
                    Some(c) => Operator::from_char(c),
                };
                let operator = match operator {
                    Some(operator) => {
                        // every operator character is ASCII
                        pos += 1;
                        operator
                    }
                    None => Operator::Simple,
                };
                state = LexState::Varspec(operator);
            }
            LexState::Varspec(operator) => {
                if let Some((varspec, len)) = scan_varspec(rest) {
                    variable_list.push(varspec);
                    pos += len;
                }
                match template[pos..].chars().next() {
                    Some(',') => {
                        pos += 1;
                    }
                    Some('}') => {
                        pos += 1;
                        let expression = Expression {
                            operator,
                            variable_list: mem::take(&mut variable_list),
                        };
                        trace!(
                            "lexed {:?} expression with {} variable(s)",
                            expression.operator,
                            expression.variable_list.len()
                        );
                        items.push(Item::Expression(expression));
                        state = LexState::Plain;
                    }
                    Some(_) => return Err(parse_error(pos, ParseErrorKind::IncompleteVarspec)),
                    None => return Err(parse_error(pos, ParseErrorKind::UnterminatedExpression)),
                }
            }
        }
    }
    Ok(items)
}

fn parse_error(position: usize, kind: ParseErrorKind) -> Error {
    Error::Parse { position, kind }
}

fn parse_literal(s: &str) -> Item {
    Item::Literal(s.to_string())
}

/// Scans one `varname [ "*" / ":" max-length ]` at the start of `s`.
fn scan_varspec(s: &str) -> Option<(Varspec, usize)> {
    let bytes = s.as_bytes();
    let name_len = scan_varname(bytes)?;
    let (modifier, len) = match bytes.get(name_len) {
        Some(b'*') => (Some(Modifier::Explode), name_len + 1),
        Some(b':') => match scan_max_length(&bytes[name_len + 1..]) {
            Some((size, digits)) => (Some(Modifier::Prefix(size)), name_len + 1 + digits),
            None => (None, name_len),
        },
        _ => (None, name_len),
    };
    let varspec = Varspec {
        varname: s[..name_len].to_string(),
        modifier,
    };
    Some((varspec, len))
}

fn scan_varname(bytes: &[u8]) -> Option<usize> {
    let mut len = scan_varchars(bytes)?;
    while bytes.get(len) == Some(&b'.') {
        match scan_varchars(&bytes[len + 1..]) {
            Some(n) => len += 1 + n,
            None => break,
        }
    }
    Some(len)
}

fn scan_varchars(bytes: &[u8]) -> Option<usize> {
    let mut len = 0;
    loop {
        match bytes.get(len) {
            Some(b'%') => match pct_triplet_len(&bytes[len..]) {
                Some(n) => len += n,
                None => break,
            },
            Some(&b) if is_varchar(char::from(b)) => len += 1,
            _ => break,
        }
    }
    if len == 0 {
        None
    } else {
        Some(len)
    }
}

fn scan_max_length(bytes: &[u8]) -> Option<(usize, usize)> {
    match bytes.first() {
        Some(b'1'..=b'9') => {}
        _ => return None,
    }
    let digits = bytes
        .iter()
        .take(MAX_LENGTH_DIGITS)
        .take_while(|b| b.is_ascii_digit())
        .count();
    let size = bytes[..digits]
        .iter()
        .fold(0, |acc, b| acc * 10 + usize::from(b - b'0'));
    Some((size, digits))
}

fn is_varchar(c: char) -> bool {
    is_alpha(c) || is_digit(c) || '_' == c
}
