use indexmap::IndexMap;
use log::{debug, trace};

use crate::encoding::{is_unreserved, pct_decode, pct_triplet_byte};
use crate::item::{Expression, Item, Varspec};
use crate::operator::{Naming, OperatorTable};
use crate::Value;

/// Forward-only cursor over the URI being matched.
#[derive(Debug)]
pub struct Scanner<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Scanner<'s> {
    pub fn new(src: &'s str) -> Self {
        Scanner { src, pos: 0 }
    }

    pub fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Restores a position taken within the current expression.
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.src.len()
    }

    pub fn eat(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes at most `limit` units per comma-separated item. A unit is one
    /// accepted ASCII character or one percent-encoded character, which spans
    /// a UTF-8 lead triplet and its continuation triplets.
    pub fn scan<F>(&mut self, limit: Option<usize>, accept: F) -> &'s str
    where
        F: Fn(char) -> bool,
    {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let mut len = 0;
        let mut units = 0;
        loop {
            match bytes.get(len) {
                Some(b',') if accept(',') => {
                    len += 1;
                    units = 0;
                    continue;
                }
                _ if limit.is_some_and(|limit| units >= limit) => break,
                Some(b'%') => match pct_triplet_byte(&bytes[len..]) {
                    Some(lead) => {
                        len += 3;
                        if lead >= 0xC0 {
                            while let Some(0x80..=0xBF) = pct_triplet_byte(&bytes[len..]) {
                                len += 3;
                            }
                        }
                    }
                    None => break,
                },
                Some(&b) if b.is_ascii() && accept(char::from(b)) => len += 1,
                _ => break,
            }
            units += 1;
        }
        self.pos += len;
        &rest[..len]
    }
}

pub fn match_items(items: &[Item], src: &str) -> Option<IndexMap<String, Value>> {
    let mut scanner = Scanner::new(src);
    let mut bindings = IndexMap::new();
    for item in items {
        match item {
            Item::Literal(literal) => {
                if !scanner.eat(literal) {
                    debug!(
                        "no match: expected {:?} at byte {} of {:?}",
                        literal,
                        scanner.position(),
                        src
                    );
                    return None;
                }
            }
            Item::Expression(expression) => {
                extract_expression(&mut scanner, expression, &mut bindings);
            }
        }
    }
    if !scanner.is_empty() {
        debug!("no match: trailing {:?} in {:?}", scanner.rest(), src);
        return None;
    }
    Some(bindings)
}

pub fn extract_expression(
    scanner: &mut Scanner,
    expression: &Expression,
    bindings: &mut IndexMap<String, Value>,
) {
    let operator_table = expression.operator.table();
    if !scanner.eat(operator_table.leader) {
        trace!(
            "{:?} expression absent at byte {}",
            expression.operator,
            scanner.position()
        );
        return;
    }
    let mut announced = !operator_table.leader.is_empty();
    let mut first = true;
    let count = expression.variable_list.len();
    for (i, varspec) in expression.variable_list.iter().enumerate() {
        let mark = scanner.position();
        if !first {
            if !scanner.eat(operator_table.joiner) {
                break;
            }
            announced = true;
        }
        let joiner = operator_table.joiner;
        let last = i + 1 == count;
        // only the last value may swallow a joiner that is also a value character
        let accept = |c: char| is_value_char(c) && (last || !joiner.contains(c));
        match extract_variable(scanner, operator_table, varspec, announced, accept) {
            Some(value) => {
                trace!("extracted {} = {:?}", varspec.varname, value);
                bindings.insert(varspec.varname.clone(), value);
                first = false;
            }
            None => scanner.reset(mark),
        }
    }
}

/// `announced` tells whether a leader or joiner preceded the variable, which
/// makes an empty value distinguishable from an absent one.
fn extract_variable<F>(
    scanner: &mut Scanner,
    operator_table: &OperatorTable,
    varspec: &Varspec,
    announced: bool,
    accept: F,
) -> Option<Value>
where
    F: Fn(char) -> bool,
{
    match operator_table.naming {
        Naming::Bare => {
            let run = if varspec.is_explode() {
                scan_exploded(scanner, operator_table)
            } else {
                scanner.scan(varspec.prefix(), &accept)
            };
            if run.is_empty() && !announced {
                None
            } else if varspec.is_explode() {
                Some(split_exploded(run, operator_table.joiner, None))
            } else {
                Some(split_list(run))
            }
        }
        Naming::Named | Naming::PathStyle if varspec.is_explode() => {
            let run = scan_exploded(scanner, operator_table);
            if run.is_empty() {
                None
            } else {
                Some(split_exploded(
                    run,
                    operator_table.joiner,
                    Some(varspec.varname.as_str()),
                ))
            }
        }
        naming => {
            let name = varspec.varname.as_str();
            let after = scanner.rest().strip_prefix(name)?;
            match after.as_bytes().first() {
                Some(b'=') => {
                    scanner.eat(name);
                    scanner.eat("=");
                    Some(split_list(scanner.scan(varspec.prefix(), &accept)))
                }
                Some(&b) if is_unreserved(char::from(b)) || b == b'%' => None,
                _ if naming == Naming::PathStyle => {
                    scanner.eat(name);
                    Some(Value::String(String::new()))
                }
                _ => None,
            }
        }
    }
}

fn is_value_char(c: char) -> bool {
    is_unreserved(c) || ',' == c
}

fn scan_exploded<'s>(scanner: &mut Scanner<'s>, operator_table: &OperatorTable) -> &'s str {
    let joiner = operator_table.joiner;
    scanner.scan(None, |c| is_value_char(c) || '=' == c || joiner.contains(c))
}

fn split_list(run: &str) -> Value {
    if run.contains(',') {
        Value::List(run.split(',').map(pct_decode).collect())
    } else {
        Value::String(pct_decode(run))
    }
}

/// Splits an exploded run into items. Under named operators `name` is the
/// variable's name: items keyed by it are its values, other keys are pairs.
/// The variable is a list or scalar only when no other key shows up.
fn split_exploded(run: &str, joiner: &str, name: Option<&str>) -> Value {
    let sep = if run.contains(joiner) { joiner } else { "," };
    let mut items = Vec::new();
    let mut pairs = IndexMap::new();
    let mut keyed = false;
    for item in run.split(sep) {
        let (key, value) = match item.split_once('=') {
            Some((k, v)) => (k, Some(pct_decode(v))),
            None => (item, None),
        };
        match (name, value) {
            (Some(name), value) if key == name => {
                let value = value.unwrap_or_default();
                items.push(value.clone());
                pairs.insert(pct_decode(key), value);
            }
            (None, None) => {
                let item = pct_decode(key);
                items.push(item.clone());
                pairs.insert(item, String::new());
            }
            (_, value) => {
                keyed = true;
                pairs.insert(pct_decode(key), value.unwrap_or_default());
            }
        }
    }
    if keyed {
        return Value::AssociativeArray(pairs);
    }
    match items.len() {
        0 => Value::String(String::new()),
        1 => Value::String(items.remove(0)),
        _ => Value::List(items),
    }
}
