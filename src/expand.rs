use std::borrow::Borrow;

use crate::encoding::{normalize_compat, PushAllow};
use crate::error::Error;
use crate::item::{Expression, Item, Varspec};
use crate::operator::{Naming, OperatorTable};
use crate::{Value, Variables};

/// One rendered piece of an expression, separated from its siblings by the
/// operator's joiner.
#[derive(Debug, Eq, PartialEq)]
pub enum Unit<'a> {
    /// Tagged with the variable's name according to the operator.
    Value { name: &'a str, value: String },
    /// A member of an exploded associative array, tagged with its own key.
    Pair { key: String, value: String },
}

pub fn expand_items<'a, V, B>(
    items: &'a [Item],
    variables: &'a V,
    normalize: bool,
) -> Result<String, Error>
where
    V: Variables<'a, B>,
    B: Borrow<Value>,
{
    let mut dst = String::new();
    for item in items {
        match item {
            Item::Literal(literal) => expand_literal(&mut dst, literal),
            Item::Expression(expression) => {
                expand_expression(variables, &mut dst, expression, normalize)?
            }
        }
    }
    Ok(dst)
}

fn expand_literal(dst: &mut String, literal: &str) {
    dst.push_str(literal);
}

fn expand_expression<'a, V, B>(
    variables: &'a V,
    dst: &mut String,
    expression: &'a Expression,
    normalize: bool,
) -> Result<(), Error>
where
    V: Variables<'a, B>,
    B: Borrow<Value>,
{
    let operator_table = expression.operator.table();
    let mut push_sep = make_push_sep(operator_table.leader, operator_table.joiner);
    for varspec in &expression.variable_list {
        let value = match variables.get(&varspec.varname)? {
            Some(value) => value,
            None => continue,
        };
        let value: &Value = value.borrow();
        if value.is_undefined() {
            continue;
        }
        let units = if normalize {
            expand_variable(operator_table, varspec, &normalize_value(value))
        } else {
            expand_variable(operator_table, varspec, value)
        };
        for unit in &units {
            push_sep(dst);
            push_unit(dst, operator_table.naming, unit);
        }
    }
    Ok(())
}

fn make_push_sep(first: &'static str, sep: &'static str) -> impl FnMut(&mut String) {
    let mut s = first;
    move |dst: &mut String| {
        dst.push_str(s);
        s = sep;
    }
}

/// Renders one defined value of `varspec` into the units it contributes.
pub fn expand_variable<'a>(
    operator_table: &OperatorTable,
    varspec: &'a Varspec,
    value: &Value,
) -> Vec<Unit<'a>> {
    let allow = operator_table.allow();
    let name = varspec.varname.as_str();
    let prefix = varspec.prefix();
    match value {
        Value::String(value) => vec![Unit::Value {
            name,
            value: encode(allow, truncate(value, prefix)),
        }],
        Value::List(value) => {
            let items = value.iter().map(|v| encode(allow, truncate(v, prefix)));
            if varspec.is_explode() {
                items.map(|value| Unit::Value { name, value }).collect()
            } else {
                vec![Unit::Value {
                    name,
                    value: items.collect::<Vec<_>>().join(","),
                }]
            }
        }
        Value::AssociativeArray(value) => {
            if varspec.is_explode() {
                value
                    .iter()
                    .map(|(k, v)| Unit::Pair {
                        key: encode(allow, k),
                        value: encode(allow, v),
                    })
                    .collect()
            } else {
                let mut dst = String::new();
                let mut push_sep = make_push_sep("", ",");
                for (k, v) in value {
                    push_sep(&mut dst);
                    allow(&mut dst, k);
                    dst.push(',');
                    allow(&mut dst, v);
                }
                vec![Unit::Value { name, value: dst }]
            }
        }
    }
}

fn push_unit(dst: &mut String, naming: Naming, unit: &Unit) {
    let (name, value, naming) = match unit {
        Unit::Value { name, value } => (*name, value, naming),
        Unit::Pair { key, value } if naming == Naming::Bare => (key.as_str(), value, Naming::Named),
        Unit::Pair { key, value } => (key.as_str(), value, naming),
    };
    match naming {
        Naming::Bare => dst.push_str(value),
        Naming::Named => {
            dst.push_str(name);
            dst.push('=');
            dst.push_str(value);
        }
        Naming::PathStyle => {
            dst.push_str(name);
            if !value.is_empty() {
                dst.push('=');
                dst.push_str(value);
            }
        }
    }
}

fn encode(allow: PushAllow, src: &str) -> String {
    let mut dst = String::with_capacity(src.len());
    allow(&mut dst, src);
    dst
}

/// The first `prefix` characters of `value`.
fn truncate(value: &str, prefix: Option<usize>) -> &str {
    match prefix.and_then(|size| value.char_indices().nth(size)) {
        Some((i, _)) => &value[..i],
        None => value,
    }
}

fn normalize_value(value: &Value) -> Value {
    match value {
        Value::AssociativeArray(value) => Value::AssociativeArray(
            value
                .iter()
                .map(|(k, v)| (normalize_compat(k), normalize_compat(v)))
                .collect(),
        ),
        Value::List(value) => Value::List(value.iter().map(|v| normalize_compat(v)).collect()),
        Value::String(value) => Value::String(normalize_compat(value)),
    }
}
