use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A value bound to, or extracted for, a template variable.
///
/// Associative arrays compare equal regardless of key order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    AssociativeArray(IndexMap<String, String>),
    List(Vec<String>),
    String(String),
}

/// Lookup of variable bindings by name.
///
/// `get` returns `Ok(None)` for an undefined variable. Implementations over
/// dynamically typed data report values with no URI template shape as
/// [`Error::InvalidValueType`].
pub trait Variables<'a, B>
where
    B: Borrow<Value>,
{
    fn get(&'a self, k: &'a str) -> Result<Option<B>, Error>;
}

impl Value {
    pub fn from_assoc<I, K, V>(iter: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Value::AssociativeArray(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn from_list<I, V>(iter: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Value::List(iter.into_iter().map(Into::into).collect())
    }

    pub fn from_string<S>(s: S) -> Value
    where
        S: Into<String>,
    {
        Value::String(s.into())
    }

    /// Converts a JSON value bound to `name`.
    ///
    /// Booleans and numbers become strings; `null` is undefined. Arrays and
    /// objects may only hold scalars.
    pub fn from_json(name: &str, value: &serde_json::Value) -> Result<Option<Value>, Error> {
        let invalid = |found: &'static str| Error::InvalidValueType {
            name: name.to_string(),
            found,
        };
        let value = match value {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::Array(items) => Value::List(
                items
                    .iter()
                    .map(|v| json_scalar(v).map_err(invalid))
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(map) => Value::AssociativeArray(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), json_scalar(v).map_err(invalid)?)))
                    .collect::<Result<_, Error>>()?,
            ),
            scalar => Value::String(json_scalar(scalar).map_err(invalid)?),
        };
        Ok(Some(value))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// An empty list or associative array is treated as undefined.
    pub fn is_undefined(&self) -> bool {
        match self {
            Value::AssociativeArray(value) => value.is_empty(),
            Value::List(value) => value.is_empty(),
            Value::String(_) => false,
        }
    }
}

fn json_scalar(value: &serde_json::Value) -> Result<String, &'static str> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Err("null"),
        serde_json::Value::Array(_) => Err("nested array"),
        serde_json::Value::Object(_) => Err("nested object"),
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<V> From<Vec<V>> for Value
where
    V: Into<String>,
{
    fn from(v: Vec<V>) -> Self {
        Value::from_list(v)
    }
}

impl<K, V> From<IndexMap<K, V>> for Value
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(m: IndexMap<K, V>) -> Self {
        Value::from_assoc(m)
    }
}

macro_rules! impl_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::String(v.to_string())
                }
            }
        )*
    };
}

impl_from_display!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<'a> Variables<'a, &'a Value> for Vec<(String, Value)> {
    fn get(&'a self, k: &str) -> Result<Option<&'a Value>, Error> {
        Ok(self.iter().find(|(k1, _)| k == k1).map(|(_, v1)| v1))
    }
}

impl<'a, S> Variables<'a, &'a Value> for HashMap<String, Value, S>
where
    S: BuildHasher,
{
    fn get(&'a self, k: &str) -> Result<Option<&'a Value>, Error> {
        Ok(HashMap::get(self, k))
    }
}

impl<'a> Variables<'a, &'a Value> for BTreeMap<String, Value> {
    fn get(&'a self, k: &str) -> Result<Option<&'a Value>, Error> {
        Ok(BTreeMap::get(self, k))
    }
}

impl<'a, S> Variables<'a, &'a Value> for IndexMap<String, Value, S>
where
    S: BuildHasher,
{
    fn get(&'a self, k: &str) -> Result<Option<&'a Value>, Error> {
        Ok(IndexMap::get(self, k))
    }
}

impl<'a> Variables<'a, Value> for serde_json::Map<String, serde_json::Value> {
    fn get(&'a self, k: &str) -> Result<Option<Value>, Error> {
        match serde_json::Map::get(self, k) {
            None => Ok(None),
            Some(v) => Value::from_json(k, v),
        }
    }
}
