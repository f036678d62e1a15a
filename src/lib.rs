mod encoding;
mod error;
mod expand;
mod extract;
mod item;
mod operator;
mod parse;
mod value;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use log::trace;
use serde::{Serialize, Serializer};

use crate::expand::expand_items;
use crate::extract::match_items;
use crate::item::Item;
use crate::parse::parse_template;

pub use crate::error::{Error, ParseErrorKind};
pub use crate::value::{Value, Variables};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UriTemplate {
    source: String,
    items: Vec<Item>,
}

#[derive(Debug)]
pub struct Expander<'a> {
    uri_template: &'a UriTemplate,
    variables: HashMap<String, Value>,
    normalize: bool,
}

/// Bindings recovered from a URI by [`UriTemplate::match_uri`].
///
/// Variables of the template that do not appear in the URI have no entry.
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult<'t> {
    uri: String,
    template: &'t UriTemplate,
    bindings: IndexMap<String, Value>,
}

impl UriTemplate {
    pub fn parse<S>(template: S) -> Result<Self, Error>
    where
        S: AsRef<str>,
    {
        let template = template.as_ref();
        let items = parse_template(template)?;
        Ok(UriTemplate {
            source: template.to_string(),
            items,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Expands the template, normalizing every value to NFKC first.
    pub fn expand<'a, V, B>(&'a self, variables: &'a V) -> Result<String, Error>
    where
        V: Variables<'a, B>,
        B: Borrow<Value>,
    {
        self.expand_with(variables, true)
    }

    pub fn expand_with<'a, V, B>(&'a self, variables: &'a V, normalize: bool) -> Result<String, Error>
    where
        V: Variables<'a, B>,
        B: Borrow<Value>,
    {
        expand_items(&self.items, variables, normalize)
    }

    pub fn expander(&self) -> Expander {
        Expander {
            uri_template: self,
            variables: HashMap::new(),
            normalize: true,
        }
    }

    /// Matches `uri` against the template and recovers the variable bindings.
    ///
    /// Returns `Ok(None)` when the URI does not fit the template. Adjacent
    /// expressions are read greedily: `{x}{y}` binds the whole run to `x`.
    pub fn match_uri(&self, uri: &str) -> Result<Option<MatchResult<'_>>, Error> {
        trace!("matching {:?} against {:?}", uri, self.source);
        Ok(match_items(&self.items, uri).map(|bindings| MatchResult {
            uri: uri.to_string(),
            template: self,
            bindings,
        }))
    }

    pub fn extract(&self, uri: &str) -> Result<Option<IndexMap<String, Value>>, Error> {
        Ok(self.match_uri(uri)?.map(MatchResult::into_bindings))
    }

    /// Every variable name the template declares, in order of first use.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for item in &self.items {
            if let Item::Expression(expression) = item {
                for varspec in &expression.variable_list {
                    if !names.contains(&varspec.varname.as_str()) {
                        names.push(&varspec.varname);
                    }
                }
            }
        }
        names
    }
}

impl FromStr for UriTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UriTemplate::parse(s)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for UriTemplate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.source)
    }
}

impl Expander<'_> {
    pub fn expand(&self) -> Result<String, Error> {
        self.uri_template
            .expand_with(&self.variables, self.normalize)
    }

    pub fn normalize(&mut self, normalize: bool) -> &mut Self {
        self.normalize = normalize;
        self
    }

    pub fn set<K, V>(&mut self, k: K, v: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.variables.insert(k.into(), v.into());
        self
    }

    pub fn set_assoc<K1, V1, K2, V2>(&mut self, k1: K1, iter: V1) -> &mut Self
    where
        K1: Into<String>,
        V1: IntoIterator<Item = (K2, V2)>,
        K2: Into<String>,
        V2: Into<String>,
    {
        let k1 = k1.into();
        let v1 = Value::from_assoc(iter);
        self.variables.insert(k1, v1);
        self
    }

    pub fn set_list<K1, V1, V2>(&mut self, k: K1, iter: V1) -> &mut Self
    where
        K1: Into<String>,
        V1: IntoIterator<Item = V2>,
        V2: Into<String>,
    {
        let k = k.into();
        let v = Value::from_list(iter);
        self.variables.insert(k, v);
        self
    }

    pub fn set_string<K, V>(&mut self, k: K, v: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let k = k.into();
        let v = Value::from_string(v);
        self.variables.insert(k, v);
        self
    }
}

impl<'t> MatchResult<'t> {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn template(&self) -> &'t UriTemplate {
        self.template
    }

    pub fn bindings(&self) -> &IndexMap<String, Value> {
        &self.bindings
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// All variables declared by the template, bound or not.
    pub fn variables(&self) -> Vec<&'t str> {
        self.template.variables()
    }

    pub fn into_bindings(self) -> IndexMap<String, Value> {
        self.bindings
    }
}
