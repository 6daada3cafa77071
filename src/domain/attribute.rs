//! Node attributes: unique-keyed (key, value) pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Attribute value.
///
/// Deserializes from plain JSON/TOML scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Int(i) => write!(f, "{i}"),
            AttrValue::Float(x) => write!(f, "{x}"),
            AttrValue::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

/// Immutable (key, value) pair attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    key: String,
    value: AttrValue,
}

impl Attribute {
    /// Create an attribute.
    ///
    /// Empty or whitespace-only keys are rejected.
    pub fn new(key: impl Into<String>, value: impl Into<AttrValue>) -> DomainResult<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self {
            key,
            value: value.into(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// Same key and equal value.
    pub fn is_equal(&self, other: &Attribute) -> bool {
        self.key == other.key && self.value == other.value
    }
}

fn validate_key(key: &str) -> DomainResult<()> {
    if key.trim().is_empty() {
        return Err(DomainError::InvalidArgument(format!(
            "attribute key must not be blank: {key:?}"
        )));
    }
    Ok(())
}

/// What `has_attribute` compares against: a bare key, or key plus value.
#[derive(Debug, Clone, Copy)]
pub enum AttrQuery<'a> {
    Key(&'a str),
    Attr(&'a Attribute),
}

impl<'a> From<&'a str> for AttrQuery<'a> {
    fn from(key: &'a str) -> Self {
        AttrQuery::Key(key)
    }
}

impl<'a> From<&'a String> for AttrQuery<'a> {
    fn from(key: &'a String) -> Self {
        AttrQuery::Key(key.as_str())
    }
}

impl<'a> From<&'a Attribute> for AttrQuery<'a> {
    fn from(attr: &'a Attribute) -> Self {
        AttrQuery::Attr(attr)
    }
}

/// Ordered attribute collection with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    attrs: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list; later entries replace earlier ones with the same key.
    pub fn from_attrs(attrs: impl IntoIterator<Item = Attribute>) -> Self {
        let mut set = Self::new();
        for attr in attrs {
            set.set(attr);
        }
        set
    }

    pub fn contains<'a>(&self, query: impl Into<AttrQuery<'a>>) -> bool {
        match query.into() {
            AttrQuery::Attr(attr) => self.attrs.iter().any(|a| a.is_equal(attr)),
            AttrQuery::Key(key) => self.attrs.iter().any(|a| a.key == key),
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|a| a.key == key).map(|a| &a.value)
    }

    pub fn set(&mut self, attr: Attribute) {
        self.remove(&attr.key);
        self.attrs.push(attr);
    }

    /// Returns the removed attribute, if any.
    pub fn remove(&mut self, key: &str) -> Option<Attribute> {
        let pos = self.attrs.iter().position(|a| a.key == key)?;
        Some(self.attrs.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attrs.iter()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}
