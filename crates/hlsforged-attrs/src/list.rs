//! Attribute lists: parsing, typed access, and encoding.

use crate::error::{AttrError, Result};
use crate::lexer::classify;
use crate::value::{AttributeValue, ValueKind};
use indexmap::IndexMap;

/// An attribute list parsed from (or destined for) one tag body.
///
/// Names are unique. Iteration and [`encode`](Self::encode) follow insertion
/// order, while equality ignores order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeList {
    entries: IndexMap<String, AttributeValue>,
}

/// Whether `b` may appear in an attribute name.
pub fn is_name_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-'
}

/// Whether `name` is a legal attribute name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_name_byte)
}

/// Length of the value run at the start of `rest`.
///
/// A run opened by a quote ends after the closing quote. Any other run ends
/// at the next comma.
fn value_run_len(rest: &str) -> usize {
    if let Some(body) = rest.strip_prefix('"') {
        if let Some(close) = body.find('"') {
            return close + 2;
        }
    }
    rest.find(',').unwrap_or(rest.len())
}

impl AttributeList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an attribute-list body such as `BANDWIDTH=1280000,CODECS="mp4a.40.2"`.
    ///
    /// A repeated name keeps the last value.
    ///
    /// # Errors
    ///
    /// - [`AttrError::BadAttrName`] when no `NAME=` token is found
    /// - [`AttrError::BadAttrSyntax`] when a value matches no kind or is not
    ///   followed by a comma or the end of input
    pub fn parse(input: &str) -> Result<Self> {
        let mut list = Self::new();
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];
            let name_len = rest.bytes().take_while(|b| is_name_byte(*b)).count();
            if name_len == 0 || rest.as_bytes().get(name_len) != Some(&b'=') {
                return Err(AttrError::BadAttrName { offset: pos });
            }

            let name = &rest[..name_len];
            pos += name_len + 1;

            let rest = &input[pos..];
            let run_len = value_run_len(rest);
            let value = classify(&rest[..run_len]).ok_or_else(|| AttrError::BadAttrSyntax {
                name: name.to_string(),
            })?;
            pos += run_len;

            match input.as_bytes().get(pos) {
                None => {}
                Some(b',') => pos += 1,
                Some(_) => {
                    return Err(AttrError::BadAttrSyntax {
                        name: name.to_string(),
                    })
                }
            }

            list.entries.insert(name.to_string(), value);
        }

        Ok(list)
    }

    /// Insert a value, returning the previous one for that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Option<AttributeValue> {
        self.entries.insert(name.into(), value.into())
    }

    /// Insert a value when present; `None` is skipped.
    pub fn insert_opt<V: Into<AttributeValue>>(&mut self, name: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a raw value.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.get(name)
    }

    /// Whether `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove a value.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.entries.shift_remove(name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn value(&self, name: &str) -> Result<&AttributeValue> {
        self.entries.get(name).ok_or_else(|| AttrError::missing(name))
    }

    fn mismatch(name: &str, expected: ValueKind, actual: &AttributeValue) -> AttrError {
        AttrError::TypeMismatch {
            name: name.to_string(),
            expected,
            actual: actual.kind(),
        }
    }

    /// Read a decimal integer.
    pub fn integer(&self, name: &str) -> Result<u64> {
        match self.value(name)? {
            AttributeValue::Integer(n) => Ok(*n),
            other => Err(Self::mismatch(name, ValueKind::Integer, other)),
        }
    }

    /// Read a hexadecimal sequence.
    pub fn bytes(&self, name: &str) -> Result<&[u8]> {
        match self.value(name)? {
            AttributeValue::Bytes(data) => Ok(data),
            other => Err(Self::mismatch(name, ValueKind::Bytes, other)),
        }
    }

    /// Read an unsigned float. Signed floats are rejected.
    pub fn float(&self, name: &str) -> Result<f64> {
        match self.value(name)? {
            AttributeValue::Float(f) => Ok(*f),
            other => Err(Self::mismatch(name, ValueKind::Float, other)),
        }
    }

    /// Read a signed float. Unsigned floats are accepted as well.
    pub fn signed_float(&self, name: &str) -> Result<f64> {
        match self.value(name)? {
            AttributeValue::Float(f) | AttributeValue::SignedFloat(f) => Ok(*f),
            other => Err(Self::mismatch(name, ValueKind::SignedFloat, other)),
        }
    }

    /// Read a quoted string.
    pub fn string(&self, name: &str) -> Result<&str> {
        match self.value(name)? {
            AttributeValue::String(s) => Ok(s),
            other => Err(Self::mismatch(name, ValueKind::QuotedString, other)),
        }
    }

    /// Read a bare enumerated token.
    pub fn enumerated(&self, name: &str) -> Result<&str> {
        match self.value(name)? {
            AttributeValue::Enum(s) => Ok(s),
            other => Err(Self::mismatch(name, ValueKind::Enumerated, other)),
        }
    }

    /// Read a `WIDTHxHEIGHT` resolution.
    pub fn resolution(&self, name: &str) -> Result<(u64, u64)> {
        match self.value(name)? {
            AttributeValue::Resolution(w, h) => Ok((*w, *h)),
            other => Err(Self::mismatch(name, ValueKind::Resolution, other)),
        }
    }

    /// Render as `NAME=value` pairs joined by commas, in insertion order.
    pub fn encode(&self) -> Result<String> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            if !is_valid_name(name) {
                return Err(AttrError::IllegalName(name.clone()));
            }
            pairs.push(format!("{}={}", name, value.encode()?));
        }
        Ok(pairs.join(","))
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = indexmap::map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl std::str::FromStr for AttributeList {
    type Err = AttrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
