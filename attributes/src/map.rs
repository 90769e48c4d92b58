use indexmap::IndexMap;
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;
use tracing::{debug, trace};

use super::parsing::{parse_lenient, parse_strict};
use super::{AttributeSource, AttributeValue, Result};

/// An ordered set of attributes attached to an element, e.g.
/// `class="btn primary" disabled data-id="42"`.
///
/// Names are unique. Entries keep the position of their first insertion,
/// so overwriting a value never reorders the map.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap(IndexMap<String, AttributeValue>);

impl AttributeMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Build a map from anything convertible into an [`AttributeSource`]
    pub fn construct(source: impl Into<AttributeSource>) -> Self {
        let mut map = Self::new();
        map.populate(source);
        map
    }

    /// Same as [`AttributeMap::construct`], for fluent call sites
    pub fn make(source: impl Into<AttributeSource>) -> Self {
        Self::construct(source)
    }

    /// Build a map from an attribute string, rejecting bare or empty tokens
    pub fn try_from_str(text: &str) -> Result<Self> {
        Ok(Self::make(parse_strict(text)?))
    }

    /// Convert any supported source into an ordered mapping
    pub fn normalize(source: impl Into<AttributeSource>) -> IndexMap<String, AttributeValue> {
        match source.into() {
            AttributeSource::Mapping(map) => {
                debug!("Normalizing mapping of {} attributes", map.len());
                map
            }
            AttributeSource::Text(text) => {
                debug!("Normalizing attribute string");
                Self::parse(&text)
            }
            AttributeSource::Instance(other) => {
                debug!("Normalizing attribute map of {} attributes", other.len());
                other.to_map()
            }
            AttributeSource::Empty => IndexMap::new(),
        }
    }

    /// Split an attribute string into an ordered mapping.
    ///
    /// Tokens are separated by single spaces and split on their first `=`.
    /// Surrounding `'` and `"` are stripped from values. A bare name becomes
    /// [`AttributeValue::Flag(true)`](AttributeValue::Flag); empty tokens and
    /// tokens without a name are skipped.
    pub fn parse(text: &str) -> IndexMap<String, AttributeValue> {
        parse_lenient(text)
    }

    /// Like [`AttributeMap::parse`], but every token must be `name=value`
    pub fn parse_strict(text: &str) -> Result<IndexMap<String, AttributeValue>> {
        parse_strict(text)
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Returns the stored value, or `default` if `name` is absent
    pub fn get_or<'a>(&'a self, name: &str, default: &'a AttributeValue) -> &'a AttributeValue {
        self.0.get(name).unwrap_or(default)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(AttributeValue::as_text)
    }

    /// Split a text value on spaces, e.g. the entries of `class`
    pub fn get_as_array(&self, name: &str) -> Vec<&str> {
        self.get_as_array_with(name, " ")
    }

    /// Split a text value on `delimiter`. Absent and flag attributes yield nothing.
    pub fn get_as_array_with(&self, name: &str, delimiter: &str) -> Vec<&str> {
        match self.get_text(name) {
            Some(text) => text.split(delimiter).collect(),
            None => vec![],
        }
    }

    /// Checks that `name` is present and holds exactly `value`.
    /// A text value never equals a flag, and numbers are not compared at all:
    ///
    /// ```compile_fail
    /// let attrs = attributes::AttributeMap::make("id=1");
    /// attrs.has_value("id", 1);
    /// ```
    pub fn has_value<V>(&self, name: &str, value: V) -> bool
    where
        V: PartialEq<AttributeValue>,
    {
        self.0.get(name).map_or(false, |stored| value == *stored)
    }

    /// Checks that `name` holds text containing `needle`
    pub fn contains(&self, name: &str, needle: &str) -> bool {
        self.get_text(name).map_or(false, |text| text.contains(needle))
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn len(&self) -> usize {
        self.count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A read-only view of the underlying mapping
    pub fn all(&self) -> &IndexMap<String, AttributeValue> {
        &self.0
    }

    /// An owned copy of the underlying mapping
    pub fn to_map(&self) -> IndexMap<String, AttributeValue> {
        self.0.clone()
    }

    /// Store `value` under `name`, trimming whitespace from text values.
    /// An existing entry keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> &mut Self {
        let name = name.into();
        let value = match value.into() {
            AttributeValue::Text(text) => AttributeValue::Text(text.trim().to_string()),
            flag => flag,
        };
        trace!("Setting {} to {:?}", name, value);
        self.0.insert(name, value);
        self
    }

    /// Mark `name` as a present boolean attribute
    pub fn set_flag(&mut self, name: impl Into<String>) -> &mut Self {
        self.set(name, true)
    }

    pub fn delete(&mut self, name: &str) -> &mut Self {
        if self.0.shift_remove(name).is_some() {
            trace!("Deleted {}", name);
        }
        self
    }

    /// Add `suffix` to the end of an existing text value, or set it as the value
    pub fn append(&mut self, name: &str, suffix: &str) -> &mut Self {
        match self.get_text(name) {
            Some(existing) => {
                let value = format!("{}{}", existing, suffix);
                self.set(name, value)
            }
            None => self.set(name, suffix),
        }
    }

    /// Add `prefix` to the start of an existing text value, or set it as the value
    pub fn prepend(&mut self, name: &str, prefix: &str) -> &mut Self {
        match self.get_text(name) {
            Some(existing) => {
                let value = format!("{}{}", prefix, existing);
                self.set(name, value)
            }
            None => self.set(name, prefix),
        }
    }

    /// Set every attribute found in `source`. Attributes not mentioned are kept.
    pub fn populate(&mut self, source: impl Into<AttributeSource>) -> &mut Self {
        self.set_all(Self::normalize(source))
    }

    /// Alias of [`AttributeMap::populate`]
    pub fn merge(&mut self, source: impl Into<AttributeSource>) -> &mut Self {
        self.set_all(Self::normalize(source))
    }

    pub fn clear(&mut self) -> &mut Self {
        self.0.clear();
        self
    }

    fn set_all(&mut self, attrs: IndexMap<String, AttributeValue>) -> &mut Self {
        for (name, value) in attrs {
            self.set(name, value);
        }
        self
    }

    /// Render as an attribute string. Flags set to `false` are left out and
    /// values are not escaped.
    pub fn serialize(&self) -> String {
        self.0
            .iter()
            .filter_map(|(name, value)| match value {
                AttributeValue::Flag(true) => Some(name.clone()),
                AttributeValue::Flag(false) => None,
                AttributeValue::Text(text) => Some(format!("{}=\"{}\"", name, text)),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Display for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

// Order matters when comparing, unlike `IndexMap`'s own equality
impl PartialEq for AttributeMap {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for AttributeMap {}

impl From<&str> for AttributeMap {
    fn from(text: &str) -> Self {
        Self::make(text)
    }
}

impl From<IndexMap<String, AttributeValue>> for AttributeMap {
    fn from(attrs: IndexMap<String, AttributeValue>) -> Self {
        Self::make(attrs)
    }
}

impl FromStr for AttributeMap {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::make(s))
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

impl IntoIterator for AttributeMap {
    type Item = (String, AttributeValue);
    type IntoIter = indexmap::map::IntoIter<String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = indexmap::map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
