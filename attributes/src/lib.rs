use indexmap::IndexMap;
use std::fmt::{self, Display};

mod error;
mod map;
mod parsing;

pub use error::{AttributeError, Result};
pub use map::AttributeMap;

/// The value held by a single attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// A boolean attribute such as `disabled`. Only `true` is rendered.
    Flag(bool),
    /// A quoted attribute such as `class="btn"`
    Text(String),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s.as_str()),
            AttributeValue::Flag(_) => None,
        }
    }
    pub fn is_flag(&self) -> bool {
        matches!(self, AttributeValue::Flag(_))
    }
    pub fn is_text(&self) -> bool {
        matches!(self, AttributeValue::Text(_))
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Flag(b) => write!(f, "{}", b),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq<AttributeValue> for bool {
    fn eq(&self, other: &AttributeValue) -> bool {
        matches!(other, AttributeValue::Flag(b) if b == self)
    }
}

impl PartialEq<AttributeValue> for str {
    fn eq(&self, other: &AttributeValue) -> bool {
        other.as_text() == Some(self)
    }
}

impl PartialEq<AttributeValue> for &str {
    fn eq(&self, other: &AttributeValue) -> bool {
        other.as_text() == Some(*self)
    }
}

impl PartialEq<AttributeValue> for String {
    fn eq(&self, other: &AttributeValue) -> bool {
        other.as_text() == Some(self.as_str())
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Flag(b)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<&String> for AttributeValue {
    fn from(s: &String) -> Self {
        AttributeValue::Text(s.clone())
    }
}

macro_rules! text_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AttributeValue {
                fn from(v: $t) -> Self {
                    AttributeValue::Text(v.to_string())
                }
            }
        )*
    };
}

text_from_display!(char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Every input shape an [`AttributeMap`] can be built or populated from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeSource {
    /// Nothing supplied. Unsupported inputs end up here too.
    #[default]
    Empty,
    Mapping(IndexMap<String, AttributeValue>),
    /// A raw attribute string, e.g. `id="app" disabled`
    Text(String),
    Instance(AttributeMap),
}

impl From<()> for AttributeSource {
    fn from(_: ()) -> Self {
        AttributeSource::Empty
    }
}

impl From<&str> for AttributeSource {
    fn from(s: &str) -> Self {
        AttributeSource::Text(s.to_string())
    }
}

impl From<String> for AttributeSource {
    fn from(s: String) -> Self {
        AttributeSource::Text(s)
    }
}

impl From<&String> for AttributeSource {
    fn from(s: &String) -> Self {
        AttributeSource::Text(s.clone())
    }
}

impl From<AttributeMap> for AttributeSource {
    fn from(map: AttributeMap) -> Self {
        AttributeSource::Instance(map)
    }
}

impl From<&AttributeMap> for AttributeSource {
    fn from(map: &AttributeMap) -> Self {
        AttributeSource::Instance(map.clone())
    }
}

impl From<IndexMap<String, AttributeValue>> for AttributeSource {
    fn from(map: IndexMap<String, AttributeValue>) -> Self {
        AttributeSource::Mapping(map)
    }
}

impl<K, V> From<Vec<(K, V)>> for AttributeSource
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        AttributeSource::Mapping(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for AttributeSource
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        AttributeSource::Mapping(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<T: Into<AttributeSource>> From<Option<T>> for AttributeSource {
    fn from(source: Option<T>) -> Self {
        source.map(Into::into).unwrap_or_default()
    }
}

/// Build an [`AttributeMap`] from `name => value` pairs and bare flag names
///
/// ```
/// use attributes::{attributes, AttributeValue};
/// let attrs = attributes!(lang => "en", disabled, tabindex => 3);
/// assert_eq!(attrs.get("disabled"), Some(&AttributeValue::Flag(true)));
/// assert_eq!(attrs.to_string(), r#"lang="en" disabled tabindex="3""#);
/// ```
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::AttributeMap::new()
    };
    ($($name:ident $(=> $value:expr)?),+ $(,)?) => {{
        let mut map = $crate::AttributeMap::new();
        $(
            $crate::attributes!(@entry map, $name $(=> $value)?);
        )+
        map
    }};
    (@entry $map:ident, $name:ident => $value:expr) => {
        $map.set(stringify!($name), $value);
    };
    (@entry $map:ident, $name:ident) => {
        $map.set_flag(stringify!($name));
    };
}

#[cfg(test)]
mod tests;
