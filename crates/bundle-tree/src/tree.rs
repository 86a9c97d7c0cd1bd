//! The structured value tree holding one decoded object

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};
use serde_yaml::Value as YamlValue;

/// A generic nested map/list/scalar value.
///
/// Map keys are kept in sorted order, so encoding a tree is deterministic
/// regardless of the key order of the source document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tree {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Tree>),
    Map(BTreeMap<String, Tree>),
}

impl Tree {
    /// An empty map.
    pub fn map() -> Self {
        Self::Map(BTreeMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Tree]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Tree>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, Tree>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key when this tree is a map.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.as_map()?.get(key)
    }

    /// Insert a key, turning a null tree into a map first.
    ///
    /// Returns the previous value. Has no effect on scalars and lists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tree>) -> Option<Tree> {
        if self.is_null() {
            *self = Self::map();
        }
        self.as_map_mut()?.insert(key.into(), value.into())
    }

    /// Builder-style [`Tree::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Tree>) -> Self {
        self.insert(key, value);
        self
    }

    /// Short name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<&str> for Tree {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Tree {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Tree {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Tree {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(items: Vec<Tree>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Tree>> for Tree {
    fn from(map: BTreeMap<String, Tree>) -> Self {
        Self::Map(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Tree)> for Tree {
    fn from_iter<I: IntoIterator<Item = (K, Tree)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<JsonValue> for Tree {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => Self::Number(n),
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Tree::from).collect()),
            JsonValue::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Tree::from(v))).collect())
            }
        }
    }
}

impl From<Tree> for JsonValue {
    fn from(tree: Tree) -> Self {
        match tree {
            Tree::Null => JsonValue::Null,
            Tree::Bool(b) => JsonValue::Bool(b),
            Tree::Number(n) => JsonValue::Number(n),
            Tree::String(s) => JsonValue::String(s),
            Tree::List(items) => JsonValue::Array(items.into_iter().map(JsonValue::from).collect()),
            Tree::Map(map) => {
                JsonValue::Object(map.into_iter().map(|(k, v)| (k, JsonValue::from(v))).collect())
            }
        }
    }
}

/// YAML values convert fallibly: non-finite floats (`.nan`, `.inf`) have no
/// tree representation.
impl TryFrom<YamlValue> for Tree {
    type Error = String;

    fn try_from(value: YamlValue) -> Result<Self, Self::Error> {
        Ok(match value {
            YamlValue::Null => Self::Null,
            YamlValue::Bool(b) => Self::Bool(b),
            YamlValue::Number(n) => yaml_number(&n)?,
            YamlValue::String(s) => Self::String(s),
            YamlValue::Sequence(items) => Self::List(
                items
                    .into_iter()
                    .map(Tree::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            YamlValue::Mapping(map) => Self::Map(
                map.into_iter()
                    .filter_map(|(k, v)| yaml_key(k).map(|k| Tree::try_from(v).map(|v| (k, v))))
                    .collect::<Result<_, _>>()?,
            ),
            // Tags carry no meaning for configuration objects
            YamlValue::Tagged(tagged) => Tree::try_from(tagged.value)?,
        })
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Tree, String> {
    if let Some(i) = n.as_i64() {
        Ok(Tree::Number(i.into()))
    } else if let Some(u) = n.as_u64() {
        Ok(Tree::Number(u.into()))
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Tree::Number)
            .ok_or_else(|| format!("non-finite number {n} is not supported"))
    }
}

/// Stringify a YAML mapping key. Composite keys are dropped.
fn yaml_key(key: YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Null => Some("null".to_string()),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => {
            tracing::warn!("dropping non-scalar mapping key");
            None
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The YAML value accepts non-string map keys, which JSON values reject
        let value = YamlValue::deserialize(deserializer)?;
        Tree::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => f.write_str(self.type_name()),
        }
    }
}
