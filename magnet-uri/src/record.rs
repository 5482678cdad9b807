use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{MagnetError, Result};
use crate::{decoder, encoder};

/// The value of a magnet parameter.
///
/// A parameter holds a single value unless its key was repeated within the uri,
/// in which case all values are kept in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MagnetValue {
    Single(String),
    Multiple(Vec<String>),
}

impl MagnetValue {
    /// Get the value as a str slice when it's a single value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MagnetValue::Single(value) => Some(value.as_str()),
            MagnetValue::Multiple(_) => None,
        }
    }

    /// Get all values of the parameter, a single value results in a slice of one element.
    pub fn values(&self) -> &[String] {
        match self {
            MagnetValue::Single(value) => std::slice::from_ref(value),
            MagnetValue::Multiple(values) => values.as_slice(),
        }
    }

    /// Consume the parameter into its values.
    pub fn into_values(self) -> Vec<String> {
        match self {
            MagnetValue::Single(value) => vec![value],
            MagnetValue::Multiple(values) => values,
        }
    }

    /// Check if the parameter holds a sequence of values.
    pub fn is_multiple(&self) -> bool {
        matches!(self, MagnetValue::Multiple(_))
    }
}

impl From<&str> for MagnetValue {
    fn from(value: &str) -> Self {
        MagnetValue::Single(value.to_string())
    }
}

impl From<String> for MagnetValue {
    fn from(value: String) -> Self {
        MagnetValue::Single(value)
    }
}

impl From<Vec<String>> for MagnetValue {
    fn from(values: Vec<String>) -> Self {
        MagnetValue::Multiple(values)
    }
}

impl From<Vec<&str>> for MagnetValue {
    fn from(values: Vec<&str>) -> Self {
        MagnetValue::Multiple(values.into_iter().map(String::from).collect())
    }
}

/// A parsed magnet uri, or the input for serializing one.
///
/// The record holds the raw parameters keyed by their spec key (`xt`, `dn`, `tr`, ...)
/// next to the convenience fields which are derived from them when decoding.
/// When encoding, the convenience fields take precedence over the spec keys they map onto.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MagnetRecord {
    #[serde(flatten)]
    params: IndexMap<String, MagnetValue>,
    /// The lowercase hex info hash, derived from `xt`.
    #[serde(rename = "infoHash", default, skip_serializing_if = "Option::is_none")]
    pub info_hash: Option<String>,
    /// The raw bytes of the info hash.
    #[serde(
        rename = "infoHashBuffer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub info_hash_buffer: Option<Vec<u8>>,
    /// The display name, alias of `dn`.
    /// A repeated `dn` results in all display names being kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<MagnetValue>,
    /// The keyword topics, alias of `kt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// The unique tracker urls, derived from `tr`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announce: Option<Vec<String>>,
    /// The acceptable sources followed by the web seeds, derived from `as` and `ws`.
    #[serde(rename = "urlList", default, skip_serializing_if = "Option::is_none")]
    pub url_list: Option<Vec<String>>,
}

impl MagnetRecord {
    /// Create a new empty magnet record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `MagnetRecordBuilder` instance.
    pub fn builder() -> MagnetRecordBuilder {
        MagnetRecordBuilder::default()
    }

    /// Get the parameter value of the given key.
    /// Keys are case-sensitive.
    pub fn get(&self, key: &str) -> Option<&MagnetValue> {
        self.params.get(key)
    }

    /// Check if the record contains a parameter with the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Set the parameter value of the given key.
    /// An existing value is replaced in place, keeping its original position.
    ///
    /// # Returns
    ///
    /// It returns the previous value of the key, if any.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<MagnetValue>
    where
        K: Into<String>,
        V: Into<MagnetValue>,
    {
        self.params.insert(key.into(), value.into())
    }

    /// Remove the parameter with the given key, preserving the order of the remaining parameters.
    pub fn remove(&mut self, key: &str) -> Option<MagnetValue> {
        self.params.shift_remove(key)
    }

    /// Iterate over the parameters in order of insertion.
    pub fn params(&self) -> impl Iterator<Item = (&str, &MagnetValue)> {
        self.params.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Get the number of parameters within the record.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the record doesn't contain any parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Create a record from the given json object.
    ///
    /// # Returns
    ///
    /// It returns [MagnetError::InvalidArgument] when the value isn't an object,
    /// or when one of its values is not a string or an array of strings.
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| MagnetError::InvalidArgument(e.to_string()))
    }

    /// Convert the record into a json object.
    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| MagnetError::InvalidArgument(e.to_string()))
    }

    pub(crate) fn from_params(params: IndexMap<String, MagnetValue>) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub(crate) fn into_params(self) -> IndexMap<String, MagnetValue> {
        self.params
    }
}

/// A builder for constructing a `MagnetRecord`.
#[derive(Debug, Clone, Default)]
pub struct MagnetRecordBuilder {
    record: MagnetRecord,
}

impl MagnetRecordBuilder {
    /// Sets the given spec key parameter.
    pub fn param<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<MagnetValue>,
    {
        self.record.insert(key, value);
        self
    }

    /// Sets the hex encoded info hash.
    pub fn info_hash<S>(&mut self, info_hash: S) -> &mut Self
    where
        S: Into<String>,
    {
        self.record.info_hash = Some(info_hash.into());
        self
    }

    /// Sets the raw info hash bytes.
    pub fn info_hash_buffer<T>(&mut self, buffer: T) -> &mut Self
    where
        T: Into<Vec<u8>>,
    {
        self.record.info_hash_buffer = Some(buffer.into());
        self
    }

    /// Sets the display name.
    pub fn name<V>(&mut self, name: V) -> &mut Self
    where
        V: Into<MagnetValue>,
    {
        self.record.name = Some(name.into());
        self
    }

    /// Sets the keyword topics.
    pub fn keywords<S>(&mut self, keywords: Vec<S>) -> &mut Self
    where
        S: Into<String>,
    {
        self.record.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the tracker urls.
    pub fn announce<S>(&mut self, announce: Vec<S>) -> &mut Self
    where
        S: Into<String>,
    {
        self.record.announce = Some(announce.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the web seed urls.
    pub fn url_list<S>(&mut self, url_list: Vec<S>) -> &mut Self
    where
        S: Into<String>,
    {
        self.record.url_list = Some(url_list.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the `MagnetRecord` from the builder's configuration.
    pub fn build(&self) -> MagnetRecord {
        self.record.clone()
    }
}

impl Display for MagnetRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", encoder::encode(self))
    }
}

impl FromStr for MagnetRecord {
    type Err = Infallible;

    fn from_str(uri: &str) -> std::result::Result<Self, Self::Err> {
        Ok(decoder::decode(uri))
    }
}

impl From<&str> for MagnetRecord {
    fn from(uri: &str) -> Self {
        decoder::decode(uri)
    }
}
