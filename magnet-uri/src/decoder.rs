use indexmap::map::Entry;
use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, trace};

use crate::escape::unescape;
use crate::info_hash;
use crate::record::{MagnetRecord, MagnetValue};

/// The marker after which the magnet parameters start.
pub const MAGNET_PREFIX: &str = "magnet:?";

/// The decoding strategy of a magnet parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ValueDecoding {
    /// Keep the raw value, used for urns which are never unescaped.
    Raw,
    /// Unescape the value and replace `+` with a space.
    DisplayName,
    /// Unescape the value.
    Unescape,
    /// Unescape the value and split it on `+` into separate keywords.
    Keywords,
}

/// The decoding strategy of each known magnet parameter.
/// Parameters not listed are kept raw.
const VALUE_DECODINGS: [(&str, ValueDecoding); 7] = [
    ("xt", ValueDecoding::Raw),
    ("dn", ValueDecoding::DisplayName),
    ("tr", ValueDecoding::Unescape),
    ("xs", ValueDecoding::Unescape),
    ("as", ValueDecoding::Unescape),
    ("ws", ValueDecoding::Unescape),
    ("kt", ValueDecoding::Keywords),
];

impl ValueDecoding {
    fn for_key(key: &str) -> Self {
        VALUE_DECODINGS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, decoding)| *decoding)
            .unwrap_or(ValueDecoding::Raw)
    }

    fn decode(&self, value: &str) -> MagnetValue {
        match self {
            ValueDecoding::Raw => MagnetValue::Single(value.to_string()),
            ValueDecoding::DisplayName => MagnetValue::Single(unescape(value).replace('+', " ")),
            ValueDecoding::Unescape => MagnetValue::Single(unescape(value)),
            ValueDecoding::Keywords => {
                MagnetValue::Multiple(unescape(value).split('+').map(String::from).collect())
            }
        }
    }
}

/// Collects the decoded parameters of a magnet uri.
/// A repeated key promotes the stored value into a sequence of values.
#[derive(Debug, Default)]
struct ParamAccumulator {
    params: IndexMap<String, MagnetValue>,
}

impl ParamAccumulator {
    fn insert(&mut self, key: &str, value: MagnetValue) {
        match self.params.entry(key.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                let mut values =
                    std::mem::replace(existing, MagnetValue::Multiple(Vec::new())).into_values();
                values.extend(value.into_values());
                *existing = MagnetValue::Multiple(values);
            }
        }
    }

    fn into_params(self) -> IndexMap<String, MagnetValue> {
        self.params
    }
}

/// Parse the given magnet uri into a [MagnetRecord].
///
/// Only the part after the first `magnet:?` occurrence is parsed.
/// Malformed parameters are skipped, so this never fails.
/// When the uri doesn't contain any parameters, the record only contains the
/// (empty) `announce` and `urlList` convenience fields.
pub fn decode(uri: &str) -> MagnetRecord {
    let mut accumulator = ParamAccumulator::default();
    let data = uri
        .split_once(MAGNET_PREFIX)
        .map(|(_, data)| data)
        .unwrap_or_default();

    if data.is_empty() {
        trace!("Magnet uri {} doesn't contain any parameters", uri);
    }

    for param in data.split('&').filter(|e| !e.is_empty()) {
        let segments: Vec<&str> = param.split('=').collect();
        if segments.len() != 2 {
            debug!("Skipping invalid magnet parameter {}", param);
            continue;
        }

        let key = segments[0];
        let value = ValueDecoding::for_key(key).decode(segments[1]);
        accumulator.insert(key, value);
    }

    let mut record = MagnetRecord::from_params(accumulator.into_params());
    derive_convenience_fields(&mut record);
    trace!("Decoded magnet uri {} into {:?}", uri, record);
    record
}

fn derive_convenience_fields(record: &mut MagnetRecord) {
    record.info_hash = record
        .get("xt")
        .map(|e| e.values())
        .unwrap_or_default()
        .iter()
        .filter_map(|topic| info_hash::from_exact_topic(topic))
        .last();
    record.info_hash_buffer = record.info_hash.as_deref().and_then(info_hash::to_bytes);

    // an empty display name is treated as absent
    record.name = record
        .get("dn")
        .filter(|e| e.as_str() != Some(""))
        .cloned();
    record.keywords = record.get("kt").map(|e| e.values().to_vec());

    record.announce = Some(
        record
            .get("tr")
            .map(|e| e.values())
            .unwrap_or_default()
            .iter()
            .unique()
            .cloned()
            .collect(),
    );

    record.url_list = Some(
        ["as", "ws"]
            .iter()
            .filter_map(|key| record.get(key))
            .flat_map(|e| e.values().iter().cloned())
            .collect(),
    );
}
