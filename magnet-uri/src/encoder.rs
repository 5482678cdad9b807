use log::trace;

use crate::decoder::MAGNET_PREFIX;
use crate::escape::escape;
use crate::info_hash::BTIH_PREFIX;
use crate::record::{MagnetRecord, MagnetValue};

/// The length of the keys which are serialized into the magnet uri.
const SPEC_KEY_LEN: usize = 2;

/// Serialize the given [MagnetRecord] into a magnet uri.
///
/// The convenience fields of the record take precedence over the spec keys they map onto:
/// * `infoHashBuffer`, or else `infoHash`, is written as `xt=urn:btih:<hex>`
/// * `name` is written as `dn`, unless empty
/// * `keywords` is written as `kt`, joined by spaces
/// * `announce` is written as `tr`
/// * `urlList` is written as `ws` and drops any `as` value
///
/// Only keys of exactly 2 characters are serialized.
/// The given record is never modified.
pub fn encode(record: &MagnetRecord) -> String {
    let mut working = record.clone();

    let info_hash = working
        .info_hash_buffer
        .as_ref()
        .map(hex::encode)
        .or_else(|| working.info_hash.clone().filter(|e| !e.is_empty()));
    if let Some(info_hash) = info_hash {
        working.insert("xt", format!("{}{}", BTIH_PREFIX, info_hash));
    }
    if let Some(name) = working.name.clone().filter(|e| e.as_str() != Some("")) {
        working.insert("dn", name);
    }
    if let Some(keywords) = working.keywords.clone() {
        working.insert("kt", keywords);
    }
    if let Some(announce) = working.announce.clone() {
        working.insert("tr", announce);
    }
    if let Some(url_list) = working.url_list.clone() {
        working.insert("ws", url_list);
        working.remove("as");
    }

    if let Some(MagnetValue::Multiple(keywords)) = working.get("kt") {
        let keywords = keywords.join(" ");
        working.insert("kt", keywords);
    }

    let query = working
        .into_params()
        .into_iter()
        .filter(|(key, _)| key.chars().count() == SPEC_KEY_LEN)
        .flat_map(|(key, value)| {
            let key = escape(key.as_str()).into_owned();
            value
                .into_values()
                .into_iter()
                .map(move |value| format!("{}={}", key, escape(value.as_str())))
        })
        .collect::<Vec<_>>()
        .join("&");

    let uri = format!("{}{}", MAGNET_PREFIX, query);
    trace!("Encoded magnet record into {}", uri);
    uri
}
