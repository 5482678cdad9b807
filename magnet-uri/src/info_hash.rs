use base32::Alphabet;
use log::{trace, warn};

/// The exact topic prefix of a BitTorrent v1 info hash.
pub const BTIH_PREFIX: &str = "urn:btih:";

const HEX_HASH_LEN: usize = 40;
const BASE32_HASH_LEN: usize = 32;

/// Try to extract the lowercase hex info hash from the given exact topic.
///
/// The following formats are supported:
/// * `urn:btih:` followed by a 40 character hex encoded hash
/// * `urn:btih:` followed by a 32 character base32 encoded hash
///
/// Only the leading 40, or 32, characters after the prefix are taken into account.
///
/// # Returns
///
/// It returns the hex encoded info hash, or `None` when the topic isn't a usable btih urn.
pub fn from_exact_topic(topic: &str) -> Option<String> {
    let hash = topic.strip_prefix(BTIH_PREFIX)?;

    if let Some(value) = leading_chars(hash, HEX_HASH_LEN) {
        trace!("Parsing info hash value {} as hex", value);
        let value = value.to_lowercase();
        if hex::decode(&value).is_err() {
            warn!("Info hash {} is not a valid hex value", value);
            return None;
        }

        return Some(value);
    }

    if let Some(value) = leading_chars(hash, BASE32_HASH_LEN) {
        trace!("Parsing info hash value {} as base32", value);
        return match base32::decode(
            Alphabet::Rfc4648 { padding: false },
            value.to_uppercase().as_str(),
        ) {
            Some(bytes) => Some(hex::encode(bytes)),
            None => {
                warn!("Info hash {} is not a valid base32 value", value);
                None
            }
        };
    }

    trace!("Exact topic {} doesn't contain a supported info hash", topic);
    None
}

/// Decode the given hex info hash into its raw bytes.
pub fn to_bytes(info_hash: &str) -> Option<Vec<u8>> {
    hex::decode(info_hash).ok()
}

/// Get the first `len` characters of the given value, if it's long enough.
fn leading_chars(value: &str, len: usize) -> Option<&str> {
    match value.char_indices().nth(len) {
        Some((index, _)) => Some(&value[..index]),
        None if value.chars().count() == len => Some(value),
        None => None,
    }
}
