use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// The uniform resource name prefix which is never escaped.
pub const URN_PREFIX: &str = "urn:";

/// The characters which are left untouched when escaping a uri component.
const URI_COMPONENT_RESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escape the given magnet component.
/// Values starting with `urn:` are returned as-is, spaces are escaped as `+`.
pub fn escape(value: &str) -> Cow<'_, str> {
    if value.starts_with(URN_PREFIX) {
        return Cow::Borrowed(value);
    }

    let encoded: Cow<'_, str> = utf8_percent_encode(value, URI_COMPONENT_RESERVED).into();
    if encoded.contains("%20") {
        Cow::Owned(encoded.replace("%20", "+"))
    } else {
        encoded
    }
}

/// Unescape the percent encoded sequences of the given magnet component.
/// Invalid utf-8 sequences are replaced instead of failing the decoding.
pub fn unescape(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}
