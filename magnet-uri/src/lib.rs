//! Parse and serialize `magnet:?` uris.
//!
//! A magnet uri references content by its hash, next to optional metadata such as
//! a display name, trackers, keywords and web seeds.
//! [decode] turns a uri into a [MagnetRecord], [encode] turns a record back into a uri.
//!
//! ```
//! use magnet_uri::{decode, encode, MagnetRecord};
//!
//! let record = decode("magnet:?xt=urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a&dn=Example+File");
//! assert_eq!(Some("c12fe1c06bba254a9dc9f519b335aa7c1367a88a"), record.info_hash.as_deref());
//! assert_eq!(Some("Example File"), record.name.as_ref().and_then(|e| e.as_str()));
//!
//! let uri = encode(&MagnetRecord::builder().name("Example File").build());
//! assert_eq!("magnet:?dn=Example+File", uri);
//! ```

pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use record::*;

use serde_json::Value;

mod decoder;
mod encoder;
mod errors;
mod escape;
mod info_hash;
mod record;

/// Parse the given json value as magnet uri.
///
/// # Returns
///
/// It returns [MagnetError::InvalidArgument] when the value is not a string.
pub fn decode_value(value: &Value) -> Result<MagnetRecord> {
    value
        .as_str()
        .map(decode)
        .ok_or_else(|| MagnetError::InvalidArgument(format!("expected a string, got {}", value)))
}

#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use log::LevelFilter;
    use log4rs::append::console::ConsoleAppender;
    use log4rs::config::{Appender, Root};
    use log4rs::encode::pattern::PatternEncoder;
    use log4rs::Config;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initializes the logger with the specified log level.
    #[macro_export]
    macro_rules! init_logger {
        ($level:expr) => {
            $crate::testing::init_logger_level($level)
        };
        () => {
            $crate::testing::init_logger_level(log::LevelFilter::Trace)
        };
    }

    /// Initializes the logger with the specified log level.
    pub fn init_logger_level(level: LevelFilter) {
        INIT.call_once(|| {
            log4rs::init_config(Config::builder()
                .appender(Appender::builder().build("stdout", Box::new(ConsoleAppender::builder()
                    .encoder(Box::new(PatternEncoder::new("\x1B[37m{d(%Y-%m-%d %H:%M:%S%.3f)}\x1B[0m {h({l:>5.5})} \x1B[35m{I:>6.6}\x1B[0m \x1B[37m---\x1B[0m \x1B[37m[{T:>15.15}]\x1B[0m \x1B[36m{t:<60.60}\x1B[0m \x1B[37m:\x1B[0m {m}{n}")))
                    .build())))
                .build(Root::builder().appender("stdout").build(level))
                .unwrap())
                .unwrap();
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::init_logger;

    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_value() {
        init_logger!();
        let value = json!("magnet:?dn=Name&tr=http%3A%2F%2Fx");

        let result = decode_value(&value).unwrap();

        assert_eq!(Some(MagnetValue::from("Name")), result.name);
        assert_eq!(Some(vec!["http://x".to_string()]), result.announce);
    }

    #[test]
    fn test_decode_value_invalid_argument() {
        init_logger!();
        let value = json!({"dn": "Name"});

        let result = decode_value(&value);

        assert_eq!(
            Err(MagnetError::InvalidArgument(
                "expected a string, got {\"dn\":\"Name\"}".to_string()
            )),
            result
        );
    }

    #[test]
    fn test_decode_encode_info_hash() {
        init_logger!();
        let uris = [
            "magnet:?xt=urn:btih:EADAF0EFEA39406914414D359E0EA16416409BD7&dn=debian-12.4.0-amd64-DVD-1.iso&tr=udp%3A%2F%2Ftracker.opentrackr.org%3A1337",
            "magnet:?xt=urn:btih:5LNPB37KHFAGSFCBJU2Z4DVBMQLEBG6X&tr=udp%3A%2F%2Fa&tr=udp%3A%2F%2Fa",
            "magnet:?dn=foo&xt=urn:ed2k:354B15E68FB8F36D7CD88FF94116CDC1&xt=urn:btih:0123456789abcdef0123456789abcdef01234567",
        ];

        for uri in uris {
            let expected_result = decode(uri).info_hash;

            let result = decode(&encode(&decode(uri))).info_hash;

            assert!(expected_result.is_some(), "expected an info hash for {}", uri);
            assert_eq!(expected_result, result, "expected the info hash of {} to be kept", uri);
        }
    }

    #[test]
    fn test_decode_encode_fields() {
        init_logger!();
        let uri = "magnet:?xt=urn:btih:d2474e86c95b19b8bcfdb92bc12c9d44667cfa36&dn=Leaves+of+Grass&kt=poetry+classic&tr=udp%3A%2F%2Ftracker.example4.com%3A80&tr=udp%3A%2F%2Ftracker.example4.com%3A80&as=http%3A%2F%2Fsource&ws=http%3A%2F%2Fseed&xl=1024";

        let result = encode(&decode(uri));

        assert_eq!(
            "magnet:?xt=urn:btih:d2474e86c95b19b8bcfdb92bc12c9d44667cfa36&dn=Leaves+of+Grass&kt=poetry+classic&tr=udp%3A%2F%2Ftracker.example4.com%3A80&ws=http%3A%2F%2Fsource&ws=http%3A%2F%2Fseed&xl=1024",
            result
        );
    }

    #[test]
    fn test_encode_info_hash_unescaped() {
        init_logger!();
        let record = MagnetRecord::builder()
            .info_hash("0123456789abcdef0123456789abcdef01234567")
            .name("Test File")
            .build();

        let result = encode(&record);

        assert!(
            result.contains("xt=urn:btih:0123456789abcdef0123456789abcdef01234567"),
            "expected the urn to be left unescaped, got {}",
            result
        );
        assert!(result.contains("dn=Test+File"), "expected dn within {}", result);
    }

    #[test]
    fn test_record_display_from_str() {
        init_logger!();
        let uri = "magnet:?dn=foo+bar&tr=udp%3A%2F%2Fa";

        let record: MagnetRecord = uri.parse().unwrap();

        assert_eq!(uri, record.to_string());
        assert_eq!(record, MagnetRecord::from(uri));
    }
}
