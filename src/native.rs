//! Native codec adapters backed by the platform text/byte primitives.
//!
//! One adapter type covers `utf8`, `ucs2` (UTF-16LE), `binary`, `ascii` and
//! `base64`. The resolver hands the factory the innermost alias name via
//! [`CodecOptions::original_encoding`]; that name selects the primitive.

use std::sync::Arc;

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::catalog::CodecOptions;
use crate::{Codec, Error, Result};

/// Accepts padded and unpadded input alike and tolerates stray bits in the
/// final chunk, so text-to-bytes stays total on sloppy input.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Utf8,
    Ucs2,
    Binary,
    Ascii,
    Base64,
}

#[derive(Debug)]
struct NativeCodec {
    kind: Kind,
}

/// Factory registered under `"native"`. A missing `original_encoding`
/// defaults to UTF-8.
pub(crate) fn build(options: &CodecOptions) -> Result<Arc<dyn Codec>> {
    let name = options.original_encoding.as_deref().unwrap_or("utf8");
    let kind = match name {
        "utf8" => Kind::Utf8,
        "ucs2" => Kind::Ucs2,
        "binary" => Kind::Binary,
        "ascii" => Kind::Ascii,
        "base64" => Kind::Base64,
        other => {
            return Err(Error::UnrecognizedEncoding {
                requested: other.to_string(),
                searched_as: other.to_string(),
            });
        }
    };
    Ok(Arc::new(NativeCodec { kind }))
}

impl Codec for NativeCodec {
    fn encode(&self, text: &str) -> Vec<u8> {
        match self.kind {
            Kind::Utf8 => text.as_bytes().to_vec(),
            Kind::Ucs2 => {
                let mut out = Vec::with_capacity(text.len() * 2);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                out
            }
            Kind::Binary => text.chars().map(|c| (c as u32 & 0xFF) as u8).collect(),
            Kind::Ascii => text.chars().map(|c| (c as u32 & 0x7F) as u8).collect(),
            Kind::Base64 => {
                let cleaned: String = text
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/'))
                    .collect();
                // A lone trailing symbol cannot carry a byte.
                let valid_len = if cleaned.len() % 4 == 1 {
                    cleaned.len() - 1
                } else {
                    cleaned.len()
                };
                FORGIVING.decode(&cleaned[..valid_len]).unwrap_or_default()
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        match self.kind {
            Kind::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Kind::Ucs2 => {
                // A trailing odd byte cannot form a code unit and is dropped.
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            Kind::Binary => bytes.iter().map(|&b| char::from(b)).collect(),
            Kind::Ascii => bytes.iter().map(|&b| char::from(b & 0x7F)).collect(),
            Kind::Base64 => STANDARD.encode(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(name: &str) -> Arc<dyn Codec> {
        build(&CodecOptions {
            original_encoding: Some(name.to_string()),
            chars: None,
        })
        .unwrap()
    }

    #[test]
    fn test_utf8_round_trip() {
        let utf8 = codec("utf8");
        assert_eq!(utf8.encode("Grüße 世界"), "Grüße 世界".as_bytes());
        assert_eq!(utf8.decode("Grüße 世界".as_bytes()), "Grüße 世界");
    }

    #[test]
    fn test_utf8_malformed_input_is_substituted() {
        let utf8 = codec("utf8");
        assert_eq!(utf8.decode(&[0xFF, b'a']), "\u{FFFD}a");
    }

    #[test]
    fn test_ucs2_is_utf16le() {
        let ucs2 = codec("ucs2");
        assert_eq!(ucs2.encode("a€"), vec![0x61, 0x00, 0xAC, 0x20]);
        assert_eq!(ucs2.decode(&[0x61, 0x00, 0xAC, 0x20]), "a€");
    }

    #[test]
    fn test_ucs2_drops_trailing_odd_byte() {
        let ucs2 = codec("ucs2");
        assert_eq!(ucs2.decode(&[0x61, 0x00, 0x62]), "a");
    }

    #[test]
    fn test_ucs2_surrogate_pairs_survive() {
        let ucs2 = codec("ucs2");
        let bytes = ucs2.encode("𝄞");
        assert_eq!(bytes.len(), 4);
        assert_eq!(ucs2.decode(&bytes), "𝄞");
    }

    #[test]
    fn test_binary_maps_bytes_to_low_codepoints() {
        let binary = codec("binary");
        assert_eq!(binary.decode(&[0x00, 0x7F, 0xE9, 0xFF]), "\u{0}\u{7F}éÿ");
        assert_eq!(binary.encode("\u{0}\u{7F}éÿ"), vec![0x00, 0x7F, 0xE9, 0xFF]);
    }

    #[test]
    fn test_binary_encode_masks_to_eight_bits() {
        // U+20AC & 0xFF == 0xAC
        assert_eq!(codec("binary").encode("€"), vec![0xAC]);
    }

    #[test]
    fn test_ascii_strips_the_high_bit() {
        let ascii = codec("ascii");
        assert_eq!(ascii.encode("AB"), vec![0x41, 0x42]);
        // 0xE9 & 0x7F == 0x69 ('i')
        assert_eq!(ascii.encode("é"), vec![0x69]);
        assert_eq!(ascii.decode(&[0xC1, 0x42]), "AB");
    }

    #[test]
    fn test_base64_text_is_bytes_encoded() {
        let base64 = codec("base64");
        assert_eq!(base64.decode(b"Man"), "TWFu");
        assert_eq!(base64.encode("TWFu"), b"Man");
    }

    #[test]
    fn test_base64_encode_is_forgiving() {
        let base64 = codec("base64");
        assert_eq!(base64.encode("TW Fu\n"), b"Man");
        assert_eq!(base64.encode("TWFu=="), b"Man");
        assert_eq!(base64.encode("TWE"), b"Ma");
        // Dangling single symbol cannot carry a byte.
        assert_eq!(base64.encode("TWFuQ"), b"Man");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        for name in ["utf8", "ucs2", "binary", "ascii", "base64"] {
            let codec = codec(name);
            assert!(codec.encode("").is_empty(), "{name} encode");
            assert!(codec.decode(&[]).is_empty(), "{name} decode");
        }
    }

    #[test]
    fn test_missing_original_encoding_defaults_to_utf8() {
        let codec = build(&CodecOptions::default()).unwrap();
        assert_eq!(codec.encode("é"), "é".as_bytes());
    }

    #[test]
    fn test_unknown_primitive_is_rejected() {
        let err = build(&CodecOptions {
            original_encoding: Some("utf7".to_string()),
            chars: None,
        })
        .unwrap_err();
        assert!(matches!(err, Error::UnrecognizedEncoding { .. }));
    }
}
