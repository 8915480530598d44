//! Single-byte table codec: 256-symbol character sets mapped to and from
//! Unicode through lookup tables precomputed at construction.
//!
//! The forward table maps each byte value to its codepoint; the reverse table
//! covers the Basic Multilingual Plane and maps each codepoint back to its
//! byte, defaulting to [`SUBSTITUTE_BYTE`] for codepoints the character set
//! cannot represent. Both conversion directions are single-pass table lookups
//! over presized buffers and never fail.

use std::sync::Arc;

use crate::catalog::CodecOptions;
use crate::{Codec, Error, Result, SUBSTITUTE_BYTE};

/// Reverse-table coverage: one slot per BMP codepoint.
const REVERSE_LEN: usize = 0x10000;

/// Codec for a single-byte character set, built from a character table of 128
/// or 256 codepoints.
///
/// A 256-entry table defines all byte values directly. A 128-entry table
/// defines byte values 128..=255, with bytes 0..=127 taken from the ASCII
/// control and printable set; the table in effect is always 256 entries.
#[derive(Debug)]
pub struct SingleByteCodec {
    forward: [char; 256],
    reverse: Box<[u8]>,
}

/// Factory registered under `"singlebyte"`; requires `options.chars`.
pub(crate) fn build(options: &CodecOptions) -> Result<Arc<dyn Codec>> {
    let name = options.original_encoding.as_deref().unwrap_or("singlebyte");
    let chars = options.chars.as_deref().unwrap_or("");
    Ok(Arc::new(SingleByteCodec::new(name, chars)?))
}

impl SingleByteCodec {
    /// Build a codec from `table`, a string of exactly 128 or 256 codepoints
    /// where position equals byte value. Any other length fails with
    /// [`Error::InvalidCharacterTable`]; `name` only appears in that error.
    pub fn new(name: &str, table: &str) -> Result<Self> {
        let mut forward = ['\0'; 256];

        let offset = match table.chars().count() {
            256 => 0,
            128 => {
                for byte in 0..128 {
                    forward[byte] = char::from(byte as u8);
                }
                128
            }
            length => {
                return Err(Error::InvalidCharacterTable {
                    encoding: name.to_string(),
                    length,
                });
            }
        };
        for (i, ch) in table.chars().enumerate() {
            forward[offset + i] = ch;
        }

        // Ascending byte order: the highest byte position wins when the table
        // holds a codepoint more than once.
        let mut reverse = vec![SUBSTITUTE_BYTE; REVERSE_LEN].into_boxed_slice();
        for (byte, &ch) in forward.iter().enumerate() {
            let codepoint = ch as usize;
            if codepoint < REVERSE_LEN {
                reverse[codepoint] = byte as u8;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(encoding = name, "built single-byte lookup tables");

        Ok(Self { forward, reverse })
    }
}

impl Codec for SingleByteCodec {
    fn encode(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let codepoint = ch as usize;
            out.push(if codepoint < REVERSE_LEN {
                self.reverse[codepoint]
            } else {
                SUBSTITUTE_BYTE
            });
        }
        out
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len());
        for &byte in bytes {
            out.push(self.forward[byte as usize]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 128-entry table with '€' at byte 128 and distinct filler above it.
    fn euro_table() -> String {
        std::iter::once('€')
            .chain((1u32..128).map(|i| char::from_u32(0x2500 + i).unwrap()))
            .collect()
    }

    #[test]
    fn test_128_table_gets_ascii_prefix() {
        let codec = SingleByteCodec::new("euro", &euro_table()).unwrap();
        let ascii: Vec<u8> = (0..128).collect();
        let decoded = codec.decode(&ascii);
        assert_eq!(
            decoded,
            (0..128u32).map(|cp| char::from_u32(cp).unwrap()).collect::<String>()
        );
        assert_eq!(codec.encode("Hello"), b"Hello");
    }

    #[test]
    fn test_high_half_starts_at_byte_128() {
        let codec = SingleByteCodec::new("euro", &euro_table()).unwrap();
        assert_eq!(codec.encode("€"), vec![128]);
        assert_eq!(codec.decode(&[128]), "€");
    }

    #[test]
    fn test_invalid_table_length_is_rejected() {
        let err = SingleByteCodec::new("cp100", &"x".repeat(100)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCharacterTable {
                encoding: "cp100".to_string(),
                length: 100,
            }
        );
    }

    #[test]
    fn test_unmappable_codepoint_becomes_substitute_byte() {
        let codec = SingleByteCodec::new("euro", &euro_table()).unwrap();
        assert_eq!(codec.encode("中"), vec![SUBSTITUTE_BYTE]);
        assert_eq!(codec.encode("a中b"), vec![b'a', SUBSTITUTE_BYTE, b'b']);
    }

    #[test]
    fn test_astral_codepoint_is_one_substitute_byte() {
        let codec = SingleByteCodec::new("euro", &euro_table()).unwrap();
        assert_eq!(codec.encode("😀"), vec![SUBSTITUTE_BYTE]);
    }

    #[test]
    fn test_output_length_matches_input_units() {
        let codec = SingleByteCodec::new("euro", &euro_table()).unwrap();
        let text = "a€中😀z";
        assert_eq!(codec.encode(text).len(), text.chars().count());
        assert_eq!(codec.decode(&[0x00, 0x41, 0x80, 0xFF]).chars().count(), 4);
    }

    #[test]
    fn test_duplicate_codepoint_highest_byte_wins() {
        let mut table: Vec<char> = (0..256u32)
            .map(|cp| char::from_u32(0x400 + cp).unwrap())
            .collect();
        table[5] = 'X';
        table[200] = 'X';
        let codec = SingleByteCodec::new("dup", &table.iter().collect::<String>()).unwrap();
        assert_eq!(codec.encode("X"), vec![200]);
    }

    #[test]
    fn test_injective_table_round_trips_all_bytes() {
        let table: String = (0..256u32)
            .map(|cp| char::from_u32(0x100 + cp).unwrap())
            .collect();
        let codec = SingleByteCodec::new("shift", &table).unwrap();

        let all_bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(codec.encode(&codec.decode(&all_bytes)), all_bytes);
    }

    #[test]
    fn test_empty_input() {
        let codec = SingleByteCodec::new("euro", &euro_table()).unwrap();
        assert!(codec.encode("").is_empty());
        assert!(codec.decode(&[]).is_empty());
    }

    #[test]
    fn test_factory_requires_a_table() {
        let err = build(&CodecOptions::default()).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCharacterTable {
                encoding: "singlebyte".to_string(),
                length: 0,
            }
        );
    }
}
