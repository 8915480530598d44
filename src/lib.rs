//! # CharConv - Charset Conversion Library
//!
//! A character encoding conversion library for applications that must read and
//! write legacy and non-default text encodings without relying on a platform's
//! built-in conversion routines.
//!
//! ## Features
//!
//! - **Alias-aware codec resolution** through a declarative encoding catalog
//! - **Single-byte codepage engine** with precomputed lookup tables
//! - **Native Unicode primitives** (UTF-8, UTF-16LE, binary, ASCII, Base64)
//! - **Total conversions** - unmappable input is substituted, never fatal
//! - **Thread-safe** catalogs with construct-once codec caching
//! - **Extensible** via external codepage table definitions
//!
//! ## Quick Start
//!
//! ```rust
//! // Encode Unicode text as Windows-1252 bytes and back
//! let bytes = charconv::encode("héllo", "CP-1252")?;
//! assert_eq!(bytes, b"h\xE9llo");
//!
//! let text = charconv::decode(&bytes, "cp1252")?;
//! assert_eq!(text, "héllo");
//! # Ok::<(), charconv::Error>(())
//! ```

#![deny(missing_docs)]

use std::fmt;
use std::sync::{Arc, OnceLock};

pub mod catalog;
mod native;
pub mod singlebyte;
mod tables;

pub use catalog::{Catalog, CatalogEntry, CodecFactory, CodecOptions, EncodingDef, normalize};
pub use singlebyte::SingleByteCodec;

/// Result type for encoding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Byte emitted by the single-byte codec for codepoints absent from a
/// character table (`'?'`).
pub const SUBSTITUTE_BYTE: u8 = b'?';

/// Text unit emitted by the native decode paths for malformed byte sequences.
pub const SUBSTITUTE_CHAR: char = '\u{FFFD}';

/// Errors that can occur while resolving an encoding name or constructing a
/// codec. Conversion itself never fails; see [`Codec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A name (or the end of an alias chain) has no catalog entry
    UnrecognizedEncoding {
        /// The name as originally requested
        requested: String,
        /// The normalized name the lookup failed on
        searched_as: String,
    },
    /// A single-byte character table was not 128 or 256 codepoints long
    InvalidCharacterTable {
        /// Name of the encoding the table belongs to
        encoding: String,
        /// The offending table length
        length: usize,
    },
    /// Alias resolution exceeded the hop ceiling without reaching a codec
    AliasCycle {
        /// The name as originally requested
        requested: String,
        /// Number of catalog links followed before giving up
        hops: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnrecognizedEncoding {
                requested,
                searched_as,
            } => {
                write!(
                    f,
                    "Encoding not recognized: '{}' (searched as: '{}')",
                    requested, searched_as
                )
            }
            Error::InvalidCharacterTable { encoding, length } => {
                write!(
                    f,
                    "Encoding '{}' has an invalid character table of length {} (must be 128 or 256)",
                    encoding, length
                )
            }
            Error::AliasCycle { requested, hops } => {
                write!(
                    f,
                    "Alias chain for '{}' did not terminate after {} hops",
                    requested, hops
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// Bidirectional converter between Unicode text and encoded bytes.
///
/// Codecs are stateless with respect to call sequence; the only state they own
/// is immutable lookup data precomputed at construction, so a single instance
/// is safe to share across threads. Both directions are total: input that has
/// no mapping is replaced with [`SUBSTITUTE_BYTE`] or the codec's placeholder
/// text unit rather than reported as an error.
pub trait Codec: Send + Sync + std::fmt::Debug {
    /// Convert text to bytes in this codec's encoding. Empty text yields
    /// zero-length output.
    fn encode(&self, text: &str) -> Vec<u8>;

    /// Convert bytes in this codec's encoding to text. Empty input yields
    /// empty text.
    fn decode(&self, bytes: &[u8]) -> String;
}

fn default_catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::new)
}

/// Encode `text` as bytes in the named encoding.
///
/// An empty `encoding` defaults to `"utf8"`. Names are matched case-,
/// hyphen- and space-insensitively. Fails only if the name does not resolve.
pub fn encode(text: &str, encoding: &str) -> Result<Vec<u8>> {
    Ok(codec_for(encoding)?.encode(text))
}

/// Decode bytes in the named encoding to text.
///
/// An empty `encoding` defaults to `"utf8"`. Names are matched case-,
/// hyphen- and space-insensitively. Fails only if the name does not resolve.
pub fn decode(bytes: &[u8], encoding: &str) -> Result<String> {
    Ok(codec_for(encoding)?.decode(bytes))
}

/// Resolve an encoding name to a ready codec from the process-wide catalog.
///
/// Callers converting repeatedly under one encoding should hold on to the
/// returned codec to skip repeated resolution.
pub fn codec_for(encoding: &str) -> Result<Arc<dyn Codec>> {
    default_catalog().resolve(encoding)
}
