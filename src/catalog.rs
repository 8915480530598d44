//! Encoding catalog and codec resolution.
//!
//! The catalog is a registry from normalized encoding names to entries that
//! are either a rename ([`CatalogEntry::Alias`]), a rename plus parameters
//! ([`CatalogEntry::Options`]), or a terminal codec factory
//! ([`CatalogEntry::Factory`]). Resolution walks the links, carrying an
//! accumulated [`CodecOptions`] value, until a factory produces a codec.
//!
//! Entries are write-once: a catalog is populated before it is shared, and
//! resolution only needs `&self`. Constructed codecs are cached so repeated
//! resolution of the same name is a map lookup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Deserialize;

use crate::{Codec, Error, Result, native, singlebyte, tables};

/// Ceiling on alias/options hops before resolution fails with
/// [`Error::AliasCycle`]. Built-in chains are at most two hops deep.
const MAX_HOPS: usize = 32;

/// Normalize an encoding name: strip hyphens and spaces, lowercase.
///
/// Two names normalizing to the same string denote the same encoding.
/// Normalization is idempotent.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parameters accumulated while walking catalog links, handed to the terminal
/// factory. Each hop replaces the whole value; only the innermost link's
/// record survives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Name recorded by the innermost alias hop. Native adapters use it to
    /// pick their primitive; table codecs use it in error reports.
    pub original_encoding: Option<String>,
    /// Character table for single-byte codecs, 128 or 256 codepoints.
    pub chars: Option<String>,
}

/// Factory producing a ready codec from accumulated options.
pub type CodecFactory = fn(&CodecOptions) -> Result<Arc<dyn Codec>>;

/// A single catalog entry.
#[derive(Debug, Clone)]
pub enum CatalogEntry {
    /// Pure rename to another encoding name.
    Alias(String),
    /// Rename plus parameters for the base codec's factory.
    Options {
        /// Base codec type the parameters apply to.
        base: String,
        /// Parameters that replace any previously accumulated options.
        options: CodecOptions,
    },
    /// Terminal entry; produces the codec.
    Factory(CodecFactory),
}

/// One externally supplied encoding definition.
///
/// This is the data contract for per-charset catalogs: a definition is either
/// a pure alias (`"koi8ru": "koi8r"`) or a character table record
/// (`"cp437": {"type": "singlebyte", "chars": "..."}`). A JSON document
/// holding a map of these deserializes directly into
/// `HashMap<String, EncodingDef>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EncodingDef {
    /// Rename to another definition.
    Alias(String),
    /// Table definition for a base codec type.
    Table {
        /// Base codec type, normally `"singlebyte"`.
        #[serde(rename = "type")]
        base: String,
        /// Character table, 128 or 256 codepoints in byte order.
        chars: String,
    },
}

/// Registry of known encodings plus a cache of constructed codecs.
///
/// [`Catalog::new`] seeds the built-in names (`utf8`, `ucs2`, `binary`,
/// `ascii`, `base64`, `latin1`) and the bundled codepage tables. Additional
/// encodings are merged with the `register*` methods before the catalog is
/// shared; later registrations override earlier ones for the same name.
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
    codecs: Mutex<HashMap<String, Arc<dyn Codec>>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a catalog with the built-in encodings and bundled codepages.
    pub fn new() -> Self {
        let mut catalog = Self {
            entries: HashMap::new(),
            codecs: Mutex::new(HashMap::new()),
        };

        catalog.register("native", CatalogEntry::Factory(native::build));
        for name in ["utf8", "ucs2", "binary", "ascii", "base64"] {
            catalog.register(name, CatalogEntry::Alias("native".to_string()));
        }
        catalog.register(
            "latin1",
            CatalogEntry::Options {
                base: "native".to_string(),
                options: CodecOptions {
                    original_encoding: Some("binary".to_string()),
                    chars: None,
                },
            },
        );
        catalog.register("singlebyte", CatalogEntry::Factory(singlebyte::build));

        tables::register_defaults(&mut catalog);
        catalog
    }

    /// Register `entry` under `name` (normalized). Overrides any existing
    /// entry for the same name.
    pub fn register(&mut self, name: &str, entry: CatalogEntry) {
        self.entries.insert(normalize(name), entry);
    }

    /// Register a single-byte codepage from a 128- or 256-codepoint character
    /// table. The table length is validated when the codec is first resolved.
    pub fn register_table(&mut self, name: &str, chars: &str) {
        let name = normalize(name);
        self.entries.insert(
            name.clone(),
            CatalogEntry::Options {
                base: "singlebyte".to_string(),
                options: CodecOptions {
                    original_encoding: Some(name),
                    chars: Some(chars.to_string()),
                },
            },
        );
    }

    /// Merge a set of external definitions, e.g. deserialized from a JSON
    /// codepage catalog. Later definitions override earlier ones.
    pub fn register_defs(&mut self, defs: &HashMap<String, EncodingDef>) {
        for (name, def) in defs {
            match def {
                EncodingDef::Alias(target) => {
                    self.register(name, CatalogEntry::Alias(target.clone()));
                }
                EncodingDef::Table { base, chars } => {
                    let name = normalize(name);
                    self.entries.insert(
                        name.clone(),
                        CatalogEntry::Options {
                            base: normalize(base),
                            options: CodecOptions {
                                original_encoding: Some(name),
                                chars: Some(chars.clone()),
                            },
                        },
                    );
                }
            }
        }
    }

    /// Iterate the registered names and their entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Resolve an encoding name to a ready codec.
    ///
    /// An empty name defaults to `"utf8"`. The name is normalized, then
    /// alias/options links are followed (re-normalizing at every step) until a
    /// factory is reached. Instances are cached per normalized requested name,
    /// and at most one construction runs per name even under concurrent
    /// resolution.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Codec>> {
        let requested = if name.is_empty() { "utf8" } else { name };
        let key = normalize(requested);

        let mut cache = lock_poison_free(&self.codecs);
        if let Some(codec) = cache.get(&key) {
            return Ok(Arc::clone(codec));
        }

        let codec = self.construct(requested, &key)?;
        cache.insert(key, Arc::clone(&codec));
        Ok(codec)
    }

    fn construct(&self, requested: &str, start: &str) -> Result<Arc<dyn Codec>> {
        let mut current = start.to_string();
        let mut options = CodecOptions::default();

        for _ in 0..MAX_HOPS {
            let Some(entry) = self.entries.get(&current) else {
                return Err(Error::UnrecognizedEncoding {
                    requested: requested.to_string(),
                    searched_as: current,
                });
            };

            match entry {
                CatalogEntry::Alias(target) => {
                    options = CodecOptions {
                        original_encoding: Some(current.clone()),
                        chars: None,
                    };
                    current = normalize(target);
                }
                CatalogEntry::Options {
                    base,
                    options: extra,
                } => {
                    options = extra.clone();
                    current = normalize(base);
                }
                CatalogEntry::Factory(build) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(requested, terminal = current.as_str(), "constructing codec");
                    return build(&options);
                }
            }
        }

        Err(Error::AliasCycle {
            requested: requested.to_string(),
            hops: MAX_HOPS,
        })
    }
}

fn lock_poison_free<'a, T>(mutex: &'a Mutex<T>) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
