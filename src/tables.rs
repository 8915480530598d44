//! Bundled single-byte codepage tables.
//!
//! Each table lists the codepoints for byte values 128..=255 in byte order;
//! the ASCII half is implied. Slots the codepage leaves undefined carry the
//! corresponding C1 control codepoint, so such bytes survive a decode/encode
//! round trip.

use crate::catalog::{Catalog, CatalogEntry};

/// Windows-1251 (Cyrillic).
const CP1251: &str = "ЂЃ‚ѓ„…†‡€‰Љ‹ЊЌЋЏ\
    ђ‘’“”•–—\u{98}™љ›њќћџ\
    \u{a0}ЎўЈ¤Ґ¦§Ё©Є«¬\u{ad}®Ї\
    °±Ііґµ¶·ё№є»јЅѕї\
    АБВГДЕЖЗИЙКЛМНОП\
    РСТУФХЦЧШЩЪЫЬЭЮЯ\
    абвгдежзийклмноп\
    рстуфхцчшщъыьэюя";

/// Windows-1252 (Western European).
const CP1252: &str = "€\u{81}‚ƒ„…†‡ˆ‰Š‹Œ\u{8d}Ž\u{8f}\
    \u{90}‘’“”•–—˜™š›œ\u{9d}žŸ\
    \u{a0}¡¢£¤¥¦§¨©ª«¬\u{ad}®¯\
    °±²³´µ¶·¸¹º»¼½¾¿\
    ÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏ\
    ÐÑÒÓÔÕÖ×ØÙÚÛÜÝÞß\
    àáâãäåæçèéêëìíîï\
    ðñòóôõö÷øùúûüýþÿ";

/// ISO-8859-5 (Cyrillic).
const ISO88595: &str = "\u{80}\u{81}\u{82}\u{83}\u{84}\u{85}\u{86}\u{87}\
    \u{88}\u{89}\u{8a}\u{8b}\u{8c}\u{8d}\u{8e}\u{8f}\
    \u{90}\u{91}\u{92}\u{93}\u{94}\u{95}\u{96}\u{97}\
    \u{98}\u{99}\u{9a}\u{9b}\u{9c}\u{9d}\u{9e}\u{9f}\
    \u{a0}ЁЂЃЄЅІЇЈЉЊЋЌ\u{ad}ЎЏ\
    АБВГДЕЖЗИЙКЛМНОП\
    РСТУФХЦЧШЩЪЫЬЭЮЯ\
    абвгдежзийклмноп\
    рстуфхцчшщъыьэюя\
    №ёђѓєѕіїјљњћќ§ўџ";

/// Register the bundled codepages and their aliases into `catalog`.
pub(crate) fn register_defaults(catalog: &mut Catalog) {
    catalog.register_table("cp1251", CP1251);
    catalog.register_table("cp1252", CP1252);
    catalog.register_table("iso88595", ISO88595);

    catalog.register("windows1251", CatalogEntry::Alias("cp1251".to_string()));
    catalog.register("windows1252", CatalogEntry::Alias("cp1252".to_string()));
    catalog.register("cyrillic", CatalogEntry::Alias("iso88595".to_string()));
}
