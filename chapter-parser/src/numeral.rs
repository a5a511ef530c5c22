//! Classical Chinese numerals as used in 第…回 chapter headings.
//!
//! Only the vocabulary of chapter headings is covered. Anything outside the
//! table falls through to a per-glyph sum, which is lossy for positional
//! numerals: 一百八 comes out as 109 and 三十 as 13.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const TWENTY: &str = "二十";
const TEN: &str = "十";

/// Numerals recognised as a whole, with their values.
const NUMERAL_TABLE: &[(&str, u32)] = &[
    ("一", 1),
    ("二", 2),
    ("三", 3),
    ("四", 4),
    ("五", 5),
    ("六", 6),
    ("七", 7),
    ("八", 8),
    ("九", 9),
    ("十", 10),
    ("十一", 11),
    ("十二", 12),
    ("十三", 13),
    ("十四", 14),
    ("十五", 15),
    ("十六", 16),
    ("十七", 17),
    ("十八", 18),
    ("十九", 19),
    ("二十", 20),
    ("二十一", 21),
    ("二十二", 22),
    ("二十三", 23),
    ("二十四", 24),
    ("二十五", 25),
    ("百", 100),
    ("零", 0),
];

static NUMERALS: Lazy<HashMap<&'static str, u32>> =
    Lazy::new(|| NUMERAL_TABLE.iter().copied().collect());

/// Table value of `numeral`, or 0 when it is not in the table.
fn lookup(numeral: &str) -> u32 {
    NUMERALS.get(numeral).copied().unwrap_or(0)
}

/// Convert a chapter-heading numeral to an integer.
///
/// Resolution order:
/// 1. exact table match (1-25, 百, 零)
/// 2. 二十 prefix: 20 plus the table value of the rest
/// 3. 十 prefix: 10 plus the table value of the rest
/// 4. sum of the table value of each glyph, unknown glyphs counting 0
pub fn parse_numeral(numeral: &str) -> u32 {
    if let Some(&value) = NUMERALS.get(numeral) {
        return value;
    }

    if let Some(rest) = numeral.strip_prefix(TWENTY) {
        if rest.is_empty() {
            return 20;
        }
        return 20 + lookup(rest);
    }

    if let Some(rest) = numeral.strip_prefix(TEN) {
        if rest.is_empty() {
            return 10;
        }
        return 10 + lookup(rest);
    }

    let mut buf = [0u8; 4];
    numeral
        .chars()
        .map(|c| lookup(c.encode_utf8(&mut buf)))
        .fold(0u32, u32::saturating_add)
}
