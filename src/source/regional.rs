//! Regional indicator symbols.
//!
//! emojibase leaves out the 26 regional indicator letters because they are
//! only meant to be combined into flags, but every art collection ships an
//! image for each of them.

use crate::types::SourceEmoji;

/// Code point of REGIONAL INDICATOR SYMBOL LETTER A.
pub const REGIONAL_INDICATOR_BASE: u32 = 0x1F1E6;

/// Category the letters are filed under (emojibase "symbols").
pub const REGIONAL_INDICATOR_GROUP: u32 = 8;

/// Order of letter A; well past every naturally ordered emoji.
pub const REGIONAL_INDICATOR_ORDER: u32 = 9000;

/// Build the A-Z regional indicator records.
pub fn regional_indicators() -> Vec<SourceEmoji> {
    ('a'..='z')
        .zip(0u32..)
        .map(|(letter, offset)| SourceEmoji {
            hexcode: format!("{:X}", REGIONAL_INDICATOR_BASE + offset),
            group: Some(REGIONAL_INDICATOR_GROUP),
            order: Some(REGIONAL_INDICATOR_ORDER + offset),
            name: Some(format!(
                "REGIONAL INDICATOR {}",
                letter.to_ascii_uppercase()
            )),
            shortcodes: vec![format!("regional_indicator_{}", letter)],
            kind: 1,
            skins: vec![],
        })
        .collect()
}
