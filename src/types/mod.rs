//! Core type definitions for emojidata.

mod record;

pub use record::{
    name_from_shortcode, Availability, EmojiRecord, Position, SourceEmoji, SourceSkin,
    VariantRecord,
};
