//! The compile pass.
//!
//! Turns loaded sources into fully populated records in one sequential
//! pass. All mutable state (grid cursor, collection totals) lives in a
//! `CompileContext` so a pass never depends on anything outside its inputs.
//!
//! Cells are allocated per emoji in this order: each skin variant in source
//! order, then the emoji itself.

pub mod grid;
pub mod probe;
pub mod shortcodes;

use serde_json::Value;

use crate::error::{EmojiError, Result};
use crate::source::{Overrides, Sources};
use crate::types::{Availability, EmojiRecord, SourceEmoji, SourceSkin, VariantRecord};

pub use grid::{GridAllocator, GridSize};
pub use probe::{noto_key, AssetIndex, Collection, CollectionCounts, Prober};
pub use shortcodes::{canonicalize, merge_overrides, name_key, rank_by_name, suppress_name};

/// The compiled dataset, ready to be emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct EmojiData {
    pub grid: GridSize,
    pub counts: CollectionCounts,
    pub categories: Value,
    pub records: Vec<EmojiRecord>,
}

impl EmojiData {
    /// Emoji plus skin variants.
    pub fn item_count(&self) -> usize {
        self.records.iter().map(|r| 1 + r.variants.len()).sum()
    }

    pub fn variant_count(&self) -> usize {
        self.records.iter().map(|r| r.variants.len()).sum()
    }
}

/// State threaded through one compile pass.
pub struct CompileContext<'a> {
    overrides: &'a Overrides,
    prober: &'a Prober,
    grid: GridAllocator,
    counts: CollectionCounts,
}

impl<'a> CompileContext<'a> {
    /// Size the grid for `items` cells.
    pub fn new(overrides: &'a Overrides, prober: &'a Prober, items: usize) -> Self {
        Self {
            overrides,
            prober,
            grid: GridAllocator::for_count(items),
            counts: CollectionCounts::new(),
        }
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid.size()
    }

    pub fn counts(&self) -> CollectionCounts {
        self.counts
    }

    /// Compile one emoji and its variants.
    pub fn compile_emoji(&mut self, emoji: &SourceEmoji) -> Result<EmojiRecord> {
        let variants = emoji
            .skins
            .iter()
            .map(|skin| self.compile_variant(skin))
            .collect::<Result<Vec<_>>>()?;

        let position = self.grid.allocate();
        let shortcodes = self.shortcodes_for(&emoji.hexcode, &emoji.shortcodes, emoji.name.as_deref())?;
        let name = suppress_name(emoji.name.as_deref(), &shortcodes[0]);
        let availability = self.probe(&emoji.hexcode);

        Ok(EmojiRecord {
            key: emoji.hexcode.to_lowercase(),
            group: emoji.group,
            order: emoji.order,
            name,
            shortcodes,
            kind: emoji.kind,
            position,
            availability,
            variants,
        })
    }

    fn compile_variant(&mut self, skin: &SourceSkin) -> Result<VariantRecord> {
        let position = self.grid.allocate();
        let shortcodes = self.shortcodes_for(&skin.hexcode, &skin.shortcodes, skin.name.as_deref())?;
        let availability = self.probe(&skin.hexcode);

        Ok(VariantRecord {
            key: skin.hexcode.to_lowercase(),
            position,
            availability,
            tone: skin.tone.clone(),
            shortcodes,
            kind: skin.kind,
        })
    }

    fn shortcodes_for(
        &self,
        hexcode: &str,
        codes: &[String],
        name: Option<&str>,
    ) -> Result<Vec<String>> {
        let extra = self.overrides.get(hexcode).map(Vec::as_slice);
        let shortcodes = canonicalize(codes, extra, name);
        if shortcodes.is_empty() {
            return Err(EmojiError::Parse {
                message: format!("Emoji '{}' has no shortcodes", hexcode),
                help: Some("Add at least one shortcode for it to the extra shortcodes file".to_string()),
            });
        }
        Ok(shortcodes)
    }

    fn probe(&mut self, hexcode: &str) -> Availability {
        let mask = self.prober.probe(hexcode);
        self.counts.add(mask);
        mask
    }
}

/// Run the full pass over `sources`.
pub fn compile(sources: &Sources, prober: &Prober) -> Result<EmojiData> {
    let items = sources.emoji.iter().map(SourceEmoji::cell_count).sum();
    let mut ctx = CompileContext::new(&sources.overrides, prober, items);

    let records = sources
        .emoji
        .iter()
        .map(|emoji| ctx.compile_emoji(emoji))
        .collect::<Result<Vec<_>>>()?;

    Ok(EmojiData {
        grid: ctx.grid_size(),
        counts: ctx.counts(),
        categories: sources.categories.clone(),
        records,
    })
}
