//! Edit history kept alongside a deck.
//!
//! Ledgers are insertion-ordered maps keyed by the original card id. The
//! removal and copy tiers are assigned by walking a ledger front to back, so
//! the stored order is part of the score.

use crate::{CardType, DeckCard, FaintMemoryRules, GodType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type EditLedger = IndexMap<String, EditEntry>;
pub type ConversionLedger = IndexMap<String, ConvertedEntry>;
/// Original card id to the id it was converted into.
pub type ConversionMap = HashMap<String, String>;

/// Attribute state of a card captured when it was edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardSnapshot {
    #[serde(rename = "type", alias = "original_type")]
    pub kind: CardType,
    #[serde(default)]
    pub selected_hirameki_level: usize,
    #[serde(default)]
    pub selected_hidden_hirameki_id: Option<String>,
    #[serde(default)]
    pub god_hirameki_type: Option<GodType>,
    #[serde(default)]
    pub god_hirameki_effect_id: Option<String>,
    #[serde(default)]
    pub is_basic_card: bool,
}

impl CardSnapshot {
    pub fn of(card: &DeckCard) -> Self {
        Self {
            kind: card.def.kind,
            selected_hirameki_level: card.selected_hirameki_level,
            selected_hidden_hirameki_id: card.selected_hidden_hirameki_id.clone(),
            god_hirameki_type: card.god_hirameki_type,
            god_hirameki_effect_id: card.god_hirameki_effect_id.clone(),
            is_basic_card: card.def.is_basic_card,
        }
    }

    pub fn has_hirameki(&self) -> bool {
        self.selected_hirameki_level > 0 || is_set(&self.selected_hidden_hirameki_id)
    }

    pub fn has_god_hirameki(&self) -> bool {
        self.god_hirameki_type.is_some()
            && is_set(&self.god_hirameki_effect_id)
            && !self.is_basic_card
    }

    /// Type, hirameki and god hirameki points carried by this card state.
    pub fn attribute_points(&self, rules: &FaintMemoryRules) -> AttributePoints {
        AttributePoints {
            acquisition: rules.acquisition_points(self.kind),
            hirameki: if self.kind.counts_hirameki() && self.has_hirameki() {
                rules.hirameki_points
            } else {
                0
            },
            god_hirameki: if self.has_god_hirameki() {
                rules.god_hirameki_points
            } else {
                0
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributePoints {
    pub acquisition: u32,
    pub hirameki: u32,
    pub god_hirameki: u32,
}

impl AttributePoints {
    pub fn total(&self) -> u32 {
        self.acquisition
            .saturating_add(self.hirameki)
            .saturating_add(self.god_hirameki)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotEntry {
    #[serde(default)]
    pub count: u32,
    #[serde(flatten)]
    pub card: CardSnapshot,
}

/// A removal or copy record. Old saves stored only the count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EditEntry {
    Count(u32),
    Snapshot(SnapshotEntry),
}

impl EditEntry {
    pub fn count(&self) -> u32 {
        match self {
            EditEntry::Count(count) => *count,
            EditEntry::Snapshot(entry) => entry.count,
        }
    }

    pub fn snapshot(&self) -> Option<&CardSnapshot> {
        match self {
            EditEntry::Count(_) => None,
            EditEntry::Snapshot(entry) => Some(&entry.card),
        }
    }

    /// Counts one more edit of `card`. A snapshot keeps its first captured state;
    /// a bare count is upgraded to a snapshot of `card`.
    pub fn bump(&mut self, card: &DeckCard) {
        match self {
            EditEntry::Count(count) => {
                *self = EditEntry::Snapshot(SnapshotEntry {
                    count: count.saturating_add(1),
                    card: CardSnapshot::of(card),
                });
            }
            EditEntry::Snapshot(entry) => entry.count = entry.count.saturating_add(1),
        }
    }

    pub fn first(card: &DeckCard) -> Self {
        EditEntry::Snapshot(SnapshotEntry {
            count: 1,
            card: CardSnapshot::of(card),
        })
    }
}

pub(crate) fn record_edit(ledger: &mut EditLedger, card: &DeckCard) {
    match ledger.get_mut(&card.def.id) {
        Some(entry) => entry.bump(card),
        None => {
            ledger.insert(card.def.id.clone(), EditEntry::first(card));
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversionRecord {
    #[serde(default)]
    pub converted_to_id: Option<String>,
    #[serde(flatten)]
    pub original: CardSnapshot,
    /// Converted into nothing: the card was only taken out of the deck.
    #[serde(default)]
    pub excluded: bool,
}

/// A conversion record. Old saves stored only the target id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ConvertedEntry {
    Legacy(String),
    Record(ConversionRecord),
}

impl ConvertedEntry {
    pub fn record(&self) -> Option<&ConversionRecord> {
        match self {
            ConvertedEntry::Legacy(_) => None,
            ConvertedEntry::Record(record) => Some(record),
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.record().is_some_and(|record| record.excluded)
    }

    pub fn target_id(&self) -> Option<&str> {
        match self {
            ConvertedEntry::Legacy(target) if !target.is_empty() => Some(target),
            ConvertedEntry::Legacy(_) => None,
            ConvertedEntry::Record(record) if record.excluded => None,
            ConvertedEntry::Record(record) => record.converted_to_id.as_deref(),
        }
    }
}

pub(crate) fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.is_empty())
}
