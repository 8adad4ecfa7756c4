use cznde_core::Deck;
use serde::{Deserialize, Serialize};

pub const CHARACTERS_FILE: &str = "characters.json";
pub const CHARACTER_CARDS_FILE: &str = "character_cards.json";
pub const CARDS_FILE: &str = "cards.json";
pub const EQUIPMENT_FILE: &str = "equipment.json";
pub const HIDDEN_HIRAMEKI_FILE: &str = "hidden_hirameki.json";
pub const GOD_HIRAMEKI_FILE: &str = "god_hirameki.json";
pub const RULES_FILE: &str = "rules.json";

pub const DECK_SCHEMA_VERSION: u32 = 1;

/// On-disk form of a named deck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedDeck {
    pub version: u32,
    pub name: String,
    pub deck: Deck,
}
