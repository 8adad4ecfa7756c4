use crate::{CardDef, Character, ConversionLedger, ConversionMap, EditLedger, Equipment, GodType};
use serde::{Deserialize, Serialize};

pub const MAX_EGO_LEVEL: u8 = 6;

/// A card placed into a deck. `deck_id` tells duplicate placements apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckCard {
    pub deck_id: String,
    #[serde(flatten)]
    pub def: CardDef,
    #[serde(default)]
    pub selected_hirameki_level: usize,
    #[serde(default)]
    pub selected_hidden_hirameki_id: Option<String>,
    #[serde(default)]
    pub god_hirameki_type: Option<GodType>,
    #[serde(default)]
    pub god_hirameki_effect_id: Option<String>,
}

impl DeckCard {
    pub fn new(def: CardDef, deck_id: String) -> Self {
        Self {
            deck_id,
            def,
            selected_hirameki_level: 0,
            selected_hidden_hirameki_id: None,
            god_hirameki_type: None,
            god_hirameki_effect_id: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquipmentSlots {
    pub weapon: Option<Equipment>,
    pub armor: Option<Equipment>,
    pub pendant: Option<Equipment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    #[serde(default)]
    pub character: Option<Character>,
    #[serde(default)]
    pub equipment: EquipmentSlots,
    #[serde(default)]
    pub cards: Vec<DeckCard>,
    #[serde(default)]
    pub ego_level: u8,
    #[serde(default)]
    pub has_potential: bool,
    #[serde(default)]
    pub removed_cards: EditLedger,
    #[serde(default)]
    pub copied_cards: EditLedger,
    #[serde(default)]
    pub converted_cards: ConversionLedger,
    #[serde(default)]
    pub next_serial: u64,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card(&self, deck_id: &str) -> Option<&DeckCard> {
        self.cards.iter().find(|card| card.deck_id == deck_id)
    }

    pub fn contains_card_id(&self, id: &str) -> bool {
        self.cards.iter().any(|card| card.def.id == id)
    }

    /// Where each converted card now points, for resolving converted placements.
    pub fn conversion_map(&self) -> ConversionMap {
        self.converted_cards
            .iter()
            .filter_map(|(original, entry)| {
                entry
                    .target_id()
                    .map(|target| (original.clone(), target.to_string()))
            })
            .collect()
    }

    /// Builds a fresh placement of `def` with a deck id unique within this deck.
    pub fn place(&mut self, def: &CardDef) -> DeckCard {
        let deck_id = self.mint_deck_id(&def.id);
        DeckCard::new(def.clone(), deck_id)
    }

    pub(crate) fn mint_deck_id(&mut self, card_id: &str) -> String {
        loop {
            self.next_serial += 1;
            let candidate = format!("{card_id}#{}", self.next_serial);
            if self.card(&candidate).is_none() {
                return candidate;
            }
        }
    }
}
