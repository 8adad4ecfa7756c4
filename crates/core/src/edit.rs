use crate::ledger::record_edit;
use crate::{
    CardDef, CardSnapshot, CardType, Catalog, Character, ConversionRecord, ConvertedEntry, Deck,
    DeckCard, Equipment, EquipmentType, GodType, MAX_EGO_LEVEL,
};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("no card with deck id {0}")]
    UnknownDeckCard(String),
    #[error("hirameki level {level} out of range for {card_id} (max {max})")]
    InvalidHiramekiLevel {
        card_id: String,
        level: usize,
        max: usize,
    },
    #[error("unknown hidden hirameki {0}")]
    UnknownHiddenHirameki(String),
    #[error("unknown god hirameki {0}")]
    UnknownGodHirameki(String),
    #[error("god hirameki {effect_id} does not apply to {god:?}")]
    GodHiramekiNotApplicable { effect_id: String, god: GodType },
    #[error("no god selected for {0}")]
    NoGodSelected(String),
    #[error("basic card {0} cannot take god hirameki")]
    BasicCardHasNoGodHirameki(String),
}

impl Deck {
    /// Sets the character and deals its starting cards. Edit history is kept.
    pub fn select_character(&mut self, character: &Character, catalog: &Catalog) {
        let starting: Vec<CardDef> = catalog
            .starting_cards_for(character)
            .into_iter()
            .cloned()
            .collect();
        let cards: Vec<DeckCard> = starting.iter().map(|def| self.place(def)).collect();
        self.cards = cards;
        self.character = Some(character.clone());
        debug!(
            character = %character.id,
            cards = self.cards.len(),
            "character selected"
        );
    }

    pub fn select_equipment(&mut self, equipment: &Equipment) {
        let slot = match equipment.kind {
            EquipmentType::Weapon => &mut self.equipment.weapon,
            EquipmentType::Armor => &mut self.equipment.armor,
            EquipmentType::Pendant => &mut self.equipment.pendant,
        };
        *slot = Some(equipment.clone());
        debug!(equipment = %equipment.id, "equipment selected");
    }

    /// Appends a fresh placement of `def` and returns its deck id.
    pub fn add_card(&mut self, def: &CardDef) -> String {
        let card = self.place(def);
        let deck_id = card.deck_id.clone();
        self.cards.push(card);
        debug!(card = %def.id, deck_id = %deck_id, "card added");
        deck_id
    }

    pub fn remove_card(&mut self, deck_id: &str) -> Result<DeckCard, EditError> {
        let idx = self.index_of(deck_id)?;
        let card = self.cards.remove(idx);
        record_edit(&mut self.removed_cards, &card);
        debug!(card = %card.def.id, deck_id, "card removed");
        Ok(card)
    }

    /// Duplicates a placement, selections included, right after the source.
    pub fn copy_card(&mut self, deck_id: &str) -> Result<String, EditError> {
        let idx = self.index_of(deck_id)?;
        let source = self.cards[idx].clone();
        let mut copy = source.clone();
        copy.deck_id = self.mint_deck_id(&source.def.id);
        let copy_id = copy.deck_id.clone();
        self.cards.insert(idx + 1, copy);
        record_edit(&mut self.copied_cards, &source);
        debug!(card = %source.def.id, deck_id = %copy_id, "card copied");
        Ok(copy_id)
    }

    /// Converts a placement into `target`, or only takes it out when `target`
    /// is `None` (exclusion). Returns the deck id of the new placement, if any.
    pub fn convert_card(
        &mut self,
        deck_id: &str,
        target: Option<&CardDef>,
    ) -> Result<Option<String>, EditError> {
        let idx = self.index_of(deck_id)?;
        let original = self.cards.remove(idx);
        let record = ConversionRecord {
            converted_to_id: target.map(|def| def.id.clone()),
            original: CardSnapshot::of(&original),
            excluded: target.is_none(),
        };
        self.converted_cards
            .insert(original.def.id.clone(), ConvertedEntry::Record(record));
        let added = target.map(|def| self.add_card(def));
        debug!(
            card = %original.def.id,
            target = target.map(|def| def.id.as_str()).unwrap_or("-"),
            "card converted"
        );
        Ok(added)
    }

    pub fn set_hirameki_level(&mut self, deck_id: &str, level: usize) -> Result<(), EditError> {
        let card = self.card_mut(deck_id)?;
        let max = card.def.max_hirameki_level();
        if level >= card.def.hirameki_variations.len() {
            return Err(EditError::InvalidHiramekiLevel {
                card_id: card.def.id.clone(),
                level,
                max,
            });
        }
        card.selected_hirameki_level = level;
        card.selected_hidden_hirameki_id = None;
        Ok(())
    }

    pub fn set_hidden_hirameki(
        &mut self,
        deck_id: &str,
        effect_id: Option<&str>,
        catalog: &Catalog,
    ) -> Result<(), EditError> {
        if let Some(id) = effect_id {
            if catalog.hidden_effect(id).is_none() {
                return Err(EditError::UnknownHiddenHirameki(id.to_string()));
            }
        }
        let card = self.card_mut(deck_id)?;
        card.selected_hidden_hirameki_id = effect_id.map(str::to_string);
        card.selected_hirameki_level = 0;
        Ok(())
    }

    /// Picks the god for a card's god hirameki. Any selected effect is cleared.
    pub fn set_god_hirameki(
        &mut self,
        deck_id: &str,
        god: Option<GodType>,
    ) -> Result<(), EditError> {
        let card = self.card_mut(deck_id)?;
        if god.is_some() && card.def.is_basic_card {
            return Err(EditError::BasicCardHasNoGodHirameki(card.def.id.clone()));
        }
        card.god_hirameki_type = god;
        card.god_hirameki_effect_id = None;
        Ok(())
    }

    pub fn set_god_hirameki_effect(
        &mut self,
        deck_id: &str,
        effect_id: Option<&str>,
        catalog: &Catalog,
    ) -> Result<(), EditError> {
        let card = self.card_mut(deck_id)?;
        let Some(id) = effect_id else {
            card.god_hirameki_effect_id = None;
            return Ok(());
        };
        let god = card
            .god_hirameki_type
            .ok_or_else(|| EditError::NoGodSelected(card.def.id.clone()))?;
        let effect = catalog
            .god_effect(id)
            .ok_or_else(|| EditError::UnknownGodHirameki(id.to_string()))?;
        if !effect.gods.contains(&god) {
            return Err(EditError::GodHiramekiNotApplicable {
                effect_id: id.to_string(),
                god,
            });
        }
        card.god_hirameki_effect_id = Some(id.to_string());
        Ok(())
    }

    pub fn set_ego_level(&mut self, level: u8) {
        self.ego_level = level.min(MAX_EGO_LEVEL);
    }

    pub fn toggle_potential(&mut self) {
        self.has_potential = !self.has_potential;
    }

    pub fn clear(&mut self) {
        *self = Deck::new();
    }

    fn index_of(&self, deck_id: &str) -> Result<usize, EditError> {
        self.cards
            .iter()
            .position(|card| card.deck_id == deck_id)
            .ok_or_else(|| EditError::UnknownDeckCard(deck_id.to_string()))
    }

    fn card_mut(&mut self, deck_id: &str) -> Result<&mut DeckCard, EditError> {
        let idx = self.index_of(deck_id)?;
        Ok(&mut self.cards[idx])
    }
}

/// Display order: character (starting first), shared, monster, forbidden; then by id.
pub fn sort_deck_cards(cards: &[DeckCard]) -> Vec<DeckCard> {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| {
        type_rank(a.def.kind)
            .cmp(&type_rank(b.def.kind))
            .then_with(|| starting_first(a, b))
            .then_with(|| a.def.id.cmp(&b.def.id))
    });
    sorted
}

fn type_rank(kind: CardType) -> u8 {
    match kind {
        CardType::Character => 1,
        CardType::Shared => 2,
        CardType::Monster => 3,
        CardType::Forbidden => 4,
    }
}

fn starting_first(a: &DeckCard, b: &DeckCard) -> Ordering {
    if a.def.kind != CardType::Character || b.def.kind != CardType::Character {
        return Ordering::Equal;
    }
    b.def.is_starting_card.cmp(&a.def.is_starting_card)
}
