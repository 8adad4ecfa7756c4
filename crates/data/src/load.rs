use crate::schema::{
    CARDS_FILE, CHARACTERS_FILE, CHARACTER_CARDS_FILE, EQUIPMENT_FILE, GOD_HIRAMEKI_FILE,
    HIDDEN_HIRAMEKI_FILE, RULES_FILE,
};
use anyhow::{bail, Context};
use cznde_core::{
    CardDef, CardType, Catalog, Character, Equipment, FaintMemoryRules, GodHiramekiEffect,
    HiddenHiramekiEffect,
};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Loads the static catalog from `dir` and validates it.
///
/// Character cards come first in the card list, followed by shared, monster
/// and forbidden cards. `rules.json` is optional.
pub fn load_catalog(dir: &Path) -> anyhow::Result<Catalog> {
    let characters: Vec<Character> = load_json(dir.join(CHARACTERS_FILE))?;
    let mut cards: Vec<CardDef> = load_json(dir.join(CHARACTER_CARDS_FILE))?;
    let other_cards: Vec<CardDef> = load_json(dir.join(CARDS_FILE))?;
    cards.extend(other_cards);
    let equipment: Vec<Equipment> = load_json(dir.join(EQUIPMENT_FILE))?;
    let hidden_effects: Vec<HiddenHiramekiEffect> =
        load_optional_json(&dir.join(HIDDEN_HIRAMEKI_FILE))?.unwrap_or_default();
    let god_effects: Vec<GodHiramekiEffect> =
        load_optional_json(&dir.join(GOD_HIRAMEKI_FILE))?.unwrap_or_default();
    let rules: FaintMemoryRules = load_optional_json(&dir.join(RULES_FILE))?.unwrap_or_default();

    let catalog = Catalog {
        characters,
        cards,
        equipment,
        hidden_effects,
        god_effects,
        rules,
    };
    let warnings = validate_catalog(&catalog)?;
    for warning in &warnings {
        warn!("{warning}");
    }
    debug!(
        dir = %dir.display(),
        characters = catalog.characters.len(),
        cards = catalog.cards.len(),
        equipment = catalog.equipment.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Rejects catalogs the engine cannot work with and returns softer findings as warnings.
pub fn validate_catalog(catalog: &Catalog) -> anyhow::Result<Vec<String>> {
    unique_ids("card", catalog.cards.iter().map(|card| card.id.as_str()))?;
    unique_ids(
        "character",
        catalog.characters.iter().map(|character| character.id.as_str()),
    )?;
    unique_ids("equipment", catalog.equipment.iter().map(|item| item.id.as_str()))?;
    unique_ids(
        "hidden hirameki",
        catalog.hidden_effects.iter().map(|effect| effect.id.as_str()),
    )?;
    unique_ids(
        "god hirameki",
        catalog.god_effects.iter().map(|effect| effect.id.as_str()),
    )?;

    for card in &catalog.cards {
        if card.hirameki_variations.is_empty() {
            bail!("card {} has no hirameki variations", card.id);
        }
    }

    let mut warnings = Vec::new();
    for character in &catalog.characters {
        let refs = character
            .starting_cards
            .iter()
            .chain(character.hirameki_cards.iter());
        for card_id in refs {
            match catalog.find_card(card_id) {
                None => warnings.push(format!(
                    "character {} references missing card {}",
                    character.id, card_id
                )),
                Some(card) if card.kind != CardType::Character => warnings.push(format!(
                    "character {} references non-character card {}",
                    character.id, card_id
                )),
                Some(_) => {}
            }
        }
    }
    Ok(warnings)
}

fn unique_ids<'a>(label: &str, ids: impl Iterator<Item = &'a str>) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            bail!("duplicate {label} id {id}");
        }
    }
    Ok(())
}

pub(crate) fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

fn load_optional_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    load_json(path).map(Some)
}
