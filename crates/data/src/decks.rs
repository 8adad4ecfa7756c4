use crate::load::load_json;
use crate::schema::{SavedDeck, DECK_SCHEMA_VERSION};
use anyhow::{bail, Context};
use cznde_core::Deck;
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn save_deck_file(name: &str, deck: &Deck, path: &Path) -> anyhow::Result<()> {
    let payload = SavedDeck {
        version: DECK_SCHEMA_VERSION,
        name: name.to_string(),
        deck: deck.clone(),
    };
    let body = serde_json::to_string_pretty(&payload)
        .with_context(|| format!("serialize deck {name}"))?;
    fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
    debug!(deck = name, path = %path.display(), "deck saved");
    Ok(())
}

/// Reads a deck file. Ledger order in the file is kept, so the score after a
/// reload matches the score before saving.
pub fn load_deck_file(path: &Path) -> anyhow::Result<SavedDeck> {
    let saved: SavedDeck = load_json(path)?;
    if saved.version != DECK_SCHEMA_VERSION {
        bail!(
            "unsupported deck version {} in {} (expected {})",
            saved.version,
            path.display(),
            DECK_SCHEMA_VERSION
        );
    }
    debug!(
        deck = %saved.name,
        cards = saved.deck.cards.len(),
        "deck loaded"
    );
    Ok(saved)
}
