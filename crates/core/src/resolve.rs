use crate::ledger::is_set;
use crate::{CardCategory, CardStatus, Catalog, ConversionMap, Cost, Deck, DeckCard, Variation};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// What a placement looks like once every modifier is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedCard {
    pub name: String,
    pub cost: Cost,
    pub description: String,
    pub category: CardCategory,
    pub statuses: Vec<CardStatus>,
}

/// Resolves the effective attributes of `card`.
///
/// Layers, in order: the selected variation (level 0 when the level is out of
/// range), hidden hirameki text and cost (level 0 only), the ego override, the
/// potential override, god hirameki text and cost. Fixed costs are floored at
/// zero once all layers are applied. Unknown effect ids and unknown conversion
/// targets are ignored.
pub fn resolve_card(
    card: &DeckCard,
    catalog: &Catalog,
    ego_level: u8,
    has_potential: bool,
    conversions: Option<&ConversionMap>,
) -> ResolvedCard {
    let base = conversions
        .and_then(|map| map.get(&card.def.id))
        .and_then(|target| catalog.find_card(target))
        .unwrap_or(&card.def);

    let variation: Cow<'_, Variation> = match base
        .hirameki_variations
        .get(card.selected_hirameki_level)
        .or_else(|| base.hirameki_variations.first())
    {
        Some(variation) => Cow::Borrowed(variation),
        None => Cow::Owned(Variation::default()),
    };

    let name = variation.name.clone().unwrap_or_else(|| base.name.clone());
    let category = variation.category.unwrap_or(base.category);
    let statuses = if variation.statuses.is_empty() {
        base.statuses.clone()
    } else {
        variation.statuses.clone()
    };
    let mut cost = variation.cost;
    let mut description = variation.description.clone();

    if card.selected_hirameki_level == 0 {
        let hidden = card
            .selected_hidden_hirameki_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .and_then(|id| catalog.hidden_effect(id));
        if let Some(effect) = hidden {
            append_effect(&mut description, &effect.additional_effect);
            if let Some(delta) = effect.cost_modifier {
                cost = cost.shifted(delta);
            }
        }
    }

    if let Some(ego) = variation.ego_variations.get(&ego_level) {
        description = ego.description.clone();
        if let Some(ego_cost) = ego.cost {
            cost = ego_cost;
        }
    }

    if has_potential {
        if let Some(potential) = &variation.potential_variation {
            description = potential.description.clone();
            if let Some(potential_cost) = potential.cost {
                cost = potential_cost;
            }
        }
    }

    if card.god_hirameki_type.is_some()
        && is_set(&card.god_hirameki_effect_id)
        && !card.def.is_basic_card
    {
        let god = card
            .god_hirameki_effect_id
            .as_deref()
            .and_then(|id| catalog.god_effect(id));
        if let Some(effect) = god {
            append_effect(&mut description, &effect.additional_effect);
            if let Some(delta) = effect.cost_modifier {
                cost = cost.shifted(delta);
            }
        }
    }

    ResolvedCard {
        name,
        cost: cost.floored(),
        description,
        category,
        statuses,
    }
}

/// Resolves every card in `deck` against the deck's own ego level, potential
/// flag and conversion history.
pub fn resolve_deck(deck: &Deck, catalog: &Catalog) -> Vec<ResolvedCard> {
    let conversions = deck.conversion_map();
    deck.cards
        .iter()
        .map(|card| {
            resolve_card(
                card,
                catalog,
                deck.ego_level,
                deck.has_potential,
                Some(&conversions),
            )
        })
        .collect()
}

fn append_effect(description: &mut String, effect: &str) {
    description.push('\n');
    description.push_str(effect);
}
