use crate::{AttributePoints, CardSnapshot, CardType, Catalog, Deck};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PointOrigin {
    Deck,
    Removed,
    Copied,
    Converted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PointSource {
    Acquisition(CardType),
    Hirameki,
    GodHirameki,
    /// `order` is the 1-based position of the first of `units` removals among
    /// every removal in the deck. Runs past the end of the tier table share one line.
    Removal {
        order: u32,
        units: u32,
        character: bool,
    },
    Copy { order: u32, units: u32 },
    Conversion,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointLine {
    pub card_id: String,
    pub origin: PointOrigin,
    pub source: PointSource,
    pub points: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaintMemory {
    pub total: u32,
    pub lines: Vec<PointLine>,
}

impl FaintMemory {
    fn push(&mut self, card_id: &str, origin: PointOrigin, source: PointSource, points: u32) {
        self.total = self.total.saturating_add(points);
        self.lines.push(PointLine {
            card_id: card_id.to_string(),
            origin,
            source,
            points,
        });
    }

    fn push_attributes(
        &mut self,
        card_id: &str,
        origin: PointOrigin,
        kind: CardType,
        points: AttributePoints,
    ) {
        if points.acquisition > 0 {
            self.push(card_id, origin, PointSource::Acquisition(kind), points.acquisition);
        }
        if points.hirameki > 0 {
            self.push(card_id, origin, PointSource::Hirameki, points.hirameki);
        }
        if points.god_hirameki > 0 {
            self.push(card_id, origin, PointSource::GodHirameki, points.god_hirameki);
        }
    }

    pub fn points_from(&self, origin: PointOrigin) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.origin == origin)
            .map(|line| line.points)
            .fold(0, u32::saturating_add)
    }
}

/// Splits `units` events starting at the 1-based `first` order into
/// `(order, units)` runs: one per order inside a tier table of `table_len`
/// entries, then a single run for the tail, which all scores the last tier.
fn tier_runs(table_len: usize, first: u32, units: u32) -> Vec<(u32, u32)> {
    let mut runs = Vec::new();
    let mut order = first;
    let mut left = units;
    while left > 0 {
        if (order as usize) < table_len {
            runs.push((order, 1));
            order = order.saturating_add(1);
            left -= 1;
        } else {
            runs.push((order, left));
            break;
        }
    }
    runs
}

/// Faint Memory score of `deck`.
pub fn faint_memory(deck: &Deck, catalog: &Catalog) -> u32 {
    faint_memory_breakdown(deck, catalog).total
}

/// Same as [`faint_memory`] but an absent deck scores zero.
pub fn score_optional(deck: Option<&Deck>, catalog: &Catalog) -> u32 {
    deck.map_or(0, |deck| faint_memory(deck, catalog))
}

pub fn faint_memory_breakdown(deck: &Deck, catalog: &Catalog) -> FaintMemory {
    let rules = &catalog.rules;
    let mut score = FaintMemory::default();

    for card in &deck.cards {
        let snapshot = CardSnapshot::of(card);
        score.push_attributes(
            card.id(),
            PointOrigin::Deck,
            snapshot.kind,
            snapshot.attribute_points(rules),
        );
    }

    // One counter for every removal in the deck; the tier follows ledger order.
    let mut removal_order = 0u32;
    for (card_id, entry) in &deck.removed_cards {
        let count = entry.count();
        let character = catalog
            .find_card(card_id)
            .is_some_and(|card| card.kind == CardType::Character);
        let bonus = if character {
            rules.character_removal_bonus
        } else {
            0
        };
        let first = removal_order.saturating_add(1);
        for (order, units) in tier_runs(rules.removal_tiers.len(), first, count) {
            let per_unit = rules.removal_tier(order).saturating_add(bonus);
            score.push(
                card_id,
                PointOrigin::Removed,
                PointSource::Removal {
                    order,
                    units,
                    character,
                },
                per_unit.saturating_mul(units),
            );
        }
        removal_order = removal_order.saturating_add(count);
        if let Some(snapshot) = entry.snapshot().filter(|_| count > 0) {
            score.push_attributes(
                card_id,
                PointOrigin::Removed,
                snapshot.kind,
                snapshot.attribute_points(rules),
            );
        }
    }

    let mut copy_order = 0u32;
    for (card_id, entry) in &deck.copied_cards {
        let count = entry.count();
        let first = copy_order.saturating_add(1);
        for (order, units) in tier_runs(rules.copy_tiers.len(), first, count) {
            score.push(
                card_id,
                PointOrigin::Copied,
                PointSource::Copy { order, units },
                rules.copy_tier(order).saturating_mul(units),
            );
        }
        copy_order = copy_order.saturating_add(count);
        // A live original already carries these points.
        if deck.contains_card_id(card_id) {
            continue;
        }
        if let Some(snapshot) = entry.snapshot().filter(|_| count > 0) {
            score.push_attributes(
                card_id,
                PointOrigin::Copied,
                snapshot.kind,
                snapshot.attribute_points(rules),
            );
        }
    }

    // Target-side points come from the target's own placement in the deck.
    for (card_id, entry) in &deck.converted_cards {
        if !entry.is_excluded() {
            score.push(
                card_id,
                PointOrigin::Converted,
                PointSource::Conversion,
                rules.conversion_points,
            );
        }
        if let Some(record) = entry.record() {
            score.push_attributes(
                card_id,
                PointOrigin::Converted,
                record.original.kind,
                record.original.attribute_points(rules),
            );
        }
    }

    score
}
