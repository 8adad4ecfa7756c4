use cznde_core::{
    resolve_card, resolve_deck, CardCategory, CardDef, CardStatus, CardType, Catalog,
    ConversionMap, ConversionRecord, ConvertedEntry, Cost, Deck, DeckCard, GodHiramekiEffect,
    GodType, HiddenHiramekiEffect, Scope, TextOverride, Variation,
};
use std::collections::BTreeMap;

fn variation(cost: Cost, description: &str) -> Variation {
    Variation {
        cost,
        description: description.to_string(),
        ..Variation::default()
    }
}

fn card_def(id: &str, variations: Vec<Variation>) -> CardDef {
    CardDef {
        id: id.to_string(),
        name: format!("{id} name"),
        kind: CardType::Shared,
        category: CardCategory::Skill,
        statuses: vec![CardStatus::Retain],
        is_basic_card: false,
        is_starting_card: false,
        allowed_jobs: Scope::All,
        hirameki_variations: variations,
    }
}

fn placed(def: CardDef) -> DeckCard {
    DeckCard::new(def, "deck_test_1".to_string())
}

fn catalog() -> Catalog {
    Catalog {
        cards: vec![card_def(
            "shared_target",
            vec![variation(Cost::Fixed(4), "Target description")],
        )],
        hidden_effects: vec![
            HiddenHiramekiEffect {
                id: "hidden_draw".to_string(),
                additional_effect: "Draw 1".to_string(),
                cost_modifier: None,
            },
            HiddenHiramekiEffect {
                id: "hidden_cheap".to_string(),
                additional_effect: "Cost -3".to_string(),
                cost_modifier: Some(-3),
            },
        ],
        god_effects: vec![GodHiramekiEffect {
            id: "god_plus".to_string(),
            gods: Scope::All,
            additional_effect: "Damage +20%".to_string(),
            cost_modifier: Some(1),
        }],
        ..Catalog::default()
    }
}

fn two_level_card() -> DeckCard {
    placed(card_def(
        "test_card",
        vec![
            variation(Cost::Fixed(1), "Base description"),
            variation(Cost::Fixed(2), "Hirameki Lv1 description"),
        ],
    ))
}

#[test]
fn base_level_uses_base_variation_and_card_fields() {
    let info = resolve_card(&two_level_card(), &catalog(), 0, false, None);
    assert_eq!(info.name, "test_card name");
    assert_eq!(info.cost, Cost::Fixed(1));
    assert_eq!(info.description, "Base description");
    assert_eq!(info.category, CardCategory::Skill);
    assert_eq!(info.statuses, vec![CardStatus::Retain]);
}

#[test]
fn selected_level_uses_its_variation() {
    let mut card = two_level_card();
    card.selected_hirameki_level = 1;
    let info = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(info.cost, Cost::Fixed(2));
    assert_eq!(info.description, "Hirameki Lv1 description");
}

#[test]
fn out_of_range_level_falls_back_to_base() {
    let mut card = two_level_card();
    card.selected_hirameki_level = 9;
    let info = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(info.cost, Cost::Fixed(1));
    assert_eq!(info.description, "Base description");
}

#[test]
fn card_without_variations_still_resolves() {
    let card = placed(card_def("empty", Vec::new()));
    let info = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(info.name, "empty name");
    assert_eq!(info.cost, Cost::Fixed(0));
    assert_eq!(info.description, "");
}

#[test]
fn variation_overrides_name_category_and_statuses() {
    let mut lv1 = variation(Cost::Fixed(2), "Renamed");
    lv1.name = Some("Renamed card".to_string());
    lv1.category = Some(CardCategory::Attack);
    lv1.statuses = vec![CardStatus::Exhaust, CardStatus::Initiative];
    let mut card = placed(card_def(
        "renamed",
        vec![variation(Cost::Fixed(1), "Base"), lv1],
    ));
    card.selected_hirameki_level = 1;

    let info = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(info.name, "Renamed card");
    assert_eq!(info.category, CardCategory::Attack);
    assert_eq!(
        info.statuses,
        vec![CardStatus::Exhaust, CardStatus::Initiative]
    );
}

#[test]
fn hidden_hirameki_appends_at_level_zero() {
    let mut card = two_level_card();
    card.selected_hidden_hirameki_id = Some("hidden_draw".to_string());
    let info = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(info.description, "Base description\nDraw 1");
    assert_eq!(info.cost, Cost::Fixed(1));
}

#[test]
fn hidden_hirameki_is_ignored_above_level_zero() {
    let mut card = two_level_card();
    card.selected_hirameki_level = 1;
    card.selected_hidden_hirameki_id = Some("hidden_draw".to_string());
    let info = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(info.cost, Cost::Fixed(2));
    assert_eq!(info.description, "Hirameki Lv1 description");
    assert!(!info.description.contains("Draw 1"));
}

#[test]
fn unknown_effect_ids_change_nothing() {
    let mut card = two_level_card();
    card.selected_hidden_hirameki_id = Some("missing".to_string());
    card.god_hirameki_type = Some(GodType::Dialos);
    card.god_hirameki_effect_id = Some("missing".to_string());
    let info = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(info.description, "Base description");
    assert_eq!(info.cost, Cost::Fixed(1));
}

#[test]
fn potential_wins_over_ego() {
    let mut base = variation(Cost::Fixed(1), "Base");
    base.ego_variations = BTreeMap::from([(
        3,
        TextOverride {
            description: "Ego 3".to_string(),
            cost: Some(Cost::Fixed(7)),
        },
    )]);
    base.potential_variation = Some(TextOverride {
        description: "Potential".to_string(),
        cost: Some(Cost::Fixed(8)),
    });
    let card = placed(card_def("ego_card", vec![base]));
    let catalog = catalog();

    let ego_only = resolve_card(&card, &catalog, 3, false, None);
    assert_eq!(ego_only.description, "Ego 3");
    assert_eq!(ego_only.cost, Cost::Fixed(7));

    let both = resolve_card(&card, &catalog, 3, true, None);
    assert_eq!(both.description, "Potential");
    assert_eq!(both.cost, Cost::Fixed(8));

    let other_level = resolve_card(&card, &catalog, 2, false, None);
    assert_eq!(other_level.description, "Base");
}

#[test]
fn ego_override_without_cost_keeps_cost() {
    let mut base = variation(Cost::Fixed(3), "Base");
    base.ego_variations = BTreeMap::from([(
        1,
        TextOverride {
            description: "Ego 1".to_string(),
            cost: None,
        },
    )]);
    let card = placed(card_def("ego_card", vec![base]));
    let info = resolve_card(&card, &catalog(), 1, false, None);
    assert_eq!(info.description, "Ego 1");
    assert_eq!(info.cost, Cost::Fixed(3));
}

#[test]
fn ego_override_replaces_hidden_text() {
    let mut base = variation(Cost::Fixed(3), "Base");
    base.ego_variations = BTreeMap::from([(
        2,
        TextOverride {
            description: "Ego 2".to_string(),
            cost: None,
        },
    )]);
    let mut card = placed(card_def("ego_card", vec![base]));
    card.selected_hidden_hirameki_id = Some("hidden_cheap".to_string());
    let info = resolve_card(&card, &catalog(), 2, false, None);
    assert_eq!(info.description, "Ego 2");
    assert_eq!(info.cost, Cost::Fixed(0));
}

#[test]
fn god_hirameki_appends_after_overrides() {
    let mut base = variation(Cost::Fixed(1), "Base");
    base.potential_variation = Some(TextOverride {
        description: "Potential".to_string(),
        cost: None,
    });
    let mut card = placed(card_def("god_card", vec![base]));
    card.god_hirameki_type = Some(GodType::Kilken);
    card.god_hirameki_effect_id = Some("god_plus".to_string());
    let info = resolve_card(&card, &catalog(), 0, true, None);
    assert_eq!(info.description, "Potential\nDamage +20%");
    assert_eq!(info.cost, Cost::Fixed(2));
}

#[test]
fn god_hirameki_needs_both_fields_and_a_non_basic_card() {
    let mut card = two_level_card();
    card.god_hirameki_effect_id = Some("god_plus".to_string());
    let no_god = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(no_god.description, "Base description");

    card.god_hirameki_type = Some(GodType::Kilken);
    card.def.is_basic_card = true;
    let basic = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(basic.description, "Base description");
    assert_eq!(basic.cost, Cost::Fixed(1));
}

#[test]
fn cost_is_clamped_only_after_all_modifiers() {
    // 1 - 3 (hidden) + 1 (god) = -1, clamped to 0 at the end.
    let mut card = two_level_card();
    card.selected_hidden_hirameki_id = Some("hidden_cheap".to_string());
    card.god_hirameki_type = Some(GodType::Nihilum);
    card.god_hirameki_effect_id = Some("god_plus".to_string());
    let info = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(info.cost, Cost::Fixed(0));

    // 2 - 3 + 1 = 0. Clamping after the hidden step would give 1.
    let mut pricier = placed(card_def(
        "pricier",
        vec![variation(Cost::Fixed(2), "Base")],
    ));
    pricier.selected_hidden_hirameki_id = Some("hidden_cheap".to_string());
    pricier.god_hirameki_type = Some(GodType::Nihilum);
    pricier.god_hirameki_effect_id = Some("god_plus".to_string());
    let info = resolve_card(&pricier, &catalog(), 0, false, None);
    assert_eq!(info.cost, Cost::Fixed(0));
}

#[test]
fn variable_cost_passes_through_modifiers() {
    let mut card = placed(card_def("x_card", vec![variation(Cost::Variable, "X damage")]));
    card.selected_hidden_hirameki_id = Some("hidden_cheap".to_string());
    let info = resolve_card(&card, &catalog(), 0, false, None);
    assert_eq!(info.cost, Cost::Variable);
    assert_eq!(info.description, "X damage\nCost -3");
}

#[test]
fn converted_card_resolves_against_target() {
    let card = two_level_card();
    let conversions = ConversionMap::from([(
        "test_card".to_string(),
        "shared_target".to_string(),
    )]);
    let info = resolve_card(&card, &catalog(), 0, false, Some(&conversions));
    assert_eq!(info.name, "shared_target name");
    assert_eq!(info.description, "Target description");
    assert_eq!(info.cost, Cost::Fixed(4));
}

#[test]
fn unknown_conversion_target_falls_back_to_original() {
    let card = two_level_card();
    let conversions = ConversionMap::from([("test_card".to_string(), "gone".to_string())]);
    let info = resolve_card(&card, &catalog(), 0, false, Some(&conversions));
    assert_eq!(info.description, "Base description");
}

#[test]
fn resolve_deck_uses_deck_settings() {
    let mut base = variation(Cost::Fixed(1), "Base");
    base.potential_variation = Some(TextOverride {
        description: "Potential".to_string(),
        cost: None,
    });
    let mut deck = Deck::new();
    deck.cards.push(placed(card_def("potential_card", vec![base])));
    deck.cards.push(two_level_card());
    deck.has_potential = true;
    deck.converted_cards.insert(
        "test_card".to_string(),
        ConvertedEntry::Legacy("shared_target".to_string()),
    );
    deck.converted_cards.insert(
        "potential_card".to_string(),
        ConvertedEntry::Record(ConversionRecord {
            converted_to_id: Some("shared_target".to_string()),
            original: cznde_core::CardSnapshot::of(&deck.cards[0]),
            excluded: true,
        }),
    );

    let resolved = resolve_deck(&deck, &catalog());
    assert_eq!(resolved[0].description, "Potential");
    assert_eq!(resolved[1].description, "Target description");
}
