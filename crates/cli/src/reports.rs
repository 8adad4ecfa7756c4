use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use cznde_core::{
    CardDef, CardStatus, CardType, Catalog, Deck, DeckCard, Equipment, FaintMemory, PointOrigin,
    PointSource, ResolvedCard, Scope,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: &[usize]) {
    for &idx in columns {
        if let Some(col) = table.column_mut(idx) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn type_color(kind: CardType) -> Color {
    match kind {
        CardType::Character => Color::Cyan,
        CardType::Shared => Color::White,
        CardType::Monster => Color::Red,
        CardType::Forbidden => Color::Magenta,
    }
}

fn origin_label(origin: PointOrigin) -> &'static str {
    match origin {
        PointOrigin::Deck => "deck",
        PointOrigin::Removed => "removed",
        PointOrigin::Copied => "copied",
        PointOrigin::Converted => "converted",
    }
}

fn source_label(source: PointSource) -> String {
    match source {
        PointSource::Acquisition(kind) => format!("{kind:?} card"),
        PointSource::Hirameki => "hirameki".to_string(),
        PointSource::GodHirameki => "god hirameki".to_string(),
        PointSource::Removal {
            order,
            units,
            character: true,
        } => format!("removal {} (+character)", order_span(order, units)),
        PointSource::Removal { order, units, .. } => {
            format!("removal {}", order_span(order, units))
        }
        PointSource::Copy { order, units } => format!("copy {}", order_span(order, units)),
        PointSource::Conversion => "conversion".to_string(),
    }
}

fn order_span(order: u32, units: u32) -> String {
    if units > 1 {
        let last = u64::from(order) + u64::from(units) - 1;
        format!("#{order}-#{last} (x{units})")
    } else {
        format!("#{order}")
    }
}

fn status_list(statuses: &[CardStatus]) -> String {
    statuses
        .iter()
        .map(|status| format!("{status:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn breakdown(name: &str, score: &FaintMemory) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new(name).add_attribute(Attribute::Bold),
        Cell::new("Origin"),
        Cell::new("Source"),
        Cell::new("Points").fg(Color::Cyan),
    ]);
    align_right(&mut table, &[3]);

    for line in &score.lines {
        table.add_row(vec![
            Cell::new(&line.card_id),
            Cell::new(origin_label(line.origin)),
            Cell::new(source_label(line.source)),
            Cell::new(line.points),
        ]);
    }

    let mut totals = new_table();
    totals.add_row(vec![
        Cell::new("Deck"),
        Cell::new("Removed"),
        Cell::new("Copied"),
        Cell::new("Converted"),
        Cell::new("Faint Memory").add_attribute(Attribute::Bold),
    ]);
    totals.add_row(vec![
        Cell::new(score.points_from(PointOrigin::Deck)),
        Cell::new(score.points_from(PointOrigin::Removed)),
        Cell::new(score.points_from(PointOrigin::Copied)),
        Cell::new(score.points_from(PointOrigin::Converted)),
        Cell::new(score.total)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    align_right(&mut totals, &[0, 1, 2, 3, 4]);

    println!("\n{}", table);
    println!("{}", totals);
}

pub fn deck_header(name: &str, deck: &Deck) {
    let character = deck
        .character
        .as_ref()
        .map_or("-", |character| character.name.as_str());
    let slot = |item: &Option<Equipment>| {
        item.as_ref().map_or("-".to_string(), |item| item.name.clone())
    };
    println!("{name}");
    println!(
        "  character: {character}  ego: {}  potential: {}",
        deck.ego_level,
        if deck.has_potential { "yes" } else { "no" }
    );
    println!(
        "  weapon: {}  armor: {}  pendant: {}",
        slot(&deck.equipment.weapon),
        slot(&deck.equipment.armor),
        slot(&deck.equipment.pendant)
    );
}

pub fn resolved_cards(rows: &[(DeckCard, ResolvedCard)]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Deck id").add_attribute(Attribute::Bold),
        Cell::new("Name"),
        Cell::new("Lv"),
        Cell::new("Cost").fg(Color::Cyan),
        Cell::new("Category"),
        Cell::new("Statuses"),
        Cell::new("Description"),
    ]);
    align_right(&mut table, &[2, 3]);

    for (card, resolved) in rows {
        table.add_row(vec![
            Cell::new(&card.deck_id).fg(type_color(card.def.kind)),
            Cell::new(&resolved.name),
            Cell::new(card.selected_hirameki_level),
            Cell::new(resolved.cost),
            Cell::new(format!("{:?}", resolved.category)),
            Cell::new(status_list(&resolved.statuses)),
            Cell::new(&resolved.description),
        ]);
    }
    println!("\n{}", table);
}

pub fn card_list(cards: &[&CardDef]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("Name"),
        Cell::new("Type"),
        Cell::new("Category"),
        Cell::new("Levels"),
        Cell::new("Jobs"),
    ]);
    align_right(&mut table, &[4]);

    for card in cards {
        let jobs = match &card.allowed_jobs {
            Scope::All => "all".to_string(),
            Scope::Only(jobs) => jobs
                .iter()
                .map(|job| format!("{job:?}"))
                .collect::<Vec<_>>()
                .join(", "),
        };
        table.add_row(vec![
            Cell::new(&card.id).fg(type_color(card.kind)),
            Cell::new(&card.name),
            Cell::new(format!("{:?}", card.kind)),
            Cell::new(format!("{:?}", card.category)),
            Cell::new(card.hirameki_variations.len()),
            Cell::new(jobs),
        ]);
    }
    println!("\n{}", table);
}

pub fn characters(catalog: &Catalog) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("Name"),
        Cell::new("Rarity"),
        Cell::new("Job"),
        Cell::new("Starting"),
        Cell::new("Hirameki"),
    ]);
    align_right(&mut table, &[4, 5]);

    for character in &catalog.characters {
        table.add_row(vec![
            Cell::new(&character.id),
            Cell::new(&character.name),
            Cell::new(&character.rarity),
            Cell::new(format!("{:?}", character.job)),
            Cell::new(catalog.starting_cards_for(character).len()),
            Cell::new(catalog.hirameki_cards_for(character).len()),
        ]);
    }
    println!("\n{}", table);
}
