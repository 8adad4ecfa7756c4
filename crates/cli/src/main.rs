use clap::{Parser, Subcommand};
use cznde_core::{faint_memory_breakdown, resolve_card, sort_deck_cards, JobType};
use cznde_data::{load_catalog, load_deck_file, validate_catalog};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};

mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Deck inspector for Faint Memory budgets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the catalog JSON files.
    #[arg(global = true, long, env = "CZNDE_ASSETS", default_value = "assets")]
    assets: PathBuf,

    #[arg(global = true, short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Faint Memory breakdown and total of a saved deck.
    Score { deck: PathBuf },
    /// Cards of a saved deck as they resolve.
    Show { deck: PathBuf },
    /// Cards a deck may add, optionally limited to one job.
    Cards {
        #[arg(long, value_parser = parse_job)]
        job: Option<JobType>,
    },
    Characters,
    /// Loads the catalog and reports problems.
    Validate,
}

fn parse_job(raw: &str) -> Result<JobType, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_ascii_lowercase()))
        .map_err(|_| format!("unknown job `{raw}`"))
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        error!("{err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let catalog = load_catalog(&cli.assets)?;
    match cli.command {
        Commands::Score { deck } => {
            let saved = load_deck_file(&deck)?;
            let breakdown = faint_memory_breakdown(&saved.deck, &catalog);
            reports::breakdown(&saved.name, &breakdown);
        }
        Commands::Show { deck } => {
            let saved = load_deck_file(&deck)?;
            let deck = &saved.deck;
            let conversions = deck.conversion_map();
            let rows: Vec<_> = sort_deck_cards(&deck.cards)
                .into_iter()
                .map(|card| {
                    let resolved = resolve_card(
                        &card,
                        &catalog,
                        deck.ego_level,
                        deck.has_potential,
                        Some(&conversions),
                    );
                    (card, resolved)
                })
                .collect();
            reports::deck_header(&saved.name, deck);
            reports::resolved_cards(&rows);
        }
        Commands::Cards { job } => {
            reports::card_list(&catalog.addable_cards_for(job));
        }
        Commands::Characters => {
            reports::characters(&catalog);
        }
        Commands::Validate => {
            let warnings = validate_catalog(&catalog)?;
            info!(
                characters = catalog.characters.len(),
                cards = catalog.cards.len(),
                warnings = warnings.len(),
                "catalog valid"
            );
            for warning in &warnings {
                println!("warning: {warning}");
            }
            println!(
                "{}: {} characters, {} cards, {} equipment, {} warnings",
                cli.assets.display(),
                catalog.characters.len(),
                catalog.cards.len(),
                catalog.equipment.len(),
                warnings.len()
            );
        }
    }
    Ok(())
}
