//! swudeck - deck construction checks and helpers
//!
//! ## Usage
//!
//! ```text
//! swudeck --catalog cards.json [--rules rules.json] [--verbose] <COMMAND>
//!
//! Commands:
//!   validate <deck.json>                      Check construction rules
//!   export <deck.json> --format text|json     Print a decklist
//!   stats <deck.json>                         Cost curve and distribution
//!   recommend <deck.json> [--limit N]         Suggest cards to add
//!   auto-fill|random|balance <deck.json>      Run a deck assist
//!       [--seed N] [--output FILE]
//!   import <decklist.txt> [--output FILE]     Convert a plain-text list
//! ```
//!
//! Decks are read and written in the camelCase JSON form
//! (`leaderId`, `baseId`, `mainEntries`, ...). Logs go to stderr; set
//! `RUST_LOG` or pass `--verbose` for more detail.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use swudeck::assist::{self, AssistOutcome};
use swudeck::export::{StructuredExport, export_plain_text, parse_plain_text};
use swudeck::rules::{DeckRules, validate_with_rules};
use swudeck::{CardCatalog, DeckComposition, DeckStatistics};

#[derive(Parser)]
#[command(name = "swudeck")]
#[command(about = "Deck construction checks and helpers", long_about = None)]
struct Cli {
    /// Card catalog JSON (a card array or a `{ "data": [...] }` page)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Rule overrides as JSON; missing fields keep their defaults
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a deck and list its issues
    Validate { deck: PathBuf },

    /// Print a deck as a plain-text decklist or a structured JSON document
    Export {
        deck: PathBuf,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
    },

    /// Show main deck statistics
    Stats { deck: PathBuf },

    /// Suggest cards for the main deck
    Recommend {
        deck: PathBuf,

        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Fill the main deck to its minimum size
    AutoFill(AssistArgs),

    /// Replace the main deck with random compatible cards
    Random(AssistArgs),

    /// Add cards for underrepresented shared aspects
    Balance(AssistArgs),

    /// Convert a plain-text decklist to deck JSON
    Import {
        decklist: PathBuf,

        /// Write the deck here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct AssistArgs {
    deck: PathBuf,

    /// Seed for reproducible results
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the resulting deck here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy)]
enum AssistKind {
    AutoFill,
    Random,
    Balance,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = CardCatalog::from_json_file(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
    let rules = match &cli.rules {
        Some(path) => load_rules(path)?,
        None => DeckRules::default(),
    };

    match cli.command {
        Command::Validate { deck } => {
            let deck = load_deck(&deck)?;
            let report = validate_with_rules(&deck, &catalog, &rules);
            for issue in &report.issues {
                println!("{issue}");
            }
            println!(
                "main {} / side {} / overflow {}",
                report.totals.main, report.totals.side, report.totals.overflow
            );
            if !report.is_valid {
                println!("deck is not valid");
                return Ok(ExitCode::FAILURE);
            }
            println!("deck is valid");
        }
        Command::Export { deck, format } => {
            let deck = load_deck(&deck)?;
            match format {
                ExportFormat::Text => println!("{}", export_plain_text(&deck, &catalog)),
                ExportFormat::Json => {
                    let document = StructuredExport::now(&deck, &catalog);
                    println!("{}", document.to_json()?);
                }
            }
        }
        Command::Stats { deck } => {
            let deck = load_deck(&deck)?;
            print_stats(&DeckStatistics::compute_with_rules(&deck, &catalog, &rules));
        }
        Command::Recommend { deck, limit } => {
            let deck = load_deck(&deck)?;
            let recommendations = assist::recommend(&deck, &catalog, limit)?;
            if recommendations.is_empty() {
                println!("no recommendations");
            }
            for rec in recommendations {
                println!("{:>3}  {} ({})", rec.score, rec.name, rec.card_id);
                for reason in rec.reasons {
                    println!("       - {reason}");
                }
            }
        }
        Command::AutoFill(args) => run_assist(AssistKind::AutoFill, &args, &catalog, &rules)?,
        Command::Random(args) => run_assist(AssistKind::Random, &args, &catalog, &rules)?,
        Command::Balance(args) => run_assist(AssistKind::Balance, &args, &catalog, &rules)?,
        Command::Import { decklist, output } => {
            let text = fs::read_to_string(&decklist)
                .with_context(|| format!("reading decklist {}", decklist.display()))?;
            let deck = parse_plain_text(&text, &catalog)
                .with_context(|| format!("parsing decklist {}", decklist.display()))?;
            write_deck(&deck, output.as_deref())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_assist(
    kind: AssistKind,
    args: &AssistArgs,
    catalog: &CardCatalog,
    rules: &DeckRules,
) -> Result<()> {
    let mut deck = load_deck(&args.deck)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let outcome: AssistOutcome = match kind {
        AssistKind::AutoFill => assist::auto_fill_with_rules(&mut deck, catalog, rules, &mut rng),
        AssistKind::Random => assist::random_deck_with_rules(&mut deck, catalog, rules, &mut rng),
        AssistKind::Balance => {
            assist::balance_aspects_with_rules(&mut deck, catalog, rules, &mut rng)
        }
    }?;
    eprintln!("{outcome}");

    write_deck(&deck, args.output.as_deref())
}

fn print_stats(stats: &DeckStatistics) {
    println!("cards: {}", stats.total_cards);
    match stats.average_cost {
        Some(average) => println!("average cost: {average:.2}"),
        None => println!("average cost: -"),
    }
    println!(
        "low / mid / high: {} / {} / {} ({})",
        stats.low_cost, stats.mid_cost, stats.high_cost, stats.curve_quality
    );

    println!("cost curve:");
    let top = stats.cost_curve.max_bucket();
    for (cost, count) in stats.cost_curve.buckets.iter().enumerate() {
        let label = if cost as u32 == top {
            format!("{cost}+")
        } else {
            cost.to_string()
        };
        println!("  {label:>3} {count:>3} {}", "#".repeat(*count as usize));
    }
    if stats.cost_curve.uncosted > 0 {
        println!("  uncosted: {}", stats.cost_curve.uncosted);
    }

    println!("aspects:");
    for (aspect, count) in stats.aspects.iter().filter(|(_, count)| *count > 0) {
        println!("  {:<10} {count}", aspect.as_str());
    }
    println!("types:");
    for (card_type, count) in &stats.types {
        println!("  {:<10} {count}", card_type.as_str());
    }
}

fn load_rules(path: &Path) -> Result<DeckRules> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading rules {}", path.display()))?;
    DeckRules::from_json_str(&json).with_context(|| format!("parsing rules {}", path.display()))
}

fn load_deck(path: &Path) -> Result<DeckComposition> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading deck {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing deck {}", path.display()))
}

fn write_deck(deck: &DeckComposition, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(deck)?;
    match output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("writing deck {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote deck");
        }
        None => println!("{json}"),
    }
    Ok(())
}
