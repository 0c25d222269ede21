use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eternal_deck_rs::{
    batch::{validate_directory_async, BatchSummary},
    core::{CardType, Faction},
    decklist::{
        build_export, validate_text, validate_text_with, CatalogPowerClassifier,
        DeckPostProcessor, DeckProfile, ExportFormat, RuleConfig, ValidationReport,
    },
    loader::{CardDatabase, CardQuery, SheetLoader},
    logger::{DeckLogger, OutputFormat, OutputMode, VerbosityLevel},
};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Verbosity level (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "deck")]
#[command(about = "Eternal deck-list validator and exporter", long_about = None)]
struct Cli {
    /// Output verbosity (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, short = 'v', default_value = "normal", global = true)]
    verbosity: VerbosityArg,

    /// Emit log lines as JSON objects
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a deck list against construction rules
    Validate {
        /// Deck file ("-" for stdin)
        #[arg(value_name = "DECK")]
        deck: PathBuf,

        /// Card sheet (.tsv); enables type-accurate power counting
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print the catalog profile (curve, factions, unknown cards)
        #[arg(long, requires = "catalog")]
        profile: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Convert a deck list to the client's import format
    Export {
        #[arg(value_name = "DECK")]
        deck: PathBuf,

        /// Card sheet (.tsv) providing set and collector ids
        #[arg(long)]
        catalog: PathBuf,

        /// Game format written in the header (Throne or Expedition)
        #[arg(long, default_value = "Throne")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Rewrite pipe-format lines to match the card sheet
    Fix {
        #[arg(value_name = "DECK")]
        deck: PathBuf,

        #[arg(long)]
        catalog: PathBuf,

        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Validate every .txt/.deck file under a directory
    Batch {
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Search the card sheet
    Search {
        #[arg(long)]
        catalog: PathBuf,

        /// Name substring
        #[arg(long)]
        name: Option<String>,

        /// Faction name or letter (repeatable)
        #[arg(long = "faction")]
        factions: Vec<Faction>,

        /// Require every listed faction
        #[arg(long)]
        all_factions: bool,

        /// With a single faction, exclude multi-faction cards
        #[arg(long)]
        mono: bool,

        /// Card type (repeatable)
        #[arg(long = "type")]
        card_types: Vec<String>,

        #[arg(long)]
        max_cost: Option<u32>,

        /// Rules text substring
        #[arg(long)]
        text: Option<String>,
    },
}

/// Rule file plus per-field overrides
#[derive(Args, Debug, Default)]
struct RuleArgs {
    /// JSON rule file (missing fields use defaults)
    #[arg(long)]
    rules: Option<PathBuf>,

    #[arg(long)]
    min_cards: Option<u32>,

    #[arg(long)]
    max_cards: Option<u32>,

    #[arg(long)]
    min_power_ratio: Option<f64>,

    #[arg(long)]
    max_copies: Option<u32>,

    #[arg(long)]
    max_market_cards: Option<u32>,
}

impl RuleArgs {
    fn resolve(&self) -> Result<RuleConfig> {
        let mut config = match &self.rules {
            Some(path) => RuleConfig::from_json_file(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
            None => RuleConfig::default(),
        };

        if let Some(v) = self.min_cards {
            config.min_cards = v;
        }
        if let Some(v) = self.max_cards {
            config.max_cards = v;
        }
        if let Some(v) = self.min_power_ratio {
            config.min_power_ratio = v;
        }
        if let Some(v) = self.max_copies {
            config.max_copies = v;
        }
        if let Some(v) = self.max_market_cards {
            config.max_market_cards = v;
        }

        config.check()?;
        Ok(config)
    }
}

fn make_logger(verbosity: VerbosityArg, json: bool, to_stderr: bool) -> DeckLogger {
    let mut logger = DeckLogger::with_verbosity(verbosity.into());
    if json {
        logger.set_output_format(OutputFormat::Json);
    }
    if to_stderr {
        logger.set_output_mode(OutputMode::Stderr);
    }
    logger
}

fn warn(logger: &DeckLogger, message: &str) {
    logger.log(VerbosityLevel::Minimal, Some("warning"), message);
}

async fn read_deck(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read deck from stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read deck {}", path.display()))
}

async fn load_catalog(path: &Path, logger: &DeckLogger) -> Result<CardDatabase> {
    let start = std::time::Instant::now();
    let db = SheetLoader::load_from_file_async(path)
        .await
        .with_context(|| format!("Failed to load card sheet {}", path.display()))?;
    logger.verbose(&format!(
        "Loaded {} cards from {} in {:.2}ms",
        db.len(),
        path.display(),
        start.elapsed().as_secs_f64() * 1000.0
    ));
    Ok(db)
}

async fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, text)
            .await
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn log_report(report: &ValidationReport, logger: &DeckLogger) {
    logger.log(
        VerbosityLevel::Normal,
        Some("format"),
        &format!("Detected format: {}", report.dialect),
    );
    report.log_to(logger);
}

async fn run_validate(
    deck: PathBuf,
    catalog: Option<PathBuf>,
    profile: bool,
    rules: RuleArgs,
    logger: &DeckLogger,
) -> Result<bool> {
    let rules = rules.resolve()?;
    let text = read_deck(&deck).await?;

    let report = match &catalog {
        Some(path) => {
            let db = load_catalog(path, logger).await?;
            let report = validate_text_with(&text, &rules, &CatalogPowerClassifier::new(&db))?;
            if profile {
                log_profile(&DeckProfile::resolve(&report.aggregate, &db), logger);
            }
            report
        }
        None => validate_text(&text, &rules)?,
    };

    log_report(&report, logger);
    Ok(report.is_valid())
}

fn log_profile(profile: &DeckProfile, logger: &DeckLogger) {
    let factions: Vec<String> = profile
        .faction_counts
        .iter()
        .map(|(faction, count)| format!("{faction}={count}"))
        .collect();
    logger.log(
        VerbosityLevel::Normal,
        Some("profile"),
        &format!(
            "Profile: {} powers, {} non-power cards, average cost {:.2}, factions [{}]",
            profile.power_cards,
            profile.spell_and_unit_cards,
            profile.average_cost,
            factions.join(", ")
        ),
    );
    for name in &profile.unknown_cards {
        logger.log(
            VerbosityLevel::Normal,
            Some("unknown_card"),
            &format!("Not in catalog: {name}"),
        );
    }
}

async fn run_export(
    deck: PathBuf,
    catalog: PathBuf,
    format: ExportFormat,
    output: Option<PathBuf>,
    logger: &DeckLogger,
) -> Result<()> {
    let text = read_deck(&deck).await?;
    let db = load_catalog(&catalog, logger).await?;

    let exported = build_export(&text, format.label(), &db);
    for name in exported.missing_cards() {
        warn(
            logger,
            &format!("Warning: '{name}' not in catalog, exported as Set1 #1"),
        );
    }

    write_output(output.as_deref(), &exported.render()).await
}

async fn run_fix(
    deck: PathBuf,
    catalog: PathBuf,
    output: Option<PathBuf>,
    logger: &DeckLogger,
) -> Result<()> {
    let text = read_deck(&deck).await?;
    let db = load_catalog(&catalog, logger).await?;

    let result = DeckPostProcessor::new(&db).fix(&text);
    if result.is_clean() {
        logger.log(VerbosityLevel::Normal, Some("summary"), &result.report());
    } else {
        for line in result.report().lines().filter(|l| !l.is_empty()) {
            warn(logger, line);
        }
    }

    write_output(output.as_deref(), &result.text).await
}

async fn run_batch(dir: PathBuf, rules: RuleArgs, logger: &DeckLogger) -> Result<bool> {
    let rules = rules.resolve()?;
    let entries = validate_directory_async(dir.clone(), rules)
        .await
        .with_context(|| format!("Failed to validate decks under {}", dir.display()))?;

    for entry in &entries {
        match &entry.result {
            Ok(report) => {
                let status = if report.is_valid() { "VALID" } else { "INVALID" };
                logger.log(
                    VerbosityLevel::Minimal,
                    Some("deck"),
                    &format!("{}: {status}", entry.path.display()),
                );
                for violation in &report.result.violations {
                    logger.log(VerbosityLevel::Normal, Some("violation"), violation);
                }
            }
            Err(e) => logger.log(
                VerbosityLevel::Minimal,
                Some("error"),
                &format!("{}: ERROR {e}", entry.path.display()),
            ),
        }
    }

    let summary = BatchSummary::from_entries(&entries);
    logger.log(
        VerbosityLevel::Minimal,
        Some("summary"),
        &format!(
            "{} decks: {} valid, {} invalid, {} unreadable",
            summary.total, summary.valid, summary.invalid, summary.errors
        ),
    );

    Ok(summary.invalid == 0 && summary.errors == 0)
}

async fn run_search(catalog: PathBuf, query: CardQuery, logger: &DeckLogger) -> Result<()> {
    let db = load_catalog(&catalog, logger).await?;
    let hits = query.run(&db);

    for card in &hits {
        logger.log(
            VerbosityLevel::Minimal,
            Some("card"),
            &format!(
                "{} | {} | {} | {} | {}",
                card.name,
                card.cost_notation(),
                card.card_type,
                card.stats_notation(),
                card.rarity
            ),
        );
    }
    logger.log(
        VerbosityLevel::Normal,
        Some("summary"),
        &format!("{} cards found", hits.len()),
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // export and fix write their result to stdout
    let to_stderr = matches!(cli.command, Commands::Export { .. } | Commands::Fix { .. });
    let logger = make_logger(cli.verbosity, cli.json, to_stderr);

    let ok = match cli.command {
        Commands::Validate {
            deck,
            catalog,
            profile,
            rules,
        } => run_validate(deck, catalog, profile, rules, &logger).await?,
        Commands::Export {
            deck,
            catalog,
            format,
            output,
        } => {
            run_export(deck, catalog, format, output, &logger).await?;
            true
        }
        Commands::Fix {
            deck,
            catalog,
            output,
        } => {
            run_fix(deck, catalog, output, &logger).await?;
            true
        }
        Commands::Batch { dir, rules } => run_batch(dir, rules, &logger).await?,
        Commands::Search {
            catalog,
            name,
            factions,
            all_factions,
            mono,
            card_types,
            max_cost,
            text,
        } => {
            let query = CardQuery {
                name_contains: name,
                factions,
                require_all_factions: all_factions,
                exclude_multifaction: mono,
                card_types: card_types.iter().map(|t| CardType::parse(t)).collect(),
                max_cost,
                text_contains: text,
            };
            run_search(catalog, query, &logger).await?;
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
