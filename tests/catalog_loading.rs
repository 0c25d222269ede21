//! Card sheet loading tests
//!
//! Loads spreadsheet exports from disk and drives catalog-aware validation.

use eternal_deck_rs::core::{CardType, Faction};
use eternal_deck_rs::decklist::{
    validate_text_with, CatalogPowerClassifier, DeckPostProcessor, DeckProfile, RuleConfig,
};
use eternal_deck_rs::loader::{CardCatalog, CardQuery, SheetLoader};
use eternal_deck_rs::Result;
use std::io::Write;
use tempfile::NamedTempFile;

const SHEET: &str = "\
Name\tDeckBuildable\tCost\tType\tInfluence\tAttack\tHealth\tCardText\tRarity\tImageUrl\tSetNumber\tEternalID
Torch\tTRUE\t1\tSpell\t{F}\t\t\tDeal 2 damage to a unit.\tCommon\t\t1\t8
Oni Ronin\tTRUE\t2\tUnit\t{F}\t3\t1\tCharge\tCommon\t\t1\t12
Rakano Outlaw\tTRUE\t2\tUnit\t{F}{J}\t2\t1\tOverwhelm\tUncommon\t\t1\t55
Ornate Katana\tTRUE\t1\tWeapon\t{F}\t1\t1\t\tCommon\t\t1\t70
Fire Sigil\tTRUE\t0\tPower\t{F}\t\t\t\tBasic\t\t1\t1
Diplomatic Seal\tTRUE\t0\tPower\t{F}{J}\t\t\tFire or Justice\tCommon\t\t2\t204
Powerhouse Brute\tTRUE\t5\tUnit\t{F}{F}\t6\t6\t\tRare\t\t3\t17
Campaign Only\tFALSE\t1\tSpell\t{T}\t\t\t\tCommon\t\t1\t99
";

fn write_sheet() -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(SHEET.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_load_sheet_from_file() -> Result<()> {
    let file = write_sheet()?;
    let db = SheetLoader::load_from_file(file.path())?;

    assert_eq!(db.len(), 7);
    assert!(!db.contains("Campaign Only"));

    let outlaw = db.lookup("rakano outlaw").expect("outlaw loaded");
    assert_eq!(outlaw.card_type, CardType::Unit);
    assert_eq!(outlaw.factions().as_slice(), &[Faction::Fire, Faction::Justice]);
    assert_eq!(outlaw.rarity, "Uncommon");
    assert_eq!(outlaw.cost_notation(), "2{F}{J}");

    let katana = db.lookup("Ornate Katana").expect("katana loaded");
    assert_eq!(katana.stats_notation(), "+1/+1");
    Ok(())
}

#[tokio::test]
async fn test_load_sheet_async() -> Result<()> {
    let file = write_sheet()?;
    let db = SheetLoader::load_from_file_async(file.path()).await?;
    assert_eq!(db.len(), 7);
    assert_eq!(db.lookup("Torch").map(|c| c.collector_id()), Some("8"));
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let result = SheetLoader::load_from_file(std::path::Path::new("/nonexistent/cards.tsv"));
    assert!(matches!(result, Err(eternal_deck_rs::DeckError::IoError(_))));
}

#[test]
fn test_catalog_power_classification() -> Result<()> {
    let file = write_sheet()?;
    let db = SheetLoader::load_from_file(file.path())?;
    let deck = "4 Powerhouse Brute\n3 Diplomatic Seal\n4 Torch";

    let report = validate_text_with(deck, &RuleConfig::default(), &CatalogPowerClassifier::new(&db))?;
    // catalog types override the name heuristic both ways
    assert_eq!(report.aggregate.power_cards, 3);

    let profile = DeckProfile::resolve(&report.aggregate, &db);
    assert_eq!(profile.power_cards, 3);
    assert_eq!(profile.faction_counts[&Faction::Fire], 11);
    assert_eq!(profile.faction_counts[&Faction::Justice], 3);
    assert!(profile.is_fully_resolved());
    Ok(())
}

#[test]
fn test_search_loaded_sheet() -> Result<()> {
    let file = write_sheet()?;
    let db = SheetLoader::load_from_file(file.path())?;

    let cheap_units: Vec<_> = CardQuery::new()
        .card_type(CardType::Unit)
        .max_cost(2)
        .run(&db)
        .into_iter()
        .map(|c| c.name.to_string())
        .collect();
    assert_eq!(cheap_units, vec!["Oni Ronin", "Rakano Outlaw"]);

    let damage = CardQuery::new().text("damage").run(&db);
    assert_eq!(damage.len(), 1);
    Ok(())
}

#[test]
fn test_post_process_against_sheet() -> Result<()> {
    let file = write_sheet()?;
    let db = SheetLoader::load_from_file(file.path())?;

    let deck = "UNITS:\n4x Oni Ronin | 2{F} | 3/1 | Common\n2x Ornate Katana | 1{F} | 1/1 | Rare";
    let result = DeckPostProcessor::new(&db).fix(deck);

    assert_eq!(
        result.text,
        "UNITS:\n4x Oni Ronin | 2{F} | 3/1 | Common\n2x Ornate Katana | 1{F} | +1/+1 | Common"
    );
    assert_eq!(result.stats.total_corrections, 1);
    assert_eq!(result.stats.stats_fixes, 1);
    assert_eq!(result.stats.rarity_fixes, 1);
    Ok(())
}
