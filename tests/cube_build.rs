//! Cube building tests
//!
//! Checks the properties every build must have (size bound, pack layout,
//! evolution order, conservation) across many seeds, plus a few fixed
//! scenarios whose outcome does not depend on the seed.

use cube_forge::core::{Card, CardName, Inventory, PackLayout, Rarity, Stage};
use cube_forge::cube::{audit, build_cube, BuildConfig, CubeBuild, CubeBuilder};
use cube_forge::export::aggregate;
use cube_forge::loader::InventoryLoader;
use cube_forge::Result;
use similar_asserts::assert_eq;
use std::collections::HashMap;
use std::path::Path;

const SEEDS: std::ops::Range<u64> = 0..30;

fn load_fixture(name: &str) -> Result<Inventory> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_inventories")
        .join(name);
    Ok(InventoryLoader::load_from_file(&path)?.into_inventory())
}

/// An inventory where every card is always eligible
fn basics_only(packs: usize) -> Inventory {
    let mut inventory = Inventory::new();
    for i in 0..packs {
        inventory.push(Card::basic(format!("Rare {i}"), "Psychic", Rarity::Rare));
    }
    for i in 0..packs * 3 {
        inventory.push(Card::basic(format!("Uncommon {i}"), "Water", Rarity::Uncommon));
    }
    for i in 0..packs * 5 {
        inventory.push(Card::basic(format!("Common {i}"), "Grass", Rarity::Common));
    }
    inventory.add_copies(Card::trainer("Potion", Rarity::Common), packs * 2);
    inventory
}

fn names(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|c| c.name.as_str()).collect()
}

fn assert_build_properties(build: &CubeBuild, players: usize, initial: &Inventory) {
    let config = BuildConfig::new(players).unwrap();
    let violations = audit(build, &config, initial.len());
    assert!(violations.is_empty(), "audit failed: {violations:?}");

    assert!(build.cube.len() <= 44 * players);
    assert_eq!(initial.len(), build.remaining.len() + build.cube.len());

    // Summed aggregate quantities equal the input quantities, per name
    let mut expected: HashMap<CardName, usize> = HashMap::new();
    for record in aggregate(initial) {
        expected.insert(record.name, record.quantity);
    }
    let mut actual: HashMap<CardName, usize> = HashMap::new();
    for record in aggregate(&build.remaining)
        .into_iter()
        .chain(aggregate(&build.cube))
    {
        *actual.entry(record.name).or_default() += record.quantity;
    }
    assert_eq!(expected, actual);
}

#[test]
fn test_complete_build_has_standard_packs() {
    for seed in SEEDS {
        let build = build_cube(basics_only(8), 2, seed).unwrap();

        assert!(build.is_complete(), "seed {seed}");
        assert_eq!(build.cube.len(), 88);
        assert_eq!(build.packs.len(), 8);
        for pack in &build.packs {
            assert_eq!(pack.count_rarity(Rarity::Rare), 1);
            assert_eq!(pack.count_rarity(Rarity::Uncommon), 3);
            assert_eq!(pack.count_rarity(Rarity::Common), 7);
        }
    }
}

#[test]
fn test_base_set_properties() -> Result<()> {
    let inventory = load_fixture("base_set.csv")?;
    assert_eq!(inventory.len(), 104);

    for players in 1..=3 {
        for seed in SEEDS {
            let build = build_cube(inventory.clone(), players, seed)?;
            assert_build_properties(&build, players, &inventory);
        }
    }
    Ok(())
}

#[test]
fn test_base_set_three_players_is_short() -> Result<()> {
    // 104 cards cannot fill a 132-card cube
    let inventory = load_fixture("base_set.csv")?;
    let build = build_cube(inventory, 3, 42)?;
    assert!(!build.is_complete());
    assert!(build.shortfall() >= 28);
    Ok(())
}

#[test]
fn test_evolution_gating_scenario() -> Result<()> {
    let inventory = load_fixture("evolution_gating.csv")?;

    for seed in SEEDS {
        let build = build_cube(inventory.clone(), 1, seed)?;
        assert_build_properties(&build, 1, &inventory);

        // Abra fills the rare slot, so Kadabra can follow in the same pack
        assert_eq!(build.packs.len(), 2);
        assert_eq!(
            names(&build.packs[0].cards),
            vec![
                "Abra", "Kadabra", "Rattata", "Rattata", "Rattata", "Rattata", "Rattata",
                "Rattata", "Rattata"
            ]
        );
        assert_eq!(names(&build.packs[1].cards), vec!["Rattata", "Rattata"]);

        // Haunter's prerequisite never joins the cube
        assert_eq!(names(build.remaining.cards()), vec!["Haunter"]);
        assert_eq!(build.shortfall(), 33);
    }
    Ok(())
}

#[test]
fn test_stage1_follows_basic_across_packs() {
    // The only basic for Ivysaur is a common, which is drawn after the
    // uncommon slots of the first pack
    let mut inventory = Inventory::new();
    inventory.push(Card::basic("Mew", "Psychic", Rarity::Rare));
    inventory.push(
        Card::new("Ivysaur", "Grass", Rarity::Uncommon)
            .with_stage(Stage::Stage1)
            .evolves_from("Bulbasaur"),
    );
    inventory.push(Card::basic("Bulbasaur", "Grass", Rarity::Common));

    let build = build_cube(inventory, 1, 3).unwrap();
    assert_eq!(names(&build.packs[0].cards), vec!["Mew", "Bulbasaur"]);
    assert_eq!(names(&build.packs[1].cards), vec!["Ivysaur"]);
    assert!(build.remaining.is_empty());
}

#[test]
fn test_stage2_needs_stage1_not_basic() {
    let mut inventory = Inventory::new();
    inventory.push(
        Card::new("Venusaur", "Grass", Rarity::Rare)
            .with_stage(Stage::Stage2)
            .evolves_from("Ivysaur"),
    );
    inventory.add_copies(Card::basic("Bulbasaur", "Grass", Rarity::Common), 7);

    let build = build_cube(inventory, 1, 9).unwrap();
    assert_eq!(build.cube.len(), 7);
    assert_eq!(names(build.remaining.cards()), vec!["Venusaur"]);
}

#[test]
fn test_empty_inventory_is_a_shortfall() {
    let build = build_cube(Inventory::new(), 1, 0).unwrap();
    assert!(build.packs.is_empty());
    assert!(build.cube.is_empty());
    assert!(build.remaining.is_empty());
    assert_eq!(build.shortfall(), 44);
}

#[test]
fn test_cube_never_exceeds_target() {
    for seed in SEEDS {
        let build = build_cube(basics_only(20), 1, seed).unwrap();
        assert_eq!(build.cube.len(), 44);
        assert_eq!(build.packs.len(), 4);
        assert_eq!(build.remaining.len(), 16 * 11);
    }
}

#[test]
fn test_seeded_builds_are_reproducible() -> Result<()> {
    let inventory = load_fixture("base_set.csv")?;
    let config = BuildConfig::new(2)?;

    let first = CubeBuilder::with_seed(config.clone(), 1234)?.build(inventory.clone());
    let second = CubeBuilder::with_seed(config, 1234)?.build(inventory);
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_entropy_seeded_builder() -> Result<()> {
    let mut builder = CubeBuilder::new(BuildConfig::new(1)?)?;
    let build = builder.build(basics_only(4));
    assert!(build.is_complete());
    Ok(())
}

#[test]
fn test_custom_layout() -> Result<()> {
    let layout = PackLayout {
        rare: 1,
        uncommon: 1,
        common: 3,
    };
    let config = BuildConfig::new(2)?
        .with_packs_per_player(3)
        .with_layout(layout);
    let build = CubeBuilder::with_seed(config, 5)?.build(basics_only(10));

    assert_eq!(build.target_size, 30);
    assert_eq!(build.cube.len(), 30);
    assert_eq!(build.packs.len(), 6);
    assert!(build.packs.iter().all(|p| p.is_full(&layout)));
    Ok(())
}
