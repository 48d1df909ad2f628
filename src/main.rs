//! Cube Forge - Main Binary
//!
//! Builds a cube from an inventory CSV and writes the leftover inventory,
//! the cube and the pack manifest back out as CSV.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use cube_forge::{
    core::PackLayout,
    cube::{audit, BuildConfig, CubeBuilder, PACKS_PER_PLAYER},
    export::{write_build, write_summary, BuildSummary, OutputPaths},
    loader::{InventoryLoader, LoadReport},
    CubeError,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Verbosity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
enum VerbosityLevel {
    /// Silent - no diagnostics
    Silent = 0,
    /// Minimal - warnings only (skipped rows, shortfall)
    Minimal = 1,
    /// Normal - load and build progress (default)
    #[default]
    Normal = 2,
    /// Verbose - every slot draw
    Verbose = 3,
}

impl VerbosityLevel {
    fn filter(self) -> &'static str {
        match self {
            VerbosityLevel::Silent => "off",
            VerbosityLevel::Minimal => "warn",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

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
#[command(name = "cube")]
#[command(about = "Cube Forge - build randomized trading-card cubes", long_about = None)]
struct Cli {
    /// Verbosity level for diagnostics (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, short = 'v', global = true, default_value = "normal")]
    verbosity: VerbosityArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a cube and write the output files
    Build {
        /// Inventory file (.csv)
        #[arg(value_name = "INVENTORY_CSV")]
        inventory: PathBuf,

        /// Number of players (prompted on stdin if omitted)
        #[arg(long, short = 'p')]
        players: Option<usize>,

        /// Set random seed for deterministic builds
        #[arg(long)]
        seed: Option<u64>,

        /// Directory for output files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Remaining inventory output (default: <OUT_DIR>/card_list_out.csv)
        #[arg(long, value_name = "FILE")]
        inventory_out: Option<PathBuf>,

        /// Cube output (default: <OUT_DIR>/cube_list.csv)
        #[arg(long, value_name = "FILE")]
        cube_out: Option<PathBuf>,

        /// Pack manifest output (default: <OUT_DIR>/packs_list.csv)
        #[arg(long, value_name = "FILE")]
        packs_out: Option<PathBuf>,

        /// Also write a JSON build summary
        #[arg(long, value_name = "FILE")]
        summary: Option<PathBuf>,

        /// Exit successfully even if the cube is smaller than the target
        #[arg(long)]
        allow_shortfall: bool,
    },

    /// Report rarity and evolution coverage of an inventory
    Inspect {
        /// Inventory file (.csv)
        #[arg(value_name = "INVENTORY_CSV")]
        inventory: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity.into());

    match cli.command {
        Commands::Build {
            inventory,
            players,
            seed,
            out_dir,
            inventory_out,
            cube_out,
            packs_out,
            summary,
            allow_shortfall,
        } => {
            let mut paths = OutputPaths::in_dir(&out_dir);
            if let Some(path) = inventory_out {
                paths.inventory = path;
            }
            if let Some(path) = cube_out {
                paths.cube = path;
            }
            if let Some(path) = packs_out {
                paths.packs = path;
            }
            run_build(
                &inventory,
                players,
                seed,
                &out_dir,
                &paths,
                summary.as_deref(),
                allow_shortfall,
            )
        }
        Commands::Inspect { inventory } => run_inspect(&inventory),
    }
}

/// `RUST_LOG` takes precedence over `--verbosity`
fn init_logging(verbosity: VerbosityLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load(path: &Path) -> anyhow::Result<LoadReport> {
    let report = InventoryLoader::load_from_file(path)
        .with_context(|| format!("failed to read inventory {}", path.display()))?;
    if !report.skipped.is_empty() {
        println!("Skipped {} malformed row(s):", report.skipped.len());
        for row in &report.skipped {
            println!("  line {}: {}", row.line, row.reason);
        }
    }
    Ok(report)
}

fn run_build(
    inventory_path: &Path,
    players: Option<usize>,
    seed: Option<u64>,
    out_dir: &Path,
    paths: &OutputPaths,
    summary_path: Option<&Path>,
    allow_shortfall: bool,
) -> anyhow::Result<()> {
    println!("=== Cube Forge - Build ===\n");

    let inventory = load(inventory_path)?.require_cards(&inventory_path.display().to_string())?;
    println!("Loaded {} cards", inventory.len());

    let players = match players {
        Some(n) => n,
        None => prompt_player_count(&mut std::io::stdin().lock(), &mut std::io::stdout())?,
    };
    let config = BuildConfig::new(players)?;

    // Always build from a seed so any run can be reproduced
    let seed = seed.unwrap_or_else(rand::random);
    println!("Using random seed: {seed}");

    let initial_len = inventory.len();
    let mut builder = CubeBuilder::with_seed(config, seed)?;
    let build = builder.build(inventory);

    let violations = audit(&build, builder.config(), initial_len);
    if !violations.is_empty() {
        for violation in &violations {
            error!(%violation, "build audit failed");
        }
        bail!("build failed {} consistency check(s)", violations.len());
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    write_build(&build, paths).context("failed to write build output")?;

    let summary = BuildSummary::new(&build, players, Some(seed));
    if let Some(path) = summary_path {
        write_summary(path, &summary)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
    }

    println!("\n=== Cube Built ===");
    println!("  Players: {players}");
    println!("  Packs: {}", summary.packs);
    println!("  Cube: {}/{} cards", summary.cube_size, summary.target_size);
    println!(
        "  Rarities: {} rare, {} uncommon, {} common",
        summary.rare, summary.uncommon, summary.common
    );
    println!("  Remaining inventory: {} cards", summary.remaining);
    println!("  Remaining list: {}", paths.inventory.display());
    println!("  Cube list: {}", paths.cube.display());
    println!("  Pack list: {}", paths.packs.display());

    if !build.is_complete() {
        println!(
            "\nInventory ran out {} cards short of the target.",
            build.shortfall()
        );
        if !allow_shortfall {
            return Err(CubeError::Shortfall {
                missing: build.shortfall(),
                target: build.target_size,
            }
            .into());
        }
    }
    Ok(())
}

fn run_inspect(inventory_path: &Path) -> anyhow::Result<()> {
    println!("=== Cube Forge - Inspect ===\n");

    let inventory = load(inventory_path)?.require_cards(&inventory_path.display().to_string())?;
    let summary = inventory.summary();
    let layout = PackLayout::default();
    let full_packs = summary.full_packs(&layout);

    println!(
        "{} cards, {} unique names",
        summary.total_cards, summary.unique_names
    );
    println!(
        "  Rarities: {} rare, {} uncommon, {} common",
        summary.rare, summary.uncommon, summary.common
    );
    println!(
        "  Stages: {} basic, {} stage 1, {} stage 2, {} trainers",
        summary.basic, summary.stage_1, summary.stage_2, summary.trainers
    );
    if summary.unstaged > 0 {
        println!("  {} creature card(s) have no stage and will never be drawn", summary.unstaged);
    }
    println!(
        "  Full packs available: {full_packs} (enough for {} player(s))",
        full_packs / PACKS_PER_PLAYER
    );
    if !summary.orphans.is_empty() {
        println!("\nCards whose prerequisite is missing from the inventory:");
        for name in &summary.orphans {
            println!("  {name}");
        }
    }
    Ok(())
}

/// Ask for a positive player count until one is given
fn prompt_player_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> anyhow::Result<usize> {
    loop {
        write!(output, "Enter the number of players: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("no player count given");
        }
        match line.trim().parse::<i64>() {
            Ok(n) if n > 0 => return Ok(n as usize),
            Ok(_) => writeln!(output, "Please enter a positive number.")?,
            Err(_) => writeln!(output, "Invalid input. Please enter a number.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_parsing() {
        let parsed: VerbosityLevel = "verbose".parse::<VerbosityArg>().unwrap().into();
        assert_eq!(parsed, VerbosityLevel::Verbose);
        let parsed: VerbosityLevel = "1".parse::<VerbosityArg>().unwrap().into();
        assert_eq!(parsed, VerbosityLevel::Minimal);
        assert!("loud".parse::<VerbosityArg>().is_err());
    }

    #[test]
    fn test_prompt_retries_until_positive() {
        let mut input = "abc\n0\n-2\n3\n".as_bytes();
        let mut output = Vec::new();

        let players = prompt_player_count(&mut input, &mut output).unwrap();
        assert_eq!(players, 3);

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript.matches("Enter the number of players").count(), 4);
        assert!(transcript.contains("Invalid input. Please enter a number."));
        assert_eq!(transcript.matches("Please enter a positive number.").count(), 2);
    }

    #[test]
    fn test_prompt_fails_at_end_of_input() {
        let mut input = "".as_bytes();
        let mut output = Vec::new();
        assert!(prompt_player_count(&mut input, &mut output).is_err());
    }
}
