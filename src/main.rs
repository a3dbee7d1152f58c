//! Buildforge - Entry point
//!
//! Command-line front end: parses the request, loads the catalog and roster,
//! runs the search, and prints the report.

use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};

use buildforge::{
    default_pool, default_roster, search_top_k, BuildReport, Catalog, DpsPolicy, Roster,
    SearchLimits, SearchRequest, Target, ALL_TARGETS, MAX_BUILD_SIZE,
};

const USAGE: &str = "\
Usage: buildforge <character> <budget> <target> [options]

Arguments:
  character        Character name from the roster (e.g. \"Mei\")
  budget           Spending limit in credits (e.g. 13500)
  target           What to maximize (e.g. \"Ability DPS\"); see --list-targets

Options:
  --max-items <N>    Largest build to consider, 1-6 (default 6)
  --top <K>          Show the K best builds instead of just the winner
  --catalog <FILE>   Load items from a RON file instead of the built-in pool
  --roster <FILE>    Load characters from a RON file instead of the built-ins
  --ability-lifesteal  Fold Ability Lifesteal into Ability DPS
  --json             Emit the report as JSON on stdout
  --list-targets     Print every selectable target and exit
  -h, --help         Print this help and exit";

/// Parsed command line.
#[derive(Debug)]
struct Cli {
    character: String,
    budget: u32,
    target: Target,
    max_items: usize,
    top: usize,
    catalog_path: Option<String>,
    roster_path: Option<String>,
    include_ability_lifesteal: bool,
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = match parse_args(std::env::args().skip(1))? {
        Some(cli) => cli,
        None => return Ok(()),
    };

    let catalog = match &cli.catalog_path {
        Some(path) => Catalog::load(path).context("loading catalog")?,
        None => default_pool(),
    };
    let roster = match &cli.roster_path {
        Some(path) => Roster::load(path).context("loading roster")?,
        None => default_roster(),
    };
    catalog
        .validate_characters(&roster)
        .context("validating catalog against roster")?;

    let base = roster.get(&cli.character).ok_or_else(|| {
        anyhow!(
            "unknown character '{}' (valid: {})",
            cli.character,
            roster.names().collect::<Vec<_>>().join(", ")
        )
    })?;

    log::info!(
        "searching {} items for {} ({}, budget {})",
        catalog.len(),
        cli.character,
        cli.target.name(),
        cli.budget
    );

    let request = SearchRequest {
        catalog: &catalog,
        character: &cli.character,
        base,
        budget: cli.budget,
        target: cli.target,
        limits: SearchLimits {
            max_items: cli.max_items,
            max_evaluations: None,
        },
        policy: DpsPolicy {
            include_ability_lifesteal: cli.include_ability_lifesteal,
            ..DpsPolicy::default()
        },
    };

    let builds = search_top_k(&request, cli.top);
    let report = BuildReport::new(cli.character, cli.target, cli.budget, builds);

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        );
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

/// Parse the command line. `Ok(None)` means a help-style flag handled the
/// invocation and there is nothing left to run.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Cli>> {
    let mut positional: Vec<String> = Vec::new();
    let mut max_items = MAX_BUILD_SIZE;
    let mut top = 1;
    let mut catalog_path = None;
    let mut roster_path = None;
    let mut include_ability_lifesteal = false;
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(None);
            }
            "--list-targets" => {
                for target in ALL_TARGETS {
                    println!("{}", target.name());
                }
                return Ok(None);
            }
            "--max-items" => {
                let value = flag_value(&mut args, "--max-items")?;
                max_items = value
                    .parse()
                    .with_context(|| format!("invalid --max-items '{}'", value))?;
                if max_items == 0 || max_items > MAX_BUILD_SIZE {
                    bail!("--max-items must be between 1 and {}", MAX_BUILD_SIZE);
                }
            }
            "--top" => {
                let value = flag_value(&mut args, "--top")?;
                top = value
                    .parse()
                    .with_context(|| format!("invalid --top '{}'", value))?;
                if top == 0 {
                    bail!("--top must be at least 1");
                }
            }
            "--catalog" => catalog_path = Some(flag_value(&mut args, "--catalog")?),
            "--roster" => roster_path = Some(flag_value(&mut args, "--roster")?),
            "--ability-lifesteal" => include_ability_lifesteal = true,
            "--json" => json = true,
            other if other.starts_with('-') => {
                bail!("unknown option '{}'\n\n{}", other, USAGE);
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() != 3 {
        bail!(
            "expected <character> <budget> <target>, got {} argument{}\n\n{}",
            positional.len(),
            if positional.len() == 1 { "" } else { "s" },
            USAGE
        );
    }
    let target_name = positional.pop().unwrap_or_default();
    let budget_text = positional.pop().unwrap_or_default();
    let character = positional.pop().unwrap_or_default();

    let budget: u32 = budget_text
        .parse()
        .with_context(|| format!("invalid budget '{}'", budget_text))?;
    let target = Target::parse(&target_name).ok_or_else(|| {
        anyhow!(
            "unknown target '{}' (valid: {})",
            target_name,
            ALL_TARGETS
                .iter()
                .map(|t| t.name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    Ok(Some(Cli {
        character,
        budget,
        target,
        max_items,
        top,
        catalog_path,
        roster_path,
        include_ability_lifesteal,
        json,
    }))
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}
