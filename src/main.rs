// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn, LevelFilter};
use skill_search::engine::frontier::frontier;
use skill_search::engine::SearchEngine;
use skill_search::graph::OPEN_TIER;
use skill_search::progress::{ConsoleProgress, DEFAULT_BAR_DEPTH};
use skill_search::render;
use skill_search::state::ActivationState;
use skill_search::{SkillTree, TreeConfig};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "skilltree")]
#[command(about = "Enumerate skill tree allocations that spend an exact number of points", long_about = None)]
#[command(version)]
struct Cli {
    /// Tree definition (TOML, or JSON by extension); the bundled sample when omitted
    #[arg(long, global = true, value_name = "PATH")]
    tree: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every combination whose weights sum to the target
    Enumerate {
        /// Points to spend; defaults to the tree file's target
        #[arg(long, allow_negative_numbers = true)]
        target: Option<i64>,

        /// Print at most this many combinations
        #[arg(long)]
        limit: Option<usize>,

        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,

        /// Do not draw progress bars
        #[arg(long)]
        no_progress: bool,
    },

    /// Show what becomes available after activating the given nodes
    Frontier {
        /// Activated nodes
        nodes: Vec<String>,
    },

    /// Check the tree definition and print a summary
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tree = load_tree(cli.tree.as_ref())?;
    match cli.command {
        Command::Enumerate {
            target,
            limit,
            json,
            no_progress,
        } => run_enumerate(&tree, target, limit, json, no_progress),
        Command::Frontier { nodes } => run_frontier(&tree, &nodes),
        Command::Validate => run_validate(&tree),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    builder.init();
}

fn load_tree(path: Option<&PathBuf>) -> Result<SkillTree> {
    let config = match path {
        Some(path) => TreeConfig::load(path)
            .with_context(|| format!("Failed to read tree {}", path.display()))?,
        None => TreeConfig::sample().context("Failed to parse bundled sample tree")?,
    };
    config.build().context("Invalid tree definition")
}

fn run_enumerate(
    tree: &SkillTree,
    target: Option<i64>,
    limit: Option<usize>,
    json: bool,
    no_progress: bool,
) -> Result<()> {
    let Some(target) = target.or(tree.default_target) else {
        bail!("No target given and the tree file does not set one");
    };

    let progress = if no_progress || json {
        ConsoleProgress::hidden()
    } else {
        ConsoleProgress::new(DEFAULT_BAR_DEPTH)
    };
    let mut engine = SearchEngine::new(&tree.graph, &tree.gates).with_observer(progress);

    let start = Instant::now();
    let combinations = engine
        .enumerate(target)
        .with_context(|| format!("Search for target {target} failed"))?;
    let elapsed = start.elapsed();
    info!("Search statistics: {}", engine.statistics());

    let report = render::Report::new(&tree.graph, &combinations, target, limit)?;
    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    for line in report.text_lines() {
        println!("{line}");
    }
    println!("Time taken: {:.2} seconds", elapsed.as_secs_f64());
    Ok(())
}

fn run_frontier(tree: &SkillTree, nodes: &[String]) -> Result<()> {
    let graph = &tree.graph;
    let members = graph.node_set(nodes.iter().map(String::as_str))?;
    let state = ActivationState::from_members(graph, members)?;
    if !state.is_connected(graph)? {
        warn!("Activated nodes do not form a connected set from the root");
    }

    println!("Activated: {}", render::member_names(graph, state.members())?.join(", "));
    println!("Total points: {}", state.weight());
    for tier in graph.tiers() {
        let points = graph.tier_weight(state.members(), tier)?;
        let status = match tree.gates.threshold(tier) {
            None if tier == OPEN_TIER => "open".to_string(),
            None => "no gate configured".to_string(),
            Some(threshold) if state.weight() >= threshold => format!("unlocked at {threshold}"),
            Some(threshold) => format!("locked until {threshold}"),
        };
        println!("Tier {tier}: {points} points ({status})");
    }

    let available = if state.is_empty() {
        std::iter::once(graph.root()).collect()
    } else {
        frontier(graph, &tree.gates, &state)?
    };
    println!("Available: {}", render::member_names(graph, &available)?.join(", "));
    Ok(())
}

fn run_validate(tree: &SkillTree) -> Result<()> {
    let graph = &tree.graph;
    println!("Nodes: {}", graph.len());
    println!("Root: {}", graph.name(graph.root())?);
    let tiers: Vec<String> = graph.tiers().iter().map(u32::to_string).collect();
    println!("Tiers: {}", tiers.join(", "));
    for (tier, threshold) in tree.gates.iter() {
        println!("Gate: tier {tier} opens at {threshold} points");
    }
    println!("Total weight: {}", graph.total_weight(&graph.all_nodes())?);
    if let Some(target) = tree.default_target {
        println!("Default target: {target}");
    }
    Ok(())
}
