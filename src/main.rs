use clap::Parser;
use itertools::Itertools;
use jxpath::visitors::{DebugVisitor, DistinctTextVisitor, RemoveFieldVisitor, ReplaceTextVisitor};
use jxpath::{EngineConfig, JsonXpath, JxpathError, find};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Select, filter and edit JSON documents with XPath-style paths.
#[derive(Parser)]
#[command(name = "jxpath")]
#[command(about = "Select, filter and edit JSON documents with XPath-style paths")]
struct Cli {
    /// Path expression, e.g. "//orgVdcs[value.get('status') == '\"Active\"']/name"
    path: String,

    /// JSON document to read. Reads standard input when omitted.
    file: Option<PathBuf>,

    /// Print the first node found for a plain a/b/c path instead of evaluating
    #[arg(long, conflicts_with_all = ["remove", "replace", "distinct"])]
    find: bool,

    /// Remove every match from its parent
    #[arg(long, conflicts_with_all = ["replace", "distinct"])]
    remove: bool,

    /// Replace matches whose text is FROM with TO. May be repeated.
    #[arg(long, value_name = "FROM=TO", value_parser = parse_replacement)]
    replace: Vec<(String, String)>,

    /// Print each distinct match text on its own line
    #[arg(long)]
    distinct: bool,

    /// Print the (possibly edited) document instead of the matches
    #[arg(long)]
    print_tree: bool,

    /// Also log the parent of every match (shown with RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with engine settings, e.g. {"maxDepth": 64, "regexCacheCapacity": 16}
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Deepest nesting the traversal may walk. Overrides the config file.
    #[arg(long)]
    max_depth: Option<usize>,
}

fn parse_replacement(s: &str) -> Result<(String, String), JxpathError> {
    s.split_once('=')
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .ok_or_else(|| JxpathError::InvalidReplacement(s.to_string()))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), JxpathError> {
    let source = match &cli.file {
        Some(file) => {
            log::debug!("Loading document from {}", file.display());
            fs::read_to_string(file)?
        }
        None => io::read_to_string(io::stdin())?,
    };
    let mut tree: Value = serde_json::from_str(&source)?;

    if cli.find {
        let found = find(&tree, &cli.path)?.ok_or_else(|| JxpathError::NotFound(cli.path.clone()))?;
        println!("{}", serde_json::to_string_pretty(found)?);
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(file) => {
            log::debug!("Loading engine config from {}", file.display());
            serde_json::from_str::<EngineConfig>(&fs::read_to_string(file)?)?
        }
        None => EngineConfig::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
    let engine = JsonXpath::with_config(config);

    let matches = if cli.remove {
        let mut visitor = RemoveFieldVisitor::new();
        let matches = engine.evaluate(&mut tree, &cli.path, &mut visitor)?;
        log::info!("Removed: {}", visitor.removed().iter().join(", "));
        matches
    } else if !cli.replace.is_empty() {
        let mut visitor = ReplaceTextVisitor::new(cli.replace.iter().cloned().collect());
        let matches = engine.evaluate(&mut tree, &cli.path, &mut visitor)?;
        log::info!("Replaced {} of {} match(es)", visitor.replaced(), matches.len());
        matches
    } else if cli.distinct {
        let mut visitor = DistinctTextVisitor::new();
        engine.evaluate(&mut tree, &cli.path, &mut visitor)?;
        for text in visitor.values() {
            println!("{}", text);
        }
        return Ok(());
    } else {
        let mut visitor = DebugVisitor::new(cli.path.as_str()).verbose(cli.verbose);
        engine.evaluate(&mut tree, &cli.path, &mut visitor)?
    };

    let output = if cli.print_tree {
        tree
    } else {
        Value::Array(matches.into_iter().map(|m| m.value).collect())
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
