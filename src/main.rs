//! Browsr CLI application entry point
//!
//! This is the main executable for the browsr file browser. It loads a
//! registry snapshot (from a directory scan or a JSON file), opens the
//! interactive terminal browser, and reports what the session resolved to.
//!
//! # Usage
//!
//! ```bash
//! # Browse the current directory (default command)
//! browsr
//! browsr browse
//!
//! # Browse a snapshot file, sorted by size descending
//! browsr browse registry.json --sort size --desc
//!
//! # Write a sample snapshot to play with
//! browsr init sample.json
//!
//! # Validate a snapshot
//! browsr check sample.json
//!
//! # Quiet mode (only output results)
//! browsr -q browse
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/browsr/config.toml` on Linux).

use std::path::{Path, PathBuf};

use browsr::{
    BrowsrError,
    cli::{Cli, Commands, sort_state_from_args},
    config::BrowsrConfig,
    engine::{EngineConfig, MenuAction, MenuConfig, SuppliedHandlers},
    registry::{FileMeta, Item, Registry, scan_directory},
    ui::{self, SessionSummary},
};
use chrono::Utc;
use colored::Colorize;

type Result<T> = std::result::Result<T, BrowsrError>;

fn main() {
    let cli = Cli::parse_args();
    if let Err(e) = run(&cli) {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = BrowsrConfig::load()?;
    let quiet = cli.quiet || config.quiet;

    match cli.get_command() {
        Commands::Browse { path, sort, descending } => {
            let registry = load_registry(&path)?;
            let engine_config = EngineConfig {
                drag_threshold: config.drag_threshold,
                menu: demo_menu_config(),
                initial_sort: sort_state_from_args(sort, descending).or(config.default_sort),
            };
            let summary = ui::run(registry, engine_config)?;
            report(&summary, quiet);
            Ok(())
        }
        Commands::Init { path, force } => init_snapshot(&path, force, quiet),
        Commands::Check { snapshot } => {
            let registry = Registry::from_json_file(&snapshot)?;
            if !quiet {
                println!(
                    "{} {} item(s) in {}",
                    "OK:".green().bold(),
                    registry.len(),
                    snapshot.display()
                );
            }
            Ok(())
        }
    }
}

/// Handlers the bundled host actually implements
fn demo_menu_config() -> MenuConfig {
    MenuConfig {
        file_handlers: SuppliedHandlers { download: true, delete: true, ..Default::default() },
        folder_handlers: SuppliedHandlers { open: true, delete: true, ..Default::default() },
        ..Default::default()
    }
}

fn load_registry(path: &Path) -> Result<Registry> {
    if path.is_dir() {
        return Ok(scan_directory(path)?);
    }
    if path.extension().is_some_and(|ext| ext == "json") {
        return Ok(Registry::from_json_file(path)?);
    }
    Err(BrowsrError::InvalidInput(format!(
        "{} is neither a directory nor a .json snapshot",
        path.display()
    )))
}

fn init_snapshot(path: &PathBuf, force: bool, quiet: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(BrowsrError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let registry = sample_registry()?;
    std::fs::write(path, registry.to_json()?)?;
    if !quiet {
        println!("{} wrote {}", "OK:".green().bold(), path.display());
    }
    Ok(())
}

fn sample_registry() -> Result<Registry> {
    let now = Utc::now();
    let file = |id: &str, name: &str, parent: Option<&str>, size: u64, uploader: &str| {
        Item::file(
            id,
            name,
            parent.map(String::from),
            FileMeta {
                size,
                mime_type: None,
                uploaded_by: Some(uploader.to_string()),
                uploaded_at: Some(now),
                thumbnail: None,
            },
        )
    };

    let items = vec![
        Item::folder("docs", "Documents", None, vec!["report".into(), "archive".into()]),
        Item::folder("archive", "Archive", Some("docs".into()), vec![]),
        file("report", "report.pdf", Some("docs"), 482_113, "ana"),
        file("notes", "notes.txt", None, 1_204, "ben"),
        file("photo", "photo.png", None, 2_830_441, "ana"),
    ];
    Ok(Registry::new(items)?)
}

fn report(summary: &SessionSummary, quiet: bool) {
    for mv in &summary.moves {
        println!(
            "{} {} {} -> {}",
            "move".cyan().bold(),
            format!("{:?}", mv.moved_kind).to_lowercase(),
            mv.moved_id,
            mv.new_parent_id
        );
    }

    for call in &summary.handler_calls {
        println!("{} {:?} x{}", "handler".cyan().bold(), call.kind, call.ids.len());
    }

    for invocation in &summary.invocations {
        println!(
            "{} {} {}",
            "action".cyan().bold(),
            invocation.action.label().to_lowercase(),
            invocation.ids.join(", ")
        );
        if matches!(invocation.action, MenuAction::Download | MenuAction::Open) {
            open_locally(&invocation.ids, quiet);
        }
    }

    if !quiet
        && summary.moves.is_empty()
        && summary.handler_calls.is_empty()
        && summary.invocations.is_empty()
    {
        println!("{}", "nothing to do".dimmed());
    }
}

/// Directory-scan registries use filesystem paths as ids, so Download/Open
/// on those can hand the path to the system opener
fn open_locally(ids: &[String], quiet: bool) {
    for id in ids {
        let path = Path::new(id);
        if !path.exists() {
            continue;
        }
        if let Err(e) = open::that(path) {
            eprintln!("{} could not open {id}: {e}", "Warning:".yellow().bold());
        } else if !quiet {
            println!("{} {id}", "opened".green());
        }
    }
}
