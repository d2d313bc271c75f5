//! Command-line interface for doctree
//! This binary exports JSON document snapshots (a serialized tree plus an
//! optional selection) to HTML.
//!
//! Usage:
//!   doctree export `<snapshot.json>` [--pretty]   - Export a snapshot to HTML

use clap::{Arg, ArgAction, Command};
use doctree::{generate_html, generate_pretty_html, DocumentTree, Selection};
use serde::Deserialize;

/// On-disk snapshot format: the tree and the selection it was captured with
#[derive(Debug, Deserialize)]
struct Snapshot {
    tree: DocumentTree,
    #[serde(default)]
    selection: Option<Selection>,
}

fn main() {
    let matches = Command::new("doctree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export rich-text document snapshots to HTML")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("export")
                .about("Export a JSON document snapshot to HTML")
                .arg(
                    Arg::new("path")
                        .help("Path to the snapshot file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .short('p')
                        .help("Re-indent nested elements in the output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("export", export_matches)) => {
            let path = export_matches.get_one::<String>("path").unwrap();
            let pretty = export_matches.get_flag("pretty");
            handle_export_command(path, pretty);
        }
        _ => unreachable!(),
    }
}

/// Handle the export command
fn handle_export_command(path: &str, pretty: bool) {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: failed to read {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let snapshot: Snapshot = match serde_json::from_str(&source) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: invalid snapshot: {}", e);
            std::process::exit(1);
        }
    };

    let result = if pretty {
        generate_pretty_html(&snapshot.tree, snapshot.selection.as_ref())
    } else {
        generate_html(&snapshot.tree, snapshot.selection.as_ref())
    };

    match result {
        Ok(html) => println!("{}", html),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
