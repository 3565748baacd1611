use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(name = "tagml")]
#[command(about = "TAGML — forgiving XML-subset configuration parser")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a file and report errors without printing the tree
    Check {
        /// Input file
        path: String,
    },

    /// Parse a file and print the node tree
    Dump {
        /// Input file
        path: String,

        /// Print the tree as JSON instead of the indented dump
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Check { path } => cmd_check(&path),
        Command::Dump { path, json } => cmd_dump(&path, json),
    }
}

fn parse_file(path: &str) -> tagml_parser::Document {
    match tagml_parser::Parser::parse_file(path) {
        Ok(doc) => doc,
        Err(e) => {
            eprint!("Parse error: {e}");
            let mut cause = e.source();
            while let Some(c) = cause {
                eprint!(": {c}");
                cause = c.source();
            }
            eprintln!();
            std::process::exit(1);
        }
    }
}

fn cmd_check(path: &str) {
    let _ = parse_file(path);
    eprintln!("OK: {path}");
}

fn cmd_dump(path: &str, json: bool) {
    let doc = parse_file(path);

    if json {
        match serde_json::to_string_pretty(&doc.root()) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error rendering tree: {e}");
                std::process::exit(1);
            }
        }
    } else {
        for line in doc.root().tree_lines() {
            println!("{line}");
        }
    }
}
