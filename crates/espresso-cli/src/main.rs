//! Espresso CLI entry point.

use std::io::Read;

use clap::{Parser, Subcommand};
use espresso_ast::Expr;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "espresso")]
#[command(about = "Inspect Espresso syntax trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical s-expression form of a JSON tree
    Print {
        /// Input JSON file (or - for stdin)
        file: String,

        /// Print the validated tree as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Compare the canonical form of a JSON tree with a snapshot
    Check {
        /// Input JSON file (or - for stdin)
        file: String,

        /// Snapshot file holding the expected s-expression
        snapshot: String,
    },

    /// Show the root node's kind and flags
    Flags {
        /// Input JSON file (or - for stdin)
        file: String,
    },
}

fn read_input(file: &str) -> Result<String, std::io::Error> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file)
    }
}

fn load(file: &str) -> Result<Expr, Box<dyn std::error::Error>> {
    let input = read_input(file)?;
    debug!("Read {} bytes from {}", input.len(), file);
    let tree: Expr = serde_json::from_str(&input)?;
    Ok(tree)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("espresso=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Print { file, json } => {
            let tree = load(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                println!("{}", tree.to_sexp()?);
            }
        }

        Commands::Check { file, snapshot } => {
            let tree = load(&file)?;
            let actual = tree.to_sexp()?;
            let expected = std::fs::read_to_string(&snapshot)?;
            let expected = expected.trim_end_matches(['\n', '\r']);

            if actual != expected {
                return Err(format!(
                    "snapshot mismatch for {}\n  expected: {}\n  actual:   {}",
                    file, expected, actual
                )
                .into());
            }
            info!("{} matches {}", file, snapshot);
        }

        Commands::Flags { file } => {
            let tree = load(&file)?;
            let mut count = 0usize;
            tree.walk(&mut |_| count += 1);

            println!("kind: {}", tree.node_kind());
            println!("lvalue: {}", tree.is_lvalue());
            println!("rvalue: {}", tree.is_rvalue());
            println!("statement: {}", tree.is_statement());
            println!("nodes: {}", count);
        }
    }

    Ok(())
}
