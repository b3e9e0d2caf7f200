//! C translator front end driver
//!
//! Command line access to the wire codec, the renderer and the walker.
//! Each subcommand reads one JSON wire record from a file.

use anyhow::{Context, Result};
use cfront_common::{FrontendError, NodeId};
use cfront_syntax::codec::{self, WireExpr, WireRef};
use cfront_syntax::walk::{walk_with, Visitor};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "cfront")]
#[command(about = "C translator front end tools")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a wire record and print it as C text
    Render {
        /// Input JSON record
        input: PathBuf,
    },

    /// Print the kind and identity of every node, indented by depth
    Walk {
        /// Input JSON record
        input: PathBuf,

        /// List children before their parents
        #[arg(long)]
        postorder: bool,
    },

    /// Decode only; fails if the record is malformed
    Check {
        /// Input JSON record
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Commands::Render { input } => {
            let expr = load_input(&input)?;
            println!("{}", expr);
        }
        Commands::Walk { input, postorder } => {
            let expr = load_input(&input)?;
            for line in tree_lines(&expr, postorder) {
                println!("{}", line);
            }
        }
        Commands::Check { input } => {
            let expr = load_input(&input)?;
            let count = node_count(&expr);
            info!("{}: {} record with {} nodes", input.display(), expr.kind(), count);
            println!("ok: {} ({} nodes)", expr.kind(), count);
        }
    }

    Ok(())
}

/// Read and decode one wire record
fn load(path: &Path) -> Result<WireExpr, FrontendError> {
    let text = fs::read_to_string(path)?;
    debug!("read {} bytes from {}", text.len(), path.display());
    Ok(codec::decode(&text)?)
}

fn load_input(path: &Path) -> Result<WireExpr> {
    load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Collects one line per visited node
struct TreeLines {
    depth: usize,
    postorder: bool,
    lines: Vec<String>,
}

impl TreeLines {
    fn emit(&mut self, kind: &str, id: NodeId) {
        self.lines.push(format!("{}{} {}", "  ".repeat(self.depth), kind, id));
    }
}

impl<'a> Visitor<WireRef<'a>> for TreeLines {
    fn enter(&mut self, node: WireRef<'a>) {
        if !self.postorder {
            self.emit(node.kind(), node.id());
        }
        self.depth += 1;
    }

    fn exit(&mut self, node: WireRef<'a>) {
        self.depth -= 1;
        if self.postorder {
            self.emit(node.kind(), node.id());
        }
    }
}

fn tree_lines(expr: &WireExpr, postorder: bool) -> Vec<String> {
    let mut visitor = TreeLines {
        depth: 0,
        postorder,
        lines: Vec::new(),
    };
    walk_with(WireRef::Expr(expr), &mut visitor);
    visitor.lines
}

fn node_count(expr: &WireExpr) -> usize {
    let mut count = 0;
    cfront_syntax::walk::preorder(WireRef::Expr(expr), |_| count += 1);
    count
}
