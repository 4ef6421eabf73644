//! `dynval` CLI: inspect JSON documents as dynval value trees and apply
//! single operators to dynamically-typed operands.
//!
//! ## Usage
//!
//! ```sh
//! # Print the tag of every node (stdin → stdout)
//! echo '{"name":"Alice","scores":[95,87.5]}' | dynval inspect
//!
//! # Look up a node by dot path
//! dynval get scores.1 -i data.json
//!
//! # Apply one operator; operands are JSON literals, bare words are strings
//! dynval calc 1 + 2.5        # Float 3.5
//! dynval calc 1 + x          # String 1x
//! dynval calc 5 % 4          # Int 1
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dynval_core::json::{from_json_str, to_json_string_pretty};
use dynval_core::{ArithOp, Value};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "dynval",
    version,
    about = "Inspect and combine dynamically-typed values"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print `<path>: <Kind>` for every node of a JSON document
    Inspect {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the node at a dot path (e.g. `items.0.name`) as JSON
    Get {
        /// Dot-separated path; numeric segments index lists
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Apply one operator (`+ - * / % == !=`) and print `<Kind> <value>`
    Calc {
        /// Left operand (JSON literal, or a bare string)
        #[arg(allow_negative_numbers = true)]
        lhs: String,
        /// Operator
        #[arg(value_parser = parse_operator)]
        op: Operator,
        /// Right operand (JSON literal, or a bare string)
        #[arg(allow_negative_numbers = true)]
        rhs: String,
    },
}

#[derive(Clone, Copy, Debug)]
enum Operator {
    Arith(ArithOp),
    Eq,
    Ne,
}

fn parse_operator(raw: &str) -> std::result::Result<Operator, String> {
    match raw {
        "+" => Ok(Operator::Arith(ArithOp::Add)),
        "-" => Ok(Operator::Arith(ArithOp::Sub)),
        "*" => Ok(Operator::Arith(ArithOp::Mul)),
        "/" => Ok(Operator::Arith(ArithOp::Div)),
        "%" => Ok(Operator::Arith(ArithOp::Rem)),
        "==" => Ok(Operator::Eq),
        "!=" => Ok(Operator::Ne),
        other => Err(format!(
            "unknown operator '{}'. Available: + - * / % == !=",
            other
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { input } => {
            let root = read_value(input.as_deref())?;
            let mut lines = Vec::new();
            describe_tree(&root, "$", &mut lines)?;
            println!("{}", lines.join("\n"));
        }
        Commands::Get {
            path,
            input,
            output,
        } => {
            let root = read_value(input.as_deref())?;
            let node = lookup_path(&root, &path)?;
            let json = to_json_string_pretty(&node).context("Failed to write node as JSON")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Calc { lhs, op, rhs } => {
            let lhs = parse_operand(&lhs)?;
            let rhs = parse_operand(&rhs)?;
            let result = match op {
                Operator::Arith(op) => op
                    .apply(&lhs, &rhs)
                    .with_context(|| format!("Failed to evaluate {} {} {}", lhs, op, rhs))?,
                Operator::Eq => Value::boolean(lhs == rhs),
                Operator::Ne => Value::boolean(lhs != rhs),
            };
            println!("{} {}", result.kind(), result);
        }
    }

    Ok(())
}

/// Parse a calc operand as a JSON literal. Anything that is not valid JSON
/// (e.g. `abc`) is taken as a string.
fn parse_operand(raw: &str) -> Result<Value> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from_json(&json)
            .with_context(|| format!("Unsupported operand: {}", raw)),
        Err(_) => Ok(Value::string(raw)),
    }
}

/// Collect one `<path>: <Kind>` line per node, depth first. Map keys are
/// visited in sorted order so the output is stable.
fn describe_tree(value: &Value, path: &str, lines: &mut Vec<String>) -> Result<()> {
    lines.push(format!("{}: {}", path, value.kind()));
    match value {
        Value::List(_) => {
            for i in 0..value.count()? {
                describe_tree(&value.get(i)?, &format!("{}[{}]", path, i), lines)?;
            }
        }
        Value::Map(_) => {
            let mut keys = value.keys()?;
            keys.sort();
            for key in keys {
                describe_tree(&value.get(&key)?, &format!("{}.{}", path, key), lines)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Walk a dot path through lists (numeric segments) and maps (everything else).
/// An empty path or `$` addresses the root.
fn lookup_path(root: &Value, path: &str) -> Result<Value> {
    let mut node = root.clone();
    let trimmed = path.strip_prefix('$').unwrap_or(path);
    for segment in trimmed.split('.').filter(|s| !s.is_empty()) {
        let next = match (&node, segment.parse::<usize>()) {
            (Value::List(_), Ok(index)) => node.get(index),
            _ => node.get(segment),
        };
        node = next.with_context(|| format!("Failed to resolve '{}' in path '{}'", segment, path))?;
    }
    Ok(node)
}

fn read_value(path: Option<&str>) -> Result<Value> {
    let text = read_input(path)?;
    from_json_str(&text).context("Failed to parse JSON input")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
