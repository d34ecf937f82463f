//! Terminal output for the MyKart CLI.
//!
//! Every command renders through here: a table view for humans, JSON or YAML
//! for scripts. Structured output is emitted unstyled so it pipes cleanly;
//! the table view gets colored prefixes and dollar-formatted amounts.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table view
    #[default]
    Table,
    /// JSON, one document per command
    Json,
    /// YAML, one document per command
    Yaml,
}

impl OutputFormat {
    /// Whether this is the human-readable table view.
    ///
    /// Commands use this to decide between decorated output and a plain
    /// serialized document.
    pub fn is_table(self) -> bool {
        matches!(self, Self::Table)
    }
}

/// Format a dollar amount the way the storefront does: `$` plus two decimals.
pub fn price(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Print a success line.
pub fn print_success(msg: &str) {
    println!("{} {}", "ok".green().bold(), msg);
}

/// Print an error line to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// Print a secondary note, such as a pagination footer or a total.
pub fn print_info(msg: &str) {
    println!("{}", msg.dimmed());
}

/// Print rows in the requested format.
///
/// Table output needs `Tabled`; JSON/YAML need `Serialize`. An empty table
/// prints a placeholder line instead of a bare header.
pub fn print_list<T: Tabled + Serialize>(items: &[T], format: OutputFormat) {
    if format.is_table() {
        if items.is_empty() {
            println!("{}", "Nothing to show.".dimmed());
        } else {
            println!("{}", Table::new(items).with(Style::psql()));
        }
    } else {
        print_item(&items, format);
    }
}

/// Print one value as a serialized document.
///
/// Used directly for JSON/YAML output, and as the fallback when a command has
/// no table rendering for a value.
pub fn print_item<T: Serialize>(item: &T, format: OutputFormat) {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(item).map_err(|e| e.to_string()),
        _ => serde_json::to_string_pretty(item)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| e.to_string()),
    };

    match rendered {
        Ok(doc) => print!("{}", doc),
        Err(e) => print_error(&format!("could not render output: {}", e)),
    }
}

/// Print an indented key/value detail line for the table view.
pub fn print_detail(key: &str, value: &str) {
    println!("  {:<14} {}", format!("{}:", key).cyan(), value);
}

/// Print a section header for the table view.
pub fn print_header(title: &str) {
    println!();
    println!("{}", title.bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_formatting() {
        assert_eq!(price(24.99), "$24.99");
        assert_eq!(price(35.5), "$35.50");
        assert_eq!(price(0.0), "$0.00");
    }

    #[test]
    fn test_table_format_detection() {
        assert!(OutputFormat::Table.is_table());
        assert!(!OutputFormat::Json.is_table());
        assert!(!OutputFormat::Yaml.is_table());
    }
}
