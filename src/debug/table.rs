use std::io::{self, Write};

use super::{display_width, Printer};
use crate::Value;

const MIN_WIDTH: usize = 4;
const MISSING: &str = "NULL";

/// Box-drawing pieces for one horizontal rule: left edge, column joint, right edge.
struct Rule {
    left: &'static str,
    joint: &'static str,
    right: &'static str,
}

const TOP: Rule = Rule {
    left: "┌─",
    joint: "─┬─",
    right: "─┐",
};
const MIDDLE: Rule = Rule {
    left: "├─",
    joint: "─┼─",
    right: "─┤",
};
const BOTTOM: Rule = Rule {
    left: "└─",
    joint: "─┴─",
    right: "─┘",
};

/// Cell text of every row, with columns in first-seen order.
struct Table {
    columns: Vec<(String, usize)>,
    rows: Vec<Vec<(String, Option<String>)>>,
}

impl Table {
    fn from_rows(rows: &[Value]) -> Self {
        let mut table = Table {
            columns: Vec::new(),
            rows: Vec::new(),
        };

        for row in rows {
            let Some(entries) = row.entries() else {
                continue;
            };
            let mut cells = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                let text = (!value.is_null()).then(|| value.to_string());
                let width = text.as_deref().map_or(0, display_width);
                table.widen(&key, width);
                cells.push((key, text));
            }
            table.rows.push(cells);
        }

        table
    }

    fn widen(&mut self, column: &str, width: usize) {
        match self.columns.iter_mut().find(|(name, _)| name == column) {
            Some((_, current)) => *current = (*current).max(width),
            None => {
                let header = MIN_WIDTH.max(display_width(column));
                self.columns.push((column.to_string(), header.max(width)));
            }
        }
    }

    fn rule(&self, rule: &Rule) -> String {
        let segments: Vec<String> = self
            .columns
            .iter()
            .map(|(_, width)| "─".repeat(*width))
            .collect();
        format!("{}{}{}", rule.left, segments.join(rule.joint), rule.right)
    }

    fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn cells<'a>(&self, row: &'a [(String, Option<String>)]) -> Vec<&'a str> {
        self.columns
            .iter()
            .map(|(name, _)| {
                row.iter()
                    .find(|(key, _)| key == name)
                    .and_then(|(_, text)| text.as_deref())
                    .unwrap_or(MISSING)
            })
            .collect()
    }

    fn line(&self, cells: &[&str]) -> String {
        let padded: Vec<String> = self
            .columns
            .iter()
            .zip(cells)
            .map(|((_, width), text)| pad(text, *width))
            .collect();
        format!("│ {} │", padded.join(" │ "))
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(fill))
}

impl<W: Write> Printer<W> {
    /// Prints rows of key/value pairs as a box-drawn table.
    ///
    /// Columns are the union of all row keys in the order first seen, each
    /// at least four columns wide. Cells a row doesn't have, or that are
    /// null, print as `NULL`; sequences and mappings print their values
    /// joined with `,`. Rows that are not containers are skipped.
    pub fn text_table(&mut self, rows: &[Value]) -> io::Result<()> {
        let table = Table::from_rows(rows);

        self.printf(format_args!("{}\n", table.rule(&TOP)))?;
        self.printf(format_args!("{}\n", table.line(&table.header())))?;

        for row in &table.rows {
            self.printf(format_args!("{}\n", table.rule(&MIDDLE)))?;
            self.printf(format_args!("{}\n", table.line(&table.cells(row))))?;
        }

        self.printf(format_args!("{}\n", table.rule(&BOTTOM)))
    }
}

/// Renders `rows` into a fresh string.
pub fn text_table_to_string(rows: &[Value]) -> String {
    let mut printer = Printer::buffer();
    // writes into a Vec cannot fail
    let _ = printer.text_table(rows);
    printer.into_string()
}
