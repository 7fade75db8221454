//! Terminal output for catalog commands.
//!
//! Human output goes to stdout with `console` styling; diagnostics go to
//! stderr. In `--json` mode only [`Output::json`] and errors print.

use console::{pad_str, style, Alignment};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn info(&self, msg: &str) {
        if !self.json {
            println!("{} {}", style("ℹ").blue(), msg);
        }
    }

    pub fn success(&self, msg: &str) {
        if !self.json {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Print an error; a `{"error": ...}` object in JSON mode.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only printed with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// Pretty-printed JSON, printed in every mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Print a table with a dimmed header row.
    pub fn table(&self, table: &ProductTable) {
        if self.json {
            return;
        }
        println!("  {}", style(table.render_row(&table.headers)).dim());
        for row in &table.rows {
            println!("  {}", table.render_row(row));
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Column-aligned rows whose cells may carry ANSI styling.
#[derive(Debug, Default)]
pub struct ProductTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ProductTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Display width of each column, ignoring escape codes.
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| console::measure_text_width(h))
            .collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let w = console::measure_text_width(cell);
                match widths.get_mut(i) {
                    Some(current) => *current = (*current).max(w),
                    None => widths.push(w),
                }
            }
        }
        widths
    }

    fn render_row(&self, cells: &[String]) -> String {
        let widths = self.widths();
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad_str(cell, width, Alignment::Left, None).into_owned())
            .collect();
        padded.join("  ").trim_end().to_string()
    }
}

/// Availability badge for product listings.
pub fn stock_badge(in_stock: bool) -> String {
    if in_stock {
        style("in stock").green().to_string()
    } else {
        style("sold out").red().to_string()
    }
}

/// Rating as stars, e.g. `★★★★☆ 4.3`.
pub fn format_rating(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{} {:.1}", "★".repeat(filled), "☆".repeat(5 - filled), rating)
}

/// Shorten `s` to at most `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
