//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shop_commerce::cart::CartTotals;
use shop_commerce::catalog::ProductItem;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print products as a table.
    pub fn products(&self, products: &[ProductItem]) {
        const WIDTHS: [usize; 6] = [5, 36, 10, 10, 4, 3];

        self.table_row(&["ID", "TITLE", "PRICE", "NOW", "QTY", "FAV"], &WIDTHS);
        for product in products {
            let id = product.id.to_string();
            let title = truncate(&product.title, WIDTHS[1]);
            let price = format_price(product.price);
            let now = if product.is_discounted() {
                format_price(product.discounted_price as f64)
            } else {
                "-".to_string()
            };
            let quantity = if product.quantity > 0 {
                product.quantity.to_string()
            } else {
                String::new()
            };
            let favorite = if product.is_favorite { "♥" } else { "" };

            self.table_row(&[&id, &title, &price, &now, &quantity, favorite], &WIDTHS);
        }
    }

    /// Print cart totals.
    pub fn totals(&self, totals: &CartTotals) {
        self.kv("price", &format_price(totals.total_price));
        self.kv("discount", &format_price(totals.total_discount));
        self.kv("total", &style(format_price(totals.total)).bold().to_string());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(spinner_style());
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Format an amount with two decimals.
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(9.5), "$9.50");
        assert_eq!(format_price(1249.999), "$1250.00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("iPhone 9", 10), "iPhone 9");
        assert_eq!(truncate("Samsung Universe 9", 8), "Samsung…");
        assert_eq!(truncate("Ünïcödé", 4), "Ünï…");
    }
}
