//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use storefront_commerce::cart::{Cart, Selection};
use storefront_commerce::catalog::Product;
use storefront_commerce::orders::{FinancialStatus, Order};

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

    /// Print a step in a process.
    pub fn step(&self, num: usize, total: usize, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style(format!("[{}/{}]", num, total)).dim(), msg);
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

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a product table.
    pub fn products(&self, products: &[&Product]) {
        if self.json {
            self.json(&products);
            return;
        }
        let widths = [6, 28, 14, 14, 6];
        self.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "RATING"], &widths);
        for product in products {
            let rating = product
                .rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string());
            self.table_row(
                &[
                    product.id.as_str(),
                    &product.name,
                    product.category().display_name(),
                    &product.price.display(),
                    &rating,
                ],
                &widths,
            );
        }
    }

    /// Print cart lines with selection marks.
    pub fn cart(&self, cart: &Cart, selection: &Selection) {
        if self.json {
            self.json(&serde_json::json!({
                "items": cart.items(),
                "selected": selection.selected_keys(),
            }));
            return;
        }
        if cart.is_empty() {
            self.info("Cart is empty");
            return;
        }
        let full = if cart.is_full() { ", full" } else { "" };
        self.header(&format!(
            "Cart ({}/{} lines{})",
            cart.unique_item_count(),
            cart.limit(),
            full
        ));
        for line in cart.items() {
            let mark = if selection.is_selected(&line.key()) {
                style("[x]").green().to_string()
            } else {
                style("[ ]").dim().to_string()
            };
            let total = line
                .line_total()
                .map(|m| m.display())
                .unwrap_or_else(|e| e.to_string());
            println!(
                "  {} {} ({} / {}) x{}  {}",
                mark, line.name, line.size, line.color, line.quantity, total
            );
        }
    }

    /// Print order history.
    pub fn orders(&self, orders: &[Order]) {
        if self.json {
            self.json(&orders);
            return;
        }
        if orders.is_empty() {
            self.info("No orders yet");
            return;
        }
        self.header("Orders");
        for (position, order) in orders.iter().enumerate() {
            let method = order
                .payment_method
                .map(|m| m.display_name())
                .unwrap_or("-");
            println!(
                "  {} {}  {}  {} item(s)  {}  {}",
                style(format!("#{}", position)).dim(),
                order.order_number,
                order.grand_total.display(),
                order.item_count(),
                method,
                status_badge(order.financial_status),
            );
        }
    }
}

/// Status badge for an order's payment state.
pub fn status_badge(status: FinancialStatus) -> String {
    match status {
        FinancialStatus::Paid => style(status.as_str()).green().to_string(),
        FinancialStatus::Pending => style(status.as_str()).yellow().to_string(),
    }
}
