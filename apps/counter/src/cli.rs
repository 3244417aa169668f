//! # Terminal Front End
//!
//! Line-oriented commands over stdin. Each line is parsed with clap as if it
//! were a command line of its own, then run against the order session.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list [--name <text>] [--min <price>] [--max <price>] [--category <c>] │
//! │  add <product-id> [qty] [hot|cold]                                     │
//! │  discount <code>                                                       │
//! │  cart | cancel | complete [--json] | receipt                           │
//! │  decode <receipt line...>                                              │
//! │  history                                                               │
//! │  report daily | report top [n] | report low [threshold]                │
//! │  product add <category> <price> <stock> <name...>                      │
//! │  product edit <id> <category> <price> <stock> <name...>                │
//! │  product delete <id>                                                   │
//! │  code add <code> <fraction> [--inactive]                               │
//! │  code edit <id> <code> <fraction> [--inactive]                         │
//! │  code delete <id>                                                      │
//! │  help [command] | quit                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::commands::admin::{self, DiscountCodeDraft, ProductDraft};
use crate::commands::cart::{self, CartView};
use crate::commands::catalog::filter_catalog;
use crate::commands::discount::apply_discount;
use crate::commands::order::{self, CompletedOrder};
use crate::commands::report;
use crate::error::ApiError;
use crate::state::{ConfigState, OrderSession};
use brew_core::{CatalogFilter, Category, DiscountRate, Money, Product, ServeTemperature};
use brew_db::BackOfficeStore;

// =============================================================================
// Command Tree
// =============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "brew",
    about = "Brew Counter",
    no_binary_name = true,
    color = clap::ColorChoice::Never
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// A parsed terminal command.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List the menu, optionally filtered
    List(ListArgs),
    /// Add a product to the cart
    Add(AddArgs),
    /// Apply a discount code to the pending order
    Discount { code: String },
    /// Show the pending order
    Cart,
    /// Discard the pending order (stock is not restored)
    Cancel,
    /// Write the invoice and print the receipt
    Complete {
        /// Print the completed order as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Reprint the last receipt
    Receipt,
    /// Read a receipt line back into name, quantity and price
    Decode {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// All invoices, newest first
    History,
    /// Read-only reports
    #[command(subcommand)]
    Report(ReportKind),
    /// Product administration
    #[command(subcommand)]
    Product(ProductCommand),
    /// Discount code administration
    #[command(subcommand)]
    Code(CodeCommand),
    /// Leave the terminal
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ListArgs {
    /// Case-insensitive name fragment
    #[arg(long)]
    pub name: Option<String>,

    /// Lowest price; an amount that does not parse means no bound
    #[arg(long)]
    pub min: Option<String>,

    /// Highest price; an amount that does not parse means no bound
    #[arg(long)]
    pub max: Option<String>,

    /// drink or dessert
    #[arg(long)]
    pub category: Option<Category>,
}

impl ListArgs {
    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter::from_inputs(
            self.name.as_deref().unwrap_or(""),
            self.min.as_deref().unwrap_or(""),
            self.max.as_deref().unwrap_or(""),
            self.category,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct AddArgs {
    /// Product id, as shown by `list`
    pub product_id: i64,

    /// Units to take
    #[arg(default_value_t = 1, allow_negative_numbers = true)]
    pub quantity: i64,

    /// hot or cold
    pub temperature: Option<ServeTemperature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ReportKind {
    /// Sales total per day, newest first
    Daily,
    /// Best sellers by units sold
    Top { limit: Option<u32> },
    /// Products whose stock is below the threshold
    Low {
        #[arg(allow_negative_numbers = true)]
        threshold: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ProductCommand {
    /// Add a product to the menu
    Add(ProductArgs),
    /// Replace every field of a product
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Remove a product
    Delete { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ProductArgs {
    /// drink or dessert
    pub category: Category,

    /// Unit price, e.g. 3.50
    #[arg(value_name = "PRICE", value_parser = parse_price, allow_hyphen_values = true)]
    pub price_cents: i64,

    #[arg(allow_negative_numbers = true)]
    pub stock: i64,

    /// Product name, spaces allowed
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
}

impl From<ProductArgs> for ProductDraft {
    fn from(args: ProductArgs) -> Self {
        ProductDraft {
            name: args.name.join(" "),
            image_name: None,
            price_cents: args.price_cents,
            stock: args.stock,
            category: args.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum CodeCommand {
    /// Add a discount code
    Add(CodeArgs),
    /// Change a code's text, rate or active flag
    Edit {
        id: i64,
        #[command(flatten)]
        fields: CodeArgs,
    },
    /// Remove a discount code
    Delete { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct CodeArgs {
    pub code: String,

    /// Discount as a fraction, clamped into 0..=1 (0.10 = 10%)
    #[arg(allow_negative_numbers = true)]
    pub fraction: f64,

    /// Store the code switched off
    #[arg(long)]
    pub inactive: bool,
}

impl From<CodeArgs> for DiscountCodeDraft {
    fn from(args: CodeArgs) -> Self {
        DiscountCodeDraft {
            code: args.code,
            fraction: args.fraction,
            active: !args.inactive,
        }
    }
}

fn parse_price(raw: &str) -> Result<i64, String> {
    Money::parse(raw)
        .map(|m| m.cents())
        .ok_or_else(|| format!("'{}' is not an amount", raw))
}

// =============================================================================
// Parsing
// =============================================================================

/// Result of parsing one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Blank,
    /// Help text requested with `help` or `--help`
    Help(String),
    Command(Command),
}

/// Parses one input line.
///
/// Usage errors from clap become VALIDATION_ERROR with clap's message.
pub fn parse_line(line: &str) -> Result<Parsed, ApiError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Parsed::Blank);
    }

    match Cli::try_parse_from(words) {
        Ok(cli) => Ok(Parsed::Command(cli.command)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::DisplayVersion => Ok(Parsed::Help(err.to_string().trim_end().to_string())),
            _ => Err(ApiError::validation(err.to_string().trim_end())),
        },
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn render_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No matching products.".to_string();
    }
    let mut out = String::new();
    for p in products {
        let _ = writeln!(
            out,
            "{:>4}  {:<28} {:>8}  stock {:>4}  {}",
            p.id,
            p.name,
            p.price().to_string(),
            p.stock,
            p.category
        );
    }
    out.trim_end().to_string()
}

fn render_cart(view: &CartView) -> String {
    if view.lines.is_empty() {
        return "Cart is empty.".to_string();
    }
    let mut out = String::new();
    for line in &view.lines {
        let _ = writeln!(out, "  {}", line);
    }
    let _ = writeln!(out, "Items: {}", view.item_count);
    let _ = writeln!(out, "Subtotal: {}", Money::from_cents(view.subtotal_cents));
    if view.discount_bps > 0 {
        let _ = writeln!(out, "Discount: {}", DiscountRate::from_bps(view.discount_bps));
    }
    let _ = write!(out, "Total: {}", Money::from_cents(view.total_cents));
    out
}

// =============================================================================
// Repl
// =============================================================================

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this and read the next line
    Continue(String),
    Quit,
}

/// One terminal session over an order session.
pub struct Repl<S> {
    session: OrderSession<S>,
    config: ConfigState,
    last_order: Option<CompletedOrder>,
}

impl<S: BackOfficeStore> Repl<S> {
    pub fn new(session: OrderSession<S>, config: ConfigState) -> Self {
        Repl {
            session,
            config,
            last_order: None,
        }
    }

    /// Parses and runs one line. Errors are rendered, never returned.
    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        let command = match parse_line(line) {
            Ok(Parsed::Command(command)) => command,
            Ok(Parsed::Blank) => return Outcome::Continue(String::new()),
            Ok(Parsed::Help(text)) => return Outcome::Continue(text),
            Err(err) => return Outcome::Continue(format!("Error: {}", err)),
        };

        if matches!(command, Command::Quit) {
            return Outcome::Quit;
        }

        debug!(command = ?command, "Terminal command");
        match self.execute(command).await {
            Ok(text) => Outcome::Continue(text),
            Err(err) => Outcome::Continue(format!("Error: {}", err)),
        }
    }

    async fn execute(&mut self, command: Command) -> Result<String, ApiError> {
        let session = &mut self.session;
        let text = match command {
            Command::List(args) => render_products(&filter_catalog(session, &args.filter())),
            Command::Add(args) => {
                let view =
                    cart::add_item(session, args.product_id, args.quantity, args.temperature)
                        .await?;
                render_cart(&view)
            }
            Command::Discount { code } => {
                let applied = apply_discount(session, &code).await?;
                format!(
                    "Applied {} ({}). Total: {}",
                    applied.code,
                    DiscountRate::from_bps(applied.discount_bps),
                    Money::from_cents(applied.total_cents)
                )
            }
            Command::Cart => render_cart(&cart::get_cart(session)),
            Command::Cancel => {
                let discarded = cart::cancel_order(session);
                format!("Order cancelled ({} entries discarded).", discarded.len())
            }
            Command::Complete { json } => {
                let completed = order::complete_order(session).await?;
                let mut text = if json {
                    serde_json::to_string_pretty(&completed)
                        .map_err(|e| ApiError::internal(e.to_string()))?
                } else {
                    order::render_receipt(&self.config.store_name, &completed)
                };
                if !completed.is_complete() {
                    let _ = write!(
                        text,
                        "\nWarning: {} line(s) were not saved to the invoice.",
                        completed.failed_lines.len()
                    );
                }
                self.last_order = Some(completed);
                text
            }
            Command::Receipt => match &self.last_order {
                Some(completed) => order::render_receipt(&self.config.store_name, completed),
                None => "No order completed yet.".to_string(),
            },
            Command::Decode { text } => {
                let line = order::decode_receipt_line(&text.join(" "))?;
                format!(
                    "{} | quantity {} | {}",
                    line.product_name,
                    line.quantity,
                    line.line_price()
                )
            }
            Command::History => {
                let invoices = report::invoice_history(session).await?;
                if invoices.is_empty() {
                    "No invoices yet.".to_string()
                } else {
                    let mut out = String::new();
                    for invoice in &invoices {
                        let _ = writeln!(
                            out,
                            "{}  {}  {}",
                            invoice.order_id,
                            invoice.created_at.format(brew_core::receipt::RECEIPT_TIME_FORMAT),
                            invoice.total()
                        );
                        for line in &invoice.lines {
                            let _ = writeln!(
                                out,
                                "    {} x{} - {}",
                                line.product_name,
                                line.quantity,
                                line.line_price()
                            );
                        }
                    }
                    out.trim_end().to_string()
                }
            }
            Command::Report(kind) => self.report(kind).await?,
            Command::Product(ProductCommand::Add(fields)) => {
                let product = admin::add_product(session, fields.into()).await?;
                format!("Added product {} ({}).", product.id, product.name)
            }
            Command::Product(ProductCommand::Edit { id, fields }) => {
                let product = admin::edit_product(session, id, fields.into()).await?;
                format!("Updated product {} ({}).", product.id, product.name)
            }
            Command::Product(ProductCommand::Delete { id }) => {
                admin::delete_product(session, id).await?;
                format!("Deleted product {}.", id)
            }
            Command::Code(CodeCommand::Add(fields)) => {
                let code = admin::add_discount_code(session, fields.into()).await?;
                format!("Added code {} ({}).", code.code, code.rate())
            }
            Command::Code(CodeCommand::Edit { id, fields }) => {
                let code = admin::edit_discount_code(session, id, fields.into()).await?;
                format!("Updated code {} ({}).", code.code, code.rate())
            }
            Command::Code(CodeCommand::Delete { id }) => {
                admin::delete_discount_code(session, id).await?;
                format!("Deleted code {}.", id)
            }
            Command::Quit => String::new(),
        };
        Ok(text)
    }

    async fn report(&self, kind: ReportKind) -> Result<String, ApiError> {
        let mut out = String::new();
        match kind {
            ReportKind::Daily => {
                for row in report::daily_sales(&self.session).await? {
                    let _ = writeln!(out, "{}  {}", row.day, Money::from_cents(row.total_cents));
                }
            }
            ReportKind::Top { limit } => {
                let limit = limit.unwrap_or(self.config.top_products_limit);
                for row in report::top_products(&self.session, limit).await? {
                    let _ = writeln!(out, "{:<32} {:>6}", row.product_name, row.units_sold);
                }
            }
            ReportKind::Low { threshold } => {
                let threshold = threshold.unwrap_or(self.config.low_stock_threshold);
                for row in report::low_stock(&self.session, threshold).await? {
                    let _ = writeln!(out, "{:<32} {:>6}", row.name, row.stock);
                }
            }
        }
        if out.is_empty() {
            return Ok("Nothing to report.".to_string());
        }
        Ok(out.trim_end().to_string())
    }

    pub fn session(&self) -> &OrderSession<S> {
        &self.session
    }

    pub fn into_session(self) -> OrderSession<S> {
        self.session
    }
}
