use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "small-shop")]
#[command(about = "Product catalog and shopping carts over a JSON data file")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Data file; overrides store.data_path from the config file
    #[arg(long)]
    pub data: Option<String>,

    /// Fail instead of skipping cart rows whose contents cannot be parsed
    #[arg(long)]
    pub strict: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Catalog operations
    #[command(subcommand)]
    Products(ProductCommand),
    /// Cart operations
    #[command(subcommand)]
    Cart(CartCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProductCommand {
    List,
    Get {
        id: i64,
    },
    Add {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Decimal cost, e.g. 9.99
        #[arg(long, allow_hyphen_values = true)]
        cost: String,
        #[arg(long)]
        qty: Option<i64>,
    },
    UpdateQty {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CartCommand {
    /// Resolved products across all of the user's rows
    Show { username: String },
    /// One entry per cart row
    Details { username: String },
    Add { username: String, product_id: i64 },
    Remove { username: String, product_id: i64 },
    Delete { username: String },
}
