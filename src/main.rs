use clap::Parser;
use serde_json::Value;
use small_shop::config::{CartCommand, Command, ProductCommand};
use small_shop::domain::model::decimal_to_value;
use small_shop::utils::{logger, validation::Validate};
use small_shop::{
    CartService, CliConfig, JsonFileStore, MalformedRowPolicy, Product, ProductService, Record,
    Result, ShopConfig, ShopError,
};
use std::str::FromStr;

fn main() {
    let cli = CliConfig::parse();

    // 載入設定檔 (未指定時使用預設值)
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    logger::init_logger(config.log_format(), cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli, &config) {
        tracing::error!("❌ Command failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

fn load_config(cli: &CliConfig) -> Result<ShopConfig> {
    let mut config = match &cli.config {
        Some(path) => ShopConfig::from_file(path)?,
        None => ShopConfig::default(),
    };

    // 命令列覆蓋設定
    if let Some(data) = &cli.data {
        config.store.data_path = data.clone();
    }
    if cli.strict {
        config.cart.on_malformed_row = Some("fail".to_string());
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: &CliConfig, config: &ShopConfig) -> Result<()> {
    let store = JsonFileStore::open(config.data_path())?;
    tracing::debug!("Using data file {}", store.path().display());

    match &cli.command {
        Command::Products(command) => run_products(&store, command),
        Command::Cart(command) => run_cart(&store, command, config.malformed_row_policy()?),
    }
}

fn run_products(store: &JsonFileStore, command: &ProductCommand) -> Result<()> {
    let products = ProductService::new(store);

    match command {
        ProductCommand::List => {
            let list = products.list_products()?;
            print_json(&Value::Array(list.iter().map(product_json).collect()))
        }
        ProductCommand::Get { id } => print_json(&product_json(&products.get_product(*id)?)),
        ProductCommand::Add {
            id,
            name,
            description,
            cost,
            qty,
        } => {
            let cost = rust_decimal::Decimal::from_str(cost.trim()).map_err(|e| {
                ShopError::validation(format!("cost '{}' is not a decimal: {}", cost, e))
            })?;
            let mut record = Record::new()
                .with("id", *id)
                .with("name", name.as_str())
                .with("description", description.as_str())
                .with("cost", decimal_to_value(cost));
            if let Some(qty) = qty {
                record.insert("qty", *qty);
            }

            products.add_product(&record)?;
            tracing::info!("✅ Added product {}", id);
            Ok(())
        }
        ProductCommand::UpdateQty { id, qty } => {
            products.update_qty(*id, *qty)?;
            tracing::info!("✅ Product {} qty set to {}", id, qty);
            Ok(())
        }
    }
}

fn run_cart(store: &JsonFileStore, command: &CartCommand, policy: MalformedRowPolicy) -> Result<()> {
    let carts = CartService::new(store, store).with_policy(policy);

    match command {
        CartCommand::Show { username } => {
            let contents = carts.get_cart(username)?;
            print_json(&Value::Array(contents.iter().map(product_json).collect()))
        }
        CartCommand::Details { username } => {
            let rows = carts.get_cart_details(username)?;
            print_json(&Value::Array(rows.iter().map(|cart| cart.to_json()).collect()))
        }
        CartCommand::Add {
            username,
            product_id,
        } => {
            carts.add_to_cart(username, *product_id)?;
            tracing::info!("✅ Added product {} to cart of '{}'", product_id, username);
            Ok(())
        }
        CartCommand::Remove {
            username,
            product_id,
        } => {
            carts.remove_from_cart(username, *product_id)?;
            tracing::info!("✅ Removed product {} from cart of '{}'", product_id, username);
            Ok(())
        }
        CartCommand::Delete { username } => {
            carts.delete_cart(username)?;
            tracing::info!("✅ Deleted cart of '{}'", username);
            Ok(())
        }
    }
}

fn product_json(product: &Product) -> Value {
    serde_json::to_value(product.to_record()).unwrap_or(Value::Null)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
