//! Configuration management commands.

use anyhow::{anyhow, bail, Result};
use storefront_commerce::Currency;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, LogFormat};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let store = &ctx.config.store;
    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("currency", store.currency.code());
    ctx.output.kv("cart.limit", &store.cart.limit.to_string());
    ctx.output.kv("checkout.delivery_fee", &store.delivery_fee().display());
    ctx.output.kv(
        "checkout.clear_purchased_lines",
        &store.checkout.clear_purchased_lines.to_string(),
    );
    ctx.output.kv("checkout.validate_login", &store.checkout.validate_login.to_string());
    ctx.output.kv("payment.delay_ms", &store.payment.delay_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());
    ctx.output.kv("level", &ctx.config.logging.level);

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = find_config_file(ctx)?;

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;

    let errors = config.store.validate();
    if !errors.is_empty() {
        bail!("Refusing to save: {}", errors.join("; "));
    }
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.errors();
    let warnings = ctx.config.warnings();

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<serde_json::Value> {
    let parts: Vec<&str> = key.split('.').collect();
    let store = &config.store;

    let value = match parts.as_slice() {
        ["store", "currency"] => store.currency.code().into(),
        ["store", "cart", "limit"] => store.cart.limit.into(),
        ["store", "checkout", "delivery_fee"] => store.checkout.delivery_fee.into(),
        ["store", "checkout", "clear_purchased_lines"] => store.checkout.clear_purchased_lines.into(),
        ["store", "checkout", "validate_login"] => store.checkout.validate_login.into(),
        ["store", "payment", "delay_ms"] => store.payment.delay_ms.into(),
        ["logging", "format"] => serde_json::to_value(config.logging.format)?,
        ["logging", "level"] => config.logging.level.clone().into(),
        _ => bail!("Unknown config key: {}", key),
    };

    Ok(value)
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let store = &mut config.store;

    match parts.as_slice() {
        ["store", "currency"] => {
            store.currency =
                Currency::from_code(value).ok_or_else(|| anyhow!("Unknown currency: {}", value))?
        }
        ["store", "cart", "limit"] => store.cart.limit = value.parse()?,
        ["store", "checkout", "delivery_fee"] => store.checkout.delivery_fee = value.parse()?,
        ["store", "checkout", "clear_purchased_lines"] => {
            store.checkout.clear_purchased_lines = value.parse()?
        }
        ["store", "checkout", "validate_login"] => store.checkout.validate_login = value.parse()?,
        ["store", "payment", "delay_ms"] => store.payment.delay_ms = value.parse()?,
        ["logging", "format"] => {
            config.logging.format = match value {
                "compact" => LogFormat::Compact,
                "json" => LogFormat::Json,
                _ => bail!("Unknown log format: {} (expected compact or json)", value),
            }
        }
        ["logging", "level"] => config.logging.level = value.to_string(),
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn find_config_file(ctx: &Context) -> Result<String> {
    if let Some(path) = &ctx.config_path {
        return Ok(path.to_string_lossy().to_string());
    }
    for name in &CONFIG_NAMES {
        let path = ctx.cwd.join(name);
        if path.exists() {
            return Ok(path.to_string_lossy().to_string());
        }
    }
    bail!("No config file found. Run `shop config init` to create one.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set_round_through_keys() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "store.cart.limit", "4").unwrap();
        set_config_value(&mut config, "store.currency", "usd").unwrap();
        set_config_value(&mut config, "logging.format", "json").unwrap();

        assert_eq!(config.store.cart.limit, 4);
        assert_eq!(config.store.currency, Currency::USD);
        assert_eq!(get_config_value(&config, "store.cart.limit").unwrap(), 4);
        assert_eq!(get_config_value(&config, "logging.format").unwrap(), "json");
    }

    #[test]
    fn test_unknown_key_and_bad_value() {
        let mut config = CliConfig::default();
        assert!(get_config_value(&config, "store.nope").is_err());
        assert!(set_config_value(&mut config, "store.cart.limit", "many").is_err());
        assert!(set_config_value(&mut config, "store.currency", "XYZ").is_err());
    }
}
