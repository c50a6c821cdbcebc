//! Configuration management commands.

use anyhow::{bail, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.output.is_json() {
        ctx.output.json(config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    match config.api.timeout_ms {
        Some(ms) => ctx.output.kv("timeout_ms", &ms.to_string()),
        None => ctx.output.kv("timeout_ms", "none"),
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("page_size", &config.catalog.page_size.to_string());

    ctx.output.info("");
    ctx.output.info("[store]");
    match config.store.resolved_path() {
        Ok(path) => ctx
            .output
            .kv("path", &ctx.resolve_path(&path).display().to_string()),
        Err(e) => ctx.output.kv("path", &format!("unresolved ({e})")),
    }

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output
        .kv("level", config.logging.level.as_deref().unwrap_or("warn"));
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "created": config_path }));
    }
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.validate();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "valid": errors.is_empty(),
            "errors": errors,
            "warnings": warnings,
        }));
    }

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
