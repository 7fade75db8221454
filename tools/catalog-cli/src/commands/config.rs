//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("[server]");
    ctx.output.kv("bind", &config.server.bind);

    ctx.output.info("[data]");
    ctx.output.kv("dir", &ctx.data_dir().display().to_string());
    ctx.output.kv("currency", config.currency().code());

    ctx.output.info("[query]");
    ctx.output.kv("default_limit", &config.query.default_limit.to_string());
    ctx.output.kv("max_limit", &config.query.max_limit.to_string());

    ctx.output.info("[cache]");
    ctx.output.kv("enabled", &config.cache.enabled.to_string());
    ctx.output.kv("ttl_secs", &config.cache.ttl_secs.to_string());
    ctx.output.kv("max_entries", &config.cache.max_entries.to_string());

    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level.to_string());
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output
        .success(&format!("Created {}", path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    let validation = ctx.config.validate();

    let data_dir = ctx.data_dir();
    let mut errors = validation.errors;
    for skipped in &ctx.skipped_configs {
        errors.push(format!(
            "{} could not be loaded: {}",
            skipped.path.display(),
            skipped.reason
        ));
    }
    if !data_dir.is_dir() {
        errors.push(format!("data directory not found: {}", data_dir.display()));
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": errors.is_empty(),
            "errors": errors,
            "warnings": validation.warnings,
        }));
    } else {
        for warning in &validation.warnings {
            ctx.output.warn(warning);
        }
        for error in &errors {
            ctx.output.error(error);
        }
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}
