//! Entry point for the portfolio page runner.
//!
//! Stands in for the site builder: loads the page markup, seeds a record
//! from `conf/config.toml` (and optionally a JSON record), registers the page
//! with an in-process host, replays `--set field=value` edits and prints what
//! the page ended up looking like.

mod report;

use anyhow::{Context, Result, anyhow};
use portfolio_core::config::{ConfigField, FieldKind, FieldValue, load_config, load_record};
use portfolio_core::html::load_page;
use portfolio_core::{LocalHost, SiteHost, register_with_host};
use std::env;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const USAGE: &str =
    "Usage: portfolio-site <page.html> [--config <record.json>] [--set field=value]...";

struct Args {
    page: PathBuf,
    record: Option<PathBuf>,
    edits: Vec<(ConfigField, FieldValue)>,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let site = load_config(&config_path());
    set_log_level(reload_handle, site.log_level.as_filter_str());

    let mut record = site.record.clone();
    if let Some(path) = &args.record {
        record.merge(&load_record(path)?);
        info!(path = %path.display(), "Merged host record");
    }

    let document = load_page(&args.page)?;
    let local = LocalHost::new(document, record);
    let host: Rc<dyn SiteHost> = local.clone();
    let _binder = register_with_host(Some(&host));

    let capabilities = local
        .capabilities()
        .context("host did not receive the page registration")?;
    for (field, value) in args.edits {
        match field.kind() {
            FieldKind::Text => local.edit_text(field, &value.to_string()),
            _ => match capabilities.find(field) {
                Some(capability) => capability.set(value),
                None => warn!(%field, "No capability exposes this field"),
            },
        }
    }

    let report = report::build(&local);
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serializing report")?
    );
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut page = None;
    let mut record = None;
    let mut edits = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                record = Some(PathBuf::from(path));
            }
            "--set" => {
                let edit = args.next().ok_or_else(|| anyhow!("--set needs field=value"))?;
                edits.push(parse_edit(&edit)?);
            }
            _ if arg.starts_with("--") => return Err(anyhow!("Unknown option {arg}\n{USAGE}")),
            _ => page = Some(PathBuf::from(arg)),
        }
    }

    let page = page.ok_or_else(|| anyhow!(USAGE))?;
    if !page.exists() {
        return Err(anyhow!("File not found: {}", page.display()));
    }
    Ok(Args {
        page,
        record,
        edits,
    })
}

fn parse_edit(raw: &str) -> Result<(ConfigField, FieldValue)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected field=value, got {raw:?}"))?;
    let field =
        ConfigField::from_name(name).ok_or_else(|| anyhow!("Unknown config field {name:?}"))?;
    let value = match field.kind() {
        FieldKind::FontSize => FieldValue::Number(
            value
                .trim()
                .parse()
                .with_context(|| format!("font_size must be numeric, got {value:?}"))?,
        ),
        _ => FieldValue::Text(value.to_string()),
    };
    Ok((field, value))
}

fn config_path() -> PathBuf {
    match env::var_os("PORTFOLIO_CONFIG_PATH") {
        Some(value) => PathBuf::from(value),
        None => Path::new("conf").join("config.toml"),
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_parse_by_field_kind() {
        let (field, value) = parse_edit("font_size=18").expect("valid edit");
        assert_eq!(field, ConfigField::FontSize);
        assert_eq!(value, FieldValue::Number(18.0));

        let (field, value) = parse_edit("main_headline=Hello = world").expect("valid edit");
        assert_eq!(field, ConfigField::MainHeadline);
        assert_eq!(value, FieldValue::from("Hello = world"));
    }

    #[test]
    fn bad_edits_are_rejected() {
        assert!(parse_edit("font_size=big").is_err());
        assert!(parse_edit("border_color=#000").is_err());
        assert!(parse_edit("no-equals").is_err());
    }

    #[test]
    fn missing_page_is_an_error() {
        let args = ["--set".to_string(), "text_color=#000".to_string()];
        assert!(parse_args(args.into_iter()).is_err());
    }
}
