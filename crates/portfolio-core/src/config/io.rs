use super::models::{ConfigRecord, SiteConfig};
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load site settings from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> SiteConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded site config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return SiteConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed site configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            SiteConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<SiteConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("parsing site config TOML")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &SiteConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("serializing site config")
}

/// Parse a record as the host sends it: a flat JSON object.
pub fn parse_record(json: &str) -> Result<ConfigRecord> {
    serde_json::from_str(json).context("parsing config record JSON")
}

pub fn load_record(path: &Path) -> Result<ConfigRecord> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config record {}", path.display()))?;
    parse_record(&contents)
}
