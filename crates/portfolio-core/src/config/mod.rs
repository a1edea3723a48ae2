//! Configuration for the portfolio page.
//!
//! The host pushes [`ConfigRecord`]s as flat JSON objects; every absent or
//! falsy field falls back to [`DEFAULT_CONFIG`]. The standalone runner also
//! reads `conf/config.toml` for log level and a seed record, falling back to
//! defaults when the file is missing or invalid.

mod defaults;
mod io;
mod models;
mod tables;

pub use defaults::{DEFAULT_CONFIG, default_config, effective_text, effective_value};
pub use io::{load_config, load_record, parse_config, parse_record, serialize_config};
pub use models::{ConfigField, ConfigRecord, FieldKind, FieldValue, LogLevel, SiteConfig};
