//! TypeScript declarations for the types the host exchanges with the page.

use crate::config::{ConfigField, ConfigRecord, FieldValue};
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<(), String> {
    T::export_all_to(out_dir).map_err(|err| err.to_string())
}

pub fn export_ts_bindings(out_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", out_dir.display()))?;

    for entry in fs::read_dir(out_dir)
        .map_err(|err| format!("Failed to list {}: {err}", out_dir.display()))?
    {
        let entry = entry.map_err(|err| format!("Failed to read entry: {err}"))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path)
                .map_err(|err| format!("Failed to remove {}: {err}", path.display()))?;
        }
    }

    export_single_type::<ConfigRecord>(out_dir)?;
    export_single_type::<ConfigField>(out_dir)?;
    export_single_type::<FieldValue>(out_dir)?;

    let index_content = r#"export type { ConfigRecord } from "./ConfigRecord";
export type { ConfigField } from "./ConfigField";
export type { FieldValue } from "./FieldValue";

/** Single-field update sent from a capability to the host. */
export type ConfigPatch = Partial<ConfigRecord>;
"#;

    fs::write(out_dir.join("index.ts"), index_content).map_err(|err| {
        format!(
            "Failed to write {}: {err}",
            out_dir.join("index.ts").display()
        )
    })?;

    Ok(())
}
