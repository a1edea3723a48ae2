use portfolio_core::config::ConfigField;
use portfolio_core::document::ElementId;
use portfolio_core::{ConfigPatch, EditPanelValues, FieldValue, LocalHost};
use serde::Serialize;
use std::collections::BTreeMap;

/// Snapshot of the page after the host has applied every edit.
#[derive(Debug, Serialize)]
pub struct Report {
    edit_panel: Option<EditPanelValues>,
    capabilities: Vec<CapabilityReport>,
    bound_text: BTreeMap<&'static str, Option<String>>,
    root_style: BTreeMap<String, String>,
    body_style: BTreeMap<String, String>,
    patches: Vec<ConfigPatch>,
}

#[derive(Debug, Serialize)]
struct CapabilityReport {
    group: &'static str,
    field: ConfigField,
    value: FieldValue,
}

pub fn build(local: &LocalHost) -> Report {
    let mut capabilities = Vec::new();
    if let Some(caps) = local.capabilities() {
        let groups = [
            ("recolorable", caps.recolorables.iter().collect::<Vec<_>>()),
            ("borderable", caps.borderables.iter().collect()),
            ("font", vec![&caps.font_editable]),
            ("font_size", vec![&caps.font_sizeable]),
        ];
        for (group, members) in groups {
            for capability in members {
                capabilities.push(CapabilityReport {
                    group,
                    field: capability.field(),
                    value: capability.get(),
                });
            }
        }
    }

    let doc = local.document();
    let bound_text = ConfigField::TEXT
        .into_iter()
        .filter_map(|field| field.element_id())
        .map(|id| (id, doc.text(id).map(str::to_string)))
        .collect();
    let style_of = |id: ElementId| {
        doc.get(id)
            .map(|element| element.style.clone())
            .unwrap_or_default()
    };

    Report {
        edit_panel: local.edit_panel(),
        capabilities,
        bound_text,
        root_style: style_of(doc.root()),
        body_style: style_of(doc.body()),
        patches: local.patches(),
    }
}
