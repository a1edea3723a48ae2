//! Two-way binding between the host's configuration and the page.
//!
//! The host pushes records in through [`ConfigBinder::apply_config`]; edits
//! flow back out through the `set` side of [`Capability`] descriptors.

mod capabilities;
mod edit_panel;

pub use capabilities::{Capabilities, Capability, describe_capabilities};
pub use edit_panel::{EditPanelValues, describe_editable_text};

use crate::config::{ConfigField, ConfigRecord, FieldKind, default_config, effective_text};
use crate::document::Document;
use crate::host::HostChannel;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Record handle shared between the host and the capabilities built from it.
pub type SharedConfig = Rc<RefCell<ConfigRecord>>;

pub fn share(config: ConfigRecord) -> SharedConfig {
    Rc::new(RefCell::new(config))
}

/// Appended to the configured family on `<body>`.
pub const BASE_FONT_STACK: &str = "Arial, sans-serif";

/// The three operations registered with the host.
#[derive(Debug, Clone, Default)]
pub struct ConfigBinder {
    host: HostChannel,
}

impl ConfigBinder {
    pub fn new(host: HostChannel) -> Self {
        Self { host }
    }

    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.host.is_attached()
    }

    pub fn default_config(&self) -> &'static ConfigRecord {
        default_config()
    }

    pub fn apply_config<D: Document + ?Sized>(&self, document: &mut D, config: &ConfigRecord) {
        apply_config(document, config);
    }

    pub fn describe_capabilities(&self, config: &SharedConfig) -> Capabilities {
        describe_capabilities(config, &self.host)
    }

    pub fn describe_editable_text(&self, config: &ConfigRecord) -> EditPanelValues {
        describe_editable_text(config)
    }
}

/// Project `config` onto `document`, using defaults for absent or falsy
/// fields. Elements missing from the page are skipped.
pub fn apply_config<D: Document + ?Sized>(document: &mut D, config: &ConfigRecord) {
    for field in ConfigField::ALL {
        let value = effective_text(config, field);
        match field.kind() {
            FieldKind::Text => {
                let Some(element_id) = field.element_id() else {
                    continue;
                };
                if !document.set_text_content(element_id, &value) {
                    debug!(%field, element_id, "Bound element not on page; skipping");
                }
            }
            FieldKind::Color => {
                if let Some(variable) = field.css_variable() {
                    document.set_root_style(variable, &value);
                }
            }
            FieldKind::FontFamily => {
                document.set_body_style("font-family", &format!("{value}, {BASE_FONT_STACK}"));
            }
            FieldKind::FontSize => {
                document.set_root_style("font-size", &format!("{value}px"));
            }
        }
    }
    debug!(overrides = config.truthy_count(), "Applied page config");
}
