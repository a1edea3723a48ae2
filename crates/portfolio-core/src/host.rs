//! Contract with the site builder that owns the configuration.
//!
//! The host persists records and re-invokes the binder after every patch.
//! The binder only ever holds a weak handle to it: a host that was never
//! attached, or has been dropped, turns every capability write into a no-op.

use crate::binder::{Capabilities, ConfigBinder, EditPanelValues, SharedConfig};
use crate::config::{ConfigField, ConfigRecord, FieldValue, default_config};
use crate::document::PageDocument;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

/// Entry points a site builder exposes to the page.
pub trait SiteHost {
    /// Called once at startup with the page's defaults and operations.
    fn init(&self, registration: Registration);
    /// Accepts a one-field patch. Fire-and-forget.
    fn set_config(&self, patch: ConfigPatch);
}

/// What the page hands the host when it registers.
#[derive(Debug, Clone)]
pub struct Registration {
    pub default_config: &'static ConfigRecord,
    pub binder: ConfigBinder,
}

/// A single-field update, serialized as `{"<field>": <value>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ConfigField, FieldValue>",
    into = "BTreeMap<ConfigField, FieldValue>"
)]
pub struct ConfigPatch {
    pub field: ConfigField,
    pub value: FieldValue,
}

impl ConfigPatch {
    pub fn new(field: ConfigField, value: impl Into<FieldValue>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

impl From<ConfigPatch> for BTreeMap<ConfigField, FieldValue> {
    fn from(patch: ConfigPatch) -> Self {
        BTreeMap::from([(patch.field, patch.value)])
    }
}

impl TryFrom<BTreeMap<ConfigField, FieldValue>> for ConfigPatch {
    type Error = String;

    fn try_from(map: BTreeMap<ConfigField, FieldValue>) -> Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(format!(
                "config patch must carry exactly one field, got {}",
                map.len()
            ));
        }
        let mut entries = map.into_iter();
        match entries.next() {
            Some((field, value)) => Ok(Self { field, value }),
            None => Err("config patch is empty".to_string()),
        }
    }
}

/// Optional, weak link from the binder back to the host.
#[derive(Clone, Default)]
pub struct HostChannel {
    host: Option<Weak<dyn SiteHost>>,
}

impl HostChannel {
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn connect(host: &Rc<dyn SiteHost>) -> Self {
        Self {
            host: Some(Rc::downgrade(host)),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.host
            .as_ref()
            .is_some_and(|host| host.strong_count() > 0)
    }

    /// Forward `patch` to the host, or drop it when no host is reachable.
    pub fn send(&self, patch: ConfigPatch) {
        match self.host.as_ref().and_then(Weak::upgrade) {
            Some(host) => {
                debug!(field = %patch.field, value = %patch.value, "Forwarding patch to host");
                host.set_config(patch);
            }
            None => {
                debug!(field = %patch.field, "No host attached; dropping patch");
            }
        }
    }
}

impl fmt::Debug for HostChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostChannel")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Register the page with `host`, if there is one. Without a host the
/// returned binder is detached and nothing is registered.
pub fn register_with_host(host: Option<&Rc<dyn SiteHost>>) -> ConfigBinder {
    let Some(host) = host else {
        debug!("No site host present; running with defaults only");
        return ConfigBinder::detached();
    };
    let binder = ConfigBinder::new(HostChannel::connect(host));
    host.init(Registration {
        default_config: default_config(),
        binder: binder.clone(),
    });
    info!("Registered page with site host");
    binder
}

/// In-process host: keeps the record, applies every patch and re-renders.
pub struct LocalHost {
    document: RefCell<PageDocument>,
    config: SharedConfig,
    binder: RefCell<Option<ConfigBinder>>,
    patches: RefCell<Vec<ConfigPatch>>,
}

impl LocalHost {
    pub fn new(document: PageDocument, config: ConfigRecord) -> Rc<Self> {
        Rc::new(Self {
            document: RefCell::new(document),
            config: Rc::new(RefCell::new(config)),
            binder: RefCell::new(None),
            patches: RefCell::new(Vec::new()),
        })
    }

    pub fn config(&self) -> SharedConfig {
        Rc::clone(&self.config)
    }

    /// Read access to the rendered page. Patches that arrive while the guard
    /// is alive are recorded but not rendered until the next patch.
    pub fn document(&self) -> Ref<'_, PageDocument> {
        self.document.borrow()
    }

    pub fn with_document_mut<R>(&self, f: impl FnOnce(&mut PageDocument) -> R) -> R {
        f(&mut self.document.borrow_mut())
    }

    /// Patches received so far, oldest first.
    pub fn patches(&self) -> Vec<ConfigPatch> {
        self.patches.borrow().clone()
    }

    pub fn is_registered(&self) -> bool {
        self.binder.borrow().is_some()
    }

    pub fn capabilities(&self) -> Option<Capabilities> {
        self.binder
            .borrow()
            .as_ref()
            .map(|binder| binder.describe_capabilities(&self.config))
    }

    pub fn edit_panel(&self) -> Option<EditPanelValues> {
        self.binder
            .borrow()
            .as_ref()
            .map(|binder| binder.describe_editable_text(&self.config.borrow()))
    }

    /// Text edits made in the host's own panel go through the same patch path.
    pub fn edit_text(&self, field: ConfigField, text: &str) {
        self.set_config(ConfigPatch::new(field, text));
    }

    fn render(&self) {
        let binder = self.binder.borrow();
        let Some(binder) = binder.as_ref() else {
            return;
        };
        let Ok(mut document) = self.document.try_borrow_mut() else {
            warn!("Document is borrowed elsewhere; skipping render");
            return;
        };
        let config = self.config.borrow();
        binder.apply_config(&mut *document, &config);
    }
}

impl SiteHost for LocalHost {
    fn init(&self, registration: Registration) {
        debug!(
            fields = registration.default_config.truthy_count(),
            "Host received page registration"
        );
        *self.binder.borrow_mut() = Some(registration.binder);
        self.render();
    }

    fn set_config(&self, patch: ConfigPatch) {
        self.config
            .borrow_mut()
            .set(patch.field, patch.value.clone());
        self.patches.borrow_mut().push(patch);
        self.render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_serializes_as_single_entry_object() {
        let patch = ConfigPatch::new(ConfigField::BackgroundColor, "#ABCDEF");
        let json = serde_json::to_string(&patch).expect("serializes");
        assert_eq!(json, r##"{"background_color":"#ABCDEF"}"##);

        let size = ConfigPatch::new(ConfigField::FontSize, 20.0);
        let json = serde_json::to_string(&size).expect("serializes");
        assert_eq!(json, r#"{"font_size":20.0}"#);
    }

    #[test]
    fn patch_rejects_multiple_fields() {
        let parsed: Result<ConfigPatch, _> =
            serde_json::from_str(r##"{"text_color":"#000","accent_color":"#111"}"##);
        assert!(parsed.is_err());

        let parsed: ConfigPatch =
            serde_json::from_str(r##"{"text_color":"#000"}"##).expect("single field");
        assert_eq!(parsed.field, ConfigField::TextColor);
        assert_eq!(parsed.value, FieldValue::Text("#000".to_string()));
    }

    #[test]
    fn edit_while_document_is_borrowed_is_recorded() {
        let local = LocalHost::new(PageDocument::new(), ConfigRecord::default());
        let host: Rc<dyn SiteHost> = local.clone();
        let _binder = register_with_host(Some(&host));
        let caps = local.capabilities().expect("registered");

        let before = local.document().root_style("--light-bg").map(str::to_string);
        {
            let _guard = local.document();
            caps.recolorables[0].set("#ABCDEF");
        }
        assert_eq!(local.patches().len(), 1);
        assert_eq!(
            local.document().root_style("--light-bg").map(str::to_string),
            before
        );

        caps.recolorables[0].set("#123456");
        assert_eq!(local.document().root_style("--light-bg"), Some("#123456"));
    }

    #[test]
    fn missing_host_yields_detached_binder() {
        let binder = register_with_host(None);
        assert!(!binder.is_attached());
    }

    #[test]
    fn dropped_host_detaches_channel() {
        let host: Rc<dyn SiteHost> = LocalHost::new(PageDocument::new(), ConfigRecord::default());
        let channel = HostChannel::connect(&host);
        assert!(channel.is_attached());
        drop(host);
        assert!(!channel.is_attached());
        channel.send(ConfigPatch::new(ConfigField::TextColor, "#000000"));
    }
}
