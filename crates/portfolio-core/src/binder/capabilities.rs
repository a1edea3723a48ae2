use super::SharedConfig;
use crate::config::{ConfigField, FieldValue, effective_value};
use crate::host::{ConfigPatch, HostChannel};
use std::fmt;
use std::rc::Rc;

/// Read/write handle for one editable visual property.
///
/// `get` reads the shared record at call time, so later changes to it are
/// observed. `set` never touches the record; it forwards a one-field patch
/// to the host, which persists it and re-applies the config.
#[derive(Clone)]
pub struct Capability {
    config: SharedConfig,
    field: ConfigField,
    host: HostChannel,
}

impl Capability {
    fn new(config: &SharedConfig, field: ConfigField, host: &HostChannel) -> Self {
        Self {
            config: Rc::clone(config),
            field,
            host: host.clone(),
        }
    }

    pub fn field(&self) -> ConfigField {
        self.field
    }

    pub fn get(&self) -> FieldValue {
        effective_value(&self.config.borrow(), self.field)
    }

    pub fn set(&self, value: impl Into<FieldValue>) {
        self.host.send(ConfigPatch::new(self.field, value));
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("field", &self.field)
            .field("value", &self.get())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Capabilities {
    pub recolorables: Vec<Capability>,
    /// No property on the page exposes a border; always empty.
    pub borderables: Vec<Capability>,
    pub font_editable: Capability,
    pub font_sizeable: Capability,
}

impl Capabilities {
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.recolorables
            .iter()
            .chain(&self.borderables)
            .chain([&self.font_editable, &self.font_sizeable])
    }

    pub fn find(&self, field: ConfigField) -> Option<&Capability> {
        self.iter().find(|capability| capability.field() == field)
    }
}

pub fn describe_capabilities(config: &SharedConfig, host: &HostChannel) -> Capabilities {
    Capabilities {
        recolorables: ConfigField::RECOLORABLE
            .into_iter()
            .map(|field| Capability::new(config, field, host))
            .collect(),
        borderables: Vec::new(),
        font_editable: Capability::new(config, ConfigField::FontFamily, host),
        font_sizeable: Capability::new(config, ConfigField::FontSize, host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::share;
    use crate::config::ConfigRecord;
    use crate::host::{Registration, SiteHost};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingHost {
        patches: RefCell<Vec<ConfigPatch>>,
    }

    impl SiteHost for RecordingHost {
        fn init(&self, _registration: Registration) {}

        fn set_config(&self, patch: ConfigPatch) {
            self.patches.borrow_mut().push(patch);
        }
    }

    #[test]
    fn groups_have_fixed_shape() {
        let caps = describe_capabilities(&share(ConfigRecord::default()), &HostChannel::detached());
        let order: Vec<ConfigField> = caps.recolorables.iter().map(Capability::field).collect();
        assert_eq!(
            order,
            vec![
                ConfigField::BackgroundColor,
                ConfigField::SurfaceColor,
                ConfigField::TextColor,
                ConfigField::PrimaryColor,
                ConfigField::AccentColor,
            ]
        );
        assert!(caps.borderables.is_empty());
        assert_eq!(caps.font_editable.field(), ConfigField::FontFamily);
        assert_eq!(caps.font_sizeable.field(), ConfigField::FontSize);
    }

    #[test]
    fn get_applies_fallback() {
        let config = share(ConfigRecord {
            text_color: Some(String::new()),
            primary_color: Some("#222222".to_string()),
            ..ConfigRecord::default()
        });
        let caps = describe_capabilities(&config, &HostChannel::detached());
        assert_eq!(caps.recolorables[2].get(), FieldValue::from("#0E1D3A"));
        assert_eq!(caps.recolorables[3].get(), FieldValue::from("#222222"));
        assert_eq!(caps.font_sizeable.get(), FieldValue::Number(16.0));
    }

    #[test]
    fn get_observes_later_changes_to_the_record() {
        let config = share(ConfigRecord::default());
        let caps = describe_capabilities(&config, &HostChannel::detached());
        assert_eq!(caps.font_editable.get(), FieldValue::from("Inter"));

        config.borrow_mut().font_family = Some("Lexend".to_string());
        assert_eq!(caps.font_editable.get(), FieldValue::from("Lexend"));
    }

    #[test]
    fn set_without_host_is_a_no_op() {
        let config = share(ConfigRecord::default());
        let caps = describe_capabilities(&config, &HostChannel::detached());
        caps.recolorables[0].set("#ABCDEF");
        assert_eq!(*config.borrow(), ConfigRecord::default());
        assert_eq!(caps.recolorables[0].get(), FieldValue::from("#F5F7FA"));
    }

    #[test]
    fn set_forwards_one_field_without_touching_the_record() {
        let recorder = Rc::new(RecordingHost::default());
        let host: Rc<dyn SiteHost> = recorder.clone();
        let config = share(ConfigRecord::default());
        let caps = describe_capabilities(&config, &HostChannel::connect(&host));

        caps.recolorables[1].set("#ABCDEF");
        caps.font_sizeable.set(20.0);

        assert_eq!(
            *recorder.patches.borrow(),
            vec![
                ConfigPatch::new(ConfigField::SurfaceColor, "#ABCDEF"),
                ConfigPatch::new(ConfigField::FontSize, 20.0),
            ]
        );
        assert_eq!(*config.borrow(), ConfigRecord::default());
    }

    #[test]
    fn find_locates_capability_by_field() {
        let caps = describe_capabilities(&share(ConfigRecord::default()), &HostChannel::detached());
        assert!(caps.find(ConfigField::AccentColor).is_some());
        assert!(caps.find(ConfigField::MainHeadline).is_none());
        assert_eq!(caps.iter().count(), 7);
    }
}
