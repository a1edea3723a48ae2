use crate::config::{ConfigField, ConfigRecord, effective_text};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Text fields the host may let a user edit in place, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPanelValues {
    entries: Vec<(ConfigField, String)>,
}

impl EditPanelValues {
    pub fn get(&self, field: ConfigField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigField, &str)> {
        self.entries
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for EditPanelValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

pub fn describe_editable_text(config: &ConfigRecord) -> EditPanelValues {
    EditPanelValues {
        entries: ConfigField::TEXT
            .into_iter()
            .map(|field| (field, effective_text(config, field)))
            .collect(),
    }
}
