use super::models::{ConfigField, ConfigRecord, FieldValue};
use once_cell::sync::Lazy;

/// Fallback for every absent or falsy field of an incoming record.
pub static DEFAULT_CONFIG: Lazy<ConfigRecord> = Lazy::new(|| ConfigRecord {
    main_headline: Some("Hi, I'm Muhammad Waqar".to_string()),
    sub_headline: Some("Creative Designer & Business Strategist".to_string()),
    hero_description: Some(
        "Empowering startups, businesses, and professionals to grow through smart strategy, design, and management."
            .to_string(),
    ),
    cta_button: Some("Let's Work Together".to_string()),
    about_title: Some("Crafting Designs that Drive Business Growth".to_string()),
    contact_title: Some("Let's Work Together".to_string()),
    contact_subtitle: Some(
        "Ready to elevate your business? Let's discuss how we can bring your vision to life."
            .to_string(),
    ),
    background_color: Some("#F5F7FA".to_string()),
    primary_color: Some("#1A73E8".to_string()),
    text_color: Some("#0E1D3A".to_string()),
    accent_color: Some("#0059C9".to_string()),
    surface_color: Some("#ffffff".to_string()),
    font_family: Some("Inter".to_string()),
    font_size: Some(default_font_size()),
});

pub(crate) fn default_font_size() -> f64 {
    16.0
}

pub fn default_config() -> &'static ConfigRecord {
    &DEFAULT_CONFIG
}

/// Value applied for `field`: the record's own value when truthy, the
/// default otherwise.
pub fn effective_value(config: &ConfigRecord, field: ConfigField) -> FieldValue {
    config
        .truthy(field)
        .or_else(|| DEFAULT_CONFIG.get(field))
        .unwrap_or_else(|| match field {
            ConfigField::FontSize => FieldValue::Number(default_font_size()),
            _ => FieldValue::Text(String::new()),
        })
}

/// Text form of [`effective_value`].
pub fn effective_text(config: &ConfigRecord, field: ConfigField) -> String {
    effective_value(config, field).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        for field in ConfigField::ALL {
            let value = DEFAULT_CONFIG.truthy(field);
            assert!(value.is_some(), "missing default for {field}");
        }
    }

    #[test]
    fn empty_string_falls_back_to_default() {
        let config = ConfigRecord {
            main_headline: Some(String::new()),
            ..ConfigRecord::default()
        };
        assert_eq!(
            effective_text(&config, ConfigField::MainHeadline),
            "Hi, I'm Muhammad Waqar"
        );
    }

    #[test]
    fn zero_font_size_falls_back_to_default() {
        let config = ConfigRecord {
            font_size: Some(0.0),
            ..ConfigRecord::default()
        };
        assert_eq!(
            effective_value(&config, ConfigField::FontSize),
            FieldValue::Number(16.0)
        );
    }

    #[test]
    fn truthy_value_wins_over_default() {
        let config = ConfigRecord {
            accent_color: Some("#123456".to_string()),
            ..ConfigRecord::default()
        };
        assert_eq!(effective_text(&config, ConfigField::AccentColor), "#123456");
        assert_eq!(effective_text(&config, ConfigField::PrimaryColor), "#1A73E8");
    }
}
