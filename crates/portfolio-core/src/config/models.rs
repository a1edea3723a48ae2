use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Page configuration pushed by the site builder; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct ConfigRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub main_headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sub_headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub hero_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cta_button: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub about_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub contact_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub contact_subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub accent_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub surface_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub font_size: Option<f64>,
}

impl ConfigRecord {
    /// Raw value stored for `field`, if any. Falsy values are returned as-is.
    pub fn get(&self, field: ConfigField) -> Option<FieldValue> {
        match field {
            ConfigField::FontSize => self.font_size.map(FieldValue::Number),
            _ => self
                .text_slot(field)
                .and_then(Option::clone)
                .map(FieldValue::Text),
        }
    }

    /// Value stored for `field` when it counts as set. Empty strings, zero
    /// and NaN are treated like an absent field.
    pub fn truthy(&self, field: ConfigField) -> Option<FieldValue> {
        self.get(field).filter(FieldValue::is_truthy)
    }

    /// Copy every field `other` carries over this record.
    pub fn merge(&mut self, other: &ConfigRecord) {
        for field in ConfigField::ALL {
            if let Some(value) = other.get(field) {
                self.set(field, value);
            }
        }
    }

    /// Number of fields that would override a default.
    pub fn truthy_count(&self) -> usize {
        ConfigField::ALL
            .into_iter()
            .filter(|field| self.truthy(*field).is_some())
            .count()
    }

    /// Overwrite one field. Text values written to `font_size` are parsed;
    /// anything unparsable clears the field.
    pub fn set(&mut self, field: ConfigField, value: FieldValue) {
        match field {
            ConfigField::FontSize => {
                self.font_size = match value {
                    FieldValue::Number(size) => Some(size),
                    FieldValue::Text(text) => text.trim().parse().ok(),
                };
            }
            _ => {
                if let Some(slot) = self.text_slot_mut(field) {
                    *slot = Some(value.to_string());
                }
            }
        }
    }

    fn text_slot(&self, field: ConfigField) -> Option<&Option<String>> {
        let slot = match field {
            ConfigField::MainHeadline => &self.main_headline,
            ConfigField::SubHeadline => &self.sub_headline,
            ConfigField::HeroDescription => &self.hero_description,
            ConfigField::CtaButton => &self.cta_button,
            ConfigField::AboutTitle => &self.about_title,
            ConfigField::ContactTitle => &self.contact_title,
            ConfigField::ContactSubtitle => &self.contact_subtitle,
            ConfigField::BackgroundColor => &self.background_color,
            ConfigField::PrimaryColor => &self.primary_color,
            ConfigField::TextColor => &self.text_color,
            ConfigField::AccentColor => &self.accent_color,
            ConfigField::SurfaceColor => &self.surface_color,
            ConfigField::FontFamily => &self.font_family,
            ConfigField::FontSize => return None,
        };
        Some(slot)
    }

    fn text_slot_mut(&mut self, field: ConfigField) -> Option<&mut Option<String>> {
        let slot = match field {
            ConfigField::MainHeadline => &mut self.main_headline,
            ConfigField::SubHeadline => &mut self.sub_headline,
            ConfigField::HeroDescription => &mut self.hero_description,
            ConfigField::CtaButton => &mut self.cta_button,
            ConfigField::AboutTitle => &mut self.about_title,
            ConfigField::ContactTitle => &mut self.contact_title,
            ConfigField::ContactSubtitle => &mut self.contact_subtitle,
            ConfigField::BackgroundColor => &mut self.background_color,
            ConfigField::PrimaryColor => &mut self.primary_color,
            ConfigField::TextColor => &mut self.text_color,
            ConfigField::AccentColor => &mut self.accent_color,
            ConfigField::SurfaceColor => &mut self.surface_color,
            ConfigField::FontFamily => &mut self.font_family,
            ConfigField::FontSize => return None,
        };
        Some(slot)
    }
}

/// Names of every field a [`ConfigRecord`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConfigField {
    MainHeadline,
    SubHeadline,
    HeroDescription,
    CtaButton,
    AboutTitle,
    ContactTitle,
    ContactSubtitle,
    BackgroundColor,
    PrimaryColor,
    TextColor,
    AccentColor,
    SurfaceColor,
    FontFamily,
    FontSize,
}

impl ConfigField {
    pub const ALL: [ConfigField; 14] = [
        ConfigField::MainHeadline,
        ConfigField::SubHeadline,
        ConfigField::HeroDescription,
        ConfigField::CtaButton,
        ConfigField::AboutTitle,
        ConfigField::ContactTitle,
        ConfigField::ContactSubtitle,
        ConfigField::BackgroundColor,
        ConfigField::PrimaryColor,
        ConfigField::TextColor,
        ConfigField::AccentColor,
        ConfigField::SurfaceColor,
        ConfigField::FontFamily,
        ConfigField::FontSize,
    ];

    /// Text fields in edit-panel order.
    pub const TEXT: [ConfigField; 7] = [
        ConfigField::MainHeadline,
        ConfigField::SubHeadline,
        ConfigField::HeroDescription,
        ConfigField::CtaButton,
        ConfigField::AboutTitle,
        ConfigField::ContactTitle,
        ConfigField::ContactSubtitle,
    ];

    /// Color fields in the order the builder lists recolorables.
    pub const RECOLORABLE: [ConfigField; 5] = [
        ConfigField::BackgroundColor,
        ConfigField::SurfaceColor,
        ConfigField::TextColor,
        ConfigField::PrimaryColor,
        ConfigField::AccentColor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConfigField::MainHeadline => "main_headline",
            ConfigField::SubHeadline => "sub_headline",
            ConfigField::HeroDescription => "hero_description",
            ConfigField::CtaButton => "cta_button",
            ConfigField::AboutTitle => "about_title",
            ConfigField::ContactTitle => "contact_title",
            ConfigField::ContactSubtitle => "contact_subtitle",
            ConfigField::BackgroundColor => "background_color",
            ConfigField::PrimaryColor => "primary_color",
            ConfigField::TextColor => "text_color",
            ConfigField::AccentColor => "accent_color",
            ConfigField::SurfaceColor => "surface_color",
            ConfigField::FontFamily => "font_family",
            ConfigField::FontSize => "font_size",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == name.trim())
    }

    pub fn kind(self) -> FieldKind {
        match self {
            ConfigField::MainHeadline
            | ConfigField::SubHeadline
            | ConfigField::HeroDescription
            | ConfigField::CtaButton
            | ConfigField::AboutTitle
            | ConfigField::ContactTitle
            | ConfigField::ContactSubtitle => FieldKind::Text,
            ConfigField::BackgroundColor
            | ConfigField::PrimaryColor
            | ConfigField::TextColor
            | ConfigField::AccentColor
            | ConfigField::SurfaceColor => FieldKind::Color,
            ConfigField::FontFamily => FieldKind::FontFamily,
            ConfigField::FontSize => FieldKind::FontSize,
        }
    }

    /// Id of the element whose text mirrors this field, for text fields.
    pub fn element_id(self) -> Option<&'static str> {
        match self {
            ConfigField::MainHeadline => Some("main-headline"),
            ConfigField::SubHeadline => Some("sub-headline"),
            ConfigField::HeroDescription => Some("hero-description"),
            ConfigField::CtaButton => Some("cta-button"),
            ConfigField::AboutTitle => Some("about-title"),
            ConfigField::ContactTitle => Some("contact-title"),
            ConfigField::ContactSubtitle => Some("contact-subtitle"),
            _ => None,
        }
    }

    /// CSS custom property on the document root, for color fields.
    pub fn css_variable(self) -> Option<&'static str> {
        match self {
            ConfigField::BackgroundColor => Some("--light-bg"),
            ConfigField::PrimaryColor => Some("--primary-blue"),
            ConfigField::TextColor => Some("--primary-dark"),
            ConfigField::AccentColor => Some("--accent-blue"),
            ConfigField::SurfaceColor => Some("--white"),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a field is rendered and edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Color,
    FontFamily,
    FontSize,
}

/// A single configuration value as exchanged with the host.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Mirrors the host's notion of a "set" value: empty text, zero and NaN
    /// do not count.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Number(number) => *number != 0.0 && !number.is_nan(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number),
            FieldValue::Text(_) => None,
        }
    }
}

/// Largest magnitude below which every integral `f64` is exact (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number)
                if number.fract() == 0.0 && number.abs() < MAX_EXACT_INTEGER =>
            {
                write!(f, "{}", *number as i64)
            }
            FieldValue::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Settings for the standalone site runner: logging plus a seed record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteConfig {
    pub log_level: LogLevel,
    pub record: ConfigRecord,
}
