use super::models::{ConfigRecord, LogLevel, SiteConfig};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    content: ContentConfig,
    #[serde(default)]
    colors: ColorConfig,
    #[serde(default)]
    typography: TypographyConfig,
}

impl From<ConfigTables> for SiteConfig {
    fn from(tables: ConfigTables) -> Self {
        SiteConfig {
            log_level: tables.logging.log_level,
            record: ConfigRecord {
                main_headline: tables.content.main_headline,
                sub_headline: tables.content.sub_headline,
                hero_description: tables.content.hero_description,
                cta_button: tables.content.cta_button,
                about_title: tables.content.about_title,
                contact_title: tables.content.contact_title,
                contact_subtitle: tables.content.contact_subtitle,
                background_color: tables.colors.background_color,
                primary_color: tables.colors.primary_color,
                text_color: tables.colors.text_color,
                accent_color: tables.colors.accent_color,
                surface_color: tables.colors.surface_color,
                font_family: tables.typography.font_family,
                font_size: tables.typography.font_size,
            },
        }
    }
}

impl From<&SiteConfig> for ConfigTables {
    fn from(config: &SiteConfig) -> Self {
        let record = &config.record;
        ConfigTables {
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            content: ContentConfig {
                main_headline: record.main_headline.clone(),
                sub_headline: record.sub_headline.clone(),
                hero_description: record.hero_description.clone(),
                cta_button: record.cta_button.clone(),
                about_title: record.about_title.clone(),
                contact_title: record.contact_title.clone(),
                contact_subtitle: record.contact_subtitle.clone(),
            },
            colors: ColorConfig {
                background_color: record.background_color.clone(),
                primary_color: record.primary_color.clone(),
                text_color: record.text_color.clone(),
                accent_color: record.accent_color.clone(),
                surface_color: record.surface_color.clone(),
            },
            typography: TypographyConfig {
                font_family: record.font_family.clone(),
                font_size: record.font_size,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct ContentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    main_headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hero_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cta_button: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    about_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contact_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contact_subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct ColorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accent_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    surface_color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct TypographyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<f64>,
}
