//! Engine configuration.
//!
//! # Responsibility
//! - Hold tunables (nearby radius, link/image templates, store namespace).
//! - Load and validate configuration from JSON files.
//!
//! # Invariants
//! - Every field has a default, so a partial JSON document is valid.
//! - A validated config has a positive finite radius and `{id}`-bearing
//!   link templates.

use crate::model::site::ArchivePortal;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Placeholder substituted by identifiers in link templates.
pub const ID_PLACEHOLDER: &str = "{id}";

const DEFAULT_NEARBY_RADIUS_KM: f64 = 10.0;
const DEFAULT_LANDMARK_NAMESPACE: &str = "heritage.user_landmarks";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidRadius(f64),
    EmptyNamespace,
    /// Template without `{id}` placeholder.
    InvalidTemplate {
        field: &'static str,
        value: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::InvalidRadius(value) => {
                write!(f, "nearby_radius_km must be positive and finite, got {value}")
            }
            Self::EmptyNamespace => write!(f, "landmark_namespace must not be blank"),
            Self::InvalidTemplate { field, value } => {
                write!(f, "{field} must contain `{ID_PLACEHOLDER}`, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// URL templates for external reference links.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkTemplates {
    /// Used when the identity token is a bare entity id rather than a URL.
    pub wiki_entity: String,
    pub kulturenvanteri: String,
    pub culture_portal: String,
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self {
            wiki_entity: "https://www.wikidata.org/wiki/{id}".to_string(),
            kulturenvanteri: "https://kulturenvanteri.com/yer/{id}".to_string(),
            culture_portal: "https://www.kulturportali.gov.tr/portal/{id}".to_string(),
        }
    }
}

impl LinkTemplates {
    /// Resolves the primary reference link for an identity token.
    ///
    /// Tokens that already are http(s) URLs are used verbatim.
    pub fn primary_link(&self, token: &str) -> Option<String> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        if token.starts_with("http://") || token.starts_with("https://") {
            return Some(token.to_string());
        }
        Some(fill_template(&self.wiki_entity, token))
    }

    pub fn archive_link(&self, portal: ArchivePortal, id: &str) -> String {
        let template = match portal {
            ArchivePortal::KulturEnvanteri => &self.kulturenvanteri,
            ArchivePortal::CulturePortal => &self.culture_portal,
        };
        fill_template(template, id.trim())
    }

    fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("links.wiki_entity", &self.wiki_entity),
            ("links.kulturenvanteri", &self.kulturenvanteri),
            ("links.culture_portal", &self.culture_portal),
        ] {
            if !value.contains(ID_PLACEHOLDER) {
                return Err(ConfigError::InvalidTemplate {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Image URL settings for renderers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Base joined with the stored image file name.
    pub file_path_base: String,
    pub thumbnail_width: u32,
    pub detail_width: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            file_path_base: "https://commons.wikimedia.org/wiki/Special:FilePath/".to_string(),
            thumbnail_width: 200,
            detail_width: 800,
        }
    }
}

impl ImageSettings {
    /// Builds a sized image URL from a stored image file name.
    pub fn image_url(&self, image_name: &str, width: u32) -> String {
        format!("{}{}?width={}", self.file_path_base, image_name, width)
    }

    pub fn thumbnail_url(&self, image_name: &str) -> String {
        self.image_url(image_name, self.thumbnail_width)
    }

    pub fn detail_url(&self, image_name: &str) -> String {
        self.image_url(image_name, self.detail_width)
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub nearby_radius_km: f64,
    pub links: LinkTemplates,
    pub images: ImageSettings,
    /// Key under which the landmark list is persisted.
    pub landmark_namespace: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            nearby_radius_km: DEFAULT_NEARBY_RADIUS_KM,
            links: LinkTemplates::default(),
            images: ImageSettings::default(),
            landmark_namespace: DEFAULT_LANDMARK_NAMESPACE.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.nearby_radius_km.is_finite() || self.nearby_radius_km <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.nearby_radius_km));
        }
        if self.landmark_namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        self.links.validate()
    }
}

fn fill_template(template: &str, id: &str) -> String {
    template.replace(ID_PLACEHOLDER, id)
}
