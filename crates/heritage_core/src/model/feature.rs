//! Raw upstream feature record.
//!
//! A `RawFeature` is untrusted input. Several records may describe the same
//! physical site, one per associated type label.

use super::site::Coords;

/// One upstream record, already decoded from its wire shape.
///
/// Optional fields use `None` for "not present". Decoders never turn a missing
/// field into an empty string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawFeature {
    /// Source identity token, usually a wiki entity URI.
    pub token: String,
    pub coords: Coords,
    pub name: Option<String>,
    pub type_label: Option<String>,
    pub admin_label: Option<String>,
    /// Full image URL or path.
    pub image: Option<String>,
    pub heritage_label: Option<String>,
    pub kulturenvanteri_id: Option<String>,
    pub culture_portal_id: Option<String>,
}

impl RawFeature {
    pub fn new(token: impl Into<String>, coords: Coords) -> Self {
        Self {
            token: token.into(),
            coords,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, label: impl Into<String>) -> Self {
        self.type_label = Some(label.into());
        self
    }

    pub fn with_admin(mut self, label: impl Into<String>) -> Self {
        self.admin_label = Some(label.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_heritage(mut self, label: impl Into<String>) -> Self {
        self.heritage_label = Some(label.into());
        self
    }
}

