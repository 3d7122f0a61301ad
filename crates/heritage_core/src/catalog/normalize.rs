//! Raw feature normalization.
//!
//! # Responsibility
//! - Turn one [`RawFeature`] into a [`SiteFragment`] with resolved identity,
//!   image file name and external links.
//!
//! # Invariants
//! - Two features with the same token and coordinates always get the same id.
//! - Type, heritage and admin labels pass through unchanged: `None` means
//!   unspecified, `Some("")` means explicitly empty.
//! - A blank name falls back to the token; a blank archive id yields no link.

use crate::config::LinkTemplates;
use crate::model::feature::RawFeature;
use crate::model::site::{upstream_site_id, ArchiveLink, ArchivePortal, Coords, ExternalLinks, SiteId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Case-insensitive UNESCO designation variants (en/de/tr/fr/es).
static UNESCO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)unesco|world\s+heritage|welterbe|weltkulturerbe|dünya\s+mirası|patrimoine\s+mondial|patrimonio\s+de\s+la\s+humanidad",
    )
    .expect("valid unesco regex")
});

/// Partial site produced from exactly one raw feature.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteFragment {
    pub id: SiteId,
    pub name: String,
    pub coords: Coords,
    pub image: Option<String>,
    pub type_label: Option<String>,
    pub heritage_label: Option<String>,
    pub admin_label: Option<String>,
    pub links: ExternalLinks,
}

impl SiteFragment {
    /// Whether the heritage label carries a UNESCO designation.
    pub fn is_unesco(&self) -> bool {
        self.heritage_label
            .as_deref()
            .is_some_and(is_unesco_designation)
    }
}

/// Normalizes one raw feature. Never fails.
pub fn normalize_feature(feature: &RawFeature, links: &LinkTemplates) -> SiteFragment {
    let id = upstream_site_id(&feature.token, feature.coords);
    let name = present(&feature.name).unwrap_or_else(|| token_tail(&feature.token));

    let mut external = ExternalLinks {
        primary: links.primary_link(&feature.token),
        archives: Vec::new(),
    };
    if let Some(kultur_id) = present(&feature.kulturenvanteri_id) {
        external.add_archive(ArchiveLink {
            portal: ArchivePortal::KulturEnvanteri,
            url: links.archive_link(ArchivePortal::KulturEnvanteri, &kultur_id),
        });
    }
    if let Some(portal_id) = present(&feature.culture_portal_id) {
        external.add_archive(ArchiveLink {
            portal: ArchivePortal::CulturePortal,
            url: links.archive_link(ArchivePortal::CulturePortal, &portal_id),
        });
    }

    SiteFragment {
        id,
        name,
        coords: feature.coords,
        image: feature.image.as_deref().and_then(image_file_name),
        type_label: feature.type_label.clone(),
        heritage_label: feature.heritage_label.clone(),
        admin_label: feature.admin_label.clone(),
        links: external,
    }
}

/// Case-insensitive substring match against known designation variants.
pub fn is_unesco_designation(label: &str) -> bool {
    UNESCO_RE.is_match(label)
}

/// Returns the last path segment of an image URL or path.
pub fn image_file_name(reference: &str) -> Option<String> {
    reference
        .trim()
        .rsplit('/')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

// Entity URIs end in the bare id (`.../entity/Q123`).
fn token_tail(token: &str) -> String {
    let trimmed = token.trim().trim_end_matches('/');
    trimmed
        .rsplit('/')
        .next()
        .filter(|tail| !tail.is_empty())
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{image_file_name, is_unesco_designation, normalize_feature};
    use crate::config::LinkTemplates;
    use crate::model::feature::RawFeature;
    use crate::model::site::{ArchivePortal, Coords};

    #[test]
    fn image_name_is_last_path_segment() {
        assert_eq!(
            image_file_name("http://commons.wikimedia.org/wiki/Special:FilePath/Derinkuyu%20City.jpg")
                .as_deref(),
            Some("Derinkuyu%20City.jpg")
        );
        assert_eq!(image_file_name("plain.png").as_deref(), Some("plain.png"));
        assert_eq!(image_file_name("http://host/dir/"), None);
    }

    #[test]
    fn unesco_matches_language_variants_case_insensitively() {
        assert!(is_unesco_designation("UNESCO World Heritage"));
        assert!(is_unesco_designation("part of a world heritage site"));
        assert!(is_unesco_designation("UNESCO-Welterbe"));
        assert!(is_unesco_designation("Dünya Mirası"));
        assert!(!is_unesco_designation("registered monument"));
    }

    #[test]
    fn explicitly_empty_labels_stay_distinct_from_unspecified() {
        let mut feature = RawFeature::new("Q9", Coords::new(1.0, 2.0)).with_type("  ");
        feature.admin_label = Some(String::new());
        let fragment = normalize_feature(&feature, &LinkTemplates::default());
        assert_eq!(fragment.type_label.as_deref(), Some("  "));
        assert_eq!(fragment.admin_label.as_deref(), Some(""));
        assert_eq!(fragment.heritage_label, None);
        assert_eq!(fragment.image, None);
        assert!(!fragment.is_unesco());

        let bare = normalize_feature(
            &RawFeature::new("Q9", Coords::new(1.0, 2.0)),
            &LinkTemplates::default(),
        );
        assert_eq!(bare.admin_label, None);
        assert_eq!(bare.type_label, None);
    }

    #[test]
    fn missing_name_falls_back_to_token_tail() {
        let feature = RawFeature::new("http://www.wikidata.org/entity/Q42", Coords::new(1.0, 2.0));
        let fragment = normalize_feature(&feature, &LinkTemplates::default());
        assert_eq!(fragment.name, "Q42");
        assert_eq!(
            fragment.links.primary.as_deref(),
            Some("http://www.wikidata.org/entity/Q42")
        );
    }

    #[test]
    fn archive_ids_resolve_through_templates() {
        let mut feature = RawFeature::new("Q1", Coords::new(1.0, 2.0)).with_name("X");
        feature.kulturenvanteri_id = Some("1234".to_string());
        let fragment = normalize_feature(&feature, &LinkTemplates::default());
        assert_eq!(
            fragment.links.archive(ArchivePortal::KulturEnvanteri),
            Some("https://kulturenvanteri.com/yer/1234")
        );
        assert_eq!(fragment.links.archive(ArchivePortal::CulturePortal), None);
    }
}
