//! Category classification for sites.
//!
//! # Responsibility
//! - Map accumulated type labels to an icon category and color.
//! - Provide render-time label helpers (primary label, static translations).
//!
//! # Invariants
//! - User landmarks always classify as [`Category::Landmark`].
//! - Rules are tested in fixed priority order; the first match wins.
//! - The UNESCO accent overrides color only, never the category.
//! - Classification never fails; unmatched input yields the generic fallback.
//! - Keywords of up to four characters match whole words only, longer ones
//!   match anywhere (German compounds, Turkish suffixes).

use crate::model::category::{Category, CategoryStyle, Color};
use crate::model::site::Site;
use once_cell::sync::Lazy;
use regex::Regex;

/// Accent for UNESCO-designated sites and majority-UNESCO clusters.
pub const HERITAGE_ACCENT: Color = Color("#d97706");
/// Accent for user landmarks and majority-landmark clusters.
pub const LANDMARK_ACCENT: Color = Color("#db2777");
/// Base color of the generic fallback category.
pub const POINT_OF_INTEREST_COLOR: Color = Color("#4b5563");
/// Cluster badge color when no majority rule applies.
pub const NEUTRAL_CLUSTER_COLOR: Color = Color("#334155");

/// Render-time sentinel for sites without any type label. Never stored.
pub const UNKNOWN_TYPE_LABEL: &str = "Unknown";

struct CategoryRule {
    category: Category,
    color: Color,
    keywords: &'static [&'static str],
}

// Order is the tie-break: a "Rock Church" inside a "Monastery" complex that is
// also "underground" resolves to Underground.
const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Underground,
        color: Color("#78350f"),
        keywords: &["underground", "subterranean", "unterirdisch", "untergrund", "yeraltı"],
    },
    CategoryRule {
        category: Category::Religious,
        color: Color("#2563eb"),
        keywords: &[
            "church", "chapel", "monastery", "kirche", "kapelle", "kloster", "kilise",
            "manastır", "şapel",
        ],
    },
    CategoryRule {
        category: Category::Fortification,
        color: Color("#dc2626"),
        keywords: &["castle", "fortress", "citadel", "burg", "festung", "kale", "kalesi", "hisar"],
    },
    CategoryRule {
        category: Category::Museum,
        color: Color("#059669"),
        keywords: &["museum", "library", "school", "bibliothek", "müze", "müzesi", "kütüphane", "medrese"],
    },
    CategoryRule {
        category: Category::Mound,
        color: Color("#92400e"),
        keywords: &[
            "höyük", "tell", "hügelgrab", "mound", "tumulus", "archaeological", "archäolog",
            "ören yeri",
        ],
    },
    CategoryRule {
        category: Category::WaterFeature,
        color: Color("#0891b2"),
        keywords: &["bath", "baths", "hamam", "fountain", "cistern", "brunnen", "çeşme", "sarnıç"],
    },
    CategoryRule {
        category: Category::Mosque,
        color: Color("#0ea5e9"),
        keywords: &["mosque", "moschee", "cami", "camii", "mescit"],
    },
    CategoryRule {
        category: Category::Lodging,
        color: Color("#7c3aed"),
        keywords: &["caravanserai", "karawanserei", "kervansaray", "inn", "inns", "hotel"],
    },
    CategoryRule {
        category: Category::ClockTower,
        color: Color("#475569"),
        keywords: &["clock tower", "uhrturm", "saat kulesi"],
    },
];

const SHORT_KEYWORD_MAX_CHARS: usize = 4;

// One matcher per rule, same order as `RULES`.
static RULE_MATCHERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|rule| {
            let alternatives = rule
                .keywords
                .iter()
                .map(|keyword| {
                    let escaped = regex::escape(keyword);
                    if keyword.chars().count() <= SHORT_KEYWORD_MAX_CHARS {
                        format!(r"\b{escaped}\b")
                    } else {
                        escaped
                    }
                })
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&alternatives).expect("valid category keyword regex")
        })
        .collect()
});

/// Classifies a site from its type labels and flags.
pub fn classify(types: &[String], is_unesco: bool, is_user_generated: bool) -> CategoryStyle {
    if is_user_generated {
        return CategoryStyle {
            category: Category::Landmark,
            color: LANDMARK_ACCENT,
        };
    }

    let haystack = types.join(" ").to_lowercase();
    let (category, base_color) = RULES
        .iter()
        .zip(RULE_MATCHERS.iter())
        .find(|(_, matcher)| matcher.is_match(&haystack))
        .map(|(rule, _)| rule)
        .map_or((Category::PointOfInterest, POINT_OF_INTEREST_COLOR), |rule| {
            (rule.category, rule.color)
        });

    CategoryStyle {
        category,
        color: if is_unesco { HERITAGE_ACCENT } else { base_color },
    }
}

/// Convenience wrapper over [`classify`] for a canonical site.
pub fn classify_site(site: &Site) -> CategoryStyle {
    classify(&site.types, site.is_unesco, site.is_user_generated)
}

/// First type label for list rendering, or the `Unknown` sentinel.
pub fn primary_type_label(site: &Site) -> &str {
    site.types
        .first()
        .map_or(UNKNOWN_TYPE_LABEL, String::as_str)
}

// Static display table; unmatched labels are shown as-is.
const TYPE_LABEL_TRANSLATIONS: &[(&str, &str)] = &[
    ("kirche", "Church"),
    ("kapelle", "Chapel"),
    ("kloster", "Monastery"),
    ("burg", "Castle"),
    ("festung", "Fortress"),
    ("moschee", "Mosque"),
    ("bibliothek", "Library"),
    ("unterirdische stadt", "Underground City"),
    ("hügelgrab", "Tumulus"),
    ("karawanserei", "Caravanserai"),
    ("uhrturm", "Clock Tower"),
    ("kilise", "Church"),
    ("manastır", "Monastery"),
    ("kale", "Castle"),
    ("cami", "Mosque"),
    ("müze", "Museum"),
    ("höyük", "Mound"),
    ("hamam", "Bath"),
    ("çeşme", "Fountain"),
    ("kervansaray", "Caravanserai"),
    ("yeraltı şehri", "Underground City"),
    ("saat kulesi", "Clock Tower"),
];

/// Translates a type label to English for display when it is in the table.
pub fn display_type_label(label: &str) -> &str {
    let wanted = label.trim().to_lowercase();
    TYPE_LABEL_TRANSLATIONS
        .iter()
        .find(|(source, _)| *source == wanted)
        .map_or(label, |(_, english)| *english)
}
