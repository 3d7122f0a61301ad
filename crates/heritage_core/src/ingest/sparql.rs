//! SPARQL JSON result-set decoder.
//!
//! Each binding maps a variable to `{ "type": ..., "value": ... }`; the
//! `coords` variable holds a WKT literal `Point(lon lat)`.

use super::{checked_coords, required_token, scalar_text, DatasetError, DatasetResult};
use crate::model::feature::RawFeature;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static WKT_POINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*point\s*\(\s*(\S+)\s+(\S+)\s*\)\s*$").expect("valid wkt point regex")
});

pub(super) fn decode(document: &Value) -> DatasetResult<Vec<RawFeature>> {
    let bindings = document
        .get("results")
        .and_then(|results| results.get("bindings"))
        .and_then(Value::as_array)
        .ok_or(DatasetError::UnsupportedShape)?;

    bindings
        .iter()
        .enumerate()
        .map(|(index, binding)| decode_binding(index, binding))
        .collect()
}

fn decode_binding(index: usize, binding: &Value) -> DatasetResult<RawFeature> {
    let var = |key: &str| scalar_text(binding.get(key).and_then(|cell| cell.get("value")));

    let wkt = var("coords").ok_or_else(|| DatasetError::InvalidRecord {
        index,
        message: "missing `coords` binding".to_string(),
    })?;
    let (lon, lat) = parse_wkt_point(&wkt).ok_or_else(|| DatasetError::InvalidRecord {
        index,
        message: format!("malformed WKT point `{wkt}`"),
    })?;

    Ok(RawFeature {
        token: required_token(index, var("item"))?,
        coords: checked_coords(index, lat, lon)?,
        name: var("itemLabel"),
        type_label: var("typeLabel"),
        admin_label: var("adminLabel"),
        image: var("image"),
        heritage_label: var("heritageLabel"),
        kulturenvanteri_id: var("kulturenvanteriID"),
        culture_portal_id: var("culturePortalID"),
    })
}

/// Parses `Point(lon lat)` into `(lon, lat)`.
fn parse_wkt_point(wkt: &str) -> Option<(f64, f64)> {
    let caps = WKT_POINT_RE.captures(wkt)?;
    let lon = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let lat = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some((lon, lat))
}

#[cfg(test)]
mod tests {
    use super::{decode, parse_wkt_point};
    use serde_json::json;

    #[test]
    fn wkt_point_is_lon_then_lat() {
        assert_eq!(
            parse_wkt_point("Point(34.750443 38.465686)"),
            Some((34.750443, 38.465686))
        );
        assert_eq!(parse_wkt_point("POINT ( 1 2 )"), Some((1.0, 2.0)));
        assert_eq!(parse_wkt_point("Point(abc 2)"), None);
        assert_eq!(parse_wkt_point("LineString(1 2, 3 4)"), None);
    }

    #[test]
    fn decodes_binding_values() {
        let document = json!({
            "results": { "bindings": [{
                "item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q1013468" },
                "coords": { "type": "literal", "value": "Point(34.750443 38.465686)" },
                "image": { "type": "uri", "value": "http://commons.wikimedia.org/wiki/Special:FilePath/K.JPG" },
                "itemLabel": { "type": "literal", "value": "Kaymaklı Underground City" },
                "typeLabel": { "type": "literal", "value": "Underground City" },
                "adminLabel": { "type": "literal", "value": "Nevşehir" },
                "heritageLabel": { "type": "literal", "value": "UNESCO World Heritage" }
            }] }
        });
        let features = decode(&document).expect("valid bindings should decode");
        let feature = &features[0];
        assert_eq!(feature.token, "http://www.wikidata.org/entity/Q1013468");
        assert_eq!(feature.coords.lat, 38.465686);
        assert_eq!(feature.name.as_deref(), Some("Kaymaklı Underground City"));
        assert_eq!(feature.heritage_label.as_deref(), Some("UNESCO World Heritage"));
        assert_eq!(feature.kulturenvanteri_id, None);
    }
}
