//! GeoJSON `FeatureCollection` decoder.
//!
//! Point coordinates are `[lon, lat]`. Property names follow the upstream
//! export (`item`, `itemLabel`, `typeLabel`, ...).

use super::{checked_coords, required_token, scalar_text, DatasetError, DatasetResult};
use crate::model::feature::RawFeature;
use serde_json::Value;

pub(super) fn decode(document: &Value) -> DatasetResult<Vec<RawFeature>> {
    let features = document
        .get("features")
        .and_then(Value::as_array)
        .ok_or(DatasetError::UnsupportedShape)?;

    features
        .iter()
        .enumerate()
        .map(|(index, feature)| decode_feature(index, feature))
        .collect()
}

fn decode_feature(index: usize, feature: &Value) -> DatasetResult<RawFeature> {
    let invalid = |message: &str| DatasetError::InvalidRecord {
        index,
        message: message.to_string(),
    };

    let geometry = feature.get("geometry").ok_or_else(|| invalid("missing geometry"))?;
    if geometry.get("type").and_then(Value::as_str) != Some("Point") {
        return Err(invalid("geometry must be a Point"));
    }
    let position = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .filter(|position| position.len() >= 2)
        .ok_or_else(|| invalid("Point needs [lon, lat] coordinates"))?;
    let (Some(lon), Some(lat)) = (position[0].as_f64(), position[1].as_f64()) else {
        return Err(invalid("non-numeric coordinate"));
    };

    let properties = feature.get("properties");
    let prop = |key: &str| scalar_text(properties.and_then(|props| props.get(key)));

    Ok(RawFeature {
        token: required_token(index, prop("item"))?,
        coords: checked_coords(index, lat, lon)?,
        name: prop("itemLabel"),
        type_label: prop("typeLabel"),
        admin_label: prop("adminLabel"),
        image: prop("image"),
        heritage_label: prop("heritageLabel"),
        kulturenvanteri_id: prop("kulturenvanteriID"),
        culture_portal_id: prop("culturePortalID"),
    })
}
