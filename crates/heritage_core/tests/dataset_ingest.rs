use heritage_core::config::LinkTemplates;
use heritage_core::model::site::ArchivePortal;
use heritage_core::{load_dataset_file, parse_dataset, Catalog, Coords, DatasetError};
use std::io::Write;

const SPARQL_EXPORT: &str = r#"{
  "head": { "vars": ["item", "itemLabel", "coords", "typeLabel", "heritageLabel"] },
  "results": {
    "bindings": [
      {
        "item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q123" },
        "itemLabel": { "type": "literal", "value": "Karanlık Kilise" },
        "coords": { "type": "literal", "value": "Point(34.72 38.62)" },
        "typeLabel": { "type": "literal", "value": "Church" }
      },
      {
        "item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q123" },
        "itemLabel": { "type": "literal", "value": "Karanlık Kilise" },
        "coords": { "type": "literal", "value": "Point(34.72 38.62)" },
        "typeLabel": { "type": "literal", "value": "Monastery" },
        "heritageLabel": { "type": "literal", "value": "UNESCO World Heritage" },
        "kulturenvanteriID": { "type": "literal", "value": "9001" }
      }
    ]
  }
}"#;

#[test]
fn sparql_export_aggregates_into_one_designated_site() {
    let features = parse_dataset(SPARQL_EXPORT).unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0].coords, Coords::new(38.62, 34.72));

    let catalog = Catalog::build(&features, &[], &LinkTemplates::default());
    assert_eq!(catalog.len(), 1);

    let site = &catalog.sites()[0];
    assert_eq!(site.types, vec!["Church".to_string(), "Monastery".to_string()]);
    assert!(site.is_unesco);
    assert_eq!(
        site.external_links.primary.as_deref(),
        Some("http://www.wikidata.org/entity/Q123")
    );
    assert!(site
        .external_links
        .archive(ArchivePortal::KulturEnvanteri)
        .is_some());
}

#[test]
fn geojson_file_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sites.geojson");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(
        br#"{
          "type": "FeatureCollection",
          "features": [
            {
              "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [34.80, 38.70] },
              "properties": { "item": "Q1", "itemLabel": "Uchisar Castle", "typeLabel": "Castle" }
            },
            {
              "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [34.73, 38.63] },
              "properties": { "item": "Q2" }
            }
          ]
        }"#,
    )
    .unwrap();
    drop(file);

    let features = load_dataset_file(&path).unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0].name.as_deref(), Some("Uchisar Castle"));
    assert_eq!(features[1].name, None);
    assert_eq!(features[1].type_label, None);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_dataset_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, DatasetError::Io(_)));
}

#[test]
fn non_numeric_coordinate_fails_the_load() {
    let err = parse_dataset(
        r#"{
          "type": "FeatureCollection",
          "features": [{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": ["east", 38.7] },
            "properties": { "item": "Q1" }
          }]
        }"#,
    )
    .unwrap_err();

    match err {
        DatasetError::InvalidRecord { index, .. } => assert_eq!(index, 0),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn explicit_empty_admin_reaches_the_site() {
    let features = parse_dataset(
        r#"{
          "type": "FeatureCollection",
          "features": [
            {
              "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [34.80, 38.70] },
              "properties": { "item": "Q1", "itemLabel": "Blank admin", "adminLabel": "" }
            },
            {
              "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [34.73, 38.63] },
              "properties": { "item": "Q2", "itemLabel": "No admin" }
            }
          ]
        }"#,
    )
    .unwrap();

    let catalog = Catalog::build(&features, &[], &LinkTemplates::default());
    assert_eq!(catalog.sites()[0].admin.as_deref(), Some(""));
    assert_eq!(catalog.sites()[1].admin, None);
}
