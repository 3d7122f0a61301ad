use heritage_core::db::open_db_in_memory;
use heritage_core::{
    filter_sites, CatalogConfig, CategoryFilter, Coords, ExplorerService, FilterQuery,
    NewLandmark, PositionError, PositionFix, RawFeature, Site, SqliteLandmarkRepository,
};

const USER_POSITION: Coords = Coords::new(38.62, 34.72);

fn dataset() -> Vec<RawFeature> {
    vec![
        RawFeature::new("Q1", Coords::new(38.70, 34.80))
            .with_name("Uçhisar Castle")
            .with_type("Castle")
            .with_admin("Nevşehir"),
        RawFeature::new("Q2", Coords::new(38.63, 34.73))
            .with_name("Tokalı Church")
            .with_type("Church")
            .with_admin("Göreme")
            .with_heritage("UNESCO World Heritage"),
        RawFeature::new("Q3", Coords::new(38.63, 34.93))
            .with_name("Ürgüp Museum")
            .with_type("Museum")
            .with_admin("Ürgüp"),
    ]
}

fn catalog_sites() -> Vec<Site> {
    heritage_core::Catalog::build(&dataset(), &[], &Default::default())
        .sites()
        .to_vec()
}

fn names<'a>(sites: impl IntoIterator<Item = &'a Site>) -> Vec<&'a str> {
    sites.into_iter().map(|site| site.name.as_str()).collect()
}

#[test]
fn my_landmarks_shows_only_user_sites_and_empties_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandmarkRepository::new(&conn, "heritage.user_landmarks");
    let mut explorer = ExplorerService::new(CatalogConfig::default(), dataset(), repo);

    let added = explorer
        .add_landmark_at(
            NewLandmark::new("My Discovery", Coords::new(38.70, 34.80)),
            1_700_000_000_000,
        )
        .unwrap();
    assert_eq!(added.id, "user_1700000000000");

    let query = explorer.query("", CategoryFilter::MyLandmarks, false);
    let outcome = explorer.visible(&query);
    assert_eq!(outcome.ids(), vec!["user_1700000000000"]);

    explorer.remove_landmark(&added.id).unwrap();
    let outcome = explorer.visible(&query);
    assert!(outcome.sites.is_empty());
    assert_eq!(explorer.catalog().len(), 3);
}

#[test]
fn nearby_keeps_sites_inside_radius_only() {
    let sites = catalog_sites();
    let query = FilterQuery::new()
        .with_category(CategoryFilter::Nearby)
        .with_position(Some(USER_POSITION));

    let outcome = filter_sites(&sites, &query);
    assert_eq!(names(outcome.site_refs()), vec!["Tokalı Church"]);
    assert!(!outcome.nearby_skipped);

    let distance = outcome.sites[0].distance_km.unwrap();
    assert!((distance - 1.411).abs() < 0.01, "distance was {distance}");
}

#[test]
fn nearby_without_position_is_a_reported_no_op() {
    let sites = catalog_sites();
    let query = FilterQuery::new().with_category(CategoryFilter::Nearby);

    let outcome = filter_sites(&sites, &query);
    assert_eq!(outcome.sites.len(), sites.len());
    assert!(outcome.nearby_skipped);
}

#[test]
fn denied_position_leaves_nearby_unfiltered() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLandmarkRepository::new(&conn, "heritage.user_landmarks");
    let mut explorer = ExplorerService::new(CatalogConfig::default(), dataset(), repo);

    let ticket = explorer.begin_position_request();
    assert!(explorer.complete_position_request(ticket, Err(PositionError::Denied)));
    assert_eq!(explorer.position(), PositionFix::Unavailable(PositionError::Denied));

    let query = explorer.query("", CategoryFilter::Nearby, false);
    let outcome = explorer.visible(&query);
    assert!(outcome.nearby_skipped);
    assert_eq!(outcome.sites.len(), 3);
}

#[test]
fn predicates_combine_as_conjunction() {
    let sites = catalog_sites();

    let by_text = filter_sites(&sites, &FilterQuery::new().with_text("göreme"));
    assert_eq!(names(by_text.site_refs()), vec!["Tokalı Church"]);

    let by_type = filter_sites(
        &sites,
        &FilterQuery::new().with_category(CategoryFilter::parse("castle")),
    );
    assert_eq!(names(by_type.site_refs()), vec!["Uçhisar Castle"]);

    let conflicting = filter_sites(
        &sites,
        &FilterQuery::new()
            .with_category(CategoryFilter::parse("Castle"))
            .with_unesco_only(true),
    );
    assert!(conflicting.sites.is_empty());
}

#[test]
fn clearing_a_predicate_never_shrinks_the_result() {
    let sites = catalog_sites();
    let narrow = FilterQuery::new()
        .with_text("ü")
        .with_category(CategoryFilter::parse("Museum"))
        .with_unesco_only(false);
    let cleared_category = narrow.clone().with_category(CategoryFilter::All);
    let cleared_text = cleared_category.clone().with_text("");

    let narrow_len = filter_sites(&sites, &narrow).sites.len();
    let middle_len = filter_sites(&sites, &cleared_category).sites.len();
    let wide_len = filter_sites(&sites, &cleared_text).sites.len();

    assert!(narrow_len <= middle_len);
    assert!(middle_len <= wide_len);
    assert_eq!(wide_len, sites.len());
}

#[test]
fn known_position_sorts_by_ascending_distance() {
    let sites = catalog_sites();
    let query = FilterQuery::new().with_position(Some(USER_POSITION));

    let outcome = filter_sites(&sites, &query);
    assert_eq!(
        names(outcome.site_refs()),
        vec!["Tokalı Church", "Uçhisar Castle", "Ürgüp Museum"]
    );
    let distances = outcome
        .sites
        .iter()
        .map(|entry| entry.distance_km.unwrap())
        .collect::<Vec<_>>();
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn insertion_order_is_kept_without_position_or_on_override() {
    let sites = catalog_sites();
    let expected = vec!["Uçhisar Castle", "Tokalı Church", "Ürgüp Museum"];

    let outcome = filter_sites(&sites, &FilterQuery::new());
    assert_eq!(names(outcome.site_refs()), expected);
    assert!(outcome.sites.iter().all(|entry| entry.distance_km.is_none()));

    let mut query = FilterQuery::new().with_position(Some(USER_POSITION));
    query.keep_insertion_order = true;
    assert_eq!(names(filter_sites(&sites, &query).site_refs()), expected);
}

#[test]
fn unesco_toggle_narrows_to_designated_sites() {
    let sites = catalog_sites();
    let outcome = filter_sites(&sites, &FilterQuery::new().with_unesco_only(true));
    assert_eq!(names(outcome.site_refs()), vec!["Tokalı Church"]);
}

#[test]
fn text_search_reaches_landmark_descriptions() {
    let mut sites = catalog_sites();
    sites.insert(
        0,
        Site::user_landmark(
            1,
            "Quiet valley spot",
            Coords::new(38.65, 34.85),
            Some("Pigeon houses above the stream".to_string()),
        ),
    );

    let outcome = filter_sites(&sites, &FilterQuery::new().with_text("pigeon"));
    assert_eq!(names(outcome.site_refs()), vec!["Quiet valley spot"]);
}
