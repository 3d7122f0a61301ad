use heritage_core::catalog::aggregate::aggregate_sites;
use heritage_core::config::LinkTemplates;
use heritage_core::{classify_site, primary_type_label, Catalog, Category, Coords, RawFeature, Site};
use std::collections::BTreeSet;

fn goreme_features() -> Vec<RawFeature> {
    let coords = Coords::new(38.62, 34.72);
    vec![
        RawFeature::new("Q123", coords)
            .with_name("Karanlık Kilise")
            .with_type("Church"),
        RawFeature::new("Q123", coords)
            .with_name("Karanlık Kilise")
            .with_type("Monastery")
            .with_heritage("UNESCO World Heritage"),
        RawFeature::new("Q500", Coords::new(38.37, 34.73))
            .with_name("Derinkuyu")
            .with_type("Underground City")
            .with_admin("Derinkuyu"),
    ]
}

fn links() -> LinkTemplates {
    LinkTemplates::default()
}

#[test]
fn duplicate_rows_merge_into_one_site() {
    let sites = aggregate_sites(&goreme_features(), &[], &links());

    assert_eq!(sites.len(), 2);
    let church = &sites[0];
    assert_eq!(church.types, vec!["Church".to_string(), "Monastery".to_string()]);
    assert!(church.is_unesco);
    assert!(!church.is_user_generated);
    assert_eq!(church.coords(), Coords::new(38.62, 34.72));
}

#[test]
fn same_token_at_other_coordinates_is_a_distinct_site() {
    let features = vec![
        RawFeature::new("Q7", Coords::new(38.0, 34.0)).with_name("North"),
        RawFeature::new("Q7", Coords::new(38.5, 34.0)).with_name("South"),
    ];
    let sites = aggregate_sites(&features, &[], &links());
    assert_eq!(sites.len(), 2);
    assert_ne!(sites[0].id, sites[1].id);
}

#[test]
fn aggregation_is_idempotent() {
    let features = goreme_features();
    let first = aggregate_sites(&features, &[], &links());
    let second = aggregate_sites(&features, &[], &links());
    assert_eq!(first, second);
}

#[test]
fn permuted_input_keeps_ids_type_sets_and_designation() {
    let features = goreme_features();
    let mut reversed = features.clone();
    reversed.reverse();

    let summarize = |sites: Vec<Site>| {
        sites
            .into_iter()
            .map(|site| {
                (
                    site.id,
                    site.types.into_iter().collect::<BTreeSet<_>>(),
                    site.is_unesco,
                )
            })
            .collect::<BTreeSet<_>>()
    };

    assert_eq!(
        summarize(aggregate_sites(&features, &[], &links())),
        summarize(aggregate_sites(&reversed, &[], &links()))
    );
}

#[test]
fn non_unesco_fragment_never_clears_designation() {
    let coords = Coords::new(38.62, 34.72);
    let features = vec![
        RawFeature::new("Q123", coords).with_heritage("UNESCO World Heritage"),
        RawFeature::new("Q123", coords).with_heritage("registered monument"),
        RawFeature::new("Q123", coords),
    ];
    let sites = aggregate_sites(&features, &[], &links());
    assert_eq!(sites.len(), 1);
    assert!(sites[0].is_unesco);
}

#[test]
fn feature_without_type_still_yields_site_and_renders_unknown() {
    let features = vec![RawFeature::new("Q9", Coords::new(38.6, 34.8)).with_name("Nameless rock")];
    let catalog = Catalog::build(&features, &[], &links());

    let site = &catalog.sites()[0];
    assert!(site.types.is_empty());
    assert_eq!(primary_type_label(site), "Unknown");
    assert_eq!(classify_site(site).category, Category::PointOfInterest);
}

#[test]
fn user_sites_come_first_in_given_order() {
    let newer = Site::user_landmark(2_000, "Newer", Coords::new(38.70, 34.80), None);
    let older = Site::user_landmark(1_000, "Older", Coords::new(38.71, 34.81), None);
    let catalog = Catalog::build(&goreme_features(), &[newer, older], &links());

    let names = catalog
        .sites()
        .iter()
        .map(|site| site.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Newer", "Older", "Karanlık Kilise", "Derinkuyu"]);
    assert!(catalog.get("user_1000").is_some());
}

#[test]
fn catalog_snapshot_exposes_sorted_type_labels() {
    let catalog = Catalog::build(&goreme_features(), &[], &links());
    assert_eq!(
        catalog.type_labels(),
        vec![
            "Church".to_string(),
            "Monastery".to_string(),
            "Underground City".to_string()
        ]
    );
}

#[test]
fn signed_zero_coordinates_merge_into_one_site() {
    let features = vec![
        RawFeature::new("Q0", Coords::new(0.0, 0.0)).with_type("Fountain"),
        RawFeature::new("Q0", Coords::new(-0.0, -0.0)).with_type("Cistern"),
    ];
    let sites = aggregate_sites(&features, &[], &links());
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].types, vec!["Fountain".to_string(), "Cistern".to_string()]);
}
