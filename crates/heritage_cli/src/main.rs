//! Command-line probe over `heritage_core`.
//!
//! # Responsibility
//! - Load a dataset and landmark store, then list, filter or project sites.
//! - Keep output deterministic for quick local sanity checks.

use clap::{Args, Parser, Subcommand};
use heritage_core::catalog::classify::display_type_label;
use heritage_core::db::open_db;
use heritage_core::{
    classify_site, init_logging, load_dataset_file, primary_type_label, CatalogConfig,
    CategoryFilter, Coords, ExplorerService, FilterQuery, NewLandmark, SqliteLandmarkRepository,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "heritage", version, about = "Heritage catalog engine probe")]
struct Cli {
    /// Dataset file (GeoJSON FeatureCollection or SPARQL JSON results).
    #[arg(long)]
    dataset: PathBuf,
    /// SQLite file holding user landmarks.
    #[arg(long, default_value = "heritage.sqlite3")]
    db: PathBuf,
    /// Optional JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Absolute directory for rotated log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,
    #[arg(long, default_value_t = heritage_core::default_log_level().to_string())]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print visible sites for a filter state.
    List(FilterArgs),
    /// Print the sorted distinct type labels.
    Categories,
    /// Print the marker layer for a filter state as JSON.
    Markers(FilterArgs),
    /// Add a user landmark.
    AddLandmark {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a user landmark by id.
    RemoveLandmark { id: String },
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long, default_value = "")]
    search: String,
    /// ALL, MY LANDMARKS, NEARBY or a type label.
    #[arg(long, default_value = "ALL")]
    category: String,
    #[arg(long)]
    unesco_only: bool,
    /// User position as `lat,lon`.
    #[arg(long, value_parser = parse_coords, allow_hyphen_values = true)]
    near: Option<Coords>,
    /// Keep insertion order even when a position is given.
    #[arg(long)]
    keep_order: bool,
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir)?;
    }

    let config = match cli.config.as_ref() {
        Some(path) => CatalogConfig::from_json_file(path)?,
        None => CatalogConfig::default(),
    };
    let features = load_dataset_file(&cli.dataset)?;
    let conn = open_db(&cli.db)?;
    let repo = SqliteLandmarkRepository::new(&conn, config.landmark_namespace.clone());
    let mut explorer = ExplorerService::new(config, features, repo);
    info!(
        "event=cli_start module=cli status=ok version={} sites={} landmarks={}",
        heritage_core::core_version(),
        explorer.catalog().len(),
        explorer.landmarks().len()
    );

    match cli.command {
        Command::List(args) => {
            let query = build_query(&mut explorer, &args);
            let outcome = explorer.visible(&query);
            if outcome.nearby_skipped {
                println!("# NEARBY ignored: position unavailable");
            }
            println!("{} LOCATIONS", outcome.sites.len());
            for entry in &outcome.sites {
                let site = entry.site;
                let distance = entry
                    .distance_km
                    .map(|km| format!("{km:.1} km  "))
                    .unwrap_or_default();
                println!(
                    "{distance}{}  [{}]  {}{}  ({})",
                    site.name,
                    display_type_label(primary_type_label(site)),
                    site.admin.as_deref().unwrap_or("-"),
                    if site.is_unesco { "  UNESCO" } else { "" },
                    classify_site(site).category
                );
                if let Some(image) = site.image.as_deref() {
                    println!("    image: {}", explorer.config().images.thumbnail_url(image));
                }
            }
        }
        Command::Categories => {
            for label in explorer.catalog().type_labels() {
                println!("{label}");
            }
        }
        Command::Markers(args) => {
            let query = build_query(&mut explorer, &args);
            let markers = explorer.markers(&query);
            println!("{}", serde_json::to_string_pretty(&markers)?);
        }
        Command::AddLandmark {
            name,
            lat,
            lon,
            description,
        } => {
            let mut request = NewLandmark::new(name, Coords::new(lat, lon));
            request.description = description;
            let site = explorer.add_landmark(request)?;
            println!("added {}", site.id);
        }
        Command::RemoveLandmark { id } => {
            let site = explorer.remove_landmark(&id)?;
            println!("removed {}", site.id);
        }
    }

    Ok(())
}

fn build_query<R: heritage_core::LandmarkRepository>(
    explorer: &mut ExplorerService<R>,
    args: &FilterArgs,
) -> FilterQuery {
    if let Some(coords) = args.near {
        let ticket = explorer.begin_position_request();
        explorer.complete_position_request(ticket, Ok(coords));
    }
    let mut query = explorer.query(
        args.search.clone(),
        CategoryFilter::parse(&args.category),
        args.unesco_only,
    );
    query.keep_insertion_order = args.keep_order;
    query
}

fn parse_coords(value: &str) -> Result<Coords, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lon`, got `{value}`"))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid latitude `{lat}`: {err}"))?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid longitude `{lon}`: {err}"))?;
    let coords = Coords::new(lat, lon);
    if !coords.is_valid() {
        return Err(format!("coordinates out of range: `{value}`"));
    }
    Ok(coords)
}
