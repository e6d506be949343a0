//! Reverse-geocode a single coordinate from the command line.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use landfall::cache::ResultCache;
use landfall::config::Config;
use landfall::loader::Dataset;
use landfall::models::{LookupMode, LookupResult};
use landfall::service::LookupService;

#[derive(Parser, Debug)]
#[command(name = "locate")]
#[command(about = "Resolve a coordinate to its administrative boundary")]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "landfall.toml")]
    config: String,

    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// Output mode: properties, raw or geojson
    #[arg(long, default_value = "properties")]
    mode: String,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let mode: LookupMode = args.mode.parse().map_err(anyhow::Error::msg)?;

    let config = Config::load_from_file(&args.config)?;
    let dataset = Dataset::load(&config.dataset.dir, config.dataset.variant)?;
    let (index, tables) = dataset.into_parts();

    let cache =
        (config.cache.capacity_bytes > 0).then(|| ResultCache::new(config.cache.capacity_bytes));
    let service = LookupService::new(index, cache);

    match service.lookup(args.lat, args.lng, mode) {
        Ok(Some(result)) => {
            if let LookupResult::Properties(props) = &result {
                if let Some(country) = tables.country(&props.country_a2) {
                    info!("Matched {}", country.name);
                }
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Ok(None) => println!("null"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    }

    Ok(())
}
