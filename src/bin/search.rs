use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hyakumeiten_map::data::filter::{FilterCriteria, Matcher, MAX_RESULTS};
use hyakumeiten_map::data::loader;
use hyakumeiten_map::data::model::Restaurant;
use hyakumeiten_map::data::viewport::Bounds;

#[derive(Parser, Debug)]
#[command(name = "search")]
#[command(about = "Search a Hyakumeiten restaurant export from the command line")]
struct SearchArgs {
    /// Text matched against name, address and station
    query: Option<String>,

    /// Restaurant export (.json or .csv)
    #[arg(long, default_value = "restaurants.json")]
    data: PathBuf,

    /// Category list to report in --stats (JSON array of strings)
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Filter by category
    #[arg(long)]
    category: Option<String>,

    /// Filter by station name
    #[arg(long)]
    region: Option<String>,

    /// Minimum rating
    #[arg(long)]
    min_rating: Option<f64>,

    /// Price bracket, e.g. "￥3,000～￥3,999"
    #[arg(long)]
    price_range: Option<String>,

    /// Only restaurants inside south,west,north,east
    #[arg(long, allow_hyphen_values = true)]
    bounds: Option<Bounds>,

    /// Maximum results (never more than 100)
    #[arg(long, default_value_t = 20)]
    limit: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print dataset statistics instead of searching
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = SearchArgs::parse();

    let mut dataset = loader::load_file(&args.data)
        .with_context(|| format!("loading {}", args.data.display()))?;
    if let Some(path) = &args.categories {
        dataset = dataset.with_categories(loader::load_categories(path)?);
    }

    if args.stats {
        print_stats(&dataset.stats, args.json)?;
        return Ok(());
    }

    let criteria = FilterCriteria {
        query: args.query.clone(),
        category: args.category.clone(),
        region: args.region.clone(),
        min_rating: args.min_rating,
        price_range: args.price_range.clone(),
    };
    let matcher = Matcher::new(&criteria);
    let limit = args.limit.min(MAX_RESULTS);

    let results: Vec<&Restaurant> = dataset
        .restaurants
        .iter()
        .filter(|r| matcher.matches(r))
        .filter(|r| args.bounds.map_or(true, |b| b.contains_restaurant(r)))
        .take(limit)
        .collect();
    log::debug!("{} results for {criteria:?}", results.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No restaurants found");
        return Ok(());
    }

    println!("\nFound {} restaurants:\n", results.len());
    for (i, r) in results.iter().enumerate() {
        println!("{}. {}", i + 1, r.name);
        if let Some(rating) = r.rating {
            println!("   Rating: {rating:.2}");
        }
        let fields = [
            ("Categories", &r.categories),
            ("Price", &r.price_range),
            ("Address", &r.address),
            ("Station", &r.station),
            ("URL", &r.url),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                println!("   {label}: {value}");
            }
        }
        println!();
    }
    Ok(())
}

fn print_stats(stats: &hyakumeiten_map::data::model::DatasetStats, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("DATASET STATISTICS");
    println!("{rule}");
    println!("Total restaurants: {}", stats.total_restaurants);
    println!("Restaurants with coordinates: {}", stats.restaurants_with_coords);
    println!("Total categories: {}", stats.total_categories);
    match stats.avg_rating {
        Some(avg) => println!("Average rating: {avg:.2}"),
        None => println!("Average rating: -"),
    }
    println!("{rule}\n");
    Ok(())
}
