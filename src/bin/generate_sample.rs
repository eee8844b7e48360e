use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use hyakumeiten_map::data::model::{Restaurant, PRICE_RANGES};

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write a deterministic sample restaurants.json / categories.json")]
struct GenerateArgs {
    /// Number of restaurants to generate
    #[arg(long, default_value_t = 600)]
    count: usize,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Station name and its approximate position.
const STATIONS: [(&str, f64, f64); 10] = [
    ("五反田", 35.6262, 139.7233),
    ("渋谷", 35.6580, 139.7016),
    ("新宿", 35.6896, 139.7006),
    ("銀座", 35.6717, 139.7650),
    ("恵比寿", 35.6467, 139.7101),
    ("目黒", 35.6339, 139.7157),
    ("神田", 35.6918, 139.7709),
    ("浅草", 35.7118, 139.7967),
    ("池袋", 35.7295, 139.7109),
    ("中目黒", 35.6440, 139.6988),
];

const CATEGORIES: [&str; 12] = [
    "寿司",
    "ラーメン",
    "焼肉",
    "そば",
    "うどん",
    "天ぷら",
    "とんかつ",
    "カレー",
    "イタリアン",
    "フレンチ",
    "中華料理",
    "居酒屋",
];

const NAME_PREFIXES: [&str; 8] = [
    "鮨", "麺屋", "炭火", "手打ち", "洋食", "酒場", "料理", "食堂",
];
const NAME_STEMS: [&str; 8] = [
    "さくら", "松風", "一心", "竹林", "銀杏", "青葉", "月島", "藤",
];

/// Minimal deterministic PRNG (xoshiro256**). The same seed must keep
/// producing the same sample file, so it does not depend on a crate's
/// stream staying stable across versions.
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn restaurant(i: usize, rng: &mut SimpleRng) -> Restaurant {
    let &(station, lat, lng) = rng.pick(&STATIONS);
    let primary = *rng.pick(&CATEGORIES);
    let categories = if rng.next_f64() < 0.3 {
        format!("{primary}、{}", rng.pick(&CATEGORIES))
    } else {
        primary.to_string()
    };

    // Roughly one in ten has no geocoded position.
    let placed = rng.next_f64() >= 0.1;
    let (latitude, longitude) = if placed {
        (
            Some(lat + rng.uniform(-0.008, 0.008)),
            Some(lng + rng.uniform(-0.008, 0.008)),
        )
    } else {
        (None, None)
    };

    let rating = (rng.uniform(3.0, 4.6) * 100.0).round() / 100.0;
    let name = format!("{}{} {}", rng.pick(&NAME_PREFIXES), rng.pick(&NAME_STEMS), i + 1);

    Restaurant {
        name,
        address: Some(format!("東京都 {station}{}-{}", i % 7 + 1, i % 23 + 1)),
        station: Some(format!("{station}駅")),
        categories: Some(categories),
        rating: Some(rating),
        review_count: Some((rng.next_u64() % 2000) as u32 + 20),
        price_range: Some(rng.pick(&PRICE_RANGES).to_string()),
        latitude,
        longitude,
        phone: Some(format!("03-{:04}-{:04}", i % 10000, (i * 37) % 10000)),
        hours: None,
        closed: None,
        url: Some(format!("https://tabelog.com/tokyo/sample/{:08}/", 13000000 + i)),
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = GenerateArgs::parse();
    let mut rng = SimpleRng::new(args.seed);

    let restaurants: Vec<Restaurant> = (0..args.count)
        .map(|i| restaurant(i, &mut rng))
        .collect();

    let restaurants_path = args.out.join("restaurants.json");
    write_json(&restaurants_path, &restaurants)?;

    let categories_path = args.out.join("categories.json");
    write_json(&categories_path, &CATEGORIES[..])?;

    let placed = restaurants.iter().filter(|r| r.coordinates().is_some()).count();
    println!(
        "Wrote {} restaurants ({placed} with coordinates) to {}",
        restaurants.len(),
        restaurants_path.display()
    );
    println!(
        "Wrote {} categories to {}",
        CATEGORIES.len(),
        categories_path.display()
    );
    Ok(())
}
