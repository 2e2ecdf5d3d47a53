//! Basic example demonstrating routeguide library usage.
//!
//! Run with: cargo run --example basic -- testdata/route_guide_db.json

use routeguide::{distance, in_range, FeatureStore, LoadError, Point, Rectangle};
use std::env;

fn main() -> Result<(), LoadError> {
    let path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example basic -- /path/to/route_guide_db.json");
        std::process::exit(1);
    });

    let store = FeatureStore::load(&path)?;
    println!("Loaded {} features from {}", store.len(), path);

    for point in [Point::new(409146138, -746188906), Point::new(0, 0)] {
        let feature = store.get_exact(point);
        if feature.is_named() {
            println!("{}: {}", point, feature.name);
        } else {
            println!("{}: no feature", point);
        }
    }

    let rect = Rectangle::new(
        Point::new(400000000, -750000000),
        Point::new(420000000, -730000000),
    );
    println!("{:-<50}", "");
    for feature in store.all_matching(|p| in_range(p, &rect)) {
        println!("{:>10.5} {:>10.5}  {}", feature.location.lat_degrees(), feature.location.lon_degrees(), feature.name);
    }

    let a = Point::new(409146138, -746188906);
    let b = Point::new(407838351, -746143763);
    println!("{:-<50}", "");
    println!("{} -> {}: {} m", a, b, distance(a, b));

    Ok(())
}
